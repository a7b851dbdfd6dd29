use super::{form, interactive, render, show_alert, ui, AppContext, DraftArgs};
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use movie_sync_core::{Action, Outcome};
use movie_sync_models::{FormDraft, MovieId};
use serde_json::json;

/// Inline edit: open a record from the loaded list in the form
pub async fn run_edit(ctx: &AppContext, id: &str, fields: &DraftArgs, output: &Output) -> Result<()> {
    let controller = ctx.controller()?;
    let interactive = interactive(output);

    ui::with_spinner("Fetching movies...", controller.start())
        .await
        .wrap_err("Failed to fetch movies")?;

    let target = match controller.handle(Action::Edit(MovieId::new(id))).await {
        Outcome::UnknownMovie(id) => return Err(eyre!("Movie {} is not in the catalog", id)),
        _ => controller
            .store()
            .view()
            .await
            .edit_target()
            .cloned()
            .ok_or_else(|| eyre!("Movie {} could not be opened for editing", id))?,
    };

    if interactive {
        output.block(render::draft_table(
            "Edit Movie",
            &FormDraft::from_record(&target),
            &Default::default(),
            Some(&target.created_at),
        ));
    }

    let draft = form::complete_draft(FormDraft::from_record(&target), fields, interactive)?;
    let saved = form::submit_until_saved(&controller, draft, interactive, output).await?;

    show_alert(&controller, output).await;
    output.json(&json!({ "movie": saved }));
    output.block(render::movie_detail(&saved));

    controller.shutdown().await;
    Ok(())
}
