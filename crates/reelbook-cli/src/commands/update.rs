use super::{form, interactive, render, render_home, show_alert, ui, AppContext, DraftArgs};
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use movie_sync_core::{UpdateFlow, UpdateOutcome};
use movie_sync_models::MovieId;
use serde_json::json;

/// Edit-by-id: fetch one record, update it, then return to the list after the redirect delay
pub async fn run_update(ctx: &AppContext, id: &str, fields: &DraftArgs, output: &Output) -> Result<()> {
    let controller = ctx.controller()?;
    let interactive = interactive(output);
    let mut flow = UpdateFlow::new(
        controller.store().clone(),
        MovieId::new(id),
        ctx.config.ui.redirect_delay(),
    );

    ui::with_spinner("Fetching movie...", flow.load())
        .await
        .wrap_err_with(|| format!("Failed to fetch movie {}", id))?;

    if interactive {
        output.block(render::draft_table("Update Movie", flow.draft(), flow.errors(), None));
    }

    let draft = form::complete_draft(flow.draft().clone(), fields, interactive)?;
    *flow.draft_mut() = draft;

    let updated = loop {
        match ui::with_spinner("Updating movie...", flow.submit()).await {
            UpdateOutcome::Updated(record) => break record,
            UpdateOutcome::Invalid(errors) => {
                output.field_errors(&errors);
                if !interactive {
                    return Err(eyre!("{}", errors));
                }
                form::reprompt_invalid(flow.draft_mut(), &errors)?;
            }
            UpdateOutcome::Failed(e) => {
                show_alert(&controller, output).await;
                return Err(e).wrap_err("Failed to update movie");
            }
            UpdateOutcome::NotEditing => return Err(eyre!("Movie {} is not open for editing", id)),
        }
    };

    show_alert(&controller, output).await;
    output.json(&json!({ "movie": updated }));

    ui::with_spinner("Returning to the movie list...", flow.wait_for_redirect())
        .await
        .wrap_err("Failed to reload movies")?;
    render_home(&controller, output).await;

    controller.shutdown().await;
    Ok(())
}
