use super::{form, interactive, render, show_alert, AppContext, DraftArgs};
use crate::output::Output;
use color_eyre::Result;
use movie_sync_core::Action;
use movie_sync_models::FormDraft;
use serde_json::json;

pub async fn run_add(ctx: &AppContext, fields: &DraftArgs, output: &Output) -> Result<()> {
    let controller = ctx.controller()?;
    let interactive = interactive(output);

    controller.handle(Action::Create).await;
    if interactive {
        output.info("Add Movie");
    }

    let draft = form::complete_draft(FormDraft::new(), fields, interactive)?;
    let saved = form::submit_until_saved(&controller, draft, interactive, output).await?;

    show_alert(&controller, output).await;
    output.json(&json!({ "movie": saved }));
    output.block(render::movie_detail(&saved));

    controller.shutdown().await;
    Ok(())
}
