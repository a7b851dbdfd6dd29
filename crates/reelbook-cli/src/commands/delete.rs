use super::prompts::prompt_yes_no;
use super::{interactive, show_alert, ui, AppContext};
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use movie_sync_core::{Action, Outcome};
use movie_sync_models::MovieId;
use serde_json::json;

pub fn confirmation_prompt(movie_name: &str) -> String {
    format!("Are you sure you want to delete the movie \"{}\"?", movie_name)
}

pub async fn run_delete(ctx: &AppContext, id: &str, yes: bool, output: &Output) -> Result<()> {
    let controller = ctx.controller()?;
    let movie_id = MovieId::new(id);

    ui::with_spinner("Fetching movies...", controller.start())
        .await
        .wrap_err("Failed to fetch movies")?;

    if !yes {
        if !interactive(output) {
            return Err(eyre!("Refusing to delete without confirmation; pass --yes"));
        }
        let name = controller
            .store()
            .find(&movie_id)
            .await
            .map(|m| m.movie_name)
            .unwrap_or_else(|| id.to_string());
        if !prompt_yes_no(&confirmation_prompt(&name), Some(false))? {
            output.info("Delete cancelled.");
            return Ok(());
        }
    }

    let outcome = ui::with_spinner("Deleting movie...", controller.handle(Action::Delete(movie_id.clone()))).await;
    show_alert(&controller, output).await;

    if let Outcome::Deleted(result) = outcome {
        result.wrap_err_with(|| format!("Failed to delete movie {}", movie_id))?;
    }
    output.json(&json!({ "deleted": movie_id, "remaining": controller.store().movies().await.len() }));

    controller.shutdown().await;
    Ok(())
}
