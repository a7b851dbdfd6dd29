use super::{render, ui, AppContext};
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use movie_sync_models::MovieId;
use serde_json::json;

pub async fn run_show(ctx: &AppContext, id: &str, output: &Output) -> Result<()> {
    let controller = ctx.controller()?;
    let id = MovieId::new(id);

    let movie = ui::with_spinner("Fetching movie...", controller.store().fetch_one(&id))
        .await
        .wrap_err_with(|| format!("Failed to fetch movie {}", id))?;

    output.json(&json!({ "movie": movie }));
    output.block(render::movie_detail(&movie));
    Ok(())
}
