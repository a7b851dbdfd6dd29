use super::{render_home, ui, AppContext};
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use movie_sync_core::Action;
use movie_sync_models::Genre;

pub async fn run_list(ctx: &AppContext, genre: Option<Genre>, search: Option<String>, output: &Output) -> Result<()> {
    tracing::debug!(?genre, ?search, "List command started");
    let controller = ctx.controller()?;

    ui::with_spinner("Fetching movies...", controller.start())
        .await
        .wrap_err("Failed to fetch movies")?;

    controller.handle(Action::FilterGenre(genre)).await;
    if let Some(text) = search {
        controller.handle(Action::Search(text)).await;
    }

    render_home(&controller, output).await;
    controller.shutdown().await;
    Ok(())
}
