use super::delete::confirmation_prompt;
use super::prompts::{prompt_select, prompt_string, prompt_yes_no};
use super::{form, interactive, render, render_home, show_alert, ui, AppContext};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_sync_core::{Action, Outcome, SubmitOutcome, ValidationErrors, ViewController};
use movie_sync_models::{DraftField, FormDraft, Genre, MovieRecord};

const MENU: [&str; 7] = [
    "Filter by genre",
    "Search by name",
    "Add movie",
    "Edit movie",
    "Delete movie",
    "Refresh",
    "Quit",
];

/// Interactive session over one controller; alerts persist between screens
pub async fn run_browse(ctx: &AppContext, output: &Output) -> Result<()> {
    if !interactive(output) {
        return Err(eyre!("browse needs an interactive terminal"));
    }

    let controller = ctx.controller()?;
    if let Err(e) = ui::with_spinner("Fetching movies...", controller.start()).await {
        output.warn(format!("Could not load movies: {}", e));
    }

    loop {
        render_home(&controller, output).await;
        show_alert(&controller, output).await;

        match prompt_select("What next?", &MENU, 0)? {
            0 => pick_genre(&controller).await?,
            1 => {
                let current = controller.store().filter().await.search_text;
                let text = prompt_string("Search by name (empty clears)", Some(&current))?;
                controller.handle(Action::Search(text)).await;
            }
            2 => {
                controller.handle(Action::Create).await;
                form_session(&controller, output).await?;
            }
            3 => {
                if let Some(movie) = pick_movie(&controller, "Edit which movie?").await? {
                    controller.handle(Action::Edit(movie.id)).await;
                    form_session(&controller, output).await?;
                }
            }
            4 => {
                if let Some(movie) = pick_movie(&controller, "Delete which movie?").await? {
                    if prompt_yes_no(&confirmation_prompt(&movie.movie_name), Some(false))? {
                        ui::with_spinner("Deleting movie...", controller.handle(Action::Delete(movie.id))).await;
                    }
                }
            }
            5 => {
                if let Outcome::Refreshed(Err(e)) =
                    ui::with_spinner("Fetching movies...", controller.handle(Action::Refresh)).await
                {
                    output.warn(format!("Could not load movies: {}", e));
                }
            }
            _ => break,
        }
    }

    controller.shutdown().await;
    Ok(())
}

async fn pick_genre(controller: &ViewController) -> Result<()> {
    let mut items = vec!["All genres"];
    items.extend(Genre::ALL.iter().map(|g| g.as_str()));
    let current = controller.store().filter().await.genre;
    let default = current
        .and_then(|g| Genre::ALL.iter().position(|x| *x == g))
        .map(|i| i + 1)
        .unwrap_or(0);

    let choice = prompt_select("Genre", &items, default)?;
    let genre = choice.checked_sub(1).and_then(|i| Genre::ALL.get(i).copied());
    controller.handle(Action::FilterGenre(genre)).await;
    Ok(())
}

async fn pick_movie(controller: &ViewController, prompt: &str) -> Result<Option<MovieRecord>> {
    let visible = controller.store().visible_movies().await;
    if visible.is_empty() {
        return Ok(None);
    }
    let mut items: Vec<String> = visible
        .iter()
        .map(|m| format!("{} ({}, {})", m.movie_name, m.genre, m.id))
        .collect();
    items.push("Cancel".to_string());

    let choice = prompt_select(prompt, &items, 0)?;
    Ok(visible.get(choice).cloned())
}

/// The add/edit form: fill fields, submit, reset or cancel
async fn form_session(controller: &ViewController, output: &Output) -> Result<()> {
    let target = controller.store().view().await.edit_target().cloned();
    let (title, submit_label) = match &target {
        Some(_) => ("Edit Movie", "Update Listing"),
        None => ("Add Movie", "Add Listing"),
    };
    let mut draft = target.as_ref().map(FormDraft::from_record).unwrap_or_default();
    let mut posted = target.as_ref().map(|t| t.created_at);
    let mut errors = ValidationErrors::default();

    loop {
        output.block(render::draft_table(title, &draft, &errors, posted.as_ref()));
        show_alert(controller, output).await;

        let actions = ["Edit fields", submit_label, "Reset", "Cancel"];
        match prompt_select("Form", &actions, 0)? {
            0 => {
                for field in DraftField::ALL {
                    form::prompt_field(&mut draft, field)?;
                }
            }
            1 => match ui::with_spinner("Saving movie...", controller.submit(&draft)).await {
                SubmitOutcome::Saved(_) | SubmitOutcome::NotEditing => return Ok(()),
                SubmitOutcome::Invalid(e) => errors = e,
                // The failure alert is shown on the next pass; the form stays open
                SubmitOutcome::Failed(_) => {}
            },
            2 => {
                draft.clear();
                posted = None;
                errors = ValidationErrors::default();
            }
            _ => {
                controller.handle(Action::Home).await;
                return Ok(());
            }
        }
    }
}
