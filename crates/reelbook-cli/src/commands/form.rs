// Filling in and submitting movie forms from the terminal

use super::prompts::{prompt_genre, prompt_string};
use super::{show_alert, ui, DraftArgs};
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use movie_sync_core::{SubmitOutcome, ValidationErrors, ViewController};
use movie_sync_models::{DraftField, FormDraft, MovieRecord};

/// Ask for one field, offering its current value as the default
pub fn prompt_field(draft: &mut FormDraft, field: DraftField) -> Result<()> {
    let value = match field {
        DraftField::Genre => prompt_genre(draft.get(field))?,
        _ => prompt_string(field.label(), Some(draft.get(field)))?,
    };
    draft.set(field, value);
    Ok(())
}

/// Apply command-line fields, then prompt for the rest when a terminal is attached
pub fn complete_draft(mut draft: FormDraft, args: &DraftArgs, interactive: bool) -> Result<FormDraft> {
    args.apply(&mut draft);
    if interactive {
        for field in DraftField::ALL {
            if args.value(field).is_none() {
                prompt_field(&mut draft, field)?;
            }
        }
    }
    Ok(draft)
}

/// Re-ask only the fields that failed validation
pub fn reprompt_invalid(draft: &mut FormDraft, errors: &ValidationErrors) -> Result<()> {
    for (field, _) in errors.iter() {
        prompt_field(draft, field)?;
    }
    Ok(())
}

/// Submit through the controller until it saves.
///
/// Field errors are printed inline; with a terminal the failing fields are
/// asked again, otherwise the command stops. Backend failures surface the
/// failure alert and end the command.
pub async fn submit_until_saved(
    controller: &ViewController,
    mut draft: FormDraft,
    interactive: bool,
    output: &Output,
) -> Result<MovieRecord> {
    loop {
        let outcome = ui::with_spinner("Saving movie...", controller.submit(&draft)).await;
        match outcome {
            SubmitOutcome::Saved(record) => return Ok(record),
            SubmitOutcome::Invalid(errors) => {
                output.field_errors(&errors);
                if !interactive {
                    return Err(eyre!("{}", errors));
                }
                reprompt_invalid(&mut draft, &errors)?;
            }
            SubmitOutcome::Failed(e) => {
                show_alert(controller, output).await;
                return Err(e).wrap_err("Backend rejected the movie");
            }
            SubmitOutcome::NotEditing => return Err(eyre!("No movie form is open")),
        }
    }
}
