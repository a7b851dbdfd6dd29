// Standalone edit-by-identifier flow

use crate::store::{MovieStore, SAVE_FAILED};
use crate::validation::{validate_draft, ValidationErrors};
use movie_sync_client::SyncError;
use movie_sync_models::{FormDraft, MovieId, MovieRecord};
use std::time::Duration;
use tracing::{info, warn};

pub const UPDATE_NOTICE: &str = "Movie has been successfully updated!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateFlowState {
    Loading,
    Editing,
    Submitted,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(MovieRecord),
    Invalid(ValidationErrors),
    Failed(SyncError),
    /// Submit before the record was loaded, or after it was already sent
    NotEditing,
}

/// Edits one record addressed by id, independent of the home list.
///
/// The flow fetches the record itself and sends the update without touching
/// the store's list; the list only changes through the full refresh that
/// follows the redirect home.
pub struct UpdateFlow {
    store: MovieStore,
    id: MovieId,
    redirect_after: Duration,
    state: UpdateFlowState,
    draft: FormDraft,
    errors: ValidationErrors,
}

impl UpdateFlow {
    pub fn new(store: MovieStore, id: MovieId, redirect_after: Duration) -> Self {
        Self {
            store,
            id,
            redirect_after,
            state: UpdateFlowState::Loading,
            draft: FormDraft::default(),
            errors: ValidationErrors::default(),
        }
    }

    pub fn id(&self) -> &MovieId {
        &self.id
    }

    pub fn state(&self) -> UpdateFlowState {
        self.state
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Fetch the record and prefill the draft from it.
    ///
    /// On failure the flow stays in `Loading` with an empty draft.
    pub async fn load(&mut self) -> Result<&FormDraft, SyncError> {
        let record = self.store.fetch_one(&self.id).await?;
        self.draft = FormDraft::from_record(&record);
        self.errors = ValidationErrors::default();
        self.state = UpdateFlowState::Editing;
        Ok(&self.draft)
    }

    pub async fn submit(&mut self) -> UpdateOutcome {
        if self.state != UpdateFlowState::Editing {
            return UpdateOutcome::NotEditing;
        }

        let validated = match validate_draft(&self.draft) {
            Ok(validated) => validated,
            Err(errors) => {
                self.errors = errors.clone();
                return UpdateOutcome::Invalid(errors);
            }
        };
        self.errors = ValidationErrors::default();

        match self.store.send_update(&self.id, &validated).await {
            Ok(updated) => {
                info!(movie_id = %self.id, "Movie updated by id");
                self.state = UpdateFlowState::Submitted;
                self.store.alerts().success(UPDATE_NOTICE).await;
                UpdateOutcome::Updated(updated)
            }
            Err(e) => {
                warn!(movie_id = %self.id, error = %e, "Update by id failed");
                self.store.alerts().failure(SAVE_FAILED).await;
                UpdateOutcome::Failed(e)
            }
        }
    }

    /// After a successful submit, wait out the redirect delay, then return
    /// home and refresh the list.
    ///
    /// Returns `Ok(None)` without waiting if nothing was submitted.
    pub async fn wait_for_redirect(&self) -> Result<Option<usize>, SyncError> {
        if self.state != UpdateFlowState::Submitted {
            return Ok(None);
        }
        tokio::time::sleep(self.redirect_after).await;
        self.store.go_home().await;
        self.store.fetch_all().await.map(Some)
    }
}
