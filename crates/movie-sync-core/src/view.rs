use crate::alert::AlertManager;
use crate::store::{MovieStore, ViewState};
use crate::validation::{validate_draft, ValidationErrors};
use movie_sync_client::{CatalogBackend, SyncError};
use movie_sync_config::UiConfig;
use movie_sync_models::{FormDraft, Genre, MovieId, MovieRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// A user intent routed through the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Home,
    Create,
    Edit(MovieId),
    Submit(FormDraft),
    Delete(MovieId),
    FilterGenre(Option<Genre>),
    Search(String),
    Refresh,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Backend accepted the record; the view is back on Home
    Saved(MovieRecord),
    /// Field errors to show inline; nothing was sent
    Invalid(ValidationErrors),
    /// Backend rejected the request; the form stays open with the failure alert
    Failed(SyncError),
    /// Submit arrived while no form was open
    NotEditing,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

#[derive(Debug)]
pub enum Outcome {
    View(ViewState),
    /// Edit was requested for an id that is not in the local list
    UnknownMovie(MovieId),
    Submit(SubmitOutcome),
    Deleted(Result<(), SyncError>),
    /// Filter changed; carries the number of movies now visible
    Filtered(usize),
    Refreshed(Result<usize, SyncError>),
}

/// Top-level state machine of the catalog screen.
///
/// Owns the [`MovieStore`] and the alert slot it reports into. Rendering
/// layers feed it [`Action`]s and read state back from [`ViewController::store`].
pub struct ViewController {
    store: MovieStore,
    alerts: Arc<AlertManager>,
}

impl ViewController {
    pub fn new(backend: Arc<dyn CatalogBackend>, ui: &UiConfig) -> Self {
        Self::with_dismiss_after(backend, ui.alert_dismiss())
    }

    pub fn with_dismiss_after(backend: Arc<dyn CatalogBackend>, dismiss_after: Duration) -> Self {
        let alerts = Arc::new(AlertManager::new(dismiss_after));
        Self {
            store: MovieStore::new(backend, Arc::clone(&alerts)),
            alerts,
        }
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn alerts(&self) -> &Arc<AlertManager> {
        &self.alerts
    }

    /// Initial load of the catalog on entering Home
    pub async fn start(&self) -> Result<usize, SyncError> {
        self.store.go_home().await;
        self.store.fetch_all().await
    }

    pub async fn handle(&self, action: Action) -> Outcome {
        debug!(?action, "Handling action");
        match action {
            Action::Home => {
                self.store.go_home().await;
                Outcome::View(ViewState::Home)
            }
            Action::Create => {
                self.store.start_create().await;
                Outcome::View(self.store.view().await)
            }
            Action::Edit(id) => match self.store.start_edit(&id).await {
                Some(_) => Outcome::View(self.store.view().await),
                None => Outcome::UnknownMovie(id),
            },
            Action::Submit(draft) => Outcome::Submit(self.submit(&draft).await),
            Action::Delete(id) => Outcome::Deleted(self.store.delete(&id).await),
            Action::FilterGenre(genre) => {
                self.store.set_genre_filter(genre).await;
                Outcome::Filtered(self.store.visible_movies().await.len())
            }
            Action::Search(text) => {
                self.store.set_search_text(text).await;
                Outcome::Filtered(self.store.visible_movies().await.len())
            }
            Action::Refresh => Outcome::Refreshed(self.store.fetch_all().await),
        }
    }

    /// Validate the draft, then create or update depending on the edit target.
    ///
    /// Validation failures never reach the network. A successful save returns
    /// the view to Home; a failed one leaves the form open.
    pub async fn submit(&self, draft: &FormDraft) -> SubmitOutcome {
        let view = self.store.view().await;
        if view.is_home() {
            return SubmitOutcome::NotEditing;
        }

        let validated = match validate_draft(draft) {
            Ok(validated) => validated,
            Err(errors) => {
                debug!(errors = errors.len(), "Draft rejected by validation");
                return SubmitOutcome::Invalid(errors);
            }
        };

        let result = match view.edit_target() {
            Some(target) => self.store.update(&target.id, &validated).await,
            None => self.store.create(&validated).await,
        };

        match result {
            Ok(saved) => {
                info!(movie_id = %saved.id, "Draft saved");
                self.store.go_home().await;
                SubmitOutcome::Saved(saved)
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    /// Tear down the screen: cancels the pending alert dismissal.
    ///
    /// Requests already sent are left to finish.
    pub async fn shutdown(&self) {
        self.alerts.shutdown().await;
    }
}
