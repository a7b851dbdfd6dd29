use crate::alert::AlertManager;
use crate::filter::apply_filters;
use crate::validation::ValidatedMovie;
use movie_sync_client::{CatalogBackend, SyncError};
use movie_sync_models::{FilterState, Genre, MovieId, MovieRecord};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

pub const MOVIE_ADDED: &str = "Movie added successfully!";
pub const MOVIE_UPDATED: &str = "Movie updated successfully!";
pub const MOVIE_DELETED: &str = "Movie deleted successfully!";
pub const SAVE_FAILED: &str = "Failed to add or update movie.";
pub const DELETE_FAILED: &str = "Failed to delete movie.";

/// Which screen the catalog is showing
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Home,
    /// Form screen; `edit_target` is the record being edited, `None` when creating
    CreateOrEdit { edit_target: Option<MovieRecord> },
}

impl ViewState {
    pub fn edit_target(&self) -> Option<&MovieRecord> {
        match self {
            ViewState::CreateOrEdit { edit_target } => edit_target.as_ref(),
            ViewState::Home => None,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, ViewState::Home)
    }
}

/// Everything the catalog screen depends on, changed only through [`MovieStore`] operations.
///
/// The displayed list is not stored here; it is derived from `movies` and
/// `filter` on demand.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub movies: Vec<MovieRecord>,
    pub filter: FilterState,
    pub view: ViewState,
}

impl CatalogState {
    pub fn visible_movies(&self) -> Vec<MovieRecord> {
        apply_filters(&self.movies, &self.filter)
    }
}

/// Local working copy of the catalog, kept in step with the backend.
///
/// Operations take `&self` and never hold the state lock across a network
/// call, so several may be in flight at once. Whichever response lands last
/// decides the local list; in-flight requests are not cancelled.
#[derive(Clone)]
pub struct MovieStore {
    backend: Arc<dyn CatalogBackend>,
    state: Arc<RwLock<CatalogState>>,
    alerts: Arc<AlertManager>,
}

impl MovieStore {
    pub fn new(backend: Arc<dyn CatalogBackend>, alerts: Arc<AlertManager>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(CatalogState::default())),
            alerts,
        }
    }

    pub fn alerts(&self) -> &Arc<AlertManager> {
        &self.alerts
    }

    pub fn backend(&self) -> &Arc<dyn CatalogBackend> {
        &self.backend
    }

    // ---- sync operations -------------------------------------------------

    /// Replace the whole local list with the backend's catalog.
    ///
    /// On failure the list is left as it was; the error is logged and
    /// returned but never shown as an alert.
    #[instrument(skip(self), fields(backend = self.backend.backend_name()))]
    pub async fn fetch_all(&self) -> Result<usize, SyncError> {
        match self.backend.fetch_all().await {
            Ok(movies) => {
                let count = movies.len();
                self.state.write().await.movies = movies;
                info!(operation = "fetch_all", count, "Catalog refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(operation = "fetch_all", error = %e, "Failed to fetch movies");
                Err(e)
            }
        }
    }

    /// Full refresh to absorb server-side effects of a mutation
    pub async fn reconcile(&self) -> Result<usize, SyncError> {
        debug!(operation = "reconcile", "Reconciling catalog with backend");
        self.fetch_all().await
    }

    /// Fetch one record without touching the local list
    pub async fn fetch_one(&self, id: &MovieId) -> Result<MovieRecord, SyncError> {
        self.backend.fetch_one(id).await.map_err(|e| {
            warn!(operation = "fetch_one", movie_id = %id, error = %e, "Failed to fetch movie");
            e
        })
    }

    /// Append the backend's canonical copy of a new movie
    #[instrument(skip(self, movie), fields(movie_name = %movie.movie().movie_name))]
    pub async fn create(&self, movie: &ValidatedMovie) -> Result<MovieRecord, SyncError> {
        match self.backend.create(movie.movie()).await {
            Ok(created) => {
                self.state.write().await.movies.push(created.clone());
                info!(operation = "create", movie_id = %created.id, "Movie created");
                self.alerts.success(MOVIE_ADDED).await;
                Ok(created)
            }
            Err(e) => {
                warn!(operation = "create", error = %e, "Error creating movie");
                self.alerts.failure(SAVE_FAILED).await;
                Err(e)
            }
        }
    }

    /// Send an update without touching the local list or raising alerts
    pub async fn send_update(&self, id: &MovieId, movie: &ValidatedMovie) -> Result<MovieRecord, SyncError> {
        self.backend.update(id, movie.movie()).await.map_err(|e| {
            warn!(operation = "update", movie_id = %id, error = %e, "Error updating movie");
            e
        })
    }

    /// Update a movie and replace it in place in the local list
    #[instrument(skip(self, movie), fields(movie_id = %id))]
    pub async fn update(&self, id: &MovieId, movie: &ValidatedMovie) -> Result<MovieRecord, SyncError> {
        match self.send_update(id, movie).await {
            Ok(updated) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(slot) = state.movies.iter_mut().find(|m| m.id == updated.id) {
                        *slot = updated.clone();
                    } else {
                        debug!(operation = "update", movie_id = %id, "Updated movie is not in the local list");
                    }
                }
                info!(operation = "update", movie_id = %id, "Movie updated");
                self.alerts.success(MOVIE_UPDATED).await;
                Ok(updated)
            }
            Err(e) => {
                self.alerts.failure(SAVE_FAILED).await;
                Err(e)
            }
        }
    }

    /// Delete a movie, then reconcile.
    ///
    /// The local record is removed only after the backend confirms, and
    /// exactly one reconciliation fetch follows.
    #[instrument(skip(self), fields(movie_id = %id))]
    pub async fn delete(&self, id: &MovieId) -> Result<(), SyncError> {
        if let Err(e) = self.backend.delete(id).await {
            warn!(operation = "delete", error = %e, "Error deleting movie");
            self.alerts.failure(DELETE_FAILED).await;
            return Err(e);
        }

        let removed = {
            let mut state = self.state.write().await;
            let before = state.movies.len();
            state.movies.retain(|m| &m.id != id);
            before - state.movies.len()
        };
        info!(operation = "delete", removed, "Movie deleted");
        self.alerts.success(MOVIE_DELETED).await;

        // Reconciliation failures are logged by fetch_all; the delete itself succeeded
        let _ = self.reconcile().await;
        Ok(())
    }

    // ---- local state transitions ----------------------------------------

    /// Open the form on a record from the local list (no fetch).
    ///
    /// Returns `None` and leaves the view alone if the id is not loaded.
    pub async fn start_edit(&self, id: &MovieId) -> Option<MovieRecord> {
        let mut state = self.state.write().await;
        let record = state.movies.iter().find(|m| &m.id == id).cloned()?;
        state.view = ViewState::CreateOrEdit {
            edit_target: Some(record.clone()),
        };
        Some(record)
    }

    /// Open an empty form, clearing any edit target
    pub async fn start_create(&self) {
        self.state.write().await.view = ViewState::CreateOrEdit { edit_target: None };
    }

    /// Back to the list; clears the edit target
    pub async fn go_home(&self) {
        self.state.write().await.view = ViewState::Home;
    }

    pub async fn set_genre_filter(&self, genre: Option<Genre>) {
        self.state.write().await.filter.genre = genre;
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.state.write().await.filter.search_text = text.into();
    }

    // ---- reads ------------------------------------------------------------

    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    pub async fn movies(&self) -> Vec<MovieRecord> {
        self.state.read().await.movies.clone()
    }

    /// The list as the user sees it: all movies through the filter pipeline
    pub async fn visible_movies(&self) -> Vec<MovieRecord> {
        self.state.read().await.visible_movies()
    }

    pub async fn view(&self) -> ViewState {
        self.state.read().await.view.clone()
    }

    pub async fn filter(&self) -> FilterState {
        self.state.read().await.filter.clone()
    }

    pub async fn find(&self, id: &MovieId) -> Option<MovieRecord> {
        self.state.read().await.movies.iter().find(|m| &m.id == id).cloned()
    }
}

#[cfg(test)]
mod tests;
