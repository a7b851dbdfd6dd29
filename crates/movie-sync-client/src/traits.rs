use async_trait::async_trait;
use movie_sync_models::{MovieId, MovieRecord, NewMovie};

use crate::error::SyncError;

/// The remote catalog the client keeps a working copy of.
///
/// Every method returns the canonical server view; nothing here touches
/// local state.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    fn backend_name(&self) -> &str;

    async fn fetch_all(&self) -> Result<Vec<MovieRecord>, SyncError>;
    async fn fetch_one(&self, id: &MovieId) -> Result<MovieRecord, SyncError>;

    /// Returns the created record including its server-assigned id and timestamp
    async fn create(&self, movie: &NewMovie) -> Result<MovieRecord, SyncError>;
    async fn update(&self, id: &MovieId, movie: &NewMovie) -> Result<MovieRecord, SyncError>;
    async fn delete(&self, id: &MovieId) -> Result<(), SyncError>;
}
