use crate::error::SyncError;
use crate::traits::CatalogBackend;
use async_trait::async_trait;
use chrono::Utc;
use movie_sync_models::{MovieId, MovieRecord, NewMovie};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Catalog backend held entirely in memory.
///
/// Assigns ids and creation timestamps the way the real server does. Built
/// for tests only, behind the `test-util` feature.
pub struct MemoryBackend {
    movies: Mutex<Vec<MovieRecord>>,
    next_id: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_movies(Vec::new())
    }

    pub fn with_movies(movies: Vec<MovieRecord>) -> Self {
        Self {
            next_id: AtomicU64::new(movies.len() as u64 + 1),
            movies: Mutex::new(movies),
        }
    }

    /// Copy of the server-side catalog
    pub async fn snapshot(&self) -> Vec<MovieRecord> {
        self.movies.lock().await.clone()
    }

    /// Change the server-side catalog behind the client's back
    pub async fn remove_silently(&self, id: &MovieId) {
        self.movies.lock().await.retain(|m| &m.id != id);
    }

    fn allocate_id(&self) -> MovieId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        MovieId::new(format!("{:024x}", n))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<MovieRecord>, SyncError> {
        Ok(self.snapshot().await)
    }

    async fn fetch_one(&self, id: &MovieId) -> Result<MovieRecord, SyncError> {
        self.movies
            .lock()
            .await
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.clone()))
    }

    async fn create(&self, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
        let record = movie.clone().into_record(self.allocate_id(), Utc::now());
        self.movies.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &MovieId, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
        let mut movies = self.movies.lock().await;
        let existing = movies
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| SyncError::NotFound(id.clone()))?;
        *existing = movie.clone().into_record(id.clone(), existing.created_at);
        Ok(existing.clone())
    }

    async fn delete(&self, id: &MovieId) -> Result<(), SyncError> {
        let mut movies = self.movies.lock().await;
        let before = movies.len();
        movies.retain(|m| &m.id != id);
        if movies.len() == before {
            return Err(SyncError::NotFound(id.clone()));
        }
        Ok(())
    }
}
