use async_trait::async_trait;
use chrono::Utc;
use movie_sync_client::{CatalogBackend, MemoryBackend, SyncError};
use movie_sync_models::{FormDraft, Genre, MovieId, MovieRecord, NewMovie};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory backend that counts calls and can be told to fail or stall.
#[derive(Default)]
pub struct RecordingBackend {
    pub inner: MemoryBackend,
    pub fetch_all_calls: AtomicUsize,
    pub fetch_one_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    fail: AtomicBool,
    fetch_all_delay: Mutex<Option<Duration>>,
}

impl RecordingBackend {
    pub fn with_movies(movies: Vec<MovieRecord>) -> Self {
        Self {
            inner: MemoryBackend::with_movies(movies),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Make fetch_all read the catalog immediately but answer after `delay`
    pub fn set_fetch_all_delay(&self, delay: Duration) {
        *self.fetch_all_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        [
            &self.fetch_all_calls,
            &self.fetch_one_calls,
            &self.create_calls,
            &self.update_calls,
            &self.delete_calls,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }

    fn check(&self, counter: &AtomicUsize) -> Result<(), SyncError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(SyncError::Status {
                operation: "test",
                status: 500,
                body: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for RecordingBackend {
    fn backend_name(&self) -> &str {
        "recording"
    }

    async fn fetch_all(&self) -> Result<Vec<MovieRecord>, SyncError> {
        self.check(&self.fetch_all_calls)?;
        let movies = self.inner.fetch_all().await?;
        let delay = *self.fetch_all_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(movies)
    }

    async fn fetch_one(&self, id: &MovieId) -> Result<MovieRecord, SyncError> {
        self.check(&self.fetch_one_calls)?;
        self.inner.fetch_one(id).await
    }

    async fn create(&self, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
        self.check(&self.create_calls)?;
        self.inner.create(movie).await
    }

    async fn update(&self, id: &MovieId, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
        self.check(&self.update_calls)?;
        self.inner.update(id, movie).await
    }

    async fn delete(&self, id: &MovieId) -> Result<(), SyncError> {
        self.check(&self.delete_calls)?;
        self.inner.delete(id).await
    }
}

pub fn movie(id: &str, name: &str, genre: Genre) -> MovieRecord {
    MovieRecord {
        id: MovieId::new(id),
        movie_name: name.to_string(),
        actors: vec!["Some Actor".to_string()],
        director: "Some Director".to_string(),
        budget: 50.0,
        genre,
        created_at: Utc::now(),
    }
}

pub fn inception_draft() -> FormDraft {
    FormDraft {
        movie_name: "Inception".to_string(),
        actors: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
        director: "Christopher Nolan".to_string(),
        budget: "160".to_string(),
        genre: "Sci-Fi".to_string(),
    }
}
