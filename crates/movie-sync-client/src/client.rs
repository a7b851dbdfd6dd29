use crate::api;
use crate::error::SyncError;
use crate::traits::CatalogBackend;
use async_trait::async_trait;
use movie_sync_config::BackendConfig;
use movie_sync_models::{MovieId, MovieRecord, NewMovie};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// REST client for the movie catalog backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Arc<Client>,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SyncError::Transport {
                url: base_url.clone(),
                source,
            })?;

        info!(base_url = %base_url, "Created catalog HTTP backend");
        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, SyncError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    fn backend_name(&self) -> &str {
        "http"
    }

    async fn fetch_all(&self) -> Result<Vec<MovieRecord>, SyncError> {
        api::get_movies(&self.client, &self.base_url).await
    }

    async fn fetch_one(&self, id: &MovieId) -> Result<MovieRecord, SyncError> {
        api::get_movie(&self.client, &self.base_url, id).await
    }

    async fn create(&self, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
        api::create_movie(&self.client, &self.base_url, movie).await
    }

    async fn update(&self, id: &MovieId, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
        api::update_movie(&self.client, &self.base_url, id, movie).await
    }

    async fn delete(&self, id: &MovieId) -> Result<(), SyncError> {
        api::delete_movie(&self.client, &self.base_url, id).await
    }
}
