use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::genre::Genre;

/// Backend-assigned record identifier (the `_id` field on the wire).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MovieId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Canonical movie as confirmed by the backend.
///
/// `id` and `created_at` are assigned server-side on creation and are never
/// set or changed by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: MovieId,
    pub movie_name: String,
    pub actors: Vec<String>,
    pub director: String,
    pub budget: f64, // crores
    pub genre: Genre,
    pub created_at: DateTime<Utc>,
}

impl MovieRecord {
    /// Actors joined the way the edit form shows them
    pub fn actors_joined(&self) -> String {
        self.actors.join(", ")
    }
}

/// Movie fields without server-assigned identity; the body of create/update calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub movie_name: String,
    pub actors: Vec<String>,
    pub director: String,
    pub budget: f64,
    pub genre: Genre,
}

impl NewMovie {
    /// Attach backend-assigned identity, producing the canonical record
    pub fn into_record(self, id: MovieId, created_at: DateTime<Utc>) -> MovieRecord {
        MovieRecord {
            id,
            movie_name: self.movie_name,
            actors: self.actors,
            director: self.director,
            budget: self.budget,
            genre: self.genre,
            created_at,
        }
    }
}
