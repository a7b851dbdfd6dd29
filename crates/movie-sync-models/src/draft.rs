use serde::{Deserialize, Serialize};
use std::fmt;

use crate::movie::MovieRecord;

/// Editable form fields, all kept as raw text so half-typed input is representable.
///
/// `actors` is a single comma-joined string and `budget` is unparsed text; both
/// are only interpreted after validation succeeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub movie_name: String,
    pub actors: String,
    pub director: String,
    pub budget: String,
    pub genre: String,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill a draft from an existing record (edit form)
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            movie_name: record.movie_name.clone(),
            actors: record.actors_joined(),
            director: record.director.clone(),
            budget: record.budget.to_string(),
            genre: record.genre.as_str().to_string(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::MovieName => &self.movie_name,
            DraftField::Actors => &self.actors,
            DraftField::Director => &self.director,
            DraftField::Budget => &self.budget,
            DraftField::Genre => &self.genre,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::MovieName => self.movie_name = value,
            DraftField::Actors => self.actors = value,
            DraftField::Director => self.director = value,
            DraftField::Budget => self.budget = value,
            DraftField::Genre => self.genre = value,
        }
    }

    /// Reset every field to empty (the form's "Reset" button)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Form field names, keyed the same way the backend names them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    MovieName,
    Actors,
    Director,
    Budget,
    Genre,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::MovieName,
        DraftField::Actors,
        DraftField::Director,
        DraftField::Budget,
        DraftField::Genre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::MovieName => "movieName",
            DraftField::Actors => "actors",
            DraftField::Director => "director",
            DraftField::Budget => "budget",
            DraftField::Genre => "genre",
        }
    }

    /// Human label used by form prompts
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::MovieName => "Movie Name",
            DraftField::Actors => "Actors (comma separated)",
            DraftField::Director => "Director",
            DraftField::Budget => "Budget",
            DraftField::Genre => "Genre",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Genre, MovieId};
    use chrono::Utc;

    #[test]
    fn test_from_record_joins_actors_and_formats_budget() {
        let record = MovieRecord {
            id: MovieId::new("abc"),
            movie_name: "Inception".to_string(),
            actors: vec!["Leonardo DiCaprio".to_string(), "Joseph Gordon-Levitt".to_string()],
            director: "Christopher Nolan".to_string(),
            budget: 160.0,
            genre: Genre::SciFi,
            created_at: Utc::now(),
        };

        let draft = FormDraft::from_record(&record);
        assert_eq!(draft.actors, "Leonardo DiCaprio, Joseph Gordon-Levitt");
        assert_eq!(draft.budget, "160");
        assert_eq!(draft.genre, "Sci-Fi");
    }

    #[test]
    fn test_set_and_clear() {
        let mut draft = FormDraft::new();
        draft.set(DraftField::Director, "Nolan");
        assert_eq!(draft.get(DraftField::Director), "Nolan");
        draft.clear();
        assert_eq!(draft, FormDraft::default());
    }
}
