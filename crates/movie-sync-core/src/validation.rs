// Field validation for movie form drafts

use movie_sync_models::{DraftField, FormDraft, Genre, NewMovie};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Every field violation found in a draft, keyed by field.
///
/// Validation never stops at the first problem, so a draft with three bad
/// fields produces three entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} field(s) failed validation", .errors.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<DraftField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

/// A draft that passed validation, parsed into the shape the backend accepts.
///
/// The only way to obtain one is [`validate_draft`], so holding a
/// `ValidatedMovie` proves the fields were checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMovie(NewMovie);

impl ValidatedMovie {
    pub fn movie(&self) -> &NewMovie {
        &self.0
    }

    pub fn into_inner(self) -> NewMovie {
        self.0
    }
}

/// Check every field of the draft; on success parse it into a [`ValidatedMovie`]
pub fn validate_draft(draft: &FormDraft) -> Result<ValidatedMovie, ValidationErrors> {
    check_draft(draft).map(ValidatedMovie)
}

/// Run all field rules and gather the violations
pub fn collect_errors(draft: &FormDraft) -> ValidationErrors {
    check_draft(draft).err().unwrap_or_default()
}

fn check_draft(draft: &FormDraft) -> Result<NewMovie, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.movie_name.trim().is_empty() {
        errors.insert(DraftField::MovieName, "Movie name is required.");
    }

    let actors = split_actors(&draft.actors);
    if draft.actors.trim().is_empty() {
        errors.insert(DraftField::Actors, "Actors are required.");
    } else if !actors.iter().all(|a| is_actor_name(a)) {
        errors.insert(DraftField::Actors, "Actor names should only contain letters and commas.");
    } else if actors.is_empty() {
        // Only commas and spaces, e.g. ", ,"
        errors.insert(DraftField::Actors, "Actors are required.");
    }

    if draft.director.trim().is_empty() {
        errors.insert(DraftField::Director, "Director name is required.");
    } else if !is_director_name(&draft.director) {
        errors.insert(DraftField::Director, "Director name should only contain letters.");
    }

    let budget = if draft.budget.trim().is_empty() {
        errors.insert(DraftField::Budget, "Budget is required.");
        None
    } else {
        let budget = parse_budget(&draft.budget);
        if budget.is_none() {
            errors.insert(DraftField::Budget, "Budget should be a positive number.");
        }
        budget
    };

    let genre = if draft.genre.is_empty() {
        errors.insert(DraftField::Genre, "Genre is required.");
        None
    } else {
        let genre = draft.genre.parse::<Genre>().ok();
        if genre.is_none() {
            errors.insert(
                DraftField::Genre,
                format!("Genre must be one of: {}.", Genre::joined()),
            );
        }
        genre
    };

    match (budget, genre) {
        (Some(budget), Some(genre)) if errors.is_empty() => Ok(NewMovie {
            movie_name: draft.movie_name.trim().to_string(),
            actors,
            director: draft.director.trim().to_string(),
            budget,
            genre,
        }),
        _ => Err(errors),
    }
}

/// ASCII letters and whitespace, with at least one letter
fn is_director_name(raw: &str) -> bool {
    raw.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        && raw.chars().any(|c| c.is_ascii_alphabetic())
}

/// One trimmed actor name: ASCII letters and whitespace, plus a hyphen
/// only when it sits between two letters ("Gordon-Levitt")
fn is_actor_name(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    let letter_at = |i: usize| chars.get(i).map_or(false, char::is_ascii_alphabetic);

    chars.iter().any(char::is_ascii_alphabetic)
        && chars.iter().enumerate().all(|(i, c)| match *c {
            '-' => i > 0 && letter_at(i - 1) && letter_at(i + 1),
            c => c.is_ascii_alphabetic() || c.is_whitespace(),
        })
}

fn split_actors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_budget(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|b| b.is_finite() && *b > 0.0)
}
