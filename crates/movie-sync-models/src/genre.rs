use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of genres the catalog accepts.
///
/// Matching is exact and case-sensitive: `"sci-fi"` is not a genre, `"Sci-Fi"` is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Fantasy,
}

impl Genre {
    /// Every genre, in the order forms and filters present them
    pub const ALL: [Genre; 6] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::SciFi,
        Genre::Fantasy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::SciFi => "Sci-Fi",
            Genre::Fantasy => "Fantasy",
        }
    }

    /// Comma-separated list of all genre names, e.g. for error messages
    pub fn joined() -> String {
        Self::ALL
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGenreError {
    input: String,
}

impl fmt::Display for ParseGenreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown genre '{}', expected one of: {}", self.input, Genre::joined())
    }
}

impl std::error::Error for ParseGenreError {}

impl FromStr for Genre {
    type Err = ParseGenreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseGenreError { input: s.to_string() })
    }
}
