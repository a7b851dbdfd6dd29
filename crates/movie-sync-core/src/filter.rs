// Derivation of the displayed list from the full catalog

use movie_sync_models::{FilterState, Genre, MovieRecord};

/// Keep records of the given genre; `None` keeps everything
pub fn filter_by_genre(movies: &[MovieRecord], genre: Option<Genre>) -> Vec<MovieRecord> {
    match genre {
        None => movies.to_vec(),
        Some(genre) => movies.iter().filter(|m| m.genre == genre).cloned().collect(),
    }
}

/// Keep records whose name contains `text`, ignoring case; empty text keeps everything
pub fn filter_by_search(movies: &[MovieRecord], text: &str) -> Vec<MovieRecord> {
    if text.is_empty() {
        return movies.to_vec();
    }
    let needle = text.to_lowercase();
    movies
        .iter()
        .filter(|m| m.movie_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Genre filter first, then text search. Input order is preserved.
pub fn apply_filters(movies: &[MovieRecord], filter: &FilterState) -> Vec<MovieRecord> {
    let by_genre = filter_by_genre(movies, filter.genre);
    filter_by_search(&by_genre, &filter.search_text)
}
