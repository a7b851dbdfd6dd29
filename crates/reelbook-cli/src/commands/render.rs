use chrono::{DateTime, Local, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use movie_sync_core::ValidationErrors;
use movie_sync_models::{DraftField, FilterState, FormDraft, MovieRecord};

/// Budgets are in crores
pub fn format_budget(budget: f64) -> String {
    format!("{} Cr", budget)
}

pub fn posted_on(created_at: &DateTime<Utc>) -> String {
    created_at.with_timezone(&Local).format("%d %b %Y, %H:%M").to_string()
}

fn styled(mut table: Table) -> Table {
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn header(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn movies_table(movies: &[MovieRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["ID", "Movie", "Actors", "Director", "Budget", "Genre", "Posted on"]
            .into_iter()
            .map(header)
            .collect::<Vec<_>>(),
    );
    for movie in movies {
        table.add_row(vec![
            Cell::new(movie.id.as_str()).fg(Color::DarkGrey),
            Cell::new(&movie.movie_name).add_attribute(Attribute::Bold),
            Cell::new(movie.actors_joined()),
            Cell::new(&movie.director),
            Cell::new(format_budget(movie.budget)),
            Cell::new(movie.genre.as_str()),
            Cell::new(posted_on(&movie.created_at)),
        ]);
    }
    styled(table)
}

pub fn movie_detail(movie: &MovieRecord) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header(&movie.movie_name)]);
    table.add_row(vec![Cell::new("ID"), Cell::new(movie.id.as_str())]);
    table.add_row(vec![Cell::new("Actors"), Cell::new(movie.actors_joined())]);
    table.add_row(vec![Cell::new("Director"), Cell::new(&movie.director)]);
    table.add_row(vec![Cell::new("Budget"), Cell::new(format_budget(movie.budget))]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(movie.genre.as_str())]);
    table.add_row(vec![Cell::new("Posted on"), Cell::new(posted_on(&movie.created_at))]);
    styled(table)
}

/// The form as it stands, with the error under each failing field
pub fn draft_table(title: &str, draft: &FormDraft, errors: &ValidationErrors, posted: Option<&DateTime<Utc>>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header(title)]);
    for field in DraftField::ALL {
        let value = draft.get(field);
        let value_cell = match errors.get(field) {
            Some(message) => Cell::new(format!("{}\n{}", value, message)).fg(Color::Red),
            None => Cell::new(value),
        };
        table.add_row(vec![Cell::new(field.label()), value_cell]);
    }
    if let Some(created_at) = posted {
        table.add_row(vec![Cell::new("Posted on"), Cell::new(posted_on(created_at))]);
    }
    styled(table)
}

pub fn filter_summary(filter: &FilterState) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(genre) = filter.genre {
        parts.push(format!("genre: {}", genre));
    }
    if !filter.search_text.is_empty() {
        parts.push(format!("search: \"{}\"", filter.search_text));
    }
    Some(parts.join(", "))
}
