use chrono::{DateTime, Utc};
use movie_sync_models::{Genre, MovieId, MovieRecord, NewMovie};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SyncError;

/// Movie as the backend sends it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieWire {
    #[serde(rename = "_id")]
    id: String,
    movie_name: String,
    actors: Vec<String>,
    director: String,
    budget: BudgetWire,
    genre: String,
    created_at: DateTime<Utc>,
}

/// Older records were created with the budget as a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BudgetWire {
    Number(f64),
    Text(String),
}

impl BudgetWire {
    fn value(&self) -> Option<f64> {
        match self {
            BudgetWire::Number(n) => Some(*n),
            BudgetWire::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl TryFrom<MovieWire> for MovieRecord {
    type Error = String;

    fn try_from(wire: MovieWire) -> Result<Self, Self::Error> {
        if wire.id.trim().is_empty() {
            return Err("record has an empty _id".to_string());
        }
        if wire.movie_name.trim().is_empty() {
            return Err(format!("record {} has an empty movieName", wire.id));
        }
        if wire.director.trim().is_empty() {
            return Err(format!("record {} has an empty director", wire.id));
        }

        let actors: Vec<String> = wire.actors.iter().map(|a| a.trim().to_string()).collect();
        if actors.is_empty() || actors.iter().any(|a| a.is_empty()) {
            return Err(format!("record {} has missing or empty actors", wire.id));
        }

        let budget = wire
            .budget
            .value()
            .filter(|b| b.is_finite() && *b > 0.0)
            .ok_or_else(|| format!("record {} has a non-positive or non-numeric budget", wire.id))?;

        let genre: Genre = wire
            .genre
            .parse()
            .map_err(|e| format!("record {}: {}", wire.id, e))?;

        Ok(MovieRecord {
            id: MovieId::new(wire.id),
            movie_name: wire.movie_name,
            actors,
            director: wire.director,
            budget,
            genre,
            created_at: wire.created_at,
        })
    }
}

/// Decode a `GET /movies` body.
///
/// Records that do not match the schema are dropped and logged; a body that
/// is not an array at all is an error.
pub fn decode_movie_list(body: serde_json::Value) -> Result<Vec<MovieRecord>, SyncError> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(SyncError::Malformed(format!(
                "expected an array of movies, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let mut movies = Vec::with_capacity(total);
    let mut rejected = 0;

    for item in items {
        let decoded = serde_json::from_value::<MovieWire>(item)
            .map_err(|e| e.to_string())
            .and_then(MovieRecord::try_from);
        match decoded {
            Ok(movie) => movies.push(movie),
            Err(reason) => {
                rejected += 1;
                warn!(operation = "decode_movie_list", reason = %reason, "Rejected malformed movie record");
            }
        }
    }

    debug!(total, accepted = movies.len(), rejected, "Decoded movie list");
    Ok(movies)
}

/// Decode a single-record body; any schema violation is an error
pub fn decode_movie(body: serde_json::Value) -> Result<MovieRecord, SyncError> {
    let wire: MovieWire =
        serde_json::from_value(body).map_err(|e| SyncError::Malformed(e.to_string()))?;
    MovieRecord::try_from(wire).map_err(SyncError::Malformed)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub fn movies_url(base_url: &str) -> String {
    format!("{}/movies", base_url.trim_end_matches('/'))
}

pub fn movie_url(base_url: &str, id: &MovieId) -> String {
    format!("{}/{}", movies_url(base_url), urlencoding::encode(id.as_str()))
}

async fn send(request: reqwest::RequestBuilder, url: &str) -> Result<Response, SyncError> {
    request.send().await.map_err(|source| SyncError::Transport {
        url: url.to_string(),
        source,
    })
}

/// Turn a non-2xx response into an error; 404 on an id route becomes `NotFound`
async fn check_status(
    response: Response,
    operation: &'static str,
    id: Option<&MovieId>,
) -> Result<Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(SyncError::NotFound(id.clone()));
        }
    }
    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}

async fn read_json(response: Response, url: &str) -> Result<serde_json::Value, SyncError> {
    response.json().await.map_err(|source| {
        if source.is_decode() {
            SyncError::Malformed(format!("{} returned invalid JSON: {}", url, source))
        } else {
            SyncError::Transport {
                url: url.to_string(),
                source,
            }
        }
    })
}

/// Fetch the whole catalog
pub async fn get_movies(client: &Client, base_url: &str) -> Result<Vec<MovieRecord>, SyncError> {
    let url = movies_url(base_url);
    debug!(%url, "GET movies");

    let response = send(client.get(&url).header("Accept", "application/json"), &url).await?;
    let response = check_status(response, "Fetch movies", None).await?;
    decode_movie_list(read_json(response, &url).await?)
}

/// Fetch a single movie by id
pub async fn get_movie(client: &Client, base_url: &str, id: &MovieId) -> Result<MovieRecord, SyncError> {
    let url = movie_url(base_url, id);
    debug!(%url, "GET movie");

    let response = send(client.get(&url).header("Accept", "application/json"), &url).await?;
    let response = check_status(response, "Fetch movie", Some(id)).await?;
    decode_movie(read_json(response, &url).await?)
}

pub async fn create_movie(client: &Client, base_url: &str, movie: &NewMovie) -> Result<MovieRecord, SyncError> {
    let url = movies_url(base_url);
    debug!(%url, movie_name = %movie.movie_name, "POST movie");

    let response = send(client.post(&url).json(movie), &url).await?;
    let response = check_status(response, "Create movie", None).await?;
    decode_movie(read_json(response, &url).await?)
}

pub async fn update_movie(
    client: &Client,
    base_url: &str,
    id: &MovieId,
    movie: &NewMovie,
) -> Result<MovieRecord, SyncError> {
    let url = movie_url(base_url, id);
    debug!(%url, movie_name = %movie.movie_name, "PUT movie");

    let response = send(client.put(&url).json(movie), &url).await?;
    let response = check_status(response, "Update movie", Some(id)).await?;
    decode_movie(read_json(response, &url).await?)
}

/// Delete a movie; success is judged by status alone, the body is ignored
pub async fn delete_movie(client: &Client, base_url: &str, id: &MovieId) -> Result<(), SyncError> {
    let url = movie_url(base_url, id);
    debug!(%url, "DELETE movie");

    let response = send(client.delete(&url), &url).await?;
    check_status(response, "Delete movie", Some(id)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_movie(id: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "movieName": "Inception",
            "actors": ["Leonardo DiCaprio", "Joseph Gordon-Levitt"],
            "director": "Christopher Nolan",
            "budget": 160,
            "genre": "Sci-Fi",
            "createdAt": "2024-10-01T12:00:00.000Z",
            "__v": 0
        })
    }

    #[test]
    fn test_decode_movie_maps_wire_id() {
        let movie = decode_movie(wire_movie("66fb1a")).unwrap();
        assert_eq!(movie.id, MovieId::new("66fb1a"));
        assert_eq!(movie.genre, Genre::SciFi);
        assert_eq!(movie.budget, 160.0);
        assert_eq!(movie.actors.len(), 2);
    }

    #[test]
    fn test_decode_movie_accepts_string_budget() {
        let mut body = wire_movie("a1");
        body["budget"] = json!("250");
        let movie = decode_movie(body).unwrap();
        assert_eq!(movie.budget, 250.0);
    }

    #[test]
    fn test_decode_movie_rejects_bad_records() {
        let mut unknown_genre = wire_movie("a1");
        unknown_genre["genre"] = json!("Western");
        assert!(matches!(decode_movie(unknown_genre), Err(SyncError::Malformed(_))));

        let mut zero_budget = wire_movie("a2");
        zero_budget["budget"] = json!(0);
        assert!(matches!(decode_movie(zero_budget), Err(SyncError::Malformed(_))));

        let mut no_actors = wire_movie("a3");
        no_actors["actors"] = json!([]);
        assert!(matches!(decode_movie(no_actors), Err(SyncError::Malformed(_))));

        let mut missing_id = wire_movie("a4");
        missing_id.as_object_mut().unwrap().remove("_id");
        assert!(matches!(decode_movie(missing_id), Err(SyncError::Malformed(_))));
    }

    #[test]
    fn test_decode_movie_list_skips_malformed_entries() {
        let mut bad = wire_movie("bad");
        bad["movieName"] = json!("   ");
        let body = json!([wire_movie("m1"), bad, wire_movie("m2")]);

        let movies = decode_movie_list(body).unwrap();
        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_decode_movie_list_rejects_non_array() {
        let result = decode_movie_list(json!({ "movies": [] }));
        assert!(matches!(result, Err(SyncError::Malformed(_))));
    }

    #[test]
    fn test_urls() {
        assert_eq!(movies_url("http://localhost:8081/"), "http://localhost:8081/movies");
        assert_eq!(
            movie_url("http://localhost:8081", &MovieId::new("a b")),
            "http://localhost:8081/movies/a%20b"
        );
    }
}
