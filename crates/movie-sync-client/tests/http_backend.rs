//! HttpBackend against an in-process axum server speaking the catalog REST surface.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use movie_sync_client::{CatalogBackend, HttpBackend, SyncError};
use movie_sync_models::{Genre, MovieId, NewMovie};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct Db {
    movies: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<u64>>,
}

async fn list(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.movies.lock().await.clone()))
}

async fn get_one(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    db.movies
        .lock()
        .await
        .iter()
        .find(|m| m["_id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create(State(db): State<Db>, Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut next = db.next_id.lock().await;
    *next += 1;
    body["_id"] = json!(format!("{:024x}", *next));
    body["createdAt"] = json!("2024-10-01T12:00:00.000Z");
    db.movies.lock().await.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut movies = db.movies.lock().await;
    let existing = movies
        .iter_mut()
        .find(|m| m["_id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    body["_id"] = existing["_id"].clone();
    body["createdAt"] = existing["createdAt"].clone();
    *existing = body.clone();
    Ok(Json(body))
}

async fn remove(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut movies = db.movies.lock().await;
    let before = movies.len();
    movies.retain(|m| m["_id"] != id.as_str());
    if movies.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn spawn_server(db: Db) -> String {
    let app = Router::new()
        .route("/movies", get(list).post(create))
        .route("/movies/:id", get(get_one).put(update).delete(remove))
        .with_state(db);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn inception() -> NewMovie {
    NewMovie {
        movie_name: "Inception".to_string(),
        actors: vec!["Leonardo DiCaprio".to_string(), "Joseph Gordon-Levitt".to_string()],
        director: "Christopher Nolan".to_string(),
        budget: 160.0,
        genre: Genre::SciFi,
    }
}

#[tokio::test]
async fn crud_roundtrip() {
    let db = Db::default();
    let base_url = spawn_server(db.clone()).await;
    let backend = HttpBackend::new(base_url, Duration::from_secs(5)).unwrap();

    assert!(backend.fetch_all().await.unwrap().is_empty());

    let created = backend.create(&inception()).await.unwrap();
    assert!(!created.id.as_str().is_empty());
    assert_eq!(created.movie_name, "Inception");

    // Budget goes over the wire as a JSON number
    assert!(db.movies.lock().await[0]["budget"].is_number());

    let fetched = backend.fetch_one(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let mut changed = inception();
    changed.budget = 170.0;
    let updated = backend.update(&created.id, &changed).await.unwrap();
    assert_eq!(updated.budget, 170.0);
    assert_eq!(updated.created_at, created.created_at);

    backend.delete(&created.id).await.unwrap();
    assert!(backend.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let base_url = spawn_server(Db::default()).await;
    let backend = HttpBackend::new(base_url, Duration::from_secs(5)).unwrap();
    let id = MovieId::new("does-not-exist");

    assert!(matches!(backend.fetch_one(&id).await, Err(SyncError::NotFound(_))));
    assert!(matches!(backend.delete(&id).await, Err(SyncError::NotFound(_))));
}

#[tokio::test]
async fn malformed_list_entries_are_dropped() {
    let db = Db::default();
    db.movies.lock().await.extend([
        json!({
            "_id": "good",
            "movieName": "Alien",
            "actors": ["Sigourney Weaver"],
            "director": "Ridley Scott",
            "budget": "11",
            "genre": "Horror",
            "createdAt": "2024-10-01T12:00:00Z"
        }),
        json!({ "_id": "bad", "movieName": "Broken" }),
    ]);
    let base_url = spawn_server(db).await;
    let backend = HttpBackend::new(base_url, Duration::from_secs(5)).unwrap();

    let movies = backend.fetch_all().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].budget, 11.0);
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    assert!(matches!(backend.fetch_all().await, Err(SyncError::Transport { .. })));
}
