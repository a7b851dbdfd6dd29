use super::*;
use crate::test_support::{inception_draft, movie, RecordingBackend};
use crate::validation::validate_draft;
use movie_sync_models::AlertKind;
use std::time::Duration;

fn store_with(backend: Arc<RecordingBackend>) -> MovieStore {
    let alerts = Arc::new(AlertManager::new(Duration::from_millis(3000)));
    MovieStore::new(backend, alerts)
}

fn seeded() -> Arc<RecordingBackend> {
    Arc::new(RecordingBackend::with_movies(vec![
        movie("1", "Inception", Genre::SciFi),
        movie("2", "The Hangover", Genre::Comedy),
        movie("3", "Interstellar", Genre::SciFi),
    ]))
}

#[tokio::test]
async fn test_fetch_all_replaces_list() {
    let backend = seeded();
    let store = store_with(backend.clone());

    assert_eq!(store.fetch_all().await.unwrap(), 3);
    backend.inner.remove_silently(&MovieId::new("2")).await;
    store.fetch_all().await.unwrap();

    let ids: Vec<String> = store.movies().await.iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_fetch_all_failure_keeps_list_without_alert() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();

    backend.set_failing(true);
    assert!(store.fetch_all().await.is_err());
    assert_eq!(store.movies().await.len(), 3);
    assert!(store.alerts().current().await.is_none());
}

#[tokio::test]
async fn test_create_appends_canonical_record() {
    let backend = Arc::new(RecordingBackend::default());
    let store = store_with(backend.clone());
    let validated = validate_draft(&inception_draft()).unwrap();

    let created = store.create(&validated).await.unwrap();
    assert!(!created.id.as_str().is_empty());

    let movies = store.movies().await;
    assert_eq!(movies, vec![created.clone()]);

    let alert = store.alerts().current().await.unwrap();
    assert_eq!(alert.message, MOVIE_ADDED);
    assert_eq!(alert.kind, AlertKind::Success);
}

#[tokio::test]
async fn test_create_then_fetch_all_contains_backend_assigned_record() {
    let backend = Arc::new(RecordingBackend::default());
    let store = store_with(backend.clone());
    let validated = validate_draft(&inception_draft()).unwrap();

    store.create(&validated).await.unwrap();
    store.fetch_all().await.unwrap();

    let movies = store.movies().await;
    assert_eq!(movies.len(), 1);
    let record = &movies[0];
    assert_eq!(record.movie_name, "Inception");
    assert_eq!(record.actors, vec!["Leonardo DiCaprio", "Joseph Gordon-Levitt"]);
    assert_eq!(record.director, "Christopher Nolan");
    assert_eq!(record.budget, 160.0);
    assert_eq!(record.genre, Genre::SciFi);
    assert!(!record.id.as_str().is_empty());
}

#[tokio::test]
async fn test_create_failure_leaves_list_and_raises_failure() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();
    backend.set_failing(true);

    let validated = validate_draft(&inception_draft()).unwrap();
    assert!(store.create(&validated).await.is_err());
    assert_eq!(store.movies().await.len(), 3);
    assert_eq!(RecordingBackend::calls(&backend.create_calls), 1);

    let alert = store.alerts().current().await.unwrap();
    assert_eq!(alert.message, SAVE_FAILED);
    assert_eq!(alert.kind, AlertKind::Failure);
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();
    let before = store.movies().await;

    let mut draft = inception_draft();
    draft.movie_name = "Inception (Director's Cut)".to_string();
    draft.budget = "170".to_string();
    let validated = validate_draft(&draft).unwrap();

    store.update(&MovieId::new("1"), &validated).await.unwrap();

    let after = store.movies().await;
    assert_eq!(after.len(), 3);
    assert_eq!(after[0].id, MovieId::new("1"));
    assert_eq!(after[0].movie_name, "Inception (Director's Cut)");
    assert_eq!(after[0].budget, 170.0);
    assert_eq!(after[1..], before[1..]);
    assert_eq!(store.alerts().current().await.unwrap().message, MOVIE_UPDATED);
}

#[tokio::test]
async fn test_update_failure_leaves_list() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();
    let before = store.movies().await;

    let validated = validate_draft(&inception_draft()).unwrap();
    assert!(store.update(&MovieId::new("missing"), &validated).await.is_err());

    assert_eq!(store.movies().await, before);
    assert_eq!(store.alerts().current().await.unwrap().message, SAVE_FAILED);
}

#[tokio::test]
async fn test_delete_removes_one_and_reconciles_once() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();
    let fetches_before = RecordingBackend::calls(&backend.fetch_all_calls);

    store.delete(&MovieId::new("2")).await.unwrap();

    let movies = store.movies().await;
    assert_eq!(movies.len(), 2);
    assert!(movies.iter().all(|m| m.id.as_str() != "2"));
    assert_eq!(RecordingBackend::calls(&backend.delete_calls), 1);
    assert_eq!(RecordingBackend::calls(&backend.fetch_all_calls), fetches_before + 1);
    assert_eq!(store.alerts().current().await.unwrap().message, MOVIE_DELETED);
}

#[tokio::test]
async fn test_delete_reconcile_absorbs_server_side_changes() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();

    // Someone else removed record 3 since our last fetch
    backend.inner.remove_silently(&MovieId::new("3")).await;
    store.delete(&MovieId::new("1")).await.unwrap();

    let ids: Vec<String> = store.movies().await.iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["2"]);
}

#[tokio::test]
async fn test_delete_unknown_id_still_calls_backend() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();

    assert!(store.delete(&MovieId::new("nope")).await.is_err());
    assert_eq!(RecordingBackend::calls(&backend.delete_calls), 1);
    assert_eq!(store.movies().await.len(), 3);

    let alert = store.alerts().current().await.unwrap();
    assert_eq!(alert.message, DELETE_FAILED);
    assert_eq!(alert.kind, AlertKind::Failure);
}

#[tokio::test]
async fn test_delete_failure_does_not_reconcile() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();
    backend.set_failing(true);

    assert!(store.delete(&MovieId::new("1")).await.is_err());
    assert_eq!(RecordingBackend::calls(&backend.fetch_all_calls), 1);
    assert_eq!(store.movies().await.len(), 3);
}

#[tokio::test]
async fn test_edit_target_transitions() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();
    let fetch_one_before = RecordingBackend::calls(&backend.fetch_one_calls);

    let target = store.start_edit(&MovieId::new("3")).await.unwrap();
    assert_eq!(target.movie_name, "Interstellar");
    assert_eq!(store.view().await.edit_target(), Some(&target));
    // Looked up locally
    assert_eq!(RecordingBackend::calls(&backend.fetch_one_calls), fetch_one_before);

    store.start_create().await;
    assert_eq!(store.view().await, ViewState::CreateOrEdit { edit_target: None });

    store.start_edit(&MovieId::new("1")).await.unwrap();
    store.go_home().await;
    assert_eq!(store.view().await, ViewState::Home);

    assert!(store.start_edit(&MovieId::new("unknown")).await.is_none());
    assert_eq!(store.view().await, ViewState::Home);
}

#[tokio::test]
async fn test_visible_movies_follow_filter_state() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();

    store.set_genre_filter(Some(Genre::SciFi)).await;
    store.set_search_text("INTER").await;
    let visible = store.visible_movies().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].movie_name, "Interstellar");

    // Derived list tracks later list changes without being recomputed by hand
    store.delete(&MovieId::new("3")).await.unwrap();
    assert!(store.visible_movies().await.is_empty());

    store.set_genre_filter(None).await;
    store.set_search_text("").await;
    assert_eq!(store.visible_movies().await, store.movies().await);
}

#[tokio::test(start_paused = true)]
async fn test_last_completed_response_wins() {
    let backend = seeded();
    let store = store_with(backend.clone());
    store.fetch_all().await.unwrap();

    // A slow refresh reads the catalog, then a create lands before it answers
    backend.set_fetch_all_delay(Duration::from_millis(500));
    let slow_refresh = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    let validated = validate_draft(&inception_draft()).unwrap();
    let created = store.create(&validated).await.unwrap();
    assert!(store.find(&created.id).await.is_some());

    slow_refresh.await.unwrap().unwrap();
    // The stale snapshot overwrote the local append
    assert!(store.find(&created.id).await.is_none());
    assert_eq!(store.movies().await.len(), 3);
}
