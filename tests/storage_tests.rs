// tests/storage_tests.rs

use adaptive_quiz::{
    config::Config,
    engine,
    models::{question::Difficulty, session::Session},
    repository::{
        QuestionRepository, ResultSink, SessionStore, SqliteQuestionRepository, SqliteResultSink,
        SqliteSessionStore,
    },
    routes,
    seed::seed_sample_quizzes,
    state::AppState,
};
use axum::{body::Body, http::Request};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

async fn seeded_pool() -> (SqlitePool, i64) {
    let pool = memory_pool().await;
    seed_sample_quizzes(&pool).await.expect("Failed to seed");
    let quiz_id: i64 =
        sqlx::query_scalar("SELECT id FROM quizzes WHERE title = 'Rust Fundamentals'")
            .fetch_one(&pool)
            .await
            .unwrap();
    (pool, quiz_id)
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let pool = memory_pool().await;

    let first = seed_sample_quizzes(&pool).await.unwrap();
    let second = seed_sample_quizzes(&pool).await.unwrap();

    assert!(first > 0);
    assert_eq!(second, 0);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count as usize, first);
}

#[tokio::test]
async fn repository_counts_and_filters() {
    let (pool, quiz_id) = seeded_pool().await;
    let repo = SqliteQuestionRepository::new(pool);

    let total = repo.count_questions(quiz_id, None).await.unwrap();
    let mut by_band = 0;
    for d in Difficulty::ALL {
        let n = repo.count_questions(quiz_id, Some(d)).await.unwrap();
        assert!(n > 0);
        by_band += n;
    }
    assert_eq!(total, by_band);

    for _ in 0..10 {
        let q = repo
            .find_question(quiz_id, Some(Difficulty::Hard), &[])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.quiz_id, quiz_id);
        assert!(q.options.contains(&q.correct_option));
    }

    assert!(repo.get_question(999_999).await.unwrap().is_none());
}

#[tokio::test]
async fn repository_respects_exclusions_until_exhausted() {
    let (pool, quiz_id) = seeded_pool().await;
    let repo = SqliteQuestionRepository::new(pool);
    let total = repo.count_questions(quiz_id, None).await.unwrap();

    let mut excluded: Vec<i64> = Vec::new();
    loop {
        let found = repo.find_question(quiz_id, None, &excluded).await.unwrap();
        let Some(q) = found else { break };
        assert!(!excluded.contains(&q.id));
        excluded.push(q.id);
    }

    assert_eq!(excluded.len() as i64, total);
    let selection = engine::select_next(&repo, quiz_id, Difficulty::Medium, &excluded)
        .await
        .unwrap();
    assert_eq!(selection, engine::Selection::Done);
}

#[tokio::test]
async fn result_sink_assigns_ids() {
    let (pool, quiz_id) = seeded_pool().await;
    let sink = SqliteResultSink::new(pool.clone());
    let session = Session::start(5, quiz_id, Utc::now());
    let result = engine::finalize(&session, Utc::now());

    let first = sink.store(&result).await.unwrap();
    let second = sink.store(&result).await.unwrap();

    assert_ne!(first, second);
    let taker: i64 = sqlx::query_scalar("SELECT taker_id FROM results WHERE id = ?")
        .bind(first)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(taker, 5);
}

#[tokio::test]
async fn session_store_round_trips_and_expires() {
    let (pool, quiz_id) = seeded_pool().await;
    let store = SqliteSessionStore::new(pool.clone(), Duration::hours(1));

    let mut session = Session::start(9, quiz_id, Utc::now());
    let token = store.create(&session).await.unwrap();

    let repo = SqliteQuestionRepository::new(pool.clone());
    let q = repo.find_question(quiz_id, None, &[]).await.unwrap().unwrap();
    engine::record_answer(&repo, &mut session, Some(q.id), Some(q.correct_option.as_str()))
        .await
        .unwrap();
    store.save(token, &session).await.unwrap();

    let loaded = store.load(token).await.unwrap().unwrap();
    assert_eq!(loaded, session);

    // Backdate the row past the TTL.
    sqlx::query("UPDATE quiz_sessions SET updated_at = updated_at - 7200 WHERE token = ?")
        .bind(token.to_string())
        .execute(&pool)
        .await
        .unwrap();
    assert!(store.load(token).await.unwrap().is_none());
    assert_eq!(store.purge_expired().await.unwrap(), 1);

    store.remove(token).await.unwrap();
    assert!(store.save(token, &session).await.is_err());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let pool = memory_pool().await;
    let app = routes::create_router(AppState::new(pool, Config::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"].get("/api/sessions/{token}/answer").is_some());
}
