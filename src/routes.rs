// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    docs,
    handlers::{quiz, result, session},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, session, result).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, collaborators, config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes))
        .route("/{quiz_id}/start", post(quiz::start_quiz));

    let session_routes = Router::new()
        .route("/{token}/next", post(session::next_question))
        .route("/{token}/answer", post(session::submit_answer))
        .route("/{token}/submit", post(session::submit_quiz));

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/sessions", session_routes)
        .route("/api/results/{id}", get(result::get_result))
        .route("/api/takers/{taker_id}/results", get(result::list_taker_results))
        .route("/api/openapi.json", get(docs::openapi_json))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
