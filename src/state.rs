// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::repository::{
    QuestionRepository, ResultSink, SessionStore, SqliteQuestionRepository, SqliteResultSink,
    SqliteSessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub questions: Arc<dyn QuestionRepository>,
    pub results: Arc<dyn ResultSink>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Wires every collaborator to the same SQLite pool.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let ttl = config.session_ttl();
        Self {
            questions: Arc::new(SqliteQuestionRepository::new(pool.clone())),
            results: Arc::new(SqliteResultSink::new(pool.clone())),
            sessions: Arc::new(SqliteSessionStore::new(pool.clone(), ttl)),
            pool,
            config,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

