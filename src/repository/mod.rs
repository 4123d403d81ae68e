// src/repository/mod.rs

//! Collaborator contracts used by the engine: the question repository, the
//! result sink and the session store. SQLite adapters back the server, the
//! in-memory adapters back tests and embedders.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    question::{Difficulty, Question, QuestionError},
    result::QuizResult,
    session::Session,
};

pub mod memory;
pub mod sqlite;

pub use memory::{InMemoryQuestionBank, MemoryResultSink, MemorySessionStore};
pub use sqlite::{SqliteQuestionRepository, SqliteResultSink, SqliteSessionStore};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("corrupt question record: {0}")]
    CorruptQuestion(#[from] QuestionError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Pick one question of `quiz_id` uniformly at random among those matching
    /// `difficulty` (any difficulty when `None`) whose id is not in `exclude`.
    async fn find_question(
        &self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
        exclude: &[i64],
    ) -> Result<Option<Question>, StorageError>;

    async fn count_questions(
        &self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
    ) -> Result<i64, StorageError>;

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>, StorageError>;
}

/// Destination for finalized results.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist a result and return its id.
    async fn store(&self, result: &QuizResult) -> Result<i64, StorageError>;
}

/// Keyed storage for in-flight sessions with read/replace semantics.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Uuid, StorageError>;

    /// Returns `None` for unknown or expired tokens.
    async fn load(&self, token: Uuid) -> Result<Option<Session>, StorageError>;

    async fn save(&self, token: Uuid, session: &Session) -> Result<(), StorageError>;

    async fn remove(&self, token: Uuid) -> Result<(), StorageError>;

    /// Delete sessions idle longer than the store's TTL. Returns how many were removed.
    async fn purge_expired(&self) -> Result<u64, StorageError>;
}
