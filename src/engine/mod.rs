// src/engine/mod.rs

//! Adaptive question selection and session scoring.
//!
//! Nothing in here holds state between calls: every operation takes the
//! session and the collaborators it needs as arguments.

use thiserror::Error;

use crate::repository::StorageError;

pub mod difficulty;
pub mod recorder;
pub mod scoring;
pub mod selector;

pub use difficulty::next_difficulty;
pub use recorder::{AnswerOutcome, record_answer};
pub use scoring::finalize;
pub use selector::{Selection, present, select_next};

/// Errors produced by engine operations. All of them are scoped to a single
/// session and request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("question {0} was already answered in this session")]
    DuplicateAnswer(i64),

    #[error("question {0} not found")]
    QuestionNotFound(i64),

    #[error("storage failure: {0}")]
    StorageFailure(#[from] StorageError),
}
