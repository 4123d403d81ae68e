// src/repository/sqlite.rs

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::IndexedRandom;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{QuestionRepository, ResultSink, SessionStore, StorageError};
use crate::models::{
    question::{Difficulty, Question, QuestionRow},
    result::QuizResult,
    session::Session,
};

const QUESTION_COLUMNS: &str = "id, quiz_id, prompt, option_a, option_b, option_c, option_d, \
                                correct_option, difficulty, points";

/// Question bank backed by the `questions` table.
#[derive(Clone)]
pub struct SqliteQuestionRepository {
    pool: SqlitePool,
}

impl SqliteQuestionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for SqliteQuestionRepository {
    async fn find_question(
        &self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
        exclude: &[i64],
    ) -> Result<Option<Question>, StorageError> {
        // Materialize the candidate ids and sample one uniformly.
        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT id FROM questions WHERE quiz_id = ");
        query_builder.push_bind(quiz_id);

        if let Some(difficulty) = difficulty {
            query_builder.push(" AND difficulty = ");
            query_builder.push_bind(difficulty.as_str());
        }

        if !exclude.is_empty() {
            query_builder.push(" AND id NOT IN (");
            let mut separated = query_builder.separated(", ");
            for id in exclude {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }

        let candidates: Vec<i64> = query_builder
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch candidate questions: {:?}", e);
                StorageError::from(e)
            })?;

        let picked = {
            let mut rng = rand::rng();
            candidates.choose(&mut rng).copied()
        };

        match picked {
            Some(id) => self.get_question(id).await,
            None => Ok(None),
        }
    }

    async fn count_questions(
        &self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
    ) -> Result<i64, StorageError> {
        let count: i64 = match difficulty {
            Some(difficulty) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM questions WHERE quiz_id = ? AND difficulty = ?",
                )
                .bind(quiz_id)
                .bind(difficulty.as_str())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = ?")
                    .bind(quiz_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?"
        ))
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Question::try_from)
            .transpose()
            .map_err(StorageError::from)
    }
}

/// Result sink backed by the `results` table.
#[derive(Clone)]
pub struct SqliteResultSink {
    pool: SqlitePool,
}

impl SqliteResultSink {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultSink for SqliteResultSink {
    async fn store(&self, result: &QuizResult) -> Result<i64, StorageError> {
        let bands = &result.bands;
        let id = sqlx::query(
            r#"
            INSERT INTO results (
                taker_id, quiz_id, score, total, percentage, correct_count, wrong_count,
                time_taken, easy_correct, easy_total, medium_correct, medium_total,
                hard_correct, hard_total, started_at, completed_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(result.taker_id)
        .bind(result.quiz_id)
        .bind(result.score)
        .bind(result.total)
        .bind(result.percentage)
        .bind(i64::from(result.correct_count))
        .bind(i64::from(result.wrong_count))
        .bind(result.time_taken)
        .bind(i64::from(bands.easy.correct))
        .bind(i64::from(bands.easy.total))
        .bind(i64::from(bands.medium.correct))
        .bind(i64::from(bands.medium.total))
        .bind(i64::from(bands.hard.correct))
        .bind(i64::from(bands.hard.total))
        .bind(result.started_at)
        .bind(result.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz result: {:?}", e);
            StorageError::from(e)
        })?
        .last_insert_rowid();

        Ok(id)
    }
}

/// Session store keeping each session as a JSON blob in `quiz_sessions`.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
    ttl: chrono::Duration,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool, ttl: chrono::Duration) -> Self {
        Self { pool, ttl }
    }

    fn cutoff(&self) -> i64 {
        (Utc::now() - self.ttl).timestamp()
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, session: &Session) -> Result<Uuid, StorageError> {
        let token = Uuid::new_v4();
        let state = serde_json::to_string(session)?;

        sqlx::query(
            "INSERT INTO quiz_sessions (token, taker_id, quiz_id, state, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(token.to_string())
        .bind(session.taker_id)
        .bind(session.quiz_id)
        .bind(state)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(token)
    }

    async fn load(&self, token: Uuid) -> Result<Option<Session>, StorageError> {
        let state: Option<String> = sqlx::query_scalar(
            "SELECT state FROM quiz_sessions WHERE token = ? AND updated_at >= ?",
        )
        .bind(token.to_string())
        .bind(self.cutoff())
        .fetch_optional(&self.pool)
        .await?;

        state
            .map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(StorageError::from)
    }

    async fn save(&self, token: Uuid, session: &Session) -> Result<(), StorageError> {
        let state = serde_json::to_string(session)?;

        let affected = sqlx::query(
            "UPDATE quiz_sessions SET state = ?, updated_at = ? WHERE token = ?",
        )
        .bind(state)
        .bind(Utc::now().timestamp())
        .bind(token.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(StorageError::Unavailable(format!(
                "session {token} no longer exists"
            )));
        }
        Ok(())
    }

    async fn remove(&self, token: Uuid) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM quiz_sessions WHERE token = ?")
            .bind(token.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, StorageError> {
        let removed = sqlx::query("DELETE FROM quiz_sessions WHERE updated_at < ?")
            .bind(self.cutoff())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(removed)
    }
}
