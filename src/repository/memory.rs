// src/repository/memory.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use uuid::Uuid;

use super::{QuestionRepository, ResultSink, SessionStore, StorageError};
use crate::models::{
    question::{Difficulty, Question},
    result::QuizResult,
    session::Session,
};

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("lock poisoned".to_string())
}

/// Fixed question bank held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionBank {
    questions: Vec<Question>,
}

impl InMemoryQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    fn matching<'a>(
        &'a self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| {
            q.quiz_id == quiz_id && difficulty.is_none_or(|d| q.difficulty == d)
        })
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionBank {
    async fn find_question(
        &self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
        exclude: &[i64],
    ) -> Result<Option<Question>, StorageError> {
        let candidates: Vec<&Question> = self
            .matching(quiz_id, difficulty)
            .filter(|q| !exclude.contains(&q.id))
            .collect();

        let mut rng = rand::rng();
        Ok(candidates.choose(&mut rng).map(|q| (*q).clone()))
    }

    async fn count_questions(
        &self,
        quiz_id: i64,
        difficulty: Option<Difficulty>,
    ) -> Result<i64, StorageError> {
        Ok(self.matching(quiz_id, difficulty).count() as i64)
    }

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>, StorageError> {
        Ok(self.questions.iter().find(|q| q.id == question_id).cloned())
    }
}

/// Result sink that keeps every stored result in a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryResultSink {
    results: Arc<Mutex<Vec<QuizResult>>>,
}

impl MemoryResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<QuizResult> {
        self.results
            .lock()
            .map(|results| results.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResultSink for MemoryResultSink {
    async fn store(&self, result: &QuizResult) -> Result<i64, StorageError> {
        let mut results = self.results.lock().map_err(poisoned)?;
        results.push(result.clone());
        Ok(results.len() as i64)
    }
}

/// Session store keeping sessions in a process-local map.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, (Session, DateTime<Utc>)>>>,
    ttl: chrono::Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session) -> Result<Uuid, StorageError> {
        let token = Uuid::new_v4();
        self.sessions
            .lock()
            .map_err(poisoned)?
            .insert(token, (session.clone(), Utc::now()));
        Ok(token)
    }

    async fn load(&self, token: Uuid) -> Result<Option<Session>, StorageError> {
        let cutoff = Utc::now() - self.ttl;
        let sessions = self.sessions.lock().map_err(poisoned)?;
        Ok(sessions
            .get(&token)
            .filter(|(_, touched)| *touched >= cutoff)
            .map(|(session, _)| session.clone()))
    }

    async fn save(&self, token: Uuid, session: &Session) -> Result<(), StorageError> {
        let mut sessions = self.sessions.lock().map_err(poisoned)?;
        match sessions.get_mut(&token) {
            Some(entry) => {
                *entry = (session.clone(), Utc::now());
                Ok(())
            }
            None => Err(StorageError::Unavailable(format!(
                "session {token} no longer exists"
            ))),
        }
    }

    async fn remove(&self, token: Uuid) -> Result<(), StorageError> {
        self.sessions.lock().map_err(poisoned)?.remove(&token);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, StorageError> {
        let cutoff = Utc::now() - self.ttl;
        let mut sessions = self.sessions.lock().map_err(poisoned)?;
        let before = sessions.len();
        sessions.retain(|_, (_, touched)| *touched >= cutoff);
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_session_store_round_trip() {
        let store = MemorySessionStore::new(chrono::Duration::minutes(5));
        let mut session = Session::start(1, 2, Utc::now());
        let token = store.create(&session).await.unwrap();

        session.answered.push(10);
        store.save(token, &session).await.unwrap();

        let loaded = store.load(token).await.unwrap().unwrap();
        assert_eq!(loaded.answered, vec![10]);

        store.remove(token).await.unwrap();
        assert!(store.load(token).await.unwrap().is_none());
        assert!(store.save(token, &session).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_session_store_expiry() {
        let store = MemorySessionStore::new(chrono::Duration::seconds(-1));
        let token = store.create(&Session::start(1, 2, Utc::now())).await.unwrap();

        assert!(store.load(token).await.unwrap().is_none());
        assert_eq!(store.purge_expired().await.unwrap(), 1);
    }
}
