// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::question::Difficulty;

/// Correct/total counters for one difficulty band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BandTally {
    pub correct: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BandBreakdown {
    pub easy: BandTally,
    pub medium: BandTally,
    pub hard: BandTally,
}

impl BandBreakdown {
    pub fn band(&self, difficulty: Difficulty) -> &BandTally {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn band_mut(&mut self, difficulty: Difficulty) -> &mut BandTally {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// Scored outcome of one completed attempt. Built once by the scoring
/// aggregator and handed to a `ResultSink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizResult {
    pub taker_id: i64,
    pub quiz_id: i64,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub correct_count: u32,
    pub wrong_count: u32,
    /// Whole seconds between session start and finalization.
    pub time_taken: i64,
    pub bands: BandBreakdown,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Represents the 'results' table joined with the quiz title.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ResultRecord {
    pub id: i64,
    pub taker_id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub correct_count: i64,
    pub wrong_count: i64,
    pub time_taken: i64,
    pub easy_correct: i64,
    pub easy_total: i64,
    pub medium_correct: i64,
    pub medium_total: i64,
    pub hard_correct: i64,
    pub hard_total: i64,
    pub completed_at: DateTime<Utc>,
}

/// DTO returned after a successful submit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitQuizResponse {
    pub result_id: i64,
    pub result: QuizResult,
}
