// src/engine/scoring.rs

use chrono::{DateTime, Utc};

use crate::models::{
    result::{BandBreakdown, QuizResult},
    session::Session,
};

/// Aggregates a session's ledger into a result.
///
/// Pure: the session is not modified and the same inputs always give the same
/// result, so a failed sink write can simply be retried.
pub fn finalize(session: &Session, now: DateTime<Utc>) -> QuizResult {
    let mut score = 0i64;
    let mut total = 0i64;
    let mut correct_count = 0u32;
    let mut wrong_count = 0u32;
    let mut bands = BandBreakdown::default();

    for record in session.ledger.values() {
        total += i64::from(record.points);
        let band = bands.band_mut(record.difficulty);
        band.total += 1;

        if record.is_correct {
            score += i64::from(record.points);
            band.correct += 1;
            correct_count += 1;
        } else {
            wrong_count += 1;
        }
    }

    let percentage = if total > 0 {
        score as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    QuizResult {
        taker_id: session.taker_id,
        quiz_id: session.quiz_id,
        score,
        total,
        percentage,
        correct_count,
        wrong_count,
        time_taken: (now - session.started_at).num_seconds().max(0),
        bands,
        started_at: session.started_at,
        completed_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{question::Difficulty, session::AnswerRecord};
    use chrono::Duration;

    fn record(difficulty: Difficulty, points: u32, is_correct: bool) -> AnswerRecord {
        AnswerRecord {
            selected: "x".to_string(),
            correct_option: if is_correct { "x" } else { "y" }.to_string(),
            is_correct,
            points,
            difficulty,
        }
    }

    fn session_with(records: Vec<AnswerRecord>) -> Session {
        let mut session = Session::start(3, 9, Utc::now());
        for (i, r) in records.into_iter().enumerate() {
            let id = i as i64 + 1;
            session.answered.push(id);
            session.ledger.insert(id, r);
        }
        session
    }

    #[test]
    fn test_empty_ledger() {
        let session = session_with(vec![]);
        let result = finalize(&session, session.started_at);

        assert_eq!(result.total, 0);
        assert_eq!(result.score, 0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.correct_count + result.wrong_count, 0);
        assert_eq!(result.bands, BandBreakdown::default());
    }

    #[test]
    fn test_ledger_invariants() {
        let ledgers = vec![
            vec![record(Difficulty::Easy, 2, true)],
            vec![
                record(Difficulty::Hard, 5, false),
                record(Difficulty::Hard, 5, false),
            ],
            vec![
                record(Difficulty::Easy, 1, true),
                record(Difficulty::Medium, 3, false),
                record(Difficulty::Medium, 3, true),
                record(Difficulty::Hard, 4, true),
                record(Difficulty::Easy, 2, false),
            ],
        ];

        for records in ledgers {
            let wrong_points: i64 = records
                .iter()
                .filter(|r| !r.is_correct)
                .map(|r| i64::from(r.points))
                .sum();
            let session = session_with(records);
            let result = finalize(&session, Utc::now());
            let len = session.ledger.len() as u32;

            assert_eq!(result.score + wrong_points, result.total);
            assert_eq!(result.correct_count + result.wrong_count, len);

            let mut band_total = 0;
            for d in Difficulty::ALL {
                let band = result.bands.band(d);
                assert!(band.correct <= band.total);
                band_total += band.total;
            }
            assert_eq!(band_total, len);
        }
    }

    #[test]
    fn test_time_taken_truncates_and_never_negative() {
        let session = session_with(vec![]);

        let later = session.started_at + Duration::milliseconds(61_900);
        assert_eq!(finalize(&session, later).time_taken, 61);

        let earlier = session.started_at - Duration::seconds(30);
        assert_eq!(finalize(&session, earlier).time_taken, 0);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let session = session_with(vec![
            record(Difficulty::Medium, 3, true),
            record(Difficulty::Hard, 5, false),
        ]);
        let before = session.clone();
        let now = Utc::now();

        assert_eq!(finalize(&session, now), finalize(&session, now));
        assert_eq!(session, before);
    }

    #[test]
    fn test_mixed_ledger_scores() {
        let session = session_with(vec![
            record(Difficulty::Medium, 3, true),
            record(Difficulty::Hard, 5, false),
            record(Difficulty::Easy, 2, true),
        ]);
        let result = finalize(&session, Utc::now());

        assert_eq!(result.score, 5);
        assert_eq!(result.total, 10);
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.wrong_count, 1);
        assert_eq!(result.bands.easy.correct, 1);
        assert_eq!(result.bands.easy.total, 1);
        assert_eq!(result.bands.medium.correct, 1);
        assert_eq!(result.bands.medium.total, 1);
        assert_eq!(result.bands.hard.correct, 0);
        assert_eq!(result.bands.hard.total, 1);
    }

    #[test]
    fn test_large_point_values_do_not_overflow() {
        let session = session_with(vec![
            record(Difficulty::Hard, 3_000_000_000, true),
            record(Difficulty::Hard, 3_000_000_000, true),
            record(Difficulty::Medium, u32::MAX, false),
        ]);
        let result = finalize(&session, Utc::now());

        assert_eq!(result.score, 6_000_000_000);
        assert_eq!(result.total, 6_000_000_000 + i64::from(u32::MAX));
        assert!(result.percentage > 58.0 && result.percentage < 59.0);
        assert_eq!(result.correct_count, 2);
    }
}
