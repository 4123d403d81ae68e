// src/engine/selector.rs

use rand::{Rng, seq::SliceRandom};

use super::EngineError;
use crate::{
    models::question::{Difficulty, PresentedQuestion, Question},
    repository::QuestionRepository,
};

/// Outcome of asking for the next question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Next(PresentedQuestion),
    /// Every question of the quiz has been answered. This is the normal end of
    /// an attempt, not an error.
    Done,
}

/// Picks the next question for a session.
///
/// Prefers an unanswered question at `preferred`; when that band is exhausted
/// any unanswered question of the quiz is acceptable. Options are shuffled
/// anew on every call.
pub async fn select_next(
    repo: &dyn QuestionRepository,
    quiz_id: i64,
    preferred: Difficulty,
    excluded: &[i64],
) -> Result<Selection, EngineError> {
    let question = match repo.find_question(quiz_id, Some(preferred), excluded).await? {
        Some(question) => Some(question),
        None => {
            tracing::debug!(
                "No {} question left in quiz {}, falling back to any difficulty",
                preferred,
                quiz_id
            );
            repo.find_question(quiz_id, None, excluded).await?
        }
    };

    let Some(question) = question else {
        tracing::debug!("Question pool of quiz {} exhausted", quiz_id);
        return Ok(Selection::Done);
    };

    let presented = {
        let mut rng = rand::rng();
        present(question, &mut rng)
    };
    Ok(Selection::Next(presented))
}

/// Strips the correct answer and shuffles the options into presentation order.
pub fn present<R: Rng + ?Sized>(question: Question, rng: &mut R) -> PresentedQuestion {
    let mut options = question.options.to_vec();
    options.shuffle(rng);

    PresentedQuestion {
        id: question.id,
        text: question.prompt,
        options,
        difficulty: question.difficulty,
        marks: question.points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryQuestionBank;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn question(id: i64, quiz_id: i64, difficulty: Difficulty) -> Question {
        Question::new(
            id,
            quiz_id,
            format!("Question {id}"),
            ["A".into(), "B".into(), "C".into(), "D".into()],
            "A",
            difficulty,
            1,
        )
        .unwrap()
    }

    fn bank() -> InMemoryQuestionBank {
        InMemoryQuestionBank::new(vec![
            question(1, 1, Difficulty::Easy),
            question(2, 1, Difficulty::Easy),
            question(3, 1, Difficulty::Medium),
            question(4, 1, Difficulty::Hard),
            question(5, 1, Difficulty::Hard),
            question(6, 2, Difficulty::Medium),
        ])
    }

    fn expect_next(selection: Selection) -> PresentedQuestion {
        match selection {
            Selection::Next(q) => q,
            Selection::Done => panic!("expected a question, got Done"),
        }
    }

    #[tokio::test]
    async fn test_prefers_requested_difficulty() {
        let bank = bank();
        for _ in 0..20 {
            let q = expect_next(select_next(&bank, 1, Difficulty::Hard, &[]).await.unwrap());
            assert_eq!(q.difficulty, Difficulty::Hard);
        }
    }

    #[tokio::test]
    async fn test_falls_back_when_band_exhausted() {
        let bank = bank();
        let q = expect_next(select_next(&bank, 1, Difficulty::Medium, &[3]).await.unwrap());
        assert_ne!(q.id, 3);
        assert_ne!(q.difficulty, Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_never_returns_excluded_and_ends_with_done() {
        let bank = bank();
        let mut excluded: Vec<i64> = Vec::new();
        let mut difficulty = Difficulty::Medium;

        loop {
            let total = bank.count_questions(1, None).await.unwrap();
            let selection = select_next(&bank, 1, difficulty, &excluded).await.unwrap();
            // Done exactly when the pool is used up.
            assert_eq!(
                selection == Selection::Done,
                total <= excluded.len() as i64
            );
            match selection {
                Selection::Next(q) => {
                    assert!(!excluded.contains(&q.id));
                    excluded.push(q.id);
                    difficulty = q.difficulty;
                }
                Selection::Done => break,
            }
        }

        let unique: HashSet<_> = excluded.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(!excluded.contains(&6), "question of another quiz was selected");
    }

    #[tokio::test]
    async fn test_empty_quiz_is_done() {
        let bank = bank();
        let selection = select_next(&bank, 99, Difficulty::Medium, &[]).await.unwrap();
        assert_eq!(selection, Selection::Done);
    }

    #[test]
    fn test_present_hides_answer_and_keeps_options() {
        let mut rng = StdRng::seed_from_u64(7);
        let q = question(1, 1, Difficulty::Easy);
        let presented = present(q.clone(), &mut rng);

        let mut shown = presented.options.clone();
        shown.sort();
        assert_eq!(shown, q.options.to_vec());
        assert_eq!(presented.text, q.prompt);
        assert_eq!(presented.marks, q.points);
    }

    #[test]
    fn test_present_reshuffles_each_time() {
        let mut rng = StdRng::seed_from_u64(42);
        let q = question(1, 1, Difficulty::Easy);
        let orders: HashSet<Vec<String>> = (0..50)
            .map(|_| present(q.clone(), &mut rng).options)
            .collect();
        assert!(orders.len() > 1);
    }
}
