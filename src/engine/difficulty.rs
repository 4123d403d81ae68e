// src/engine/difficulty.rs

use crate::models::question::Difficulty;

/// Next difficulty given the current one and whether the last answer was correct.
///
/// One step up on a correct answer, one step down on a wrong one, clamped at
/// `Easy` and `Hard`.
pub fn next_difficulty(current: Difficulty, was_correct: bool) -> Difficulty {
    match (current, was_correct) {
        (Difficulty::Easy, true) => Difficulty::Medium,
        (Difficulty::Easy, false) => Difficulty::Easy,
        (Difficulty::Medium, true) => Difficulty::Hard,
        (Difficulty::Medium, false) => Difficulty::Easy,
        (Difficulty::Hard, true) => Difficulty::Hard,
        (Difficulty::Hard, false) => Difficulty::Medium,
    }
}
