//! Adaptive card selection for Learn Mode.
//!
//! Cards are drawn at random, weighted by their history: misses make a card
//! more likely, successes less likely, and a card answered in the last two
//! minutes is damped so it does not repeat immediately. Every unmastered card
//! keeps a weight of at least 1.

use super::RandomSource;
use crate::matching;
use crate::types::{
    CardProgress, ProgressSummary, Tracked, DEFAULT_MASTERY_GOAL, MAX_PRIORITY, MIN_PRIORITY,
};
use chrono::{DateTime, Duration, Utc};

const BASE_WEIGHT: i64 = 100;
const INCORRECT_BONUS: i64 = 50;
const STREAK_PENALTY: i64 = 20;
const CORRECT_PENALTY: i64 = 10;
const RECENT_FLOOR: i64 = 10;
const MIN_WEIGHT: i64 = 1;
const RECENCY_WINDOW_SECS: i64 = 120;

const CORRECT_PRIORITY_STEP: i32 = 20;
const INCORRECT_PRIORITY_STEP: i32 = 50;

/// Learn Mode scheduler for one session's mastery goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnAlgorithm {
    mastery_goal: u32,
}

impl Default for LearnAlgorithm {
    fn default() -> Self {
        Self::new(DEFAULT_MASTERY_GOAL)
    }
}

impl LearnAlgorithm {
    pub fn new(mastery_goal: u32) -> Self {
        Self { mastery_goal }
    }

    pub fn mastery_goal(&self) -> u32 {
        self.mastery_goal
    }

    /// Pick the next unmastered card, or `None` when everything is mastered.
    pub fn select_next_card<'a, T: Tracked>(
        &self,
        cards: &'a [T],
        rng: &mut dyn RandomSource,
        now: DateTime<Utc>,
    ) -> Option<&'a T> {
        let weighted: Vec<(&T, i64)> = cards
            .iter()
            .filter(|card| !card.progress().mastered)
            .map(|card| (card, self.calculate_weight(card.progress(), now)))
            .collect();

        let first = weighted.first()?.0;
        let total: i64 = weighted.iter().map(|(_, w)| w).sum();

        let mut remaining = rng.next_unit() * total as f64;
        for (card, weight) in &weighted {
            remaining -= *weight as f64;
            if remaining <= 0.0 {
                return Some(*card);
            }
        }

        // Only reachable through float drift or a draw outside [0, 1).
        Some(first)
    }

    /// Selection weight for a progress record. Always at least 1.
    pub fn calculate_weight(&self, progress: &CardProgress, now: DateTime<Utc>) -> i64 {
        let mut weight = BASE_WEIGHT;
        weight += i64::from(progress.total_incorrect) * INCORRECT_BONUS;
        weight -= i64::from(progress.correct_streak) * STREAK_PENALTY;
        if progress.total_correct > 0 {
            weight -= i64::from(progress.total_correct) * CORRECT_PENALTY;
        }

        if let Some(last_seen) = progress.last_seen {
            if now - last_seen < Duration::seconds(RECENCY_WINDOW_SECS) {
                // Weights are multiples of 10 here, so * 0.3 stays integral.
                weight = (weight * 3 / 10).max(RECENT_FLOOR);
            }
        }

        weight.max(MIN_WEIGHT)
    }

    /// Apply one answer, returning the new progress record.
    pub fn update_progress(
        &self,
        progress: &CardProgress,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> CardProgress {
        let mut updated = progress.clone();

        if is_correct {
            updated.correct_streak += 1;
            updated.total_correct += 1;
            if updated.correct_streak >= self.mastery_goal {
                updated.mastered = true;
            }
            updated.priority = (updated.priority - CORRECT_PRIORITY_STEP).max(MIN_PRIORITY);
        } else {
            updated.correct_streak = 0;
            updated.total_incorrect += 1;
            updated.mastered = false;
            updated.priority = (updated.priority + INCORRECT_PRIORITY_STEP).min(MAX_PRIORITY);
        }

        updated.last_seen = Some(now);
        updated
    }

    /// True when every card is mastered.
    pub fn is_session_complete<T: Tracked>(&self, cards: &[T]) -> bool {
        cards.iter().all(|card| card.progress().mastered)
    }

    pub fn calculate_progress<T: Tracked>(&self, cards: &[T]) -> ProgressSummary {
        let mastered_count = cards.iter().filter(|c| c.progress().mastered).count();
        let total_count = cards.len();
        let percent_complete = if total_count > 0 {
            (mastered_count as f64 / total_count as f64 * 100.0).round() as u32
        } else {
            0
        };

        ProgressSummary {
            mastered_count,
            total_count,
            percent_complete,
        }
    }

    /// Open-text answer comparison. See [`matching::check_answer`].
    pub fn check_answer(&self, user_answer: &str, correct_answer: &str) -> bool {
        matching::check_answer(user_answer, correct_answer)
    }
}
