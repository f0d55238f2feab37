//! Learn session state machine.
//!
//! A [`LearnRun`] moves `Loading → Learning → Complete`. It owns the session
//! snapshot and the flashcard content it presents; callers persist the
//! progress it hands back.

use crate::algorithm::{LearnAlgorithm, RandomSource};
use crate::error::{LearnError, Result};
use crate::types::{CardProgress, Flashcard, LearnCard, LearnSession, ProgressSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Lifecycle state of a learn session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    Learning,
    Complete,
}

/// Why a run stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SessionFault {
    MissingFlashcard { flashcard_id: Uuid },
}

/// One learn session being studied.
#[derive(Debug, Clone)]
pub struct LearnRun {
    session: LearnSession,
    flashcards: HashMap<Uuid, Flashcard>,
    algorithm: LearnAlgorithm,
    state: SessionState,
    current: Option<Uuid>,
    fault: Option<SessionFault>,
    wrong_card_ids: Vec<Uuid>,
}

impl LearnRun {
    /// Wrap a session in the `Loading` state.
    pub fn new(session: LearnSession, flashcards: impl IntoIterator<Item = Flashcard>) -> Self {
        let algorithm = LearnAlgorithm::new(session.mastery_goal);
        let state = if session.is_completed {
            SessionState::Complete
        } else {
            SessionState::Loading
        };

        Self {
            session,
            flashcards: flashcards.into_iter().map(|f| (f.id, f)).collect(),
            algorithm,
            state,
            current: None,
            fault: None,
            wrong_card_ids: Vec::new(),
        }
    }

    /// Build a run and pick its first card.
    pub fn start(
        session: LearnSession,
        flashcards: impl IntoIterator<Item = Flashcard>,
        rng: &mut dyn RandomSource,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if session.progress.is_empty() {
            return Err(LearnError::EmptySession(session.id));
        }

        let mut run = Self::new(session, flashcards);
        if run.state == SessionState::Loading {
            run.advance(rng, now)?;
        }
        Ok(run)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> &LearnSession {
        &self.session
    }

    pub fn into_session(self) -> LearnSession {
        self.session
    }

    pub fn fault(&self) -> Option<SessionFault> {
        self.fault
    }

    /// Flashcards answered wrong during this run, in first-miss order.
    pub fn wrong_card_ids(&self) -> &[Uuid] {
        &self.wrong_card_ids
    }

    pub fn summary(&self) -> ProgressSummary {
        self.algorithm.calculate_progress(&self.session.progress)
    }

    /// Card currently presented, while learning.
    pub fn current_card(&self) -> Option<LearnCard> {
        let progress = self.current_progress()?;
        let flashcard = self.flashcards.get(&progress.flashcard_id)?;
        Some(LearnCard::new(flashcard, progress.clone()))
    }

    fn current_progress(&self) -> Option<&CardProgress> {
        let id = self.current?;
        self.session.progress_by_id(id)
    }

    /// Record an answer for the current card and move on.
    ///
    /// Returns the updated progress record for the caller to persist. If the
    /// next card has no flashcard content the run still returns the update;
    /// it ends in `Complete` with [`LearnRun::fault`] set.
    pub fn answer(
        &mut self,
        is_correct: bool,
        rng: &mut dyn RandomSource,
        now: DateTime<Utc>,
    ) -> Result<CardProgress> {
        if self.state != SessionState::Learning {
            return Err(LearnError::SessionCompleted(self.session.id));
        }
        let current = self.current.ok_or(LearnError::SessionCompleted(self.session.id))?;

        let updated = self.record_answer(current, is_correct, now)?;
        if self.state != SessionState::Complete {
            // The fault is kept on the run; the answer itself still counts.
            let _ = self.advance(rng, now);
        }
        Ok(updated)
    }

    /// Apply an answer to any progress record of the session without picking
    /// the next card. Completes the run when every card is mastered.
    ///
    /// Accepted while `Loading` or `Learning`, so a persisted session can be
    /// answered without first reselecting.
    pub fn record_answer(
        &mut self,
        progress_id: Uuid,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<CardProgress> {
        if self.state == SessionState::Complete {
            return Err(LearnError::SessionCompleted(self.session.id));
        }

        let session_id = self.session.id;
        let slot = self
            .session
            .progress
            .iter_mut()
            .find(|p| p.id == progress_id)
            .ok_or(LearnError::ProgressNotInSession {
                progress_id,
                session_id,
            })?;
        let updated = self.algorithm.update_progress(slot, is_correct, now);
        *slot = updated.clone();
        self.session.updated_at = now;

        if !is_correct && !self.wrong_card_ids.contains(&updated.flashcard_id) {
            self.wrong_card_ids.push(updated.flashcard_id);
        }

        if self.algorithm.is_session_complete(&self.session.progress) {
            self.finish();
        }
        Ok(updated)
    }

    /// Explicit completion from the caller. Idempotent.
    pub fn complete(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.state = SessionState::Complete;
        self.current = None;
        self.session.is_completed = true;
    }

    /// Select the next card. Fails closed into `Complete` when the chosen
    /// progress has no flashcard content.
    fn advance(&mut self, rng: &mut dyn RandomSource, now: DateTime<Utc>) -> Result<()> {
        let Some(next) = self
            .algorithm
            .select_next_card(&self.session.progress, rng, now)
        else {
            self.finish();
            return Ok(());
        };

        if !self.flashcards.contains_key(&next.flashcard_id) {
            let flashcard_id = next.flashcard_id;
            tracing::warn!(
                session_id = %self.session.id,
                %flashcard_id,
                "selected progress is missing its flashcard, completing session"
            );
            self.finish();
            self.fault = Some(SessionFault::MissingFlashcard { flashcard_id });
            return Err(LearnError::MissingFlashcard { flashcard_id });
        }

        self.current = Some(next.id);
        self.state = SessionState::Learning;
        Ok(())
    }
}
