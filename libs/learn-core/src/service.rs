//! Persisted learn session operations.
//!
//! [`LearnService`] is the caller-facing side of the session state machine:
//! it reads snapshots from a [`LearnStore`], runs the scheduler over them and
//! writes the results back.

use crate::algorithm::RandomSource;
use crate::error::{LearnError, Result};
use crate::session::{LearnRun, SessionState};
use crate::store::LearnStore;
use crate::types::{CardProgress, LearnCard, LearnSession, NewLearnSession, ProgressSummary};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Learn session lifecycle over a store.
pub struct LearnService<S> {
    store: S,
    /// Held for a whole answer round-trip so the completion check always
    /// reads the progress that was just written.
    answer_lock: Mutex<()>,
}

impl<S: LearnStore> LearnService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            answer_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.answer_lock
            .lock()
            .map_err(|e| LearnError::StoreUnavailable(e.to_string()))
    }

    /// Start learning a study set, or a subset of its cards.
    ///
    /// Without a subset, an open session covering the whole set is resumed
    /// instead of creating a new one.
    pub fn create_session(&self, user_id: Uuid, request: &NewLearnSession) -> Result<LearnSession> {
        if request.mastery_goal == 0 {
            return Err(LearnError::InvalidMasteryGoal);
        }

        let cards = self.store.study_set_cards(user_id, request.study_set_id)?;
        if cards.is_empty() {
            return Err(LearnError::EmptyStudySet(request.study_set_id));
        }

        let selected: Vec<Uuid> = match request.subset() {
            Some(ids) => {
                let wanted: HashSet<&Uuid> = ids.iter().collect();
                cards
                    .iter()
                    .filter(|c| wanted.contains(&c.id))
                    .map(|c| c.id)
                    .collect()
            }
            None => cards.iter().map(|c| c.id).collect(),
        };

        if selected.is_empty() {
            return Err(LearnError::EmptySelection(request.study_set_id));
        }

        if request.subset().is_none() {
            if let Some(existing) = self.store.open_session(user_id, request.study_set_id)? {
                if existing.progress.len() == cards.len() {
                    tracing::debug!(session_id = %existing.id, "resuming open learn session");
                    return Ok(existing);
                }
            }
        }

        let session = LearnSession::new(
            user_id,
            request.study_set_id,
            request.mastery_goal,
            selected,
            Utc::now(),
        );
        self.store.insert_session(&session)?;

        tracing::info!(
            session_id = %session.id,
            study_set_id = %session.study_set_id,
            cards = session.progress.len(),
            mastery_goal = session.mastery_goal,
            "created learn session"
        );
        Ok(session)
    }

    pub fn session(&self, user_id: Uuid, session_id: Uuid) -> Result<LearnSession> {
        self.store.session(user_id, session_id)
    }

    pub fn summary(&self, user_id: Uuid, session_id: Uuid) -> Result<ProgressSummary> {
        let session = self.store.session(user_id, session_id)?;
        Ok(LearnRun::new(session, Vec::new()).summary())
    }

    /// Apply one answer and persist it. Completes the session when every
    /// card is mastered afterwards.
    pub fn submit_answer(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        progress_id: Uuid,
        is_correct: bool,
    ) -> Result<CardProgress> {
        let _guard = self.lock()?;

        let session = self.store.session(user_id, session_id)?;
        let mut run = LearnRun::new(session, Vec::new());
        let now = Utc::now();
        let updated = run.record_answer(progress_id, is_correct, now)?;
        self.store.save_progress(&updated, now)?;

        if run.state() == SessionState::Complete {
            self.store.set_completed(session_id, true, now)?;
            tracing::info!(%session_id, "all cards mastered, learn session complete");
        }

        Ok(updated)
    }

    /// Next card to present, or `None` once the session is complete.
    ///
    /// A session whose selected card has lost its flashcard is completed and
    /// reported as [`LearnError::MissingFlashcard`].
    pub fn next_card(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<LearnCard>> {
        let session = self.store.session(user_id, session_id)?;
        if session.is_completed {
            return Ok(None);
        }

        let flashcards = self.store.study_set_cards(user_id, session.study_set_id)?;
        let now = Utc::now();

        match LearnRun::start(session, flashcards, rng, now) {
            Ok(run) if run.state() == SessionState::Complete => {
                self.store.set_completed(session_id, true, now)?;
                tracing::info!(%session_id, "no unmastered cards left, learn session complete");
                Ok(None)
            }
            Ok(run) => Ok(run.current_card()),
            Err(err @ LearnError::MissingFlashcard { .. }) => {
                self.store.set_completed(session_id, true, now)?;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Explicit completion requested by the caller.
    pub fn mark_completed(&self, user_id: Uuid, session_id: Uuid) -> Result<LearnSession> {
        let _guard = self.lock()?;
        let mut run = LearnRun::new(self.store.session(user_id, session_id)?, Vec::new());
        run.complete();

        let now = Utc::now();
        self.store.set_completed(session_id, true, now)?;
        let mut session = run.into_session();
        session.updated_at = now;
        Ok(session)
    }

    pub fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<()> {
        let _guard = self.lock()?;
        self.store.delete_session(user_id, session_id)?;
        tracing::info!(%session_id, "deleted learn session");
        Ok(())
    }

    /// Replace a session with a fresh one over the whole study set.
    pub fn restart(&self, user_id: Uuid, session_id: Uuid) -> Result<LearnSession> {
        let old = self.store.session(user_id, session_id)?;
        self.delete_session(user_id, session_id)?;

        self.create_session(
            user_id,
            &NewLearnSession {
                study_set_id: old.study_set_id,
                mastery_goal: old.mastery_goal,
                flashcard_ids: None,
            },
        )
    }

    /// Replace a session with one scoped to the cards answered wrong in it.
    /// With nothing to review this is a plain restart.
    pub fn review_wrong(&self, user_id: Uuid, session_id: Uuid) -> Result<LearnSession> {
        let old = self.store.session(user_id, session_id)?;
        let missed = old.missed_flashcard_ids();
        if missed.is_empty() {
            tracing::debug!(%session_id, "nothing to review, restarting");
            return self.restart(user_id, session_id);
        }

        self.delete_session(user_id, session_id)?;
        self.create_session(
            user_id,
            &NewLearnSession {
                study_set_id: old.study_set_id,
                mastery_goal: old.mastery_goal,
                flashcard_ids: Some(missed),
            },
        )
    }
}
