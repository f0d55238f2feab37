//! Storage seam for learn sessions.
//!
//! The session layer only needs keyed reads and writes; [`MemoryStore`] is
//! the in-process implementation used by the backend and the tests.

use crate::error::{LearnError, Result};
use crate::types::{
    CardProgress, Flashcard, Folder, FolderUpdate, LearnSession, NewStudySession, NewStudySet,
    StudySession, StudySet, StudySetSummary, StudySetUpdate,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Records the learn session layer reads and writes.
///
/// Every lookup is scoped to the owning user; records owned by someone else
/// are reported as not found.
pub trait LearnStore: Send + Sync {
    /// Flashcards of a study set owned by `user_id`, in insertion order.
    fn study_set_cards(&self, user_id: Uuid, study_set_id: Uuid) -> Result<Vec<Flashcard>>;

    fn insert_session(&self, session: &LearnSession) -> Result<()>;

    fn session(&self, user_id: Uuid, session_id: Uuid) -> Result<LearnSession>;

    /// Most recent incomplete session for the study set, if any.
    fn open_session(&self, user_id: Uuid, study_set_id: Uuid) -> Result<Option<LearnSession>>;

    /// Replace a progress record inside its session.
    fn save_progress(&self, progress: &CardProgress, now: DateTime<Utc>) -> Result<()>;

    fn set_completed(&self, session_id: Uuid, completed: bool, now: DateTime<Utc>) -> Result<()>;

    fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<()>;
}

/// Number of study passes returned by [`MemoryStore::study_sessions`].
pub const RECENT_STUDY_SESSIONS: usize = 10;

#[derive(Default)]
struct Tables {
    study_sets: HashMap<Uuid, StudySet>,
    /// Flashcards per study set, in insertion order.
    flashcards: HashMap<Uuid, Vec<Flashcard>>,
    sessions: HashMap<Uuid, LearnSession>,
    folders: HashMap<Uuid, Folder>,
    /// Flip-card study passes, oldest first.
    study_sessions: Vec<StudySession>,
}

impl Tables {
    fn owned_set(&self, user_id: Uuid, study_set_id: Uuid) -> Result<&StudySet> {
        self.study_sets
            .get(&study_set_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(LearnError::StudySetNotFound(study_set_id))
    }

    fn owned_set_mut(&mut self, user_id: Uuid, study_set_id: Uuid) -> Result<&mut StudySet> {
        self.study_sets
            .get_mut(&study_set_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(LearnError::StudySetNotFound(study_set_id))
    }

    fn owned_folder(&self, user_id: Uuid, folder_id: Uuid) -> Result<&Folder> {
        self.folders
            .get(&folder_id)
            .filter(|f| f.user_id == user_id)
            .ok_or(LearnError::FolderNotFound(folder_id))
    }

    /// Study set id holding a flashcard owned by `user_id`.
    fn flashcard_set(&self, user_id: Uuid, flashcard_id: Uuid) -> Result<Uuid> {
        self.flashcards
            .iter()
            .filter(|(set_id, _)| {
                self.study_sets
                    .get(*set_id)
                    .is_some_and(|s| s.user_id == user_id)
            })
            .find(|(_, cards)| cards.iter().any(|c| c.id == flashcard_id))
            .map(|(set_id, _)| *set_id)
            .ok_or(LearnError::FlashcardNotFound(flashcard_id))
    }

    /// A folder and everything nested under it.
    fn subtree(&self, folder_id: Uuid) -> HashSet<Uuid> {
        let mut found = HashSet::from([folder_id]);
        let mut pending = vec![folder_id];
        while let Some(parent) = pending.pop() {
            for child in self.folders.values().filter(|f| f.parent_id == Some(parent)) {
                if found.insert(child.id) {
                    pending.push(child.id);
                }
            }
        }
        found
    }

    fn next_folder_position(&self, user_id: Uuid, parent_id: Option<Uuid>) -> u32 {
        self.folders
            .values()
            .filter(|f| f.user_id == user_id && f.parent_id == parent_id)
            .map(|f| f.position + 1)
            .max()
            .unwrap_or(0)
    }
}

/// In-memory store guarded by a single reader/writer lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| LearnError::StoreUnavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| LearnError::StoreUnavailable(e.to_string()))
    }

    // === Study set repository ===

    pub fn create_study_set(&self, user_id: Uuid, new: NewStudySet) -> Result<StudySet> {
        let mut tables = self.write()?;
        if let Some(folder_id) = new.folder_id {
            tables.owned_folder(user_id, folder_id)?;
        }

        let now = Utc::now();
        let set = StudySet {
            id: Uuid::new_v4(),
            user_id,
            title: new.title,
            description: new.description,
            folder_id: new.folder_id,
            is_favorite: new.is_favorite,
            last_accessed: None,
            created_at: now,
            updated_at: now,
        };

        tables.study_sets.insert(set.id, set.clone());
        tables.flashcards.insert(set.id, Vec::new());
        Ok(set)
    }

    pub fn study_set(&self, user_id: Uuid, study_set_id: Uuid) -> Result<StudySet> {
        self.read()?.owned_set(user_id, study_set_id).cloned()
    }

    /// All of a user's study sets with card counts, newest first.
    pub fn study_sets(&self, user_id: Uuid) -> Result<Vec<StudySetSummary>> {
        let tables = self.read()?;
        let mut sets: Vec<StudySetSummary> = tables
            .study_sets
            .values()
            .filter(|s| s.user_id == user_id)
            .map(|s| StudySetSummary {
                study_set: s.clone(),
                flashcard_count: tables.flashcards.get(&s.id).map_or(0, Vec::len),
            })
            .collect();
        sets.sort_by(|a, b| b.study_set.created_at.cmp(&a.study_set.created_at));
        Ok(sets)
    }

    pub fn update_study_set(
        &self,
        user_id: Uuid,
        study_set_id: Uuid,
        update: StudySetUpdate,
    ) -> Result<StudySet> {
        let mut tables = self.write()?;
        if let Some(Some(folder_id)) = update.folder_id {
            tables.owned_folder(user_id, folder_id)?;
        }

        let set = tables.owned_set_mut(user_id, study_set_id)?;
        if let Some(title) = update.title {
            set.title = title;
        }
        if let Some(description) = update.description {
            set.description = Some(description);
        }
        if let Some(folder_id) = update.folder_id {
            set.folder_id = folder_id;
        }
        if let Some(is_favorite) = update.is_favorite {
            set.is_favorite = is_favorite;
        }
        set.updated_at = Utc::now();
        Ok(set.clone())
    }

    /// Record that the set was opened.
    pub fn mark_accessed(&self, user_id: Uuid, study_set_id: Uuid) -> Result<StudySet> {
        let mut tables = self.write()?;
        let set = tables.owned_set_mut(user_id, study_set_id)?;
        set.last_accessed = Some(Utc::now());
        Ok(set.clone())
    }

    /// Delete a study set with its flashcards, learn sessions and study passes.
    pub fn delete_study_set(&self, user_id: Uuid, study_set_id: Uuid) -> Result<()> {
        let mut tables = self.write()?;
        tables.owned_set(user_id, study_set_id)?;

        tables.study_sets.remove(&study_set_id);
        tables.flashcards.remove(&study_set_id);
        tables.sessions.retain(|_, s| s.study_set_id != study_set_id);
        tables
            .study_sessions
            .retain(|s| s.study_set_id != study_set_id);
        Ok(())
    }

    // === Flashcard repository ===

    /// Append flashcards to a study set owned by `user_id`.
    pub fn add_flashcards<Q, A>(
        &self,
        user_id: Uuid,
        study_set_id: Uuid,
        cards: impl IntoIterator<Item = (Q, A)>,
    ) -> Result<Vec<Flashcard>>
    where
        Q: Into<String>,
        A: Into<String>,
    {
        let mut tables = self.write()?;
        let now = Utc::now();
        tables.owned_set_mut(user_id, study_set_id)?.updated_at = now;

        let created: Vec<Flashcard> = cards
            .into_iter()
            .map(|(question, answer)| Flashcard {
                id: Uuid::new_v4(),
                study_set_id,
                question: question.into(),
                answer: answer.into(),
                created_at: now,
            })
            .collect();

        tables
            .flashcards
            .entry(study_set_id)
            .or_default()
            .extend(created.iter().cloned());
        Ok(created)
    }

    pub fn update_flashcard(
        &self,
        user_id: Uuid,
        flashcard_id: Uuid,
        question: &str,
        answer: &str,
    ) -> Result<Flashcard> {
        let mut tables = self.write()?;
        let set_id = tables.flashcard_set(user_id, flashcard_id)?;
        let card = tables
            .flashcards
            .get_mut(&set_id)
            .and_then(|cards| cards.iter_mut().find(|c| c.id == flashcard_id))
            .ok_or(LearnError::FlashcardNotFound(flashcard_id))?;

        card.question = question.to_string();
        card.answer = answer.to_string();
        Ok(card.clone())
    }

    /// Remove a flashcard's content. Learn progress that references it is
    /// kept; selecting that progress later fails closed.
    pub fn delete_flashcard(&self, user_id: Uuid, flashcard_id: Uuid) -> Result<Flashcard> {
        let mut tables = self.write()?;
        let set_id = tables.flashcard_set(user_id, flashcard_id)?;
        let cards = tables
            .flashcards
            .get_mut(&set_id)
            .ok_or(LearnError::FlashcardNotFound(flashcard_id))?;
        let index = cards
            .iter()
            .position(|c| c.id == flashcard_id)
            .ok_or(LearnError::FlashcardNotFound(flashcard_id))?;
        Ok(cards.remove(index))
    }

    // === Folder repository ===

    /// A user's folders ordered by position.
    pub fn folders(&self, user_id: Uuid) -> Result<Vec<Folder>> {
        let tables = self.read()?;
        let mut folders: Vec<Folder> = tables
            .folders
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
        Ok(folders)
    }

    pub fn folder(&self, user_id: Uuid, folder_id: Uuid) -> Result<Folder> {
        self.read()?.owned_folder(user_id, folder_id).cloned()
    }

    /// Create a folder placed after its existing siblings.
    pub fn create_folder(
        &self,
        user_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Folder> {
        let mut tables = self.write()?;
        if let Some(parent_id) = parent_id {
            tables.owned_folder(user_id, parent_id)?;
        }

        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            parent_id,
            position: tables.next_folder_position(user_id, parent_id),
            created_at: now,
            updated_at: now,
        };
        tables.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    pub fn update_folder(
        &self,
        user_id: Uuid,
        folder_id: Uuid,
        update: FolderUpdate,
    ) -> Result<Folder> {
        let mut tables = self.write()?;
        tables.owned_folder(user_id, folder_id)?;

        if let Some(Some(parent_id)) = update.parent_id {
            tables.owned_folder(user_id, parent_id)?;
            if tables.subtree(folder_id).contains(&parent_id) {
                return Err(LearnError::InvalidFolderParent { folder_id });
            }
        }

        let folder = tables
            .folders
            .get_mut(&folder_id)
            .ok_or(LearnError::FolderNotFound(folder_id))?;
        if let Some(name) = update.name {
            folder.name = name;
        }
        if let Some(parent_id) = update.parent_id {
            folder.parent_id = parent_id;
        }
        if let Some(position) = update.position {
            folder.position = position;
        }
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    /// Delete a folder and its nested folders. Study sets inside them are
    /// kept and moved to the top level.
    pub fn delete_folder(&self, user_id: Uuid, folder_id: Uuid) -> Result<()> {
        let mut tables = self.write()?;
        tables.owned_folder(user_id, folder_id)?;

        let removed = tables.subtree(folder_id);
        tables.folders.retain(|id, _| !removed.contains(id));
        for set in tables.study_sets.values_mut() {
            if set.folder_id.is_some_and(|id| removed.contains(&id)) {
                set.folder_id = None;
            }
        }
        Ok(())
    }

    // === Study session repository ===

    /// Record a flip-card study pass. Every result must name a flashcard of
    /// the study set.
    pub fn record_study_session(
        &self,
        user_id: Uuid,
        new: NewStudySession,
    ) -> Result<StudySession> {
        let mut tables = self.write()?;
        tables.owned_set(user_id, new.study_set_id)?;

        let cards = tables
            .flashcards
            .get(&new.study_set_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if let Some(unknown) = new
            .results
            .iter()
            .find(|r| !cards.iter().any(|c| c.id == r.flashcard_id))
        {
            return Err(LearnError::FlashcardNotFound(unknown.flashcard_id));
        }

        let session = StudySession {
            id: Uuid::new_v4(),
            user_id,
            study_set_id: new.study_set_id,
            total_cards: new.total_cards,
            correct_cards: new.correct_cards,
            wrong_cards: new.wrong_cards,
            results: new.results,
            created_at: Utc::now(),
        };
        tables.study_sessions.push(session.clone());
        Ok(session)
    }

    /// Most recent study passes, newest first, optionally for one study set.
    pub fn study_sessions(
        &self,
        user_id: Uuid,
        study_set_id: Option<Uuid>,
    ) -> Result<Vec<StudySession>> {
        Ok(self
            .read()?
            .study_sessions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .filter(|s| study_set_id.map_or(true, |id| s.study_set_id == id))
            .take(RECENT_STUDY_SESSIONS)
            .cloned()
            .collect())
    }
}

impl LearnStore for MemoryStore {
    fn study_set_cards(&self, user_id: Uuid, study_set_id: Uuid) -> Result<Vec<Flashcard>> {
        let tables = self.read()?;
        let owned = tables
            .study_sets
            .get(&study_set_id)
            .is_some_and(|s| s.user_id == user_id);
        if !owned {
            return Err(LearnError::StudySetNotFound(study_set_id));
        }
        Ok(tables
            .flashcards
            .get(&study_set_id)
            .cloned()
            .unwrap_or_default())
    }

    fn insert_session(&self, session: &LearnSession) -> Result<()> {
        self.write()?.sessions.insert(session.id, session.clone());
        Ok(())
    }

    fn session(&self, user_id: Uuid, session_id: Uuid) -> Result<LearnSession> {
        self.read()?
            .sessions
            .get(&session_id)
            .filter(|s| s.user_id == user_id)
            .cloned()
            .ok_or(LearnError::SessionNotFound(session_id))
    }

    fn open_session(&self, user_id: Uuid, study_set_id: Uuid) -> Result<Option<LearnSession>> {
        Ok(self
            .read()?
            .sessions
            .values()
            .filter(|s| s.user_id == user_id && s.study_set_id == study_set_id && !s.is_completed)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    fn save_progress(&self, progress: &CardProgress, now: DateTime<Utc>) -> Result<()> {
        let mut tables = self.write()?;
        let session = tables
            .sessions
            .get_mut(&progress.session_id)
            .ok_or(LearnError::SessionNotFound(progress.session_id))?;
        let slot = session
            .progress
            .iter_mut()
            .find(|p| p.id == progress.id)
            .ok_or(LearnError::ProgressNotFound(progress.id))?;
        *slot = progress.clone();
        session.updated_at = now;
        Ok(())
    }

    fn set_completed(&self, session_id: Uuid, completed: bool, now: DateTime<Utc>) -> Result<()> {
        let mut tables = self.write()?;
        let session = tables
            .sessions
            .get_mut(&session_id)
            .ok_or(LearnError::SessionNotFound(session_id))?;
        session.is_completed = completed;
        session.updated_at = now;
        Ok(())
    }

    fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<()> {
        let mut tables = self.write()?;
        let owned = tables
            .sessions
            .get(&session_id)
            .is_some_and(|s| s.user_id == user_id);
        if !owned {
            return Err(LearnError::SessionNotFound(session_id));
        }
        tables.sessions.remove(&session_id);
        Ok(())
    }
}
