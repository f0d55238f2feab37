//! Core types for Learn Mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of consecutive correct answers needed to master a card.
pub const DEFAULT_MASTERY_GOAL: u32 = 2;

/// Priority assigned to a fresh progress record.
pub const INITIAL_PRIORITY: i32 = 100;

/// Lower bound for `CardProgress::priority`.
pub const MIN_PRIORITY: i32 = 10;

/// Upper bound for `CardProgress::priority`.
pub const MAX_PRIORITY: i32 = 200;

/// Study set owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub folder_id: Option<Uuid>,
    pub is_favorite: bool,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new study set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudySet {
    pub title: String,
    pub description: Option<String>,
    pub folder_id: Option<Uuid>,
    pub is_favorite: bool,
}

/// Partial update of a study set. `None` leaves a field unchanged;
/// `folder_id: Some(None)` moves the set out of its folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySetUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub folder_id: Option<Option<Uuid>>,
    pub is_favorite: Option<bool>,
}

/// Study set listed with its card count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySetSummary {
    #[serde(flatten)]
    pub study_set: StudySet,
    pub flashcard_count: usize,
}

/// Folder grouping study sets, optionally nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    /// Order among siblings, starting at 0.
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a folder. `parent_id: Some(None)` moves it to the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderUpdate {
    pub name: Option<String>,
    pub parent_id: Option<Option<Uuid>>,
    pub position: Option<u32>,
}

/// Outcome of one card in a flip-card study pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyResult {
    pub flashcard_id: Uuid,
    pub is_correct: bool,
}

/// Recorded flip-card study pass over a study set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub study_set_id: Uuid,
    pub total_cards: u32,
    pub correct_cards: u32,
    pub wrong_cards: u32,
    pub results: Vec<StudyResult>,
    pub created_at: DateTime<Utc>,
}

/// Request to record a flip-card study pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudySession {
    pub study_set_id: Uuid,
    pub total_cards: u32,
    pub correct_cards: u32,
    pub wrong_cards: u32,
    #[serde(default)]
    pub results: Vec<StudyResult>,
}

/// Flashcard belonging to a study set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub study_set_id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Per-card performance counters scoped to one learn session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProgress {
    pub id: Uuid,
    pub session_id: Uuid,
    pub flashcard_id: Uuid,
    pub correct_streak: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub mastered: bool,
    pub last_seen: Option<DateTime<Utc>>,
    /// Clamped to `[MIN_PRIORITY, MAX_PRIORITY]`. Persisted for callers but
    /// not part of the selection weight.
    pub priority: i32,
}

impl CardProgress {
    /// Fresh, unanswered progress for a flashcard.
    pub fn new(session_id: Uuid, flashcard_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            flashcard_id,
            correct_streak: 0,
            total_correct: 0,
            total_incorrect: 0,
            mastered: false,
            last_seen: None,
            priority: INITIAL_PRIORITY,
        }
    }

    /// Number of answers submitted for this card.
    pub fn answers(&self) -> u32 {
        self.total_correct + self.total_incorrect
    }
}

/// One user's pass through a (sub)set of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub study_set_id: Uuid,
    pub mastery_goal: u32,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub progress: Vec<CardProgress>,
}

impl LearnSession {
    /// New session with one fresh progress record per flashcard id.
    pub fn new(
        user_id: Uuid,
        study_set_id: Uuid,
        mastery_goal: u32,
        flashcard_ids: impl IntoIterator<Item = Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        let id = Uuid::new_v4();
        let progress = flashcard_ids
            .into_iter()
            .map(|flashcard_id| CardProgress::new(id, flashcard_id))
            .collect();

        Self {
            id,
            user_id,
            study_set_id,
            mastery_goal,
            is_completed: false,
            created_at: now,
            updated_at: now,
            progress,
        }
    }

    pub fn progress_by_id(&self, progress_id: Uuid) -> Option<&CardProgress> {
        self.progress.iter().find(|p| p.id == progress_id)
    }

    /// Flashcard ids that were answered wrong at least once.
    pub fn missed_flashcard_ids(&self) -> Vec<Uuid> {
        self.progress
            .iter()
            .filter(|p| p.total_incorrect > 0)
            .map(|p| p.flashcard_id)
            .collect()
    }
}

/// Flashcard content joined with its progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnCard {
    pub flashcard_id: Uuid,
    pub question: String,
    pub answer: String,
    pub progress: CardProgress,
}

impl LearnCard {
    pub fn new(flashcard: &Flashcard, progress: CardProgress) -> Self {
        Self {
            flashcard_id: flashcard.id,
            question: flashcard.question.clone(),
            answer: flashcard.answer.clone(),
            progress,
        }
    }
}

/// Anything the scheduler can weigh: it only needs a progress record.
pub trait Tracked {
    fn progress(&self) -> &CardProgress;
}

impl Tracked for CardProgress {
    fn progress(&self) -> &CardProgress {
        self
    }
}

impl Tracked for LearnCard {
    fn progress(&self) -> &CardProgress {
        &self.progress
    }
}

/// Mastery summary over a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub mastered_count: usize,
    pub total_count: usize,
    pub percent_complete: u32,
}

/// Request to start a learn session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearnSession {
    pub study_set_id: Uuid,
    pub mastery_goal: u32,
    /// Restrict the session to these flashcards. `None` or empty means the
    /// whole study set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcard_ids: Option<Vec<Uuid>>,
}

impl NewLearnSession {
    pub fn whole_set(study_set_id: Uuid) -> Self {
        Self {
            study_set_id,
            mastery_goal: DEFAULT_MASTERY_GOAL,
            flashcard_ids: None,
        }
    }

    /// Subset requested, ignoring an empty list.
    pub fn subset(&self) -> Option<&[Uuid]> {
        self.flashcard_ids.as_deref().filter(|ids| !ids.is_empty())
    }
}

/// Question/answer pair produced by the bulk-import parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFlashcard {
    pub question: String,
    pub answer: String,
}

/// Text layout recognised by the bulk-import parser, in trial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    QuestionAnswer,
    Pipe,
    Dash,
    Colon,
    Numbered,
}

impl ImportFormat {
    /// All formats in the order they are tried.
    pub const ALL: [ImportFormat; 5] = [
        Self::QuestionAnswer,
        Self::Pipe,
        Self::Dash,
        Self::Colon,
        Self::Numbered,
    ];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::QuestionAnswer => "Q:/A: format",
            Self::Pipe => "Pipe (|) delimiter",
            Self::Dash => "Dash (-) delimiter",
            Self::Colon => "Colon (:) delimiter",
            Self::Numbered => "Numbered list (1. Q - A)",
        }
    }
}
