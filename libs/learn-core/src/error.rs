//! Error types for learn-core.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using LearnError.
pub type Result<T> = std::result::Result<T, LearnError>;

/// Errors raised by the learn session lifecycle.
///
/// The scheduler itself is total; every variant here comes from the
/// session or store layer around it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LearnError {
    #[error("study set {0} not found")]
    StudySetNotFound(Uuid),

    #[error("learn session {0} not found")]
    SessionNotFound(Uuid),

    #[error("flashcard {0} not found")]
    FlashcardNotFound(Uuid),

    #[error("folder {0} not found")]
    FolderNotFound(Uuid),

    #[error("folder {folder_id} cannot be moved under itself or a descendant")]
    InvalidFolderParent { folder_id: Uuid },

    #[error("progress record {0} not found")]
    ProgressNotFound(Uuid),

    #[error("progress record {progress_id} does not belong to session {session_id}")]
    ProgressNotInSession { progress_id: Uuid, session_id: Uuid },

    #[error("learn session {0} is already completed")]
    SessionCompleted(Uuid),

    #[error("study set {0} has no flashcards")]
    EmptyStudySet(Uuid),

    #[error("no valid flashcards to learn in study set {0}")]
    EmptySelection(Uuid),

    #[error("learn session {0} has no progress records")]
    EmptySession(Uuid),

    #[error("mastery goal must be at least 1")]
    InvalidMasteryGoal,

    #[error("flashcard {flashcard_id} is missing its content")]
    MissingFlashcard { flashcard_id: Uuid },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LearnError {
    /// Whether the caller can recover locally (refetch, show a message)
    /// instead of treating the failure as fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingFlashcard { .. })
    }

    /// Lookup failures: the referenced record is absent or not owned by the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StudySetNotFound(_)
                | Self::SessionNotFound(_)
                | Self::ProgressNotFound(_)
                | Self::FlashcardNotFound(_)
                | Self::FolderNotFound(_)
        )
    }
}

/// Errors that can occur while parsing bulk-import text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("no text provided")]
    EmptyInput,

    #[error("no valid content found")]
    NoContent,

    #[error(
        "couldn't detect any Q/A pairs. Try using formats like:\n\
         • Q: Question?\n  A: Answer\n\
         • Question | Answer\n\
         • Question - Answer\n\
         • 1. Question? - Answer"
    )]
    NoPairsDetected,
}
