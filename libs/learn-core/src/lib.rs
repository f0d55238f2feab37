//! Core Learn Mode library shared by the backend and its callers.
//!
//! Provides:
//! - Adaptive card scheduler (weighted random selection, progress updates)
//! - Learn session state machine and its persisted operations
//! - Storage seam with an in-memory implementation, including folders and
//!   recorded study passes
//! - Open-text answer checking
//! - Bulk-import parser for pasted flashcard text

pub mod algorithm;
pub mod error;
pub mod matching;
pub mod parser;
pub mod service;
pub mod session;
pub mod store;
pub mod types;

pub use algorithm::{FixedDraws, LearnAlgorithm, RandomSource, StdRandom};
pub use error::{ImportError, LearnError, Result};
pub use matching::{check_answer, normalize_answer};
pub use parser::{parse_flashcards, ParseOutcome};
pub use service::LearnService;
pub use session::{LearnRun, SessionFault, SessionState};
pub use store::{LearnStore, MemoryStore, RECENT_STUDY_SESSIONS};
pub use types::{
    CardProgress, Flashcard, Folder, FolderUpdate, ImportFormat, LearnCard, LearnSession,
    NewLearnSession, NewStudySession, NewStudySet, ParsedFlashcard, ProgressSummary, StudyResult,
    StudySession, StudySet, StudySetSummary, StudySetUpdate, Tracked, DEFAULT_MASTERY_GOAL,
};
