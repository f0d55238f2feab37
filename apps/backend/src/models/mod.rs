//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// Re-export shared types from learn-core
pub use learn_core::types::{
    CardProgress, Flashcard, Folder, LearnCard, LearnSession, NewStudySession, ProgressSummary,
    StudySession, StudySet, StudySetSummary,
};
pub use learn_core::SessionState;

/// Keeps an explicit `null` apart from a missing field: missing is `None`,
/// `null` is `Some(None)`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

// === User API Types ===

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

// === Study Set API Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudySetRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub folder_id: Option<Uuid>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub flashcards: Vec<NewFlashcard>,
}

/// PUT body for a study set. Absent fields are left unchanged;
/// `folderId: null` moves the set out of its folder.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudySetRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

/// Study set with its flashcards
#[derive(Debug, Serialize, Deserialize)]
pub struct StudySetResponse {
    #[serde(flatten)]
    pub study_set: StudySet,
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BulkImportRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportResponse {
    pub count: usize,
    pub detected_format: String,
    pub flashcards: Vec<Flashcard>,
}

// === Folder API Types ===

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// PUT body for a folder. `parentId: null` moves it to the top level.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub position: Option<u32>,
}

/// Folder with its direct children and the study sets filed in it
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    #[serde(flatten)]
    pub folder: Folder,
    pub children: Vec<Folder>,
    pub study_sets: Vec<StudySetSummary>,
}

// === Study Session API Types ===

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionQuery {
    #[serde(default)]
    pub study_set_id: Option<Uuid>,
}

// === Learn Session API Types ===

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLearnSessionRequest {
    pub study_set_id: Uuid,
    #[serde(default)]
    pub mastery_goal: Option<u32>,
    #[serde(default)]
    pub flashcard_ids: Option<Vec<Uuid>>,
}

/// PATCH body: either an answer (`progressId` + `isCorrect`) or a
/// completion flag (`isCompleted`).
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLearnSessionRequest {
    #[serde(default)]
    pub progress_id: Option<Uuid>,
    #[serde(default)]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpdateLearnSessionResponse {
    Progress(CardProgress),
    Session(LearnSession),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextCardResponse {
    pub card: Option<LearnCard>,
    pub progress: ProgressSummary,
    pub state: SessionState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

// === Answer API Types ===

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerRequest {
    pub user_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerResponse {
    pub is_correct: bool,
}
