//! Request bodies and sample content for integration tests.

use serde_json::json;
use uuid::Uuid;

/// Q:/A: text with `num_cards` pairs.
pub fn sample_qa_text(num_cards: usize) -> String {
    (0..num_cards)
        .map(|i| format!("Q: Question {}?\nA: Answer {}.\n", i + 1, i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Study set body with `num_cards` simple capital-city cards.
pub fn study_set_request(title: &str, num_cards: usize) -> serde_json::Value {
    let flashcards: Vec<_> = (0..num_cards)
        .map(|i| {
            json!({
                "question": format!("Capital {}?", i + 1),
                "answer": format!("City {}", i + 1),
            })
        })
        .collect();
    json!({ "title": title, "flashcards": flashcards })
}

pub fn bulk_import_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

pub fn learn_session_request(study_set_id: &str, mastery_goal: Option<u32>) -> serde_json::Value {
    match mastery_goal {
        Some(goal) => json!({ "studySetId": study_set_id, "masteryGoal": goal }),
        None => json!({ "studySetId": study_set_id }),
    }
}

pub fn learn_subset_request(study_set_id: &str, flashcard_ids: &[&str]) -> serde_json::Value {
    json!({
        "studySetId": study_set_id,
        "masteryGoal": 1,
        "flashcardIds": flashcard_ids,
    })
}

pub fn answer_request(progress_id: &str, is_correct: bool) -> serde_json::Value {
    json!({ "progressId": progress_id, "isCorrect": is_correct })
}

pub fn complete_request() -> serde_json::Value {
    json!({ "isCompleted": true })
}

pub fn check_answer_request(user_answer: &str, correct_answer: &str) -> serde_json::Value {
    json!({ "userAnswer": user_answer, "correctAnswer": correct_answer })
}

/// Random ID that matches nothing.
pub fn unknown_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn folder_request(name: &str, parent_id: Option<&str>) -> serde_json::Value {
    match parent_id {
        Some(parent) => json!({ "name": name, "parentId": parent }),
        None => json!({ "name": name }),
    }
}

/// Flip-card pass where the first `correct` of `flashcard_ids` were known.
pub fn study_session_request(
    study_set_id: &str,
    flashcard_ids: &[&str],
    correct: usize,
) -> serde_json::Value {
    let results: Vec<_> = flashcard_ids
        .iter()
        .enumerate()
        .map(|(i, id)| json!({ "flashcardId": id, "isCorrect": i < correct }))
        .collect();
    json!({
        "studySetId": study_set_id,
        "totalCards": flashcard_ids.len(),
        "correctCards": correct,
        "wrongCards": flashcard_ids.len() - correct,
        "results": results,
    })
}
