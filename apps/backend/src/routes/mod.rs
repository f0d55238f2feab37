pub mod answers;
pub mod auth;
pub mod flashcards;
pub mod folders;
pub mod learn;
pub mod study_sessions;
pub mod study_sets;
pub mod users;
