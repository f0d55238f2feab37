//! In-memory user registry
//!
//! Identity is external to the learn core; this registry stands in for it by
//! issuing bearer tokens on registration.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::User;

/// Registered users keyed by token
#[derive(Default)]
pub struct Database {
    users: RwLock<HashMap<String, User>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub fn create_user(&self, name: Option<&str>) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            name: name.map(str::to_string),
            created_at: now,
            last_seen_at: now,
        };

        self.users
            .write()
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .insert(user.token.clone(), user.clone());

        Ok(user)
    }

    /// Get user by token
    pub fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(users.get(token).cloned())
    }

    /// Update user last_seen_at timestamp
    pub fn update_last_seen(&self, token: &str) -> Result<()> {
        let mut users = self
            .users
            .write()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        if let Some(user) = users.get_mut(token) {
            user.last_seen_at = Utc::now();
        }
        Ok(())
    }
}
