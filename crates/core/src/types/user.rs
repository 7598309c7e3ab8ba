//! Authenticated user profile.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Profile data returned by the auth endpoint on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    /// Avatar URL.
    #[serde(default)]
    pub image: String,
}

impl UserProfile {
    /// Display name combining first and last name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
