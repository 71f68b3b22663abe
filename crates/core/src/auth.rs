//! Typed authorization capability passed into the recording path.
//!
//! Authentication and role resolution happen outside this crate; callers hand
//! the recorder an already-resolved [`Caller`]. The recorder only checks the
//! capability, it never consults session state.

use serde::{Deserialize, Serialize};

/// Closed set of roles known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Agent,
    Client,
}

/// Identity and role of the user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    pub user_id: String,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Whether this caller may record stock movements.
    pub fn can_record_movements(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Agent)
    }
}
