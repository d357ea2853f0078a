use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::task::TaskSummary;

/// A user as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Full user row including the credential hash.
///
/// Only the auth service reads this type, via the by-email/by-username
/// lookups. It is never serialized into a response.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Strips the credential hash, leaving the public fields.
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Insert payload for registration. The password arrives here already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Write payload for a user update. Only username and email are mutable.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
}

/// A user together with summaries of the tasks they own, ordered by task
/// creation date descending. `tasks` is empty when the user owns none.
#[derive(Debug, Serialize)]
pub struct UserWithTasks {
    #[serde(flatten)]
    pub user: User,
    pub tasks: Vec<TaskSummary>,
}
