use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A category as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A category joined with the count of tasks that reference it.
/// `tasks_count` is zero when no task does.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryWithCount {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub tasks_count: i64,
}

/// Write payload for category create/update.
#[derive(Debug, Clone)]
pub struct CategoryChanges {
    pub name: String,
    pub description: Option<String>,
}
