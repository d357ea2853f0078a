//!
//! # Storage layer
//!
//! One Reader and one Writer capability trait per entity, combined into a
//! per-entity store trait. The concrete [`PgStore`] wraps the injected
//! connection pool and implements all of them with parameterized sqlx
//! queries; tests substitute an in-memory implementation behind the same
//! traits.
//!
//! Every operation is a short sequence of round trips on the shared pool.
//! Absent rows are `Ok(None)`; constraint violations surface as the
//! `AppError` kind mapped at the `From<sqlx::Error>` boundary.

pub mod categories;
pub mod tasks;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{
    Category, CategoryChanges, CategoryWithCount, NewUser, Task, TaskChanges, TaskDetail,
    TaskStatistics, TaskStatus, TaskSummary, User, UserChanges, UserRecord, UserWithTasks,
};

#[async_trait]
pub trait UserReader: Send + Sync {
    /// All users, newest first.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
    /// Full credential row. Internal to the auth service.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;
    /// Full credential row. Internal to the auth service.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError>;
    /// The user plus summaries of every task they own, newest task first.
    async fn find_with_tasks(&self, id: i32) -> Result<Option<UserWithTasks>, AppError>;
}

#[async_trait]
pub trait UserWriter: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, AppError>;
    /// Deletes the user, cascading to owned tasks. Returns the deleted row.
    async fn delete(&self, id: i32) -> Result<Option<User>, AppError>;
}

pub trait UserStore: UserReader + UserWriter {}
impl<T: UserReader + UserWriter> UserStore for T {}

#[async_trait]
pub trait TaskReader: Send + Sync {
    /// All tasks with joined display fields, newest first.
    async fn find_all(&self) -> Result<Vec<TaskDetail>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<TaskDetail>, AppError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<TaskDetail>, AppError>;
    async fn find_by_category(&self, category_id: i32) -> Result<Vec<TaskDetail>, AppError>;
    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<TaskDetail>, AppError>;
    /// Summaries of a user's tasks, newest first.
    async fn summaries_for_user(&self, user_id: i32) -> Result<Vec<TaskSummary>, AppError>;
    /// Single aggregate row: total plus per-status and per-priority counts.
    async fn statistics(&self) -> Result<TaskStatistics, AppError>;
}

#[async_trait]
pub trait TaskWriter: Send + Sync {
    async fn create(&self, changes: TaskChanges) -> Result<Task, AppError>;
    /// Full replace of the mutable fields; refreshes `updated_at`.
    async fn update(&self, id: i32, changes: TaskChanges) -> Result<Option<Task>, AppError>;
    async fn delete(&self, id: i32) -> Result<Option<Task>, AppError>;
}

pub trait TaskStore: TaskReader + TaskWriter {}
impl<T: TaskReader + TaskWriter> TaskStore for T {}

#[async_trait]
pub trait CategoryReader: Send + Sync {
    /// All categories, ordered by name.
    async fn find_all(&self) -> Result<Vec<Category>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError>;
    /// All categories with the count of referencing tasks, ordered by name.
    async fn find_all_with_counts(&self) -> Result<Vec<CategoryWithCount>, AppError>;
    /// One category with the count of tasks referencing it.
    async fn find_with_count(&self, id: i32) -> Result<Option<CategoryWithCount>, AppError>;
}

#[async_trait]
pub trait CategoryWriter: Send + Sync {
    async fn create(&self, changes: CategoryChanges) -> Result<Category, AppError>;
    async fn update(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, AppError>;
    /// Deletes the category; referencing tasks keep existing with a null
    /// `category_id`. Returns the deleted row.
    async fn delete(&self, id: i32) -> Result<Option<Category>, AppError>;
}

pub trait CategoryStore: CategoryReader + CategoryWriter {}
impl<T: CategoryReader + CategoryWriter> CategoryStore for T {}

/// The Postgres-backed store. Cheap to clone; the pool is reference counted.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
