//! Postgres queries for the tasks table, including the joined list variants
//! and the aggregate statistics row.

use async_trait::async_trait;

use super::{PgStore, TaskReader, TaskWriter};
use crate::error::AppError;
use crate::models::{Task, TaskChanges, TaskDetail, TaskStatistics, TaskStatus, TaskSummary};

/// Base select joining users and categories for denormalized display fields.
const DETAIL_SELECT: &str = "SELECT t.id, t.title, t.description, t.status, t.priority, \
     t.user_id, t.category_id, t.due_date, t.created_at, t.updated_at, \
     u.username, u.email, c.name AS category_name \
     FROM tasks t \
     LEFT JOIN users u ON t.user_id = u.id \
     LEFT JOIN categories c ON t.category_id = c.id";

const ROW_COLUMNS: &str =
    "id, title, description, status, priority, user_id, category_id, due_date, \
     created_at, updated_at";

#[async_trait]
impl TaskReader for PgStore {
    async fn find_all(&self) -> Result<Vec<TaskDetail>, AppError> {
        let tasks = sqlx::query_as::<_, TaskDetail>(&format!(
            "{} ORDER BY t.created_at DESC",
            DETAIL_SELECT
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TaskDetail>, AppError> {
        let task =
            sqlx::query_as::<_, TaskDetail>(&format!("{} WHERE t.id = $1", DETAIL_SELECT))
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(task)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<TaskDetail>, AppError> {
        let tasks = sqlx::query_as::<_, TaskDetail>(&format!(
            "{} WHERE t.user_id = $1 ORDER BY t.created_at DESC",
            DETAIL_SELECT
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<TaskDetail>, AppError> {
        let tasks = sqlx::query_as::<_, TaskDetail>(&format!(
            "{} WHERE t.category_id = $1 ORDER BY t.created_at DESC",
            DETAIL_SELECT
        ))
        .bind(category_id)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<TaskDetail>, AppError> {
        let tasks = sqlx::query_as::<_, TaskDetail>(&format!(
            "{} WHERE t.status = $1 ORDER BY t.created_at DESC",
            DETAIL_SELECT
        ))
        .bind(status)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn summaries_for_user(&self, user_id: i32) -> Result<Vec<TaskSummary>, AppError> {
        let tasks = sqlx::query_as::<_, TaskSummary>(
            "SELECT id, title, status, priority FROM tasks \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn statistics(&self) -> Result<TaskStatistics, AppError> {
        let stats = sqlx::query_as::<_, TaskStatistics>(
            "SELECT \
               COUNT(*) AS total_tasks, \
               COUNT(CASE WHEN status = 'pending' THEN 1 END) AS pending_tasks, \
               COUNT(CASE WHEN status = 'in_progress' THEN 1 END) AS in_progress_tasks, \
               COUNT(CASE WHEN status = 'completed' THEN 1 END) AS completed_tasks, \
               COUNT(CASE WHEN priority = 'high' THEN 1 END) AS high_priority_tasks, \
               COUNT(CASE WHEN priority = 'medium' THEN 1 END) AS medium_priority_tasks, \
               COUNT(CASE WHEN priority = 'low' THEN 1 END) AS low_priority_tasks \
             FROM tasks",
        )
        .fetch_one(self.pool())
        .await?;
        Ok(stats)
    }
}

#[async_trait]
impl TaskWriter for PgStore {
    async fn create(&self, changes: TaskChanges) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, priority, user_id, category_id, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            ROW_COLUMNS
        ))
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.status)
        .bind(changes.priority)
        .bind(changes.user_id)
        .bind(changes.category_id)
        .bind(changes.due_date)
        .fetch_one(self.pool())
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i32, changes: TaskChanges) -> Result<Option<Task>, AppError> {
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = $1, description = $2, status = $3, priority = $4, \
                 user_id = $5, category_id = $6, due_date = $7, updated_at = now() \
             WHERE id = $8 RETURNING {}",
            ROW_COLUMNS
        ))
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.status)
        .bind(changes.priority)
        .bind(changes.user_id)
        .bind(changes.category_id)
        .bind(changes.due_date)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<Task>, AppError> {
        let deleted = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 RETURNING {}",
            ROW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(deleted)
    }
}
