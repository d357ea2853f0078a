//! Postgres queries for the users table.

use async_trait::async_trait;

use super::{PgStore, TaskReader, UserReader, UserWriter};
use crate::error::AppError;
use crate::models::{NewUser, User, UserChanges, UserRecord, UserWithTasks};

const PUBLIC_COLUMNS: &str = "id, username, email, created_at";
const CREDENTIAL_COLUMNS: &str = "id, username, email, password_hash, created_at";

#[async_trait]
impl UserReader for PgStore {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            PUBLIC_COLUMNS
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PUBLIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            CREDENTIAL_COLUMNS
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            CREDENTIAL_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await?;
        Ok(record)
    }

    async fn find_with_tasks(&self, id: i32) -> Result<Option<UserWithTasks>, AppError> {
        let user = match UserReader::find_by_id(self, id).await? {
            Some(user) => user,
            None => return Ok(None),
        };
        let tasks = self.summaries_for_user(id).await?;
        Ok(Some(UserWithTasks { user, tasks }))
    }
}

#[async_trait]
impl UserWriter for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            PUBLIC_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(self.pool())
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, AppError> {
        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET username = $1, email = $2 WHERE id = $3 RETURNING {}",
            PUBLIC_COLUMNS
        ))
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, AppError> {
        let deleted = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            PUBLIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(deleted)
    }
}
