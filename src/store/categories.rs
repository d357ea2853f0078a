//! Postgres queries for the categories table.

use async_trait::async_trait;

use super::{CategoryReader, CategoryWriter, PgStore};
use crate::error::AppError;
use crate::models::{Category, CategoryChanges, CategoryWithCount};

const COLUMNS: &str = "id, name, description, created_at";

/// Left-join aggregate of tasks per category; zero when no task references it.
const COUNT_SELECT: &str = "SELECT c.id, c.name, c.description, c.created_at, \
     COUNT(t.id) AS tasks_count \
     FROM categories c \
     LEFT JOIN tasks t ON c.id = t.category_id";

#[async_trait]
impl CategoryReader for PgStore {
    async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name",
            COLUMNS
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(category)
    }

    async fn find_all_with_counts(&self) -> Result<Vec<CategoryWithCount>, AppError> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(&format!(
            "{} GROUP BY c.id ORDER BY c.name",
            COUNT_SELECT
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    async fn find_with_count(&self, id: i32) -> Result<Option<CategoryWithCount>, AppError> {
        let category = sqlx::query_as::<_, CategoryWithCount>(&format!(
            "{} WHERE c.id = $1 GROUP BY c.id",
            COUNT_SELECT
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(category)
    }
}

#[async_trait]
impl CategoryWriter for PgStore {
    async fn create(&self, changes: CategoryChanges) -> Result<Category, AppError> {
        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .fetch_one(self.pool())
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, AppError> {
        let updated = sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET name = $1, description = $2 WHERE id = $3 RETURNING {}",
            COLUMNS
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<Category>, AppError> {
        let deleted = sqlx::query_as::<_, Category>(&format!(
            "DELETE FROM categories WHERE id = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(deleted)
    }
}
