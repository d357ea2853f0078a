//! In-memory store double backing the integration tests, so the full HTTP
//! surface can be exercised without a live database. It mirrors the schema's
//! referential rules: unique username/email, foreign keys checked on task
//! writes, user deletion cascades to owned tasks, category deletion nulls
//! `category_id`.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use actix_web::web;
use taskhub::auth::TokenConfig;
use taskhub::error::AppError;
use taskhub::models::{
    Category, CategoryChanges, CategoryWithCount, NewUser, Task, TaskChanges, TaskDetail,
    TaskPriority, TaskStatistics, TaskStatus, TaskSummary, User, UserChanges, UserRecord,
    UserWithTasks,
};
use taskhub::store::{
    CategoryReader, CategoryStore, CategoryWriter, TaskReader, TaskStore, TaskWriter, UserReader,
    UserStore, UserWriter,
};

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    categories: Vec<Category>,
    tasks: Vec<Task>,
    next_user_id: i32,
    next_category_id: i32,
    next_task_id: i32,
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

fn conflict() -> AppError {
    AppError::Conflict("Duplicate entry. This record already exists.".into())
}

fn broken_reference() -> AppError {
    AppError::Referential("Invalid reference. The related record does not exist.".into())
}

impl Inner {
    fn check_task_references(&self, changes: &TaskChanges) -> Result<(), AppError> {
        if let Some(user_id) = changes.user_id {
            if !self.users.iter().any(|u| u.id == user_id) {
                return Err(broken_reference());
            }
        }
        if let Some(category_id) = changes.category_id {
            if !self.categories.iter().any(|c| c.id == category_id) {
                return Err(broken_reference());
            }
        }
        Ok(())
    }

    fn task_detail(&self, task: &Task) -> TaskDetail {
        let owner = task
            .user_id
            .and_then(|id| self.users.iter().find(|u| u.id == id));
        let category = task
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id));
        TaskDetail {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            user_id: task.user_id,
            category_id: task.category_id,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
            username: owner.map(|u| u.username.clone()),
            email: owner.map(|u| u.email.clone()),
            category_name: category.map(|c| c.name.clone()),
        }
    }

    /// Newest first, matching the created_at desc ordering of the SQL store.
    fn tasks_newest_first<'a>(&'a self) -> Vec<&'a Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        tasks
    }
}

#[async_trait]
impl UserReader for MemStore {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut users: Vec<&UserRecord> = inner.users.iter().collect();
        users.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(users.into_iter().map(|u| u.clone().into_public()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.clone().into_public()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_with_tasks(&self, id: i32) -> Result<Option<UserWithTasks>, AppError> {
        let inner = self.inner.lock().unwrap();
        let user = match inner.users.iter().find(|u| u.id == id) {
            Some(user) => user.clone().into_public(),
            None => return Ok(None),
        };
        let tasks = inner
            .tasks_newest_first()
            .into_iter()
            .filter(|t| t.user_id == Some(id))
            .map(|t| TaskSummary {
                id: t.id,
                title: t.title.clone(),
                status: t.status,
                priority: t.priority,
            })
            .collect();
        Ok(Some(UserWithTasks { user, tasks }))
    }
}

#[async_trait]
impl UserWriter for MemStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(conflict());
        }
        inner.next_user_id += 1;
        let record = UserRecord {
            id: inner.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(record.clone());
        Ok(record.into_public())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .iter()
            .any(|u| u.id != id && (u.email == changes.email || u.username == changes.username))
        {
            return Err(conflict());
        }
        let record = match inner.users.iter_mut().find(|u| u.id == id) {
            Some(record) => record,
            None => return Ok(None),
        };
        record.username = changes.username;
        record.email = changes.email;
        Ok(Some(record.clone().into_public()))
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let position = match inner.users.iter().position(|u| u.id == id) {
            Some(position) => position,
            None => return Ok(None),
        };
        let record = inner.users.remove(position);
        // ON DELETE CASCADE
        inner.tasks.retain(|t| t.user_id != Some(id));
        Ok(Some(record.into_public()))
    }
}

#[async_trait]
impl TaskReader for MemStore {
    async fn find_all(&self) -> Result<Vec<TaskDetail>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks_newest_first()
            .into_iter()
            .map(|t| inner.task_detail(t))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TaskDetail>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| inner.task_detail(t)))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<TaskDetail>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks_newest_first()
            .into_iter()
            .filter(|t| t.user_id == Some(user_id))
            .map(|t| inner.task_detail(t))
            .collect())
    }

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<TaskDetail>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks_newest_first()
            .into_iter()
            .filter(|t| t.category_id == Some(category_id))
            .map(|t| inner.task_detail(t))
            .collect())
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<TaskDetail>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks_newest_first()
            .into_iter()
            .filter(|t| t.status == status)
            .map(|t| inner.task_detail(t))
            .collect())
    }

    async fn summaries_for_user(&self, user_id: i32) -> Result<Vec<TaskSummary>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks_newest_first()
            .into_iter()
            .filter(|t| t.user_id == Some(user_id))
            .map(|t| TaskSummary {
                id: t.id,
                title: t.title.clone(),
                status: t.status,
                priority: t.priority,
            })
            .collect())
    }

    async fn statistics(&self) -> Result<TaskStatistics, AppError> {
        let inner = self.inner.lock().unwrap();
        let count_status =
            |s: TaskStatus| inner.tasks.iter().filter(|t| t.status == s).count() as i64;
        let count_priority =
            |p: TaskPriority| inner.tasks.iter().filter(|t| t.priority == p).count() as i64;
        Ok(TaskStatistics {
            total_tasks: inner.tasks.len() as i64,
            pending_tasks: count_status(TaskStatus::Pending),
            in_progress_tasks: count_status(TaskStatus::InProgress),
            completed_tasks: count_status(TaskStatus::Completed),
            high_priority_tasks: count_priority(TaskPriority::High),
            medium_priority_tasks: count_priority(TaskPriority::Medium),
            low_priority_tasks: count_priority(TaskPriority::Low),
        })
    }
}

#[async_trait]
impl TaskWriter for MemStore {
    async fn create(&self, changes: TaskChanges) -> Result<Task, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_task_references(&changes)?;
        inner.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: inner.next_task_id,
            title: changes.title,
            description: changes.description,
            status: changes.status,
            priority: changes.priority,
            user_id: changes.user_id,
            category_id: changes.category_id,
            due_date: changes.due_date,
            created_at: now,
            updated_at: now,
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: i32, changes: TaskChanges) -> Result<Option<Task>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_task_references(&changes)?;
        let task = match inner.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => task,
            None => return Ok(None),
        };
        task.title = changes.title;
        task.description = changes.description;
        task.status = changes.status;
        task.priority = changes.priority;
        task.user_id = changes.user_id;
        task.category_id = changes.category_id;
        task.due_date = changes.due_date;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Task>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let position = match inner.tasks.iter().position(|t| t.id == id) {
            Some(position) => position,
            None => return Ok(None),
        };
        Ok(Some(inner.tasks.remove(position)))
    }
}

#[async_trait]
impl CategoryReader for MemStore {
    async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all_with_counts(&self) -> Result<Vec<CategoryWithCount>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut categories: Vec<CategoryWithCount> = inner
            .categories
            .iter()
            .map(|c| CategoryWithCount {
                id: c.id,
                name: c.name.clone(),
                description: c.description.clone(),
                created_at: c.created_at,
                tasks_count: inner
                    .tasks
                    .iter()
                    .filter(|t| t.category_id == Some(c.id))
                    .count() as i64,
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_with_count(&self, id: i32) -> Result<Option<CategoryWithCount>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.categories.iter().find(|c| c.id == id).map(|c| {
            CategoryWithCount {
                id: c.id,
                name: c.name.clone(),
                description: c.description.clone(),
                created_at: c.created_at,
                tasks_count: inner
                    .tasks
                    .iter()
                    .filter(|t| t.category_id == Some(c.id))
                    .count() as i64,
            }
        }))
    }
}

#[async_trait]
impl CategoryWriter for MemStore {
    async fn create(&self, changes: CategoryChanges) -> Result<Category, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_category_id += 1;
        let category = Category {
            id: inner.next_category_id,
            name: changes.name,
            description: changes.description,
            created_at: Utc::now(),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let category = match inner.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => category,
            None => return Ok(None),
        };
        category.name = changes.name;
        category.description = changes.description;
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Category>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let position = match inner.categories.iter().position(|c| c.id == id) {
            Some(position) => position,
            None => return Ok(None),
        };
        let category = inner.categories.remove(position);
        // ON DELETE SET NULL
        for task in inner.tasks.iter_mut() {
            if task.category_id == Some(id) {
                task.category_id = None;
            }
        }
        Ok(Some(category))
    }
}

/// App data for wiring a test service against one shared `MemStore`.
pub fn app_data(
    store: Arc<MemStore>,
) -> (
    web::Data<dyn UserStore>,
    web::Data<dyn TaskStore>,
    web::Data<dyn CategoryStore>,
    web::Data<TokenConfig>,
) {
    let users: Arc<dyn UserStore> = store.clone();
    let tasks: Arc<dyn TaskStore> = store.clone();
    let categories: Arc<dyn CategoryStore> = store;
    (
        web::Data::from(users),
        web::Data::from(tasks),
        web::Data::from(categories),
        web::Data::new(TokenConfig {
            secret: TEST_SECRET.to_string(),
        }),
    )
}

/// A valid bearer token for exercising protected routes directly.
pub fn bearer_token() -> String {
    let user = User {
        id: 1,
        username: "gatekeeper".to_string(),
        email: "gatekeeper@example.com".to_string(),
        created_at: Utc::now(),
    };
    taskhub::auth::generate_token(&user, TEST_SECRET).unwrap()
}
