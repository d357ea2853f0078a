//! Task handlers: filtered listing, statistics, and CRUD.
//!
//! Status and priority literals are validated here, before any query runs.
//! Update and delete re-fetch the target first so a missing id is a clean
//! 404 instead of an ambiguous zero-row mutation.

use crate::{
    error::AppError,
    models::{TaskChanges, TaskPriority, TaskStatus},
    response::Envelope,
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;

/// Query parameters for the task list. Dispatch precedence is
/// status, then user_id, then category_id; unfiltered otherwise.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub user_id: Option<i32>,
    pub category_id: Option<i32>,
}

/// Task write payload. Fields are optional so presence checks and enum
/// validation happen here with their own messages.
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub user_id: Option<i32>,
    pub category_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
}

fn parse_status(status: &str) -> Result<TaskStatus, AppError> {
    status.parse().map_err(|_| {
        AppError::Validation("Status must be one of: pending, in_progress, completed".into())
    })
}

fn parse_priority(priority: &str) -> Result<TaskPriority, AppError> {
    priority
        .parse()
        .map_err(|_| AppError::Validation("Priority must be one of: low, medium, high".into()))
}

/// Validates the payload into a full write, defaulting absent status and
/// priority to pending and medium.
fn validate_payload(payload: TaskPayload) -> Result<TaskChanges, AppError> {
    let title = match payload.title {
        Some(title) if !title.is_empty() => title,
        _ => return Err(AppError::Validation("Please provide a task title".into())),
    };
    if title.chars().count() > 200 {
        return Err(AppError::Validation(
            "Title must be at most 200 characters".into(),
        ));
    }

    let status = match payload.status.as_deref() {
        Some(status) => parse_status(status)?,
        None => TaskStatus::Pending,
    };
    let priority = match payload.priority.as_deref() {
        Some(priority) => parse_priority(priority)?,
        None => TaskPriority::Medium,
    };

    Ok(TaskChanges {
        title,
        description: payload.description,
        status,
        priority,
        user_id: payload.user_id,
        category_id: payload.category_id,
        due_date: payload.due_date,
    })
}

/// List tasks, optionally filtered by status, owner, or category.
#[get("")]
pub async fn get_tasks(
    store: web::Data<dyn TaskStore>,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();

    let tasks = if let Some(status) = query.status.as_deref() {
        store.find_by_status(parse_status(status)?).await?
    } else if let Some(user_id) = query.user_id {
        store.find_by_user(user_id).await?
    } else if let Some(category_id) = query.category_id {
        store.find_by_category(category_id).await?
    } else {
        store.find_all().await?
    };

    Ok(HttpResponse::Ok().json(Envelope::list(tasks)))
}

/// Aggregate counts over the whole task set.
#[get("/stats")]
pub async fn get_task_statistics(
    store: web::Data<dyn TaskStore>,
) -> Result<impl Responder, AppError> {
    let stats = store.statistics().await?;
    Ok(HttpResponse::Ok().json(Envelope::data(stats)))
}

#[get("/{id}")]
pub async fn get_task(
    store: web::Data<dyn TaskStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let task = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::data(task)))
}

#[post("")]
pub async fn create_task(
    store: web::Data<dyn TaskStore>,
    payload: web::Json<TaskPayload>,
) -> Result<impl Responder, AppError> {
    let changes = validate_payload(payload.into_inner())?;
    let task = store.create(changes).await?;

    Ok(HttpResponse::Created().json(Envelope::message("Task created successfully", task)))
}

#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn TaskStore>,
    path: web::Path<i32>,
    payload: web::Json<TaskPayload>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let changes = validate_payload(payload.into_inner())?;

    if store.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Task not found with id: {}", id)));
    }

    let task = store
        .update(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::message("Task updated successfully", task)))
}

#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn TaskStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let task = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task not found with id: {}", id)))?;

    store.delete(id).await?;

    Ok(HttpResponse::Ok().json(Envelope::message("Task deleted successfully", task)))
}
