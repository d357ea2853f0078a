//! User handlers. There is no public create route; users come into existence
//! through `/api/auth/register`, and no response here ever carries the
//! password hash.

use crate::{
    auth::is_valid_email,
    error::AppError,
    models::UserChanges,
    response::Envelope,
    store::UserStore,
};
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use serde::Deserialize;

/// User update payload; both fields are required.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
}

fn validate_payload(payload: UserPayload) -> Result<UserChanges, AppError> {
    let (username, email) = match (payload.username, payload.email) {
        (Some(username), Some(email)) if !username.is_empty() && !email.is_empty() => {
            (username, email)
        }
        _ => {
            return Err(AppError::Validation(
                "Please provide username and email".into(),
            ))
        }
    };

    if !is_valid_email(&email) {
        return Err(AppError::Validation(
            "Please provide a valid email address".into(),
        ));
    }
    if username.chars().count() > 50 {
        return Err(AppError::Validation(
            "Username must be at most 50 characters".into(),
        ));
    }
    if email.chars().count() > 100 {
        return Err(AppError::Validation(
            "Email must be at most 100 characters".into(),
        ));
    }

    Ok(UserChanges { username, email })
}

/// List users, newest first.
#[get("")]
pub async fn get_users(store: web::Data<dyn UserStore>) -> Result<impl Responder, AppError> {
    let users = store.find_all().await?;
    Ok(HttpResponse::Ok().json(Envelope::list(users)))
}

#[get("/{id}")]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let user = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::data(user)))
}

/// The user together with summaries of the tasks they own.
#[get("/{id}/tasks")]
pub async fn get_user_with_tasks(
    store: web::Data<dyn UserStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let user = store
        .find_with_tasks(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::data(user)))
}

#[put("/{id}")]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let changes = validate_payload(payload.into_inner())?;

    if store.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("User not found with id: {}", id)));
    }

    // A duplicate username/email surfaces as 409 from the constraint mapping.
    let user = store
        .update(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::message("User updated successfully", user)))
}

/// Deletes the user; owned tasks go with them.
#[delete("/{id}")]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    if store.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("User not found with id: {}", id)));
    }

    let user = store
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::message("User deleted successfully", user)))
}
