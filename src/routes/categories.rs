//! Category handlers. Deleting a category never deletes tasks; the storage
//! layer nulls their `category_id` instead.

use crate::{
    error::AppError,
    models::CategoryChanges,
    response::Envelope,
    store::CategoryStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

fn validate_payload(payload: CategoryPayload) -> Result<CategoryChanges, AppError> {
    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(AppError::Validation(
                "Please provide a category name".into(),
            ))
        }
    };

    Ok(CategoryChanges {
        name,
        description: payload.description,
    })
}

/// List categories ordered by name.
#[get("")]
pub async fn get_categories(
    store: web::Data<dyn CategoryStore>,
) -> Result<impl Responder, AppError> {
    let categories = store.find_all().await?;
    Ok(HttpResponse::Ok().json(Envelope::list(categories)))
}

/// List categories with the count of tasks referencing each.
#[get("/counts")]
pub async fn get_categories_with_counts(
    store: web::Data<dyn CategoryStore>,
) -> Result<impl Responder, AppError> {
    let categories = store.find_all_with_counts().await?;
    Ok(HttpResponse::Ok().json(Envelope::list(categories)))
}

#[get("/{id}")]
pub async fn get_category(
    store: web::Data<dyn CategoryStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let category = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::data(category)))
}

#[post("")]
pub async fn create_category(
    store: web::Data<dyn CategoryStore>,
    payload: web::Json<CategoryPayload>,
) -> Result<impl Responder, AppError> {
    let changes = validate_payload(payload.into_inner())?;
    let category = store.create(changes).await?;

    Ok(HttpResponse::Created().json(Envelope::message("Category created successfully", category)))
}

#[put("/{id}")]
pub async fn update_category(
    store: web::Data<dyn CategoryStore>,
    path: web::Path<i32>,
    payload: web::Json<CategoryPayload>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let changes = validate_payload(payload.into_inner())?;

    if store.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Category not found with id: {}",
            id
        )));
    }

    let category = store
        .update(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category not found with id: {}", id)))?;

    Ok(HttpResponse::Ok().json(Envelope::message("Category updated successfully", category)))
}

#[delete("/{id}")]
pub async fn delete_category(
    store: web::Data<dyn CategoryStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let category = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category not found with id: {}", id)))?;

    store.delete(id).await?;

    Ok(HttpResponse::Ok().json(Envelope::message("Category deleted successfully", category)))
}
