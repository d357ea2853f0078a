use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": Utc::now()
    }))
}

/// Root index listing the endpoint groups.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to the TaskHub API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth (register, login - Public)",
            "tasks": "/api/tasks (Protected - requires Bearer token)",
            "users": "/api/users (Protected - requires Bearer token)",
            "categories": "/api/categories (Protected - requires Bearer token)"
        }
    }))
}
