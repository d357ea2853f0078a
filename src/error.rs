//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management: handlers and the storage layer return `AppError`
//! and a single `ResponseError` implementation translates every failure into the
//! uniform `{success: false, message}` response envelope.
//!
//! Storage-level constraint violations (uniqueness, foreign key, not-null, malformed
//! literal) are mapped to `AppError` kinds in the `From<sqlx::Error>` implementation,
//! so no handler ever inspects a Postgres error code directly.

use actix_web::{error::ResponseError, http::StatusCode, web, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
///
/// Each variant maps to one HTTP status code and carries the client-facing message.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input (HTTP 400).
    Validation(String),
    /// Missing/invalid/expired token, or bad credentials (HTTP 401).
    Auth(String),
    /// A requested or referenced row does not exist (HTTP 404).
    NotFound(String),
    /// A unique field (username, email) is already taken (HTTP 409).
    Conflict(String),
    /// A foreign-key target does not exist (HTTP 400).
    Referential(String),
    /// Anything else (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Auth(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Referential(msg) => write!(f, "Invalid Reference: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Auth(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Referential(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

/// Converts `AppError` variants into the final response envelope.
///
/// Internal errors keep their detail out of the response body in release builds;
/// the detail is logged server-side instead.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Referential(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(detail) => {
                log::error!("internal error: {}", detail);
                if cfg!(debug_assertions) {
                    detail.as_str()
                } else {
                    "Internal Server Error"
                }
            }
            _ => self.message(),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": message
        }))
    }
}

// Extractor failures (malformed JSON body, query string, or path segment)
// happen before any handler runs. These configs route them through
// `AppError` so the response still carries the `{success, message}`
// envelope; the deserializer detail is logged, not returned.

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("rejected request body: {}", err);
        AppError::Validation("Invalid JSON payload".into()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("rejected query string: {}", err);
        AppError::Validation("Invalid query parameters".into()).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        log::debug!("rejected path parameter: {}", err);
        AppError::Validation("Invalid path parameter".into()).into()
    })
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Postgres constraint violations are recognized by their SQLSTATE code, so a
/// race past a handler pre-check still surfaces as the same error kind the
/// pre-check would have produced.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db) => match db.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    AppError::Conflict("Duplicate entry. This record already exists.".into())
                }
                // foreign_key_violation
                Some("23503") => AppError::Referential(
                    "Invalid reference. The related record does not exist.".into(),
                ),
                // not_null_violation
                Some("23502") => AppError::Validation("Missing required field.".into()),
                // invalid_text_representation
                Some("22P02") => AppError::Validation("Invalid input format.".into()),
                _ => AppError::Internal(error.to_string()),
            },
            _ => AppError::Internal(error.to_string()),
        }
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Auth`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Auth(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
