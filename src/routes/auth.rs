//! Registration and login handlers.
//!
//! Field checks run before any query so that missing input gets its own
//! message rather than a storage error. The duplicate pre-checks (email
//! first, then username) exist for friendlier conflict messages; the unique
//! constraints remain the source of truth, and a race past a pre-check maps
//! to the same 409 kind at the error boundary.

use crate::{
    auth::{
        generate_token, hash_password, is_valid_email, verify_password, LoginPayload,
        RegisterPayload, TokenConfig,
    },
    error::AppError,
    models::NewUser,
    response::AuthSuccess,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a user account and returns a token plus the public user record.
#[post("/register")]
pub async fn register(
    store: web::Data<dyn UserStore>,
    token_config: web::Data<TokenConfig>,
    payload: web::Json<RegisterPayload>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();
    let (username, email, password) = match (payload.username, payload.email, payload.password) {
        (Some(username), Some(email), Some(password))
            if !username.is_empty() && !email.is_empty() && !password.is_empty() =>
        {
            (username, email, password)
        }
        _ => {
            return Err(AppError::Validation(
                "Please provide username, email, and password".into(),
            ))
        }
    };

    if !is_valid_email(&email) {
        return Err(AppError::Validation(
            "Please provide a valid email address".into(),
        ));
    }
    if password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
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

    if store.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(
            "User with this email already exists".into(),
        ));
    }
    if store.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".into()));
    }

    let password_hash = hash_password(&password)?;
    let user = store
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    let token = generate_token(&user, &token_config.secret)?;

    Ok(HttpResponse::Created().json(AuthSuccess {
        success: true,
        message: "User registered successfully".into(),
        token,
        data: user,
    }))
}

/// Login user
///
/// Verifies credentials and returns a fresh token. An unknown email and a
/// wrong password produce the identical message.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn UserStore>,
    token_config: web::Data<TokenConfig>,
    payload: web::Json<LoginPayload>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::Validation(
                "Please provide email and password".into(),
            ))
        }
    };

    let record = store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid credentials".into()))?;

    if !verify_password(&password, &record.password_hash)? {
        return Err(AppError::Auth("Invalid credentials".into()));
    }

    let user = record.into_public();
    let token = generate_token(&user, &token_config.secret)?;

    Ok(HttpResponse::Ok().json(AuthSuccess {
        success: true,
        message: "Login successful".into(),
        token,
        data: user,
    }))
}
