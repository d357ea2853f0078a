use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// The claim set embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's unique identifier.
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// The signing secret, held in application data so handlers receive it by
/// injection instead of reading the environment per call.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
}

/// How long an issued token stays valid.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Issues a signed JWT for the given user, expiring in 24 hours.
///
/// The signing secret is passed in from the application config rather than
/// read from the environment at call time.
pub fn generate_token(user: &User, secret: &str) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(TOKEN_LIFETIME_HOURS))
        .ok_or_else(|| AppError::Internal("Token expiry timestamp overflow".into()))?
        .timestamp() as usize;

    let claims = Claims {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string (signature and expiry) and decodes its claims.
///
/// Any failure surfaces as the same `AppError::Auth` message, whether the
/// token is malformed, forged, or expired.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Auth("Invalid or expired token. Please login again.".into()))
}
