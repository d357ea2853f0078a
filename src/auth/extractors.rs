use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the decoded claim set from request extensions.
///
/// Intended for routes behind [`AuthMiddleware`](super::AuthMiddleware),
/// which verifies the token and inserts the claims. Handlers that need the
/// caller's identity take this as a parameter; the gate itself is what
/// enforces access.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                // Only reachable if the middleware was not applied to this route.
                let err = AppError::Auth(
                    "Access denied. No token provided. Please login to get a token.".into(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
