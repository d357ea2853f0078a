use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Access-control gate for protected scopes.
///
/// Requires an `Authorization: Bearer <token>` header, verifies the token
/// signature and expiry, and inserts the decoded [`Claims`](super::Claims)
/// into request extensions for downstream extractors. Constructed with the
/// signing secret and wrapped around each protected scope; the public auth
/// and health routes are simply never placed behind it.
pub struct AuthMiddleware {
    secret: Rc<str>,
}

impl AuthMiddleware {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Rc::from(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: Rc::clone(&self.secret),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match verify_token(token, &self.secret) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
                }
                Err(app_err) => Box::pin(async move { Ok(reject(req, app_err)) }),
            },
            None => {
                let app_err = AppError::Auth(
                    "Access denied. No token provided. Please login to get a token.".into(),
                );
                Box::pin(async move { Ok(reject(req, app_err)) })
            }
        }
    }
}

/// Resolves a rejected request into the `AppError` envelope response so the
/// gate's 401 goes through the same translator as handler errors.
fn reject<B>(req: ServiceRequest, app_err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::from_error(app_err).map_into_right_body();
    req.into_response(response)
}
