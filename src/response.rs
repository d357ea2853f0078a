//! The uniform response envelope returned by every handler:
//! `{success, message?, data?, count?}`. List endpoints set `count`,
//! mutations set `message`, and the auth endpoints additionally carry
//! a top-level `token`.

use serde::Serialize;

use crate::models::User;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> Envelope<T> {
    /// Plain read response: `{success, data}`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
        }
    }

    /// Mutation response: `{success, message, data}`.
    pub fn message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            count: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// List response: `{success, count, data}` with `count` set to the row count.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: Some(count),
        }
    }
}

/// Response body for successful registration and login.
#[derive(Debug, Serialize)]
pub struct AuthSuccess {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub data: User,
}
