//! The `taskhub` library crate.
//!
//! Domain models, authentication, the storage layer, routing configuration,
//! and error handling for the TaskHub API. The binary in `main.rs` wires
//! these together and runs the server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod store;
