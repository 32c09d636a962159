//! Server-side components of the `hashkeep` digest service.
//!
//! This module contains the building blocks necessary to run the HTTP server
//! around a [`hashkeep::HashService`].
//!
//! ## Submodules
//!
//! - [`config`] - CLI/environment configuration.
//! - [`error`] - API error type and its HTTP mapping.
//! - [`routes`] - Axum router and request handlers.
//! - [`run`] - Serving loop and shutdown sequencing.
//! - [`telemetry`] - `tracing-subscriber` initialization.
//!
//! These components are wired together in the server's `main.rs`.

pub mod config;
pub mod error;
pub mod routes;
pub mod run;
pub mod telemetry;
