//! Server module for building the relatorios HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - The relatorio CRUD routes (and their legacy aliases)
//! - Health and readiness routes
//! - Request tracing and CORS middleware

pub mod builder;
pub mod exposure;
pub mod router;

pub use builder::ServerBuilder;
