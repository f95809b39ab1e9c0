//! REST API layer for the LandX backend.
//!
//! Exposes the authentication flows and listing operations over HTTP,
//! delegating all business rules to `lx_core`.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
