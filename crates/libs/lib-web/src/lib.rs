//! # Web Library
//!
//! HTTP handlers, middleware, routes, and the swap service.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{build_state, create_router, start_server, AppState, ServerConfig};
