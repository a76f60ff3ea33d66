//! # HTTP Handlers
//!
//! Route handlers for the swap API.

pub mod health;
pub mod root;
pub mod swap;
