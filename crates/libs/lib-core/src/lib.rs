//! # Core Library
//!
//! Application-wide configuration and error types.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, SigningMode};
pub use error::{AppError, Result};
