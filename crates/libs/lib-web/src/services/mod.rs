//! # Services
//!
//! Business logic behind the HTTP handlers.

pub mod swap;

pub use swap::{SwapOutcome, SwapService};
