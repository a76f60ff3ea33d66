//! # Jupiter HTTP Client
//!
//! HTTP client wrapper for the Jupiter quote/swap API. Construction happens
//! through [`super::JupiterClientBuilder`], which owns timeout and base-URL
//! configuration.

use reqwest::Client;

/// HTTP client wrapper for Jupiter API
pub struct JupiterHttpClient {
    pub http: Client,
    /// Base URL the quote and swap endpoints live under
    pub api_base: String,
}
