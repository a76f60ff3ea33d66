//! # Jupiter API Types
//!
//! Type definitions for Jupiter Aggregator API responses.

use serde::{Deserialize, Serialize};

/// Opaque priced-route quote from the Jupiter quote endpoint.
///
/// The service passes the quote through to the swap endpoint unmodified and
/// never parses its internals, so it stays a raw JSON value.
pub type Quote = serde_json::Value;

/// Response from Jupiter swap API
#[derive(Debug, Serialize, Deserialize)]
pub struct SwapTransactionResponse {
    /// Base64-encoded serialized Solana transaction
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,
}
