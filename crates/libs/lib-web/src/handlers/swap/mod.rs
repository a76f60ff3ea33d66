//! # Swap Handler
//!
//! HTTP surface of the swap flow: request validation and delegation to the
//! [`SwapService`] pipeline.

use crate::server::AppState;
use crate::services::SwapService;
use axum::{extract::State, Json};
use lib_core::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Swap request body.
///
/// `amount` is a whole-token amount; scaling into the token's smallest unit
/// happens after symbol resolution. It is signed so that negative amounts
/// are rejected explicitly instead of failing deserialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct SwapRequest {
    pub input_token: String,
    pub output_token: String,
    pub amount: i64,
}

/// Swap response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SwapResponse {
    pub status: String,
    pub transaction_url: String,
}

/// POST `/swap-api/swap` - execute a token swap.
pub async fn swap_tokens(
    State(state): State<AppState>,
    Json(request): Json<SwapRequest>,
) -> Result<Json<SwapResponse>> {
    info!(
        "Swap requested: {} -> {} amount {}",
        request.input_token, request.output_token, request.amount
    );

    if request.amount <= 0 {
        return Err(AppError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }

    let service = SwapService::new(
        Arc::clone(&state.registry),
        Arc::clone(&state.jupiter),
        Arc::clone(&state.signer),
        state.config.confirm_transactions,
    );

    let outcome = service
        .perform_swap(
            &request.input_token,
            &request.output_token,
            request.amount as u64,
        )
        .await?;

    Ok(Json(SwapResponse {
        status: outcome.status,
        transaction_url: outcome.transaction_url,
    }))
}
