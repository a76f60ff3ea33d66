//! # Swap Service
//!
//! Orchestrates a single swap: symbol resolution, amount scaling, quoting,
//! transaction building, and mode-specific signing and submission. Each call
//! runs the full pipeline; nothing is cached or batched across requests.

use lib_core::error::{AppError, Result};
use lib_solana::jupiter::JupiterClient;
use lib_solana::registry::{scale_amount, TokenRegistry};
use lib_solana::signer::TransactionSigner;
use std::sync::Arc;
use tracing::{info, instrument};

/// Block-explorer base for the transaction link returned to the caller.
const SOLSCAN_TX_BASE: &str = "https://solscan.io/tx";

/// Successful swap result returned to the handler.
pub struct SwapOutcome {
    pub status: String,
    pub transaction_url: String,
}

/// Swap pipeline over the shared registry, aggregator client, and signer.
pub struct SwapService {
    registry: Arc<TokenRegistry>,
    jupiter: Arc<JupiterClient>,
    signer: Arc<TransactionSigner>,
    confirm_transactions: bool,
}

impl SwapService {
    pub fn new(
        registry: Arc<TokenRegistry>,
        jupiter: Arc<JupiterClient>,
        signer: Arc<TransactionSigner>,
        confirm_transactions: bool,
    ) -> Self {
        Self {
            registry,
            jupiter,
            signer,
            confirm_transactions,
        }
    }

    /// Run the full swap pipeline for a validated, positive amount.
    ///
    /// The returned URL points at the block explorer entry for the on-chain
    /// transaction reference: the signature in local mode, the custodial
    /// API's transaction id in custodial mode.
    #[instrument(skip(self), fields(input_token = %input_token, output_token = %output_token, amount))]
    pub async fn perform_swap(
        &self,
        input_token: &str,
        output_token: &str,
        amount: u64,
    ) -> Result<SwapOutcome> {
        let input = self
            .registry
            .lookup(input_token)
            .ok_or_else(|| AppError::TokenNotFound("The input token not found".to_string()))?;

        let output = self
            .registry
            .lookup(output_token)
            .ok_or_else(|| AppError::TokenNotFound("The output token not found".to_string()))?;

        let scaled_amount = scale_amount(amount, input.decimals)
            .ok_or_else(|| AppError::InvalidInput("Amount is too large".to_string()))?;

        info!(
            "Swapping {} {} -> {} ({} base units)",
            amount, input.symbol, output.symbol, scaled_amount
        );

        let quote = self
            .jupiter
            .get_quote(&input.mint, &output.mint, scaled_amount)
            .await
            .map_err(|e| AppError::Quote(e.to_string()))?;

        let wallet_address = self
            .signer
            .resolve_wallet()
            .await
            .map_err(|e| AppError::Wallet(e.to_string()))?;

        let swap = self
            .jupiter
            .get_swap_transaction(
                &quote,
                &wallet_address,
                self.signer.wants_legacy_transaction(),
            )
            .await
            .map_err(|e| AppError::TransactionBuild(e.to_string()))?;

        let prepared = self
            .signer
            .prepare(&swap.swap_transaction)
            .map_err(|e| AppError::TransactionBuild(e.to_string()))?;

        let reference = self
            .signer
            .submit(prepared, &wallet_address)
            .await
            .map_err(|e| AppError::TransactionSubmit(e.to_string()))?;

        info!("Swap submitted: {}", reference);

        if self.confirm_transactions {
            self.signer.spawn_confirmation(reference.clone());
        }

        Ok(SwapOutcome {
            status: "Transaction Success".to_string(),
            transaction_url: format!("{}/{}", SOLSCAN_TX_BASE, reference),
        })
    }
}
