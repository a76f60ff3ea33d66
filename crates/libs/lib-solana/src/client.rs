//! # Solana RPC Client
//!
//! Provides a high-level wrapper around the Solana RPC client used by the
//! local signing mode: blockhash lookups, transaction submission, and
//! signature-status polling.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::hash::Hash;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use solana_transaction_status::TransactionConfirmationStatus;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Per-call timeout for all RPC requests.
const RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Interval between signature-status polls.
const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Ceiling for the optional confirmation poll.
const CONFIRMATION_POLL_CEILING: Duration = Duration::from_secs(60);

/// High-level Solana RPC client wrapper.
///
/// Wraps the official nonblocking `RpcClient` with the fixed timeout and the
/// small surface the swap flow needs. All methods are async and return
/// descriptive errors.
#[derive(Clone)]
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
}

impl std::fmt::Debug for SolanaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaClient")
            .field("url", &self.rpc.url())
            .finish()
    }
}

impl SolanaClient {
    /// Create a new Solana RPC client for the given endpoint.
    ///
    /// The connection is lazy; actual network requests only happen when
    /// methods are called.
    pub fn new(rpc_url: String) -> Self {
        info!("Connecting to Solana RPC: {}", rpc_url);

        Self {
            rpc: Arc::new(RpcClient::new_with_timeout(rpc_url, RPC_TIMEOUT)),
        }
    }

    /// Get the latest blockhash from the blockchain.
    ///
    /// Blockhashes expire after ~60 seconds, so the lookup happens right
    /// before the transaction is signed and submitted.
    pub async fn get_latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get latest blockhash: {}", e))
    }

    /// Send a signed transaction to the Solana blockchain.
    ///
    /// Submits the transaction and returns its signature immediately; it may
    /// still fail during processing. Confirmation is a separate, opt-in
    /// concern handled by [`Self::wait_for_confirmation`].
    pub async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> anyhow::Result<String> {
        let signature = self
            .rpc
            .send_transaction(transaction)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send transaction: {}", e))?;

        Ok(signature.to_string())
    }

    /// Look up the confirmation status of a submitted transaction.
    ///
    /// Returns `None` while the cluster has not yet seen the signature.
    pub async fn get_confirmation_status(
        &self,
        signature: &Signature,
    ) -> anyhow::Result<Option<TransactionConfirmationStatus>> {
        let response = self
            .rpc
            .get_signature_statuses(&[*signature])
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get signature status: {}", e))?;

        Ok(response
            .value
            .into_iter()
            .next()
            .flatten()
            .and_then(|status| status.confirmation_status))
    }

    /// Poll for on-chain confirmation of a submitted transaction.
    ///
    /// Polls the signature status every second for up to 60 seconds and
    /// returns the first non-null confirmation status, or `None` if the
    /// ceiling elapses first.
    pub async fn wait_for_confirmation(
        &self,
        signature: &str,
    ) -> anyhow::Result<Option<TransactionConfirmationStatus>> {
        self.wait_for_confirmation_with(signature, CONFIRMATION_POLL_INTERVAL, CONFIRMATION_POLL_CEILING)
            .await
    }

    async fn wait_for_confirmation_with(
        &self,
        signature: &str,
        interval: Duration,
        ceiling: Duration,
    ) -> anyhow::Result<Option<TransactionConfirmationStatus>> {
        let signature = Signature::from_str(signature)
            .map_err(|e| anyhow::anyhow!("Invalid transaction signature: {}", e))?;

        let start = Instant::now();
        while start.elapsed() < ceiling {
            if let Some(status) = self.get_confirmation_status(&signature).await? {
                debug!("Transaction {} reached {:?}", signature, status);
                return Ok(Some(status));
            }
            tokio::time::sleep(interval).await;
        }

        Ok(None)
    }
}
