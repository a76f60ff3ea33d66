//! # Transaction Signer
//!
//! The signing-mode seam of the swap flow. A [`TransactionSigner`] is built
//! once at startup from configuration and dispatches every wallet-resolution,
//! signing, and submission step to either the local keypair path or the
//! custodial Crossmint path.

use anyhow::{anyhow, Context, Result};
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::SolanaClient;
use crate::crossmint::CrossmintClient;
use crate::tx;
use crate::wallet::keypair_from_base58;

/// An aggregator transaction made ready for its submission path.
///
/// Local mode keeps the decoded transaction so a fresh blockhash can be
/// applied at submit time; custodial mode carries the rebuilt unsigned
/// payload the Crossmint API expects.
pub enum PreparedTransaction {
    Local(VersionedTransaction),
    Custodial(String),
}

/// Dispatches signing and submission to the configured mode.
#[derive(Debug)]
pub enum TransactionSigner {
    Local {
        keypair: Keypair,
        rpc: SolanaClient,
    },
    Custodial {
        crossmint: CrossmintClient,
    },
}

impl TransactionSigner {
    /// Build the local-mode signer from base58 keypair material and an RPC
    /// endpoint.
    pub fn local(private_key: &str, rpc_url: String) -> Result<Self> {
        let keypair = keypair_from_base58(private_key).context("Invalid PRIVATE_KEY")?;

        info!("Local signing wallet: {}", keypair.pubkey());

        Ok(Self::Local {
            keypair,
            rpc: SolanaClient::new(rpc_url),
        })
    }

    /// Build the custodial-mode signer around a Crossmint client.
    pub fn custodial(crossmint: CrossmintClient) -> Self {
        Self::Custodial { crossmint }
    }

    /// Resolve the wallet address that will own the swap.
    ///
    /// Local mode derives it from the keypair; custodial mode asks Crossmint
    /// for the linked user's wallet, creating it on first use.
    pub async fn resolve_wallet(&self) -> Result<String> {
        match self {
            Self::Local { keypair, .. } => Ok(keypair.pubkey().to_string()),
            Self::Custodial { crossmint } => crossmint.fetch_wallet().await,
        }
    }

    /// Whether the aggregator should be asked for a legacy-format
    /// transaction.
    ///
    /// The custodial rebuild needs the full static account list, which only
    /// legacy messages carry.
    pub fn wants_legacy_transaction(&self) -> bool {
        matches!(self, Self::Custodial { .. })
    }

    /// Convert the aggregator's base64 payload into the form this mode
    /// submits.
    pub fn prepare(&self, swap_transaction: &str) -> Result<PreparedTransaction> {
        let decoded = tx::decode_swap_transaction(swap_transaction)?;

        match self {
            Self::Local { .. } => Ok(PreparedTransaction::Local(decoded)),
            Self::Custodial { .. } => {
                let payload = tx::rebuild_for_custodial_signing(&decoded)?;
                Ok(PreparedTransaction::Custodial(payload))
            }
        }
    }

    /// Sign (where applicable) and submit a prepared transaction.
    ///
    /// Returns the on-chain transaction reference: the signature in local
    /// mode, Crossmint's on-chain transaction id in custodial mode.
    pub async fn submit(
        &self,
        prepared: PreparedTransaction,
        wallet_address: &str,
    ) -> Result<String> {
        match (self, prepared) {
            (Self::Local { keypair, rpc }, PreparedTransaction::Local(transaction)) => {
                let blockhash = rpc.get_latest_blockhash().await?;
                let signed = tx::sign_with_blockhash(transaction, blockhash, keypair)?;
                rpc.send_transaction(&signed).await
            }
            (Self::Custodial { crossmint }, PreparedTransaction::Custodial(payload)) => {
                crossmint.create_transaction(wallet_address, &payload).await
            }
            _ => Err(anyhow!("Prepared transaction does not match signing mode")),
        }
    }

    /// Spawn a background task that polls for on-chain confirmation and logs
    /// the outcome. Local mode only; custodial submissions are confirmed by
    /// Crossmint.
    pub fn spawn_confirmation(self: &Arc<Self>, signature: String) {
        let signer = Arc::clone(self);

        tokio::spawn(async move {
            let Self::Local { rpc, .. } = signer.as_ref() else {
                return;
            };

            match rpc.wait_for_confirmation(&signature).await {
                Ok(Some(status)) => {
                    info!("Transaction {} confirmed: {:?}", signature, status);
                }
                Ok(None) => {
                    warn!("Transaction {} not confirmed within ceiling", signature);
                }
                Err(e) => {
                    warn!("Confirmation poll for {} failed: {}", signature, e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::keypair_to_base58;

    #[test]
    fn local_signer_resolves_keypair_address() {
        let keypair = Keypair::new();
        let expected = keypair.pubkey().to_string();

        let signer = TransactionSigner::local(
            &keypair_to_base58(&keypair),
            "http://127.0.0.1:8899".to_string(),
        )
        .unwrap();

        let resolved = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(signer.resolve_wallet())
            .unwrap();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn local_signer_rejects_bad_key_material() {
        let err = TransactionSigner::local("garbage", "http://127.0.0.1:8899".to_string())
            .unwrap_err();
        assert!(err.to_string().contains("PRIVATE_KEY"));
    }

    #[test]
    fn only_custodial_mode_asks_for_legacy_transactions() {
        let keypair = Keypair::new();
        let local = TransactionSigner::local(
            &keypair_to_base58(&keypair),
            "http://127.0.0.1:8899".to_string(),
        )
        .unwrap();
        assert!(!local.wants_legacy_transaction());

        let crossmint = CrossmintClient::new(
            "http://127.0.0.1:1".to_string(),
            "key".to_string(),
            "email:user@example.com".to_string(),
        )
        .unwrap();
        let custodial = TransactionSigner::custodial(crossmint);
        assert!(custodial.wants_legacy_transaction());
    }
}
