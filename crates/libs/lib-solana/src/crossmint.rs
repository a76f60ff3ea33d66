//! # Crossmint Custodial Client
//!
//! Client for the Crossmint wallet-custody API used in custodial signing
//! mode: wallet creation/lookup for a linked-user identity and submission of
//! unsigned transaction payloads for server-side MPC signing and on-chain
//! execution.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const API_KEY_HEADER: &str = "X-API-KEY";

/// Custodial wallet type created for the linked user.
const WALLET_TYPE: &str = "solana-mpc-wallet";

#[derive(Debug, Deserialize)]
struct WalletResponse {
    address: String,
}

#[derive(Debug, Deserialize)]
struct CreateTransactionResponse {
    #[serde(rename = "onChain")]
    on_chain: OnChainStatus,
}

#[derive(Debug, Deserialize)]
struct OnChainStatus {
    transaction: String,
}

/// HTTP client for the Crossmint wallet API.
#[derive(Debug)]
pub struct CrossmintClient {
    http: Client,
    api_base: String,
    api_key: String,
    linked_user: String,
}

impl CrossmintClient {
    /// Create a new Crossmint client.
    ///
    /// # Arguments
    ///
    /// * `api_base` - Crossmint host (e.g. `https://www.crossmint.com`)
    /// * `api_key` - API key sent as `X-API-KEY` on every call
    /// * `linked_user` - Identity owning the custodial wallet (e.g. `email:user@example.com`)
    pub fn new(api_base: String, api_key: String, linked_user: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            api_base,
            api_key,
            linked_user,
        })
    }

    /// Create or fetch the custodial wallet tied to the linked user.
    ///
    /// The endpoint is idempotent on the Crossmint side: repeated calls for
    /// the same linked user return the same wallet address.
    pub async fn fetch_wallet(&self) -> anyhow::Result<String> {
        let url = format!("{}/api/v1-alpha2/wallets", self.api_base);

        let body = serde_json::json!({
            "type": WALLET_TYPE,
            "linkedUser": self.linked_user,
        });

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Crossmint wallet fetch failed: {}", error_text));
        }

        let wallet: WalletResponse = response.json().await?;

        debug!("Crossmint wallet resolved: {}", wallet.address);

        Ok(wallet.address)
    }

    /// Submit an unsigned transaction payload for signing and execution.
    ///
    /// `transaction` is the base58-encoded serialized transaction; the
    /// response carries Crossmint's on-chain transaction reference.
    pub async fn create_transaction(
        &self,
        wallet_address: &str,
        transaction: &str,
    ) -> anyhow::Result<String> {
        let url = format!(
            "{}/api/v1-alpha2/wallets/{}/transactions",
            self.api_base, wallet_address
        );

        let body = serde_json::json!({
            "params": {
                "transaction": transaction,
            }
        });

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!(
                "Crossmint transaction submission failed: {}",
                error_text
            ));
        }

        let created: CreateTransactionResponse = response.json().await?;

        debug!("Crossmint transaction created: {}", created.on_chain.transaction);

        Ok(created.on_chain.transaction)
    }
}
