//! # Jupiter Swap Transaction Building
//!
//! Swap transaction building from Jupiter quotes.

use super::client::JupiterHttpClient;
use super::types::{Quote, SwapTransactionResponse};
use tracing::debug;

impl JupiterHttpClient {
    /// Build a ready-to-sign swap transaction from a quote.
    ///
    /// `as_legacy_transaction` requests a legacy-format transaction whose
    /// message carries its full static account list, which the custodial
    /// rebuild path depends on.
    pub async fn get_swap_transaction(
        &self,
        quote: &Quote,
        user_public_key: &str,
        as_legacy_transaction: bool,
    ) -> anyhow::Result<SwapTransactionResponse> {
        let swap_url = format!("{}/swap", self.api_base);

        let request_body = serde_json::json!({
            "quoteResponse": quote,
            "userPublicKey": user_public_key,
            "wrapUnwrapSOL": true,
            "asLegacyTransaction": as_legacy_transaction,
        });

        debug!("Jupiter swap transaction request for user: {}", user_public_key);

        let response = self
            .http
            .post(&swap_url)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Jupiter swap transaction failed: {}", error_text));
        }

        let swap_response: SwapTransactionResponse = response.json().await?;

        debug!("Jupiter swap transaction received");

        Ok(swap_response)
    }
}
