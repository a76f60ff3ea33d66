//! # Jupiter Quote API
//!
//! Quote API integration for getting priced swap routes from Jupiter.

use super::client::JupiterHttpClient;
use super::types::Quote;
use tracing::debug;

impl JupiterHttpClient {
    /// Get a priced swap route from Jupiter Aggregator V6.
    ///
    /// The quote is kept opaque and handed back to the swap endpoint
    /// unmodified; nothing beyond the embedded transaction payload is ever
    /// read out of it.
    pub async fn get_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> anyhow::Result<Quote> {
        let url = format!(
            "{}/quote?inputMint={}&outputMint={}&amount={}",
            self.api_base, input_mint, output_mint, amount
        );

        debug!("Jupiter quote request: {}", url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Jupiter quote failed: {}", error_text));
        }

        let quote: Quote = response.json().await?;

        debug!("Jupiter quote received");

        Ok(quote)
    }
}
