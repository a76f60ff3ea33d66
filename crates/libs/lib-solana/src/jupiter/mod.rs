//! # Jupiter Aggregator Client
//!
//! Integration with Jupiter Aggregator for swap quoting and transaction
//! building.

// region: --- Modules
pub mod client;
pub mod quote;
pub mod swap;
pub mod types;
// endregion: --- Modules

// region: --- Main Client
use client::JupiterHttpClient;

/// Builder for configuring JupiterClient.
///
/// Allows fluent configuration of client settings before building.
#[derive(Debug, Clone)]
pub struct JupiterClientBuilder {
    timeout: Option<std::time::Duration>,
    api_base: Option<String>,
}

impl Default for JupiterClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Some(std::time::Duration::from_secs(10)),
            api_base: Some("https://quote-api.jup.ag/v6".to_string()),
        }
    }
}

impl JupiterClientBuilder {
    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the quote/swap API base URL.
    pub fn api_base(mut self, url: String) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Build the JupiterClient with configured settings.
    pub fn build(self) -> anyhow::Result<JupiterClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or_else(|| std::time::Duration::from_secs(10)))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let inner = JupiterHttpClient {
            http,
            api_base: self
                .api_base
                .unwrap_or_else(|| "https://quote-api.jup.ag/v6".to_string()),
        };

        Ok(JupiterClient { inner })
    }
}

/// Client for Jupiter Aggregator API
pub struct JupiterClient {
    inner: JupiterHttpClient,
}

impl JupiterClient {
    /// Create a new Jupiter API client with default settings.
    pub fn new() -> anyhow::Result<Self> {
        Self::builder().build()
    }

    /// Create a new Jupiter client using a builder for configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lib_solana::jupiter::JupiterClient;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let client = JupiterClient::builder()
    ///     .timeout(std::time::Duration::from_secs(30))
    ///     .api_base("https://quote-api.jup.ag/v6".to_string())
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> JupiterClientBuilder {
        JupiterClientBuilder::default()
    }

    // Delegate methods to inner client
    pub async fn get_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> anyhow::Result<types::Quote> {
        self.inner.get_quote(input_mint, output_mint, amount).await
    }

    pub async fn get_swap_transaction(
        &self,
        quote: &types::Quote,
        user_public_key: &str,
        as_legacy_transaction: bool,
    ) -> anyhow::Result<types::SwapTransactionResponse> {
        self.inner
            .get_swap_transaction(quote, user_public_key, as_legacy_transaction)
            .await
    }
}
// endregion: --- Main Client

// Re-export commonly used types
pub use types::*;
