//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured —
//! a missing credential for the active signing mode must never surface mid-request.
//!
//! The config is constructed once in the server startup path and passed into
//! every component that needs it; business logic never reads the environment.

use crate::error::AppError;
use std::env;

/// Which identity signs and submits swap transactions.
///
/// Selected once at startup via `SIGNING_MODE` and never changed afterwards.
#[derive(Clone, Debug)]
pub enum SigningMode {
    /// Sign with a locally held keypair and submit straight to the chain RPC.
    Local {
        /// Base58-encoded 64-byte keypair material.
        private_key: String,
    },
    /// Hand an unsigned transaction to the Crossmint MPC signer for
    /// server-side signing and on-chain execution.
    Custodial {
        /// Crossmint API key (sent as `X-API-KEY`).
        api_key: String,
        /// Linked-user identity owning the custodial wallet (e.g. `email:user@example.com`).
        linked_user: String,
    },
}

impl SigningMode {
    /// Mode name as it appears in `SIGNING_MODE`.
    pub fn name(&self) -> &'static str {
        match self {
            SigningMode::Local { .. } => "local",
            SigningMode::Custodial { .. } => "custodial",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,

    /// Active signing mode with its mode-specific credentials
    pub signing: SigningMode,

    /// Solana RPC endpoint (local mode submission and confirmation polling)
    pub rpc_url: String,

    /// Jupiter aggregator base URL (quote and swap endpoints live under it)
    pub jupiter_api_base: String,

    /// Crossmint API host (custodial wallet and transaction endpoints)
    pub crossmint_api_base: String,

    /// Poll for on-chain confirmation after a local-mode submission
    ///
    /// Off by default; the swap response never depends on the poll outcome.
    pub confirm_transactions: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string());

        let mode = env::var("SIGNING_MODE")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase();

        let signing = match mode.as_str() {
            "local" => {
                let private_key = env::var("PRIVATE_KEY").map_err(|_| {
                    AppError::Config("PRIVATE_KEY must be set in local signing mode".to_string())
                })?;
                SigningMode::Local { private_key }
            }
            "custodial" => {
                let api_key = env::var("CROSSMINT_API_KEY").map_err(|_| {
                    AppError::Config("CROSSMINT_API_KEY must be set in custodial signing mode".to_string())
                })?;
                let linked_user = env::var("CROSSMINT_LINKED_USER").map_err(|_| {
                    AppError::Config("CROSSMINT_LINKED_USER must be set in custodial signing mode".to_string())
                })?;
                SigningMode::Custodial { api_key, linked_user }
            }
            other => {
                return Err(AppError::Config(format!(
                    "SIGNING_MODE must be \"local\" or \"custodial\", got \"{}\"",
                    other
                )));
            }
        };

        let rpc_url = env::var("RPC_URL")
            .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string());

        let jupiter_api_base = env::var("JUPITER_API_BASE")
            .unwrap_or_else(|_| "https://quote-api.jup.ag/v6".to_string());

        let crossmint_api_base = env::var("CROSSMINT_API_BASE")
            .unwrap_or_else(|_| "https://www.crossmint.com".to_string());

        let confirm_transactions = env::var("CONFIRM_TRANSACTIONS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            bind_address,
            signing,
            rpc_url,
            jupiter_api_base,
            crossmint_api_base,
            confirm_transactions,
        })
    }

    /// Validate configuration values against startup rules.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(AppError::Config(format!(
                "BIND_ADDRESS is not a valid socket address: {}",
                self.bind_address
            )));
        }

        match &self.signing {
            SigningMode::Local { private_key } => {
                if private_key.trim().is_empty() {
                    return Err(AppError::Config("PRIVATE_KEY must not be empty".to_string()));
                }
            }
            SigningMode::Custodial { api_key, linked_user } => {
                if api_key.trim().is_empty() {
                    return Err(AppError::Config("CROSSMINT_API_KEY must not be empty".to_string()));
                }
                if linked_user.trim().is_empty() {
                    return Err(AppError::Config("CROSSMINT_LINKED_USER must not be empty".to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> Config {
        Config {
            bind_address: "127.0.0.1:8000".to_string(),
            signing: SigningMode::Local {
                private_key: "4NMwxzmYj2uvHuq8xoqhY8RXg63KSVJM1DXkpbmkUY7YQWuoyQgFnnzn6yo3CMnqZasnNPNuAT2TLwQsCaKkUddp".to_string(),
            },
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            jupiter_api_base: "https://quote-api.jup.ag/v6".to_string(),
            crossmint_api_base: "https://www.crossmint.com".to_string(),
            confirm_transactions: false,
        }
    }

    #[test]
    fn validate_accepts_complete_local_config() {
        assert!(local_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_private_key() {
        let mut config = local_config();
        config.signing = SigningMode::Local { private_key: "  ".to_string() };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("PRIVATE_KEY"));
    }

    #[test]
    fn validate_rejects_empty_custodial_credentials() {
        let mut config = local_config();
        config.signing = SigningMode::Custodial {
            api_key: String::new(),
            linked_user: "email:user@example.com".to_string(),
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("CROSSMINT_API_KEY"));

        config.signing = SigningMode::Custodial {
            api_key: "sk_test".to_string(),
            linked_user: String::new(),
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("CROSSMINT_LINKED_USER"));
    }

    #[test]
    fn validate_rejects_malformed_bind_address() {
        let mut config = local_config();
        config.bind_address = "not-an-address".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("BIND_ADDRESS"));
    }

    #[test]
    fn config_errors_map_to_bad_request() {
        let mut config = local_config();
        config.signing = SigningMode::Local { private_key: String::new() };

        let err = config.validate().unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert!(err.user_message().contains("PRIVATE_KEY"));
    }

    #[test]
    fn mode_names_match_env_values() {
        assert_eq!(
            SigningMode::Local { private_key: "k".into() }.name(),
            "local"
        );
        assert_eq!(
            SigningMode::Custodial {
                api_key: "k".into(),
                linked_user: "email:u@example.com".into()
            }
            .name(),
            "custodial"
        );
    }
}
