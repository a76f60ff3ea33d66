//! # Solana Library
//!
//! Solana blockchain integration: token registry, Jupiter aggregator client,
//! RPC client, wallet handling, the Crossmint custodial client, and
//! transaction marshaling for both signing modes.

// Declare all modules
pub mod client;
pub mod crossmint;
pub mod jupiter;
pub mod registry;
pub mod signer;
pub mod tx;
pub mod wallet;

// Re-export commonly used types from root for convenience
pub use client::SolanaClient;
pub use crossmint::CrossmintClient;
pub use jupiter::JupiterClient;
pub use registry::{scale_amount, TokenEntry, TokenRegistry};
pub use signer::{PreparedTransaction, TransactionSigner};
