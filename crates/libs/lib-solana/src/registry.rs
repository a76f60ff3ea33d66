//! # Token Registry
//!
//! Static mapping from human-readable token symbols to their on-chain mint
//! addresses and decimal precision. The table is code-defined, built once at
//! startup, and never mutated afterwards.

use std::collections::HashMap;

/// A single registry entry: symbol, mint address, and decimal precision.
#[derive(Debug, Clone)]
pub struct TokenEntry {
    /// Uppercase token symbol (e.g. "SOL")
    pub symbol: String,
    /// Base58 mint address on mainnet
    pub mint: String,
    /// Number of decimals in the token's smallest unit
    pub decimals: u8,
}

/// Static symbol → mint/decimals lookup table.
///
/// Lookups are case-insensitive: symbols are normalized to uppercase on
/// insert and on lookup.
pub struct TokenRegistry {
    entries: HashMap<String, TokenEntry>,
}

impl TokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry pre-loaded with the supported mainnet tokens.
    pub fn with_default_tokens() -> Self {
        let mut registry = Self::new();

        registry.insert("SOL", "So11111111111111111111111111111111111111112", 9);
        registry.insert("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6);
        registry.insert("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", 6);
        registry.insert("JUP", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", 6);
        registry.insert("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", 5);
        registry.insert("WIF", "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm", 6);

        registry
    }

    fn insert(&mut self, symbol: &str, mint: &str, decimals: u8) {
        let symbol = symbol.to_uppercase();
        self.entries.insert(
            symbol.clone(),
            TokenEntry {
                symbol,
                mint: mint.to_string(),
                decimals,
            },
        );
    }

    /// Look up a token by symbol. Returns `None` for unknown symbols.
    pub fn lookup(&self, symbol: &str) -> Option<&TokenEntry> {
        self.entries.get(&symbol.to_uppercase())
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::with_default_tokens()
    }
}

/// Scale a whole-token amount into the token's smallest unit.
///
/// Returns `None` on overflow; the amount is `amount * 10^decimals` exactly.
pub fn scale_amount(amount: u64, decimals: u8) -> Option<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|unit| amount.checked_mul(unit))
}
