//! # Provider Boundary
//!
//! The wallet provider is modelled after EIP-1193: a single `request(method, params)`
//! entry point plus a stream of `accountsChanged` / `chainChanged` notifications.
//!
//! Nothing in the workspace reaches for a global provider. A browser wallet bridge,
//! the JSON-RPC [`HttpProvider`](crate::http::HttpProvider) or the in-memory
//! [`MockChain`](crate::mock::MockChain) is injected wherever one is needed.
//!
//! ## Error Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `4001` | User rejected the request |
//! | `4200` | Method not supported by this provider |
//! | `4902` | Chain not added to the wallet |

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::error::Result;

/// EIP-1193 provider error code: the user rejected the request.
pub const USER_REJECTED: i64 = 4001;
/// EIP-1193 provider error code: the provider does not support the method.
pub const UNSUPPORTED_METHOD: i64 = 4200;
/// `wallet_switchEthereumChain` error code: the chain has not been added.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// Error object returned by a provider or JSON-RPC node.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED, "User rejected the request.")
    }

    pub fn unrecognized_chain(chain_id: u64) -> Self {
        Self::new(
            UNRECOGNIZED_CHAIN,
            format!("Unrecognized chain ID {chain_id:#x}. Try adding the chain using wallet_addEthereumChain first."),
        )
    }

    pub fn unsupported_method(method: &str) -> Self {
        Self::new(UNSUPPORTED_METHOD, format!("The provider does not support {method}"))
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code == USER_REJECTED
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == UNRECOGNIZED_CHAIN
    }

    /// Revert reason carried in the message, e.g. `execution reverted: UniswapV2: PAIR_EXISTS`.
    pub fn revert_reason(&self) -> Option<&str> {
        let lower = self.message.to_ascii_lowercase();
        let start = lower.find("reverted")?;
        let rest = &self.message[start + "reverted".len()..];
        let reason = rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
        Some(if reason.is_empty() { &self.message } else { reason })
    }
}

/// Change notifications pushed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `accountsChanged`: the authorized accounts, empty when the wallet locked
    AccountsChanged(Vec<Address>),
    /// `chainChanged`: the new active chain id
    ChainChanged(u64),
}

/// EIP-1193 style provider.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    /// Send a JSON-RPC request (`eth_*` or `wallet_*`) and return the raw result.
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Subscribe to account and chain change notifications.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}

/// `nativeCurrency` member of `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrencyParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameter object for `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    /// Hex quantity, e.g. `0x66eee`
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrencyParams,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

/// Parse a hex quantity such as `0x66eee`.
pub fn parse_hex_u64(value: &str) -> Option<u64> {
    let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_reason_extraction() {
        let err = ProviderError::new(3, "execution reverted: UniswapV2: PAIR_EXISTS");
        assert_eq!(err.revert_reason(), Some("UniswapV2: PAIR_EXISTS"));

        let bare = ProviderError::new(-32000, "execution reverted");
        assert_eq!(bare.revert_reason(), Some("execution reverted"));

        let other = ProviderError::new(-32000, "nonce too low");
        assert_eq!(other.revert_reason(), None);
    }

    #[test]
    fn test_error_codes() {
        assert!(ProviderError::user_rejected().is_user_rejected());
        assert!(ProviderError::unrecognized_chain(421_614).is_unrecognized_chain());
        assert!(ProviderError::unrecognized_chain(421_614).message.contains("0x66eee"));
    }

    #[test]
    fn test_add_chain_params_wire_format() {
        let params = AddChainParams {
            chain_id: "0x66eee".to_string(),
            chain_name: "Arbitrum Sepolia".to_string(),
            native_currency: NativeCurrencyParams {
                name: "ETH".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://sepolia-rollup.arbitrum.io/rpc".to_string()],
            block_explorer_urls: vec!["https://sepolia.arbiscan.io".to_string()],
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["chainId"], "0x66eee");
        assert_eq!(json["nativeCurrency"]["decimals"], 18);
        assert_eq!(json["blockExplorerUrls"][0], "https://sepolia.arbiscan.io");
    }

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x66eee"), Some(421_614));
        assert_eq!(parse_hex_u64("66eee"), None);
        assert_eq!(parse_hex_u64("0xzz"), None);
    }
}
