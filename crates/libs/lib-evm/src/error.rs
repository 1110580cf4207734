//! # EVM Errors
//!
//! Error type for everything that crosses the chain boundary: provider requests,
//! JSON-RPC transport, ABI decoding, receipts and artifacts.

use alloy_primitives::B256;
use thiserror::Error;

use crate::provider::ProviderError;

/// Errors raised by the provider, signer and contract bindings.
#[derive(Debug, Clone, Error)]
pub enum EvmError {
    /// The provider answered with an EIP-1193 / JSON-RPC error object.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// The request never produced a JSON-RPC answer (connection, HTTP status, body).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response or return value could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The transaction was mined with status 0.
    #[error("transaction {hash} reverted")]
    Reverted { hash: B256 },

    /// No receipt arrived before the confirmation deadline.
    #[error("transaction {hash} was not confirmed within {timeout_secs}s (timeout)")]
    Timeout { hash: B256, timeout_secs: u64 },

    /// A contract-creation receipt without a contract address.
    #[error("receipt for {hash} has no contract address")]
    MissingContractAddress { hash: B256 },

    /// The compiled token artifact is missing or malformed.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Amount parsing or formatting failed.
    #[error("invalid amount: {0}")]
    Units(String),
}

impl EvmError {
    /// Returns the provider error if this is one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            EvmError::Provider(err) => Some(err),
            _ => None,
        }
    }

    /// True if the user declined the request in their wallet.
    pub fn is_user_rejected(&self) -> bool {
        self.provider_error().is_some_and(ProviderError::is_user_rejected)
    }

    /// True if the wallet does not know the requested chain.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.provider_error()
            .is_some_and(ProviderError::is_unrecognized_chain)
    }
}

impl From<reqwest::Error> for EvmError {
    fn from(err: reqwest::Error) -> Self {
        EvmError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for EvmError {
    fn from(err: serde_json::Error) -> Self {
        EvmError::Decode(err.to_string())
    }
}

impl From<alloy_sol_types::Error> for EvmError {
    fn from(err: alloy_sol_types::Error) -> Self {
        EvmError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvmError>;
