//! # Common Error Types
//!
//! Consolidated error handling for the launchpad.
//!
//! [`AppError`] classifies every failure the orchestrators can hit. Each operation
//! keeps the failure local: the orchestrator stores [`AppError::user_message`] in its own
//! `error_message` field and never aborts sibling components.
//!
//! ## Error Categories
//!
//! - **ProviderMissing**: no injected wallet provider
//! - **NetworkMismatch**: the wallet stayed on the wrong chain
//! - **UserRejected**: EIP-1193 code `4001`
//! - **ContractRevert**: simulation or execution reverted, with the reason when known
//! - **Rpc**: transport or malformed-response failures
//! - **Timeout**: no receipt before the confirmation deadline
//! - **Validation**: bad user input, caught before anything is sent
//!
//! ## Error Conversion
//!
//! - [`EvmError`] → classified by provider code and kind
//! - [`ConfigError`] → `AppError::Config`

use lib_core::ConfigError;
use lib_evm::EvmError;
use thiserror::Error;

use crate::core::messages::{
    CONFIRMATION_TIMEOUT, CONNECT_WALLET, INSTALL_WALLET, MAX_REASON_CHARS, PAIR_EXISTS_REASON,
    USER_REJECTED, WRONG_NETWORK,
};

/// Application-wide error type.
///
/// # Example
///
/// ```rust
/// use launchpad::core::error::AppError;
///
/// let err = AppError::Validation("Amount must be greater than 0".to_string());
/// assert_eq!(err.to_string(), "Validation error: Amount must be greater than 0");
/// assert_eq!(err.user_message(), "Amount must be greater than 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No EIP-1193 provider was injected.
    #[error("No wallet provider available")]
    ProviderMissing,

    /// The wallet is on a chain other than the configured one.
    #[error("Wrong network: expected chain {expected}, wallet is on {actual}")]
    NetworkMismatch { expected: u64, actual: u64 },

    /// The user declined the request in their wallet.
    #[error("User rejected the request")]
    UserRejected,

    /// A call or transaction reverted. Carries the revert reason or provider message.
    #[error("Contract reverted: {0}")]
    ContractRevert(String),

    /// Transport, JSON-RPC or decoding failure.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A submitted transaction was not confirmed in time.
    #[error("Confirmation timeout: {0}")]
    Timeout(String),

    /// Input validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The same operation is already in flight.
    #[error("Already {0}")]
    Busy(&'static str),

    /// An operation that needs a wallet session ran without one.
    #[error("Wallet not connected")]
    NotConnected,

    /// Configuration or artifact problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Text shown next to the component that failed.
    ///
    /// Reasons coming from the chain are cut to the first 100 characters.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ProviderMissing => INSTALL_WALLET.to_string(),
            AppError::NetworkMismatch { .. } => WRONG_NETWORK.to_string(),
            AppError::UserRejected => USER_REJECTED.to_string(),
            AppError::ContractRevert(reason)
            | AppError::Rpc(reason)
            | AppError::Config(reason) => truncate_reason(reason),
            AppError::Validation(msg) => msg.clone(),
            AppError::Busy(what) => format!("Already {what}"),
            AppError::Timeout(_) => CONFIRMATION_TIMEOUT.to_string(),
            AppError::NotConnected => CONNECT_WALLET.to_string(),
        }
    }

    /// True when the factory refused to create a pair that is already registered.
    pub fn is_pair_exists(&self) -> bool {
        match self {
            AppError::ContractRevert(reason) | AppError::Rpc(reason) => {
                reason.contains(PAIR_EXISTS_REASON)
            }
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout(_))
    }
}

/// First [`MAX_REASON_CHARS`] characters of `reason`.
pub fn truncate_reason(reason: &str) -> String {
    match reason.char_indices().nth(MAX_REASON_CHARS) {
        Some((idx, _)) => reason[..idx].to_string(),
        None => reason.to_string(),
    }
}

impl From<EvmError> for AppError {
    fn from(err: EvmError) -> Self {
        match err {
            EvmError::Provider(provider) => {
                if provider.is_user_rejected() {
                    return AppError::UserRejected;
                }
                match provider.revert_reason().map(str::to_string) {
                    Some(reason) => AppError::ContractRevert(reason),
                    None => AppError::Rpc(provider.message),
                }
            }
            EvmError::Reverted { hash } => {
                AppError::ContractRevert(format!("transaction {hash} reverted"))
            }
            err @ EvmError::Timeout { .. } => AppError::Timeout(err.to_string()),
            EvmError::Artifact(msg) => AppError::Config(msg),
            EvmError::Units(msg) => AppError::Validation(msg),
            err @ (EvmError::Transport(_)
            | EvmError::Decode(_)
            | EvmError::MissingContractAddress { .. }) => AppError::Rpc(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Rpc(format!("Malformed provider response: {err}"))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
