//! # Application Events
//!
//! Results of background tasks and wallet notifications, delivered to the [`App`](super::App)
//! over an `async_channel`.

use lib_evm::alloy_primitives::Address;
use shared::dto::token::TokenRecord;

use crate::core::error::AppError;
use crate::services::wallet::WalletSession;

/// Async task results sent to the event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Connect flow finished
    WalletConnected(Result<WalletSession, AppError>),
    /// `accountsChanged`; empty when the wallet locked or revoked access
    AccountsChanged(Vec<Address>),
    /// `chainChanged`
    NetworkChanged(u64),
    /// Contract-creation transaction confirmed or failed
    DeploymentFinished(Result<TokenRecord, AppError>),
}

impl AppEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::WalletConnected(_) => "WalletConnected",
            AppEvent::AccountsChanged(_) => "AccountsChanged",
            AppEvent::NetworkChanged(_) => "NetworkChanged",
            AppEvent::DeploymentFinished(_) => "DeploymentFinished",
        }
    }
}
