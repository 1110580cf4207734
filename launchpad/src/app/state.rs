//! # Application State
//!
//! Root state shared between the event loop and background tasks through
//! `Arc<RwLock<AppState>>`. Locks are held only long enough to read or write a field.
//!
//! ```text
//! AppState
//! ├── session: Option<WalletSession>   created by connect, dropped on account/network change
//! ├── deployment: DeploymentStatus     Idle → Pending → Success(TokenRecord) | Error
//! ├── trading: Option<TradingCoordinator>
//! └── form: TokenForm
//! ```

use lib_evm::alloy_primitives::U256;
use lib_evm::units::{format_amount, NATIVE_DECIMALS};
use serde::Serialize;
use shared::dto::token::{DeploymentStatus, TokenRecord};

use crate::app::trading::TradingCoordinator;
use crate::services::wallet::WalletSession;
use crate::utils::validation::TokenForm;

/// Root application state.
#[derive(Default)]
pub struct AppState {
    pub session: Option<WalletSession>,
    /// A connect request is in flight
    pub connecting: bool,
    pub wallet_error: Option<String>,
    pub deployment: DeploymentStatus,
    /// Present only while a deployed token and a session both exist
    pub trading: Option<TradingCoordinator>,
    pub form: TokenForm,
}

impl AppState {
    pub fn token(&self) -> Option<&TokenRecord> {
        self.deployment.token()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Drop everything derived from the wallet or chain. The form survives.
    pub fn reload(&mut self) {
        self.session = None;
        self.wallet_error = None;
        self.deployment = DeploymentStatus::Idle;
        self.trading = None;
    }
}

/// Base asset and token balances of the connected account, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BalancePair {
    pub base: U256,
    pub token: U256,
}

impl BalancePair {
    pub fn new(base: U256, token: U256) -> Self {
        Self { base, token }
    }

    pub fn base_display(&self) -> String {
        format_amount(self.base, NATIVE_DECIMALS).unwrap_or_else(|_| self.base.to_string())
    }

    pub fn token_display(&self, decimals: u8) -> String {
        format_amount(self.token, decimals).unwrap_or_else(|_| self.token.to_string())
    }
}
