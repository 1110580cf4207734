//! # Event Handler
//!
//! Applies [`AppEvent`]s to the shared state. This is the only place the wallet session
//! is created, replaced or dropped.
//!
//! | Event | Effect |
//! |-------|--------|
//! | `WalletConnected(Ok)` | session set, trading rebuilt for the new signer if a token exists |
//! | `WalletConnected(Err)` | connect error shown, no session |
//! | `AccountsChanged([])` | session and trading dropped |
//! | `AccountsChanged([a, ..])` | connect flow re-run for the new account |
//! | `NetworkChanged(id)` | full reload of chain-derived state, wrong-network hint if `id` is not the target |
//! | `DeploymentFinished` | `Pending` → `Success` / `Error`, ignored if no longer pending |

use std::sync::Arc;

use lib_core::Config;
use lib_evm::alloy_primitives::Address;
use shared::dto::token::{DeploymentStatus, TokenRecord};
use tracing::{debug, error, info, warn};

use crate::app::handlers::wallet::handle_connect_click;
use crate::app::state::AppState;
use crate::app::trading::TradingCoordinator;
use crate::app::{App, AppEvent};
use crate::core::error::AppError;
use crate::core::messages::{WALLET_CONNECTION, WRONG_NETWORK};
use crate::services::wallet::WalletSession;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    /// Write locks are taken per event and released before anything is spawned.
    fn handle_event_impl(&mut self, event: AppEvent) {
        debug!(event = event.kind(), "Handling app event");

        match event {
            AppEvent::WalletConnected(result) => self.handle_wallet_connected(result),
            AppEvent::AccountsChanged(accounts) => self.handle_accounts_changed(accounts),
            AppEvent::NetworkChanged(chain_id) => self.handle_network_changed(chain_id),
            AppEvent::DeploymentFinished(result) => self.handle_deployment_finished(result),
        }
    }
}

impl App {
    fn handle_wallet_connected(&mut self, result: Result<WalletSession, AppError>) {
        let mut state = self.state.write();
        state.connecting = false;

        match result {
            Ok(session) => {
                info!(account = %session.address, chain_id = session.chain_id, "Wallet session established");
                state.session = Some(session);
                state.wallet_error = None;
                rebuild_trading(&mut state, &self.config);
            }
            Err(err) => {
                state.wallet_error = Some(connect_error_message(&err));
            }
        }
    }

    fn handle_accounts_changed(&mut self, accounts: Vec<Address>) {
        let Some(&account) = accounts.first() else {
            info!("Wallet disconnected");
            let mut state = self.state.write();
            state.session = None;
            state.trading = None;
            return;
        };

        {
            let mut state = self.state.write();
            if state.session.as_ref().is_some_and(|s| s.address == account) {
                debug!(account = %account, "Active account unchanged");
                return;
            }
            info!(account = %account, "Account changed, reconnecting");
            state.session = None;
            state.trading = None;
        }

        handle_connect_click(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            self.wallet.clone(),
        );
    }

    fn handle_network_changed(&mut self, chain_id: u64) {
        let mut state = self.state.write();
        if state.session.as_ref().is_some_and(|s| s.chain_id == chain_id) {
            debug!(chain_id, "Network unchanged");
            return;
        }

        let expected = self.config.network.chain_id;
        info!(chain_id, expected, "Network changed, reloading state");
        state.reload();
        if chain_id != expected {
            state.wallet_error = Some(WRONG_NETWORK.to_string());
        }
    }

    fn handle_deployment_finished(&mut self, result: Result<TokenRecord, AppError>) {
        let mut state = self.state.write();
        if !state.deployment.is_pending() {
            warn!(status = state.deployment.label(), "Deployment result arrived after state reset, ignoring");
            return;
        }

        match result {
            Ok(record) => {
                info!(token = %record.address, tx_hash = %record.deployment_tx_hash, "Deployment succeeded");
                state.deployment = DeploymentStatus::Success(record);
                rebuild_trading(&mut state, &self.config);
            }
            Err(err) => {
                error!(error = %err, "Deployment failed");
                state.deployment = DeploymentStatus::Error(err.user_message());
            }
        }
    }
}

/// Replace the trading coordinator for the current token and session, if both exist.
fn rebuild_trading(state: &mut AppState, config: &Arc<Config>) {
    state.trading = None;

    let (Some(token), Some(session)) = (state.deployment.token(), state.session.as_ref()) else {
        return;
    };

    match TradingCoordinator::new(token.clone(), session.signer.clone(), Arc::clone(config)) {
        Ok(mut trading) => {
            trading.start();
            state.trading = Some(trading);
        }
        Err(err) => error!(token = %token.address, error = %err, "Trading interface unavailable"),
    }
}

fn connect_error_message(err: &AppError) -> String {
    match err {
        AppError::ProviderMissing | AppError::NetworkMismatch { .. } | AppError::UserRejected => {
            err.user_message()
        }
        _ => format!("{WALLET_CONNECTION}: {}", err.user_message()),
    }
}
