//! # Wallet Handlers

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::tasks::wallet::spawn_connect;
use crate::core::error::AppError;
use crate::services::wallet::WalletSessionManager;

/// Handle the connect button.
///
/// Internal handler function - use [`crate::app::App::connect_wallet`] instead.
pub(crate) fn handle_connect_click(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    wallet: WalletSessionManager,
) {
    {
        let mut state = state.write();
        if !wallet.has_provider() {
            warn!("No wallet provider injected");
            state.wallet_error = Some(AppError::ProviderMissing.user_message());
            return;
        }
        if state.connecting {
            debug!("Connect already in flight");
            return;
        }
        state.connecting = true;
        state.wallet_error = None;
    }

    spawn_connect(wallet, event_tx);
}
