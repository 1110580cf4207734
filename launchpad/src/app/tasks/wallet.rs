//! # Wallet Tasks
//!
//! Background side of the wallet session: the connect request and the forwarding of
//! provider notifications into the event loop.

use async_channel::Sender;
use lib_evm::ProviderEvent;
use lib_utils::task::TaskHandle;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::app::events::AppEvent;
use crate::services::wallet::WalletSessionManager;

/// Run the connect flow and report the outcome as [`AppEvent::WalletConnected`].
pub(crate) fn spawn_connect(wallet: WalletSessionManager, event_tx: Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = wallet.connect().await;
        if let Err(err) = &result {
            warn!(error = %err, "Wallet connection failed");
        }
        let _ = event_tx.send(AppEvent::WalletConnected(result)).await;
    });
}

/// Forward `accountsChanged` / `chainChanged` as app events until the handle drops.
///
/// Returns `None` when there is no provider to listen to.
pub(crate) fn forward_provider_events(
    wallet: &WalletSessionManager,
    event_tx: Sender<AppEvent>,
) -> Option<TaskHandle> {
    let mut events = wallet.subscribe()?;

    Some(TaskHandle::new(tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Provider events dropped");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            debug!(event = ?event, "Provider event");
            let app_event = match event {
                ProviderEvent::AccountsChanged(accounts) => AppEvent::AccountsChanged(accounts),
                ProviderEvent::ChainChanged(chain_id) => AppEvent::NetworkChanged(chain_id),
            };
            if event_tx.send(app_event).await.is_err() {
                break;
            }
        }
    })))
}
