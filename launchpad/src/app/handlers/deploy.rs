//! # Deployment Handlers

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::dto::token::DeploymentStatus;
use tracing::{info, warn};

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::tasks::deploy::TokenDeployer;
use crate::core::error::{AppError, Result};

/// Handle the deploy button.
///
/// Validation and the session check happen first and leave the status untouched. Then
/// the status moves to `Pending` before anything is sent, and the outcome arrives later
/// as [`AppEvent::DeploymentFinished`].
///
/// Internal handler function - use [`crate::app::App::deploy_token`] instead.
pub(crate) fn handle_deploy_click(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    deployer: TokenDeployer,
) -> Result<()> {
    let (session, params) = {
        let mut state = state.write();

        let Some(session) = state.session.clone() else {
            warn!("Deploy requested without a wallet session");
            return Err(AppError::NotConnected);
        };
        if state.deployment.is_pending() {
            return Err(AppError::Busy("deploying"));
        }
        let params = state.form.validate()?;

        state.deployment = DeploymentStatus::Pending;
        state.trading = None;
        (session, params)
    };

    info!(name = %params.name, symbol = %params.symbol, account = %session.address, "Deploying token");

    tokio::spawn(async move {
        let result = deployer
            .deploy(&session.signer, &params, session.address)
            .await;
        let _ = event_tx.send(AppEvent::DeploymentFinished(result)).await;
    });

    Ok(())
}
