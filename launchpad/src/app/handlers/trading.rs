//! # Trading Handlers

use parking_lot::RwLock;
use shared::dto::trading::TradingTab;
use tracing::debug;

use crate::app::state::AppState;

/// Switch the visible trading tab. In-flight operations on either tab are untouched.
pub(crate) fn handle_tab_select(state: &RwLock<AppState>, tab: TradingTab) {
    let mut state = state.write();
    match state.trading.as_mut() {
        Some(trading) => {
            trading.select_tab(tab);
            debug!(tab = tab.title(), "Trading tab selected");
        }
        None => debug!("Tab selection ignored, no token deployed"),
    }
}
