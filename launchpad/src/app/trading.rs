//! # Trading Interface Coordinator
//!
//! Composes one [`SwapOrchestrator`] and one [`LiquidityOrchestrator`] under a tab
//! selector. It only exists while a deployed token and a wallet session are both present.
//!
//! The two orchestrators are independent instances: switching tabs cancels nothing, and
//! an operation started on one tab keeps running while the other is shown. The swap
//! poller is owned here and stops when the coordinator is dropped or [`stop`]ped.
//!
//! [`stop`]: TradingCoordinator::stop

use std::sync::Arc;

use lib_core::Config;
use lib_evm::Signer;
use lib_utils::task::TaskHandle;
use shared::dto::token::TokenRecord;
use shared::dto::trading::TradingTab;
use tracing::{debug, info};

use crate::app::tasks::liquidity::LiquidityOrchestrator;
use crate::app::tasks::swap::SwapOrchestrator;
use crate::app::tasks::TradeContext;
use crate::core::error::Result;

pub struct TradingCoordinator {
    token: TokenRecord,
    active_tab: TradingTab,
    swap: SwapOrchestrator,
    liquidity: LiquidityOrchestrator,
    config: Arc<Config>,
    poller: Option<TaskHandle>,
}

impl TradingCoordinator {
    pub fn new(token: TokenRecord, signer: Signer, config: Arc<Config>) -> Result<Self> {
        let ctx = TradeContext::new(signer, &token, Arc::clone(&config))?;
        Ok(Self {
            token,
            active_tab: TradingTab::default(),
            swap: SwapOrchestrator::new(ctx.clone()),
            liquidity: LiquidityOrchestrator::new(ctx),
            config,
            poller: None,
        })
    }

    /// Kick off the liquidity mount checks and start the swap balance poller.
    pub fn start(&mut self) {
        info!(token = %self.token.address, "Trading interface started");

        let liquidity = self.liquidity.clone();
        tokio::spawn(async move { liquidity.initialize().await });

        self.poller = Some(self.swap.start_polling(self.config.balance_poll_interval));
    }

    pub fn stop(&mut self) {
        if self.poller.take().is_some() {
            debug!(token = %self.token.address, "Swap poller stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|poller| !poller.is_finished())
    }

    pub fn token(&self) -> &TokenRecord {
        &self.token
    }

    pub fn active_tab(&self) -> TradingTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: TradingTab) {
        self.active_tab = tab;
    }

    pub fn swap(&self) -> &SwapOrchestrator {
        &self.swap
    }

    pub fn liquidity(&self) -> &LiquidityOrchestrator {
        &self.liquidity
    }
}

impl std::fmt::Debug for TradingCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingCoordinator")
            .field("token", &self.token.address)
            .field("active_tab", &self.active_tab)
            .field("polling", &self.is_polling())
            .finish()
    }
}
