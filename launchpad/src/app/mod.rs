//! # Application Orchestrator
//!
//! The [`App`] struct is the root application state holder. It owns the wallet session
//! manager, the token deployer and the shared [`AppState`], and wires the trading
//! orchestrators in once a token exists.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Event loop (main.rs / tests)                                │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  App                                                   │  │
//! │  │  - connect_wallet() / deploy_token() / select_tab()    │  │
//! │  │  - next_event() / process_events() → handle_event()    │  │
//! │  └────────────┬───────────────────────────────────────────┘  │
//! │               │                                              │
//! │  ┌────────────▼───────────────────────────────────────────┐  │
//! │  │  State: Arc<RwLock<AppState>>                          │  │
//! │  │  session · deployment · trading · form                 │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └───────────────────────┬──────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼──────────────────────────────────────┐
//! │  Tokio tasks                                                 │
//! │  - connect flow            → AppEvent::WalletConnected       │
//! │  - token deployment        → AppEvent::DeploymentFinished    │
//! │  - provider notifications  → AccountsChanged / NetworkChanged│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows downward (wallet session → deployment → trading). Children report back
//! only through events, and only the event handler mutates the session.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use launchpad::app::App;
//! use launchpad::utils::validation::TokenForm;
//! use lib_core::Config;
//! use lib_evm::HttpProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(Config::default());
//! let provider = Arc::new(HttpProvider::new(config.network.rpc_url.clone())?);
//! let mut app = App::new(Some(provider), config);
//!
//! app.connect_wallet();
//! app.next_event().await; // WalletConnected
//!
//! app.set_form(TokenForm::new("Test", "TST", "1000", "18"));
//! app.deploy_token()?;
//! app.next_event().await; // DeploymentFinished
//! # Ok(())
//! # }
//! ```

mod event_handler;
mod events;
mod handlers;
mod state;
pub mod tasks;
pub mod trading;

pub use events::AppEvent;
pub use state::{AppState, BalancePair};
pub use trading::TradingCoordinator;

use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use lib_core::Config;
use lib_evm::{Eip1193Provider, TokenArtifact};
use lib_utils::task::TaskHandle;
use parking_lot::RwLock;
use shared::dto::token::DeploymentStatus;
use shared::dto::trading::TradingTab;

use crate::app::event_handler::AppEventHandler;
use crate::app::tasks::deploy::TokenDeployer;
use crate::app::tasks::liquidity::LiquidityOrchestrator;
use crate::app::tasks::swap::SwapOrchestrator;
use crate::app::tasks::wallet::forward_provider_events;
use crate::core::error::Result;
use crate::services::wallet::{WalletSession, WalletSessionManager};
use crate::utils::validation::TokenForm;

/// Root application state holder and event loop endpoint.
pub struct App {
    pub state: Arc<RwLock<AppState>>,
    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,
    pub(crate) wallet: WalletSessionManager,
    pub(crate) deployer: TokenDeployer,
    pub(crate) config: Arc<Config>,
    provider_events: Option<TaskHandle>,
}

impl App {
    /// Create the app around an injected provider. `None` models a browser without a wallet.
    pub fn new(provider: Option<Arc<dyn Eip1193Provider>>, config: Arc<Config>) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            event_tx,
            event_rx,
            wallet: WalletSessionManager::new(provider, Arc::clone(&config)),
            deployer: TokenDeployer::new(Arc::clone(&config)),
            config,
            provider_events: None,
        }
    }

    /// Use an already loaded token artifact instead of reading it from disk.
    pub fn with_artifact(mut self, artifact: TokenArtifact) -> Self {
        self.deployer = TokenDeployer::with_artifact(Arc::clone(&self.config), artifact);
        self
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // region:    --- User actions

    /// Start the connect flow. Without a provider the install hint is set immediately.
    pub fn connect_wallet(&mut self) {
        if self.provider_events.is_none() {
            self.provider_events = forward_provider_events(&self.wallet, self.event_tx.clone());
        }
        handlers::wallet::handle_connect_click(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            self.wallet.clone(),
        );
    }

    /// Validate the form and start a deployment. Status becomes `Pending` before this returns.
    pub fn deploy_token(&mut self) -> Result<()> {
        handlers::deploy::handle_deploy_click(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            self.deployer.clone(),
        )
    }

    pub fn select_tab(&mut self, tab: TradingTab) {
        handlers::trading::handle_tab_select(&self.state, tab);
    }

    pub fn set_form(&mut self, form: TokenForm) {
        self.state.write().form = form;
    }

    pub fn update_form(&mut self, update: impl FnOnce(&mut TokenForm)) {
        update(&mut self.state.write().form);
    }

    // endregion: --- User actions

    // region:    --- Events

    /// Handle every event already queued, without waiting.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next event and handle it. Returns the event kind.
    pub async fn next_event(&mut self) -> Option<&'static str> {
        let event = self.event_rx.recv().await.ok()?;
        let kind = event.kind();
        self.handle_event(event);
        Some(kind)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_impl(event);
    }

    // endregion: --- Events

    // region:    --- Accessors

    pub fn session(&self) -> Option<WalletSession> {
        self.state.read().session.clone()
    }

    pub fn is_connecting(&self) -> bool {
        self.state.read().connecting
    }

    pub fn wallet_error(&self) -> Option<String> {
        self.state.read().wallet_error.clone()
    }

    pub fn deployment_status(&self) -> DeploymentStatus {
        self.state.read().deployment.clone()
    }

    pub fn form(&self) -> TokenForm {
        self.state.read().form.clone()
    }

    pub fn active_tab(&self) -> Option<TradingTab> {
        self.state.read().trading.as_ref().map(TradingCoordinator::active_tab)
    }

    pub fn swap(&self) -> Option<SwapOrchestrator> {
        self.state.read().trading.as_ref().map(|t| t.swap().clone())
    }

    pub fn liquidity(&self) -> Option<LiquidityOrchestrator> {
        self.state.read().trading.as_ref().map(|t| t.liquidity().clone())
    }

    // endregion: --- Accessors
}
