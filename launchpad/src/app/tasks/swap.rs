//! # Swap Orchestrator
//!
//! Exact-input swaps between the deployed token and the native base asset through the
//! router:
//!
//! | Direction | Router call | Path | Approval |
//! |-----------|-------------|------|----------|
//! | token → base | `swapExactTokensForETH` | `[token, WETH]` | required |
//! | base → token | `swapExactETHForTokens` (amount as value) | `[WETH, token]` | never |
//!
//! `amountOutMin` is zero: the slippage selector is recorded but not applied.
//!
//! [`SwapOrchestrator::refresh`] is the single refresh path. The poller started by
//! [`SwapOrchestrator::start_polling`] and the post-swap completion both go through it,
//! and the poller stops when its [`TaskHandle`] drops.

use std::sync::Arc;
use std::time::Duration;

use lib_core::TxKind;
use lib_evm::alloy_primitives::{hex, U256};
use lib_evm::units::{parse_amount, NATIVE_DECIMALS};
use lib_utils::task::TaskHandle;
use parking_lot::RwLock;
use serde::Serialize;
use shared::dto::trading::SwapType;
use tracing::{debug, error, info, warn};

use crate::app::state::BalancePair;
use crate::app::tasks::{BusyGuard, TradeContext};
use crate::core::error::{AppError, Result};
use crate::core::messages::{APPROVAL_FAILED, APPROVAL_TIMEOUT, APPROVE_FIRST, TX_FAILED};

/// Selectable slippage tolerances in basis points (0.5%, 1%, 2%, 5%).
pub const SLIPPAGE_OPTIONS_BPS: [u16; 4] = [50, 100, 200, 500];
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Observable state of the swap tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapState {
    pub swap_type: SwapType,
    pub amount: String,
    pub slippage_bps: u16,
    pub swapping: bool,
    pub checking_approval: bool,
    pub approving: bool,
    pub approved: bool,
    pub balances: Option<BalancePair>,
    pub error_message: Option<String>,
    pub last_tx_hash: Option<String>,
}

impl Default for SwapState {
    fn default() -> Self {
        Self {
            swap_type: SwapType::default(),
            amount: String::new(),
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            swapping: false,
            checking_approval: false,
            approving: false,
            approved: false,
            balances: None,
            error_message: None,
            last_tx_hash: None,
        }
    }
}

impl SwapState {
    /// Slippage as a percentage label, `50` bps is `"0.5%"`.
    pub fn slippage_label(&self) -> String {
        let whole = self.slippage_bps / 100;
        let fraction = self.slippage_bps % 100;
        if fraction == 0 {
            format!("{whole}%")
        } else {
            format!("{whole}.{}%", format!("{fraction:02}").trim_end_matches('0'))
        }
    }
}

fn swapping(state: &mut SwapState) -> &mut bool {
    &mut state.swapping
}

fn approving(state: &mut SwapState) -> &mut bool {
    &mut state.approving
}

/// Swap orchestrator for one token and one signer.
#[derive(Debug, Clone)]
pub struct SwapOrchestrator {
    ctx: TradeContext,
    state: Arc<RwLock<SwapState>>,
}

impl SwapOrchestrator {
    pub fn new(ctx: TradeContext) -> Self {
        Self {
            ctx,
            state: Arc::new(RwLock::new(SwapState::default())),
        }
    }

    pub fn context(&self) -> &TradeContext {
        &self.ctx
    }

    pub fn state(&self) -> SwapState {
        self.state.read().clone()
    }

    // region:    --- Inputs

    /// Flip the direction. Amount and error always reset.
    pub fn toggle_swap_type(&self) {
        let mut state = self.state.write();
        state.swap_type = state.swap_type.toggled();
        state.amount.clear();
        state.error_message = None;
    }

    pub fn set_amount(&self, amount: impl Into<String>) {
        self.state.write().amount = amount.into();
    }

    pub fn set_slippage_bps(&self, bps: u16) -> Result<()> {
        if !SLIPPAGE_OPTIONS_BPS.contains(&bps) {
            return Err(AppError::Validation(format!(
                "Unsupported slippage {bps} bps, choose one of {SLIPPAGE_OPTIONS_BPS:?}"
            )));
        }
        self.state.write().slippage_bps = bps;
        Ok(())
    }

    /// Copy the balance of the input side into the amount field.
    pub fn set_max(&self) {
        let mut state = self.state.write();
        let Some(balances) = state.balances else {
            return;
        };
        state.amount = match state.swap_type {
            SwapType::TokenToBase => balances.token_display(self.ctx.decimals),
            SwapType::BaseToToken => balances.base_display(),
        };
    }

    // endregion: --- Inputs

    /// Re-read balances and allowance. Failures are logged and leave the old values.
    pub async fn refresh(&self) {
        match self.ctx.balances().await {
            Ok(balances) => self.state.write().balances = Some(balances),
            Err(err) => warn!(account = %self.ctx.account, error = %err, "Swap balance refresh failed"),
        }

        self.state.write().checking_approval = true;
        let allowance = self.ctx.has_allowance().await;
        let mut state = self.state.write();
        state.checking_approval = false;
        match allowance {
            Ok(approved) => state.approved = approved,
            Err(err) => warn!(token = %self.ctx.token_address(), error = %err, "Swap allowance check failed"),
        }
    }

    /// Refresh immediately, then every `interval` until the handle drops.
    pub fn start_polling(&self, interval: Duration) -> TaskHandle {
        let orchestrator = self.clone();
        TaskHandle::new(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                orchestrator.refresh().await;
            }
        }))
    }

    pub async fn approve(&self) {
        let Some(_busy) = BusyGuard::acquire(&self.state, approving) else {
            debug!("Swap approval already in flight");
            return;
        };
        self.state.write().error_message = None;

        let router = self.ctx.router.address();
        let result = self
            .ctx
            .confirm(
                self.ctx
                    .token
                    .approve(router, U256::MAX, self.ctx.gas(TxKind::Approve))
                    .await,
            )
            .await;

        let mut state = self.state.write();
        match result {
            Ok(receipt) => {
                info!(token = %self.ctx.token_address(), spender = %router, tx_hash = %receipt.transaction_hash, "Router approved for swaps");
                state.approved = true;
            }
            Err(err) => {
                error!(token = %self.ctx.token_address(), error = %err, "Swap approval failed");
                state.error_message = Some(if err.is_timeout() {
                    APPROVAL_TIMEOUT.to_string()
                } else {
                    format!("{APPROVAL_FAILED}: {}", err.user_message())
                });
            }
        }
    }

    pub async fn swap(&self) {
        let (swap_type, amount_text, approved) = {
            let state = self.state.read();
            (state.swap_type, state.amount.clone(), state.approved)
        };

        let amount = match self.parse_input(swap_type, &amount_text) {
            Ok(amount) => amount,
            Err(err) => {
                self.state.write().error_message = Some(err.user_message());
                return;
            }
        };
        if swap_type.requires_approval() && !approved {
            self.state.write().error_message = Some(APPROVE_FIRST.to_string());
            return;
        }

        let Some(_busy) = BusyGuard::acquire(&self.state, swapping) else {
            debug!("Swap already in flight");
            return;
        };
        self.state.write().error_message = None;

        let result = self.submit_swap(swap_type, amount).await;

        match result {
            Ok(tx_hash) => {
                {
                    let mut state = self.state.write();
                    state.amount.clear();
                    state.last_tx_hash = Some(tx_hash);
                }
                self.refresh().await;
            }
            Err(err) => {
                error!(direction = ?swap_type, amount = %amount, error = %err, "Swap failed");
                self.state.write().error_message = Some(if err == AppError::UserRejected {
                    err.user_message()
                } else {
                    TX_FAILED.to_string()
                });
            }
        }
    }

    async fn submit_swap(&self, swap_type: SwapType, amount: U256) -> Result<String> {
        let token = self.ctx.token_address();
        let weth = self.ctx.wrapped_native;
        let deadline = self.ctx.deadline();
        let gas = self.ctx.gas(TxKind::Swap);
        let router = &self.ctx.router;

        let submitted = match swap_type {
            SwapType::TokenToBase => {
                router
                    .swap_exact_tokens_for_eth(amount, U256::ZERO, vec![token, weth], self.ctx.account, deadline, gas)
                    .await
            }
            SwapType::BaseToToken => {
                router
                    .swap_exact_eth_for_tokens(amount, U256::ZERO, vec![weth, token], self.ctx.account, deadline, gas)
                    .await
            }
        };
        let receipt = self.ctx.confirm(submitted).await?;

        info!(
            direction = ?swap_type,
            amount_in = %amount,
            tx_hash = %receipt.transaction_hash,
            "Swap confirmed"
        );
        Ok(hex::encode_prefixed(receipt.transaction_hash))
    }

    fn parse_input(&self, swap_type: SwapType, amount: &str) -> Result<U256> {
        if amount.trim().is_empty() {
            return Err(AppError::Validation("Enter an amount".to_string()));
        }
        let decimals = match swap_type {
            SwapType::TokenToBase => self.ctx.decimals,
            SwapType::BaseToToken => NATIVE_DECIMALS,
        };
        let parsed = parse_amount(amount, decimals)?;
        if parsed.is_zero() {
            return Err(AppError::Validation("Amount must be greater than zero".to_string()));
        }
        Ok(parsed)
    }
}
