//! # Pair & Liquidity Orchestrator
//!
//! Drives the liquidity tab for one deployed token:
//!
//! 1. **Initialize**: pair existence, balances and allowance are checked one after the
//!    other. Each check catches and logs its own failure, so one failing never skips the
//!    others.
//! 2. **Create pair**: `createPair(token, WETH)` with a fixed gas ceiling. A
//!    `PAIR_EXISTS` revert counts as success and surfaces as a notice.
//! 3. **Approve**: infinite allowance for the router.
//! 4. **Add liquidity**: `addLiquidityETH` accepting no less than 95% of either amount,
//!    native amount attached as value. Inputs clear and balances refresh on confirmation.
//!
//! State lives behind `Arc<RwLock<LiquidityState>>`; the orchestrator is cheap to clone
//! and every clone drives the same instance.

use std::sync::Arc;

use lib_core::TxKind;
use lib_evm::alloy_primitives::{hex, U256};
use lib_evm::units::{parse_amount, NATIVE_DECIMALS};
use lib_evm::{AddLiquidityEth, Receipt};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::app::state::BalancePair;
use crate::app::tasks::{BusyGuard, TradeContext};
use crate::core::error::{AppError, Result};
use crate::core::messages::{
    ADD_LIQUIDITY_FAILED, APPROVAL_FAILED, APPROVAL_TIMEOUT, CREATE_PAIR_FAILED,
    PAIR_EXISTS_NOTICE,
};

/// Share of each desired amount the router must accept, in percent.
pub const MIN_ACCEPTED_PERCENT: u64 = 95;

/// Observable state of the liquidity tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiquidityState {
    pub checking_pair: bool,
    pub pair_exists: bool,
    pub creating_pair: bool,
    pub checking_approval: bool,
    pub approved: bool,
    pub approving: bool,
    pub adding_liquidity: bool,
    pub token_amount: String,
    pub base_amount: String,
    pub balances: Option<BalancePair>,
    pub error_message: Option<String>,
    /// Informational message, e.g. the pair already existed
    pub notice: Option<String>,
    pub last_tx_hash: Option<String>,
}

fn creating_pair(state: &mut LiquidityState) -> &mut bool {
    &mut state.creating_pair
}

fn approving(state: &mut LiquidityState) -> &mut bool {
    &mut state.approving
}

fn adding_liquidity(state: &mut LiquidityState) -> &mut bool {
    &mut state.adding_liquidity
}

/// Minimum accepted amount: 95% of `desired`, rounded down.
///
/// Split into quotient and remainder so the product never overflows.
///
/// ```rust
/// use launchpad::app::tasks::liquidity::minimum_accepted;
/// use lib_evm::alloy_primitives::U256;
///
/// assert_eq!(minimum_accepted(U256::from(1000u64)), U256::from(950u64));
/// assert_eq!(minimum_accepted(U256::from(19u64)), U256::from(18u64));
/// ```
pub fn minimum_accepted(desired: U256) -> U256 {
    let percent = U256::from(MIN_ACCEPTED_PERCENT);
    let hundred = U256::from(100u64);
    (desired / hundred) * percent + (desired % hundred) * percent / hundred
}

/// Liquidity orchestrator for one token and one signer.
#[derive(Debug, Clone)]
pub struct LiquidityOrchestrator {
    ctx: TradeContext,
    state: Arc<RwLock<LiquidityState>>,
}

impl LiquidityOrchestrator {
    pub fn new(ctx: TradeContext) -> Self {
        Self {
            ctx,
            state: Arc::new(RwLock::new(LiquidityState::default())),
        }
    }

    pub fn context(&self) -> &TradeContext {
        &self.ctx
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LiquidityState {
        self.state.read().clone()
    }

    // region:    --- Inputs

    pub fn set_token_amount(&self, amount: impl Into<String>) {
        self.state.write().token_amount = amount.into();
    }

    pub fn set_base_amount(&self, amount: impl Into<String>) {
        self.state.write().base_amount = amount.into();
    }

    /// Copy the token balance into the token amount field.
    pub fn set_max_token(&self) {
        let mut state = self.state.write();
        if let Some(balances) = state.balances {
            state.token_amount = balances.token_display(self.ctx.decimals);
        }
    }

    /// Copy the native balance into the base amount field.
    pub fn set_max_base(&self) {
        let mut state = self.state.write();
        if let Some(balances) = state.balances {
            state.base_amount = balances.base_display();
        }
    }

    pub fn can_add_liquidity(&self) -> bool {
        let state = self.state.read();
        state.pair_exists && state.approved && !state.adding_liquidity
    }

    // endregion: --- Inputs

    // region:    --- Checks

    /// Run the three mount-time checks in order, each isolated from the others.
    pub async fn initialize(&self) {
        info!(token = %self.ctx.token_address(), account = %self.ctx.account, "Initializing liquidity view");
        self.check_pair_exists().await;
        self.refresh_balances().await;
        self.check_allowance().await;
    }

    /// Query the factory for the (token, WETH) pair. The zero address means absent.
    pub async fn check_pair_exists(&self) {
        self.state.write().checking_pair = true;

        let token = self.ctx.token_address();
        let result = self.ctx.factory.get_pair(token, self.ctx.wrapped_native).await;

        let mut state = self.state.write();
        state.checking_pair = false;
        match result {
            Ok(pair) => {
                debug!(token = %token, pair = ?pair, "Pair lookup finished");
                state.pair_exists = pair.is_some();
            }
            Err(err) => warn!(token = %token, error = %err, "Pair existence check failed"),
        }
    }

    pub async fn refresh_balances(&self) {
        match self.ctx.balances().await {
            Ok(balances) => self.state.write().balances = Some(balances),
            Err(err) => warn!(account = %self.ctx.account, error = %err, "Balance refresh failed"),
        }
    }

    /// Any positive router allowance counts as approved.
    pub async fn check_allowance(&self) {
        self.state.write().checking_approval = true;
        let result = self.ctx.has_allowance().await;

        let mut state = self.state.write();
        state.checking_approval = false;
        match result {
            Ok(approved) => state.approved = approved,
            Err(err) => warn!(token = %self.ctx.token_address(), error = %err, "Allowance check failed"),
        }
    }

    // endregion: --- Checks

    // region:    --- Transactions

    pub async fn create_pair(&self) {
        let Some(_busy) = BusyGuard::acquire(&self.state, creating_pair) else {
            debug!("Pair creation already in flight");
            return;
        };
        self.clear_messages();

        let token = self.ctx.token_address();
        let result = self
            .ctx
            .confirm(
                self.ctx
                    .factory
                    .create_pair(token, self.ctx.wrapped_native, self.ctx.gas(TxKind::CreatePair))
                    .await,
            )
            .await;

        let outcome = match result {
            Ok(receipt) => Ok(Some(receipt)),
            Err(err) if err.is_pair_exists() => Ok(None),
            // A revert mined on-chain carries no reason; the pair may still be registered
            Err(AppError::ContractRevert(reason)) => self.registered_after_revert(reason).await,
            Err(err) => Err(err),
        };

        let mut state = self.state.write();
        match outcome {
            Ok(Some(receipt)) => {
                info!(token = %token, tx_hash = %receipt.transaction_hash, "Pair created");
                state.pair_exists = true;
                state.last_tx_hash = Some(hex::encode_prefixed(receipt.transaction_hash));
            }
            Ok(None) => {
                info!(token = %token, "Pair already exists");
                state.pair_exists = true;
                state.notice = Some(PAIR_EXISTS_NOTICE.to_string());
            }
            Err(err) => {
                error!(token = %token, error = %err, "Pair creation failed");
                state.error_message = Some(format!("{CREATE_PAIR_FAILED}: {}", err.user_message()));
            }
        }
    }

    /// After a reverted `createPair`, `Ok(None)` if the factory now reports the pair.
    async fn registered_after_revert(&self, reason: String) -> Result<Option<Receipt>> {
        let token = self.ctx.token_address();
        match self.ctx.factory.get_pair(token, self.ctx.wrapped_native).await {
            Ok(Some(pair)) => {
                debug!(token = %token, pair = %pair, "Pair registered despite revert");
                Ok(None)
            }
            Ok(None) => Err(AppError::ContractRevert(reason)),
            Err(err) => {
                warn!(token = %token, error = %err, "Pair lookup after revert failed");
                Err(AppError::ContractRevert(reason))
            }
        }
    }

    /// Approve the router for the maximum allowance.
    pub async fn approve(&self) {
        let Some(_busy) = BusyGuard::acquire(&self.state, approving) else {
            debug!("Approval already in flight");
            return;
        };
        self.clear_messages();

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
                info!(token = %self.ctx.token_address(), spender = %router, tx_hash = %receipt.transaction_hash, "Router approved");
                state.approved = true;
                state.last_tx_hash = Some(hex::encode_prefixed(receipt.transaction_hash));
            }
            Err(err) => {
                error!(token = %self.ctx.token_address(), error = %err, "Approval failed");
                state.error_message = Some(if err.is_timeout() {
                    APPROVAL_TIMEOUT.to_string()
                } else {
                    format!("{APPROVAL_FAILED}: {}", err.user_message())
                });
            }
        }
    }

    pub async fn add_liquidity(&self) {
        let (token_amount, base_amount) = {
            let state = self.state.read();
            (state.token_amount.clone(), state.base_amount.clone())
        };
        let amounts = match self.parse_amounts(&token_amount, &base_amount) {
            Ok(amounts) => amounts,
            Err(err) => {
                self.state.write().error_message = Some(err.user_message());
                return;
            }
        };

        let Some(_busy) = BusyGuard::acquire(&self.state, adding_liquidity) else {
            debug!("Add liquidity already in flight");
            return;
        };
        self.clear_messages();

        let (token_desired, base_desired) = amounts;
        let params = AddLiquidityEth {
            token: self.ctx.token_address(),
            amount_token_desired: token_desired,
            amount_token_min: minimum_accepted(token_desired),
            amount_eth_min: minimum_accepted(base_desired),
            to: self.ctx.account,
            deadline: self.ctx.deadline(),
            value: base_desired,
        };

        let result = self
            .ctx
            .confirm(
                self.ctx
                    .router
                    .add_liquidity_eth(&params, self.ctx.gas(TxKind::AddLiquidity))
                    .await,
            )
            .await;

        match result {
            Ok(receipt) => {
                info!(
                    token = %params.token,
                    amount_token = %params.amount_token_desired,
                    amount_eth = %params.value,
                    tx_hash = %receipt.transaction_hash,
                    "Liquidity added"
                );
                {
                    let mut state = self.state.write();
                    state.token_amount.clear();
                    state.base_amount.clear();
                    state.pair_exists = true;
                    state.last_tx_hash = Some(hex::encode_prefixed(receipt.transaction_hash));
                }
                self.refresh_balances().await;
            }
            Err(err) => {
                error!(token = %params.token, error = %err, "Add liquidity failed");
                self.state.write().error_message =
                    Some(format!("{ADD_LIQUIDITY_FAILED}: {}", err.user_message()));
            }
        }
    }

    // endregion: --- Transactions

    fn parse_amounts(&self, token_amount: &str, base_amount: &str) -> Result<(U256, U256)> {
        if token_amount.trim().is_empty() || base_amount.trim().is_empty() {
            return Err(AppError::Validation(
                "Enter both the token and ETH amounts".to_string(),
            ));
        }
        let token = parse_amount(token_amount, self.ctx.decimals)?;
        let base = parse_amount(base_amount, NATIVE_DECIMALS)?;
        if token.is_zero() || base.is_zero() {
            return Err(AppError::Validation("Amounts must be greater than zero".to_string()));
        }
        Ok((token, base))
    }

    fn clear_messages(&self) {
        let mut state = self.state.write();
        state.error_message = None;
        state.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimum_accepted_exact_values() {
        assert_eq!(minimum_accepted(U256::ZERO), U256::ZERO);
        assert_eq!(minimum_accepted(U256::from(1u64)), U256::ZERO);
        assert_eq!(minimum_accepted(U256::from(100u64)), U256::from(95u64));
        assert_eq!(minimum_accepted(U256::from(101u64)), U256::from(95u64));
        assert!(minimum_accepted(U256::MAX) < U256::MAX);
    }

    proptest! {
        #[test]
        fn prop_minimum_is_floor_of_95_percent(desired in any::<u128>()) {
            let desired = U256::from(desired);
            let expected = desired * U256::from(95u64) / U256::from(100u64);
            prop_assert_eq!(minimum_accepted(desired), expected);
        }
    }
}
