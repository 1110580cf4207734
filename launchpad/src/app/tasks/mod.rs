//! # Async Tasks
//!
//! Orchestrators for the on-chain flows and the plumbing they share.
//!
//! - [`wallet`]: connect task and provider event forwarding
//! - [`deploy`]: token contract creation
//! - [`liquidity`]: pair existence, pair creation, approval, add liquidity
//! - [`swap`]: directional swaps with periodic balance refresh
//!
//! Every state-changing operation runs under a [`BusyGuard`]: a second call while one is
//! in flight returns without submitting anything, and the flag clears when the guard
//! drops, whatever the outcome.

pub mod deploy;
pub mod liquidity;
pub mod swap;
pub mod wallet;

use std::str::FromStr;
use std::sync::Arc;

use lib_core::{Config, TxKind};
use lib_evm::alloy_primitives::{Address, U256};
use lib_evm::{ConfirmationOptions, Erc20, Factory, PendingTransaction, Receipt, Router, Signer};
use parking_lot::RwLock;
use shared::dto::token::TokenRecord;

use crate::app::state::BalancePair;
use crate::core::error::{AppError, Result};

/// Waiting policy for receipts, from configuration.
pub fn confirmation_options(config: &Config) -> ConfirmationOptions {
    ConfirmationOptions {
        confirmations: config.confirmations,
        timeout: config.receipt_timeout,
        poll_interval: config.receipt_poll_interval,
    }
}

/// Contracts and account one trading orchestrator works against.
#[derive(Debug, Clone)]
pub struct TradeContext {
    pub account: Address,
    pub signer: Signer,
    pub token: Erc20,
    pub decimals: u8,
    pub factory: Factory,
    pub router: Router,
    pub wrapped_native: Address,
    pub config: Arc<Config>,
}

impl TradeContext {
    pub fn new(signer: Signer, record: &TokenRecord, config: Arc<Config>) -> Result<Self> {
        let token = Address::from_str(&record.address).map_err(|e| {
            AppError::Validation(format!("Invalid token address {}: {e}", record.address))
        })?;
        let contracts = &config.contracts;

        Ok(Self {
            account: signer.address(),
            token: Erc20::new(token, signer.clone()),
            decimals: record.decimals,
            factory: Factory::new(contracts.factory, signer.clone()),
            router: Router::new(contracts.router, signer.clone()),
            wrapped_native: contracts.wrapped_native,
            signer,
            config,
        })
    }

    pub fn token_address(&self) -> Address {
        self.token.address()
    }

    pub fn gas(&self, kind: TxKind) -> Option<u64> {
        self.config.gas.ceiling(kind)
    }

    pub fn confirmation_options(&self) -> ConfirmationOptions {
        confirmation_options(&self.config)
    }

    /// Router deadline `deadline_minutes` from now.
    pub fn deadline(&self) -> U256 {
        U256::from(lib_utils::time::get_deadline_timestamp(self.config.deadline_minutes))
    }

    /// Wait for a submitted transaction to confirm.
    pub async fn confirm(&self, submitted: lib_evm::Result<PendingTransaction>) -> Result<Receipt> {
        let pending = submitted?;
        Ok(pending.wait(&self.confirmation_options()).await?)
    }

    pub async fn balances(&self) -> Result<BalancePair> {
        let token = self.token.balance_of(self.account).await?;
        let base = self.signer.balance().await?;
        Ok(BalancePair::new(base, token))
    }

    /// True when the router may spend any of the account's tokens.
    pub async fn has_allowance(&self) -> Result<bool> {
        let allowance = self
            .token
            .allowance(self.account, self.router.address())
            .await?;
        Ok(!allowance.is_zero())
    }
}

/// Per-operation in-flight flag. Cleared on drop.
pub(crate) struct BusyGuard<S> {
    state: Arc<RwLock<S>>,
    flag: fn(&mut S) -> &mut bool,
}

impl<S> BusyGuard<S> {
    /// Set the flag and return a guard, or `None` if it was already set.
    pub(crate) fn acquire(state: &Arc<RwLock<S>>, flag: fn(&mut S) -> &mut bool) -> Option<Self> {
        let mut guard = state.write();
        let busy = flag(&mut *guard);
        if *busy {
            return None;
        }
        *busy = true;
        drop(guard);

        Some(Self {
            state: Arc::clone(state),
            flag,
        })
    }
}

impl<S> Drop for BusyGuard<S> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        *(self.flag)(&mut *state) = false;
    }
}
