//! ERC-20 token binding.

use alloy_primitives::{Address, U256};

use crate::abi::IERC20;
use crate::error::Result;
use crate::signer::{PendingTransaction, Signer};

/// An ERC-20 token bound to a signer.
#[derive(Debug, Clone)]
pub struct Erc20 {
    address: Address,
    signer: Signer,
}

impl Erc20 {
    pub fn new(address: Address, signer: Signer) -> Self {
        Self { address, signer }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn name(&self) -> Result<String> {
        self.signer.call(self.address, &IERC20::nameCall {}).await
    }

    pub async fn symbol(&self) -> Result<String> {
        self.signer.call(self.address, &IERC20::symbolCall {}).await
    }

    pub async fn decimals(&self) -> Result<u8> {
        self.signer.call(self.address, &IERC20::decimalsCall {}).await
    }

    pub async fn total_supply(&self) -> Result<U256> {
        self.signer.call(self.address, &IERC20::totalSupplyCall {}).await
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.signer
            .call(self.address, &IERC20::balanceOfCall { owner })
            .await
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        self.signer
            .call(self.address, &IERC20::allowanceCall { owner, spender })
            .await
    }

    /// Submit `approve(spender, amount)` with an optional fixed gas ceiling.
    pub async fn approve(
        &self,
        spender: Address,
        amount: U256,
        gas: Option<u64>,
    ) -> Result<PendingTransaction> {
        self.signer
            .send_call(self.address, &IERC20::approveCall { spender, amount }, U256::ZERO, gas)
            .await
    }
}
