//! V2 router binding (native-asset entry points).

use alloy_primitives::{Address, U256};

use crate::abi::IUniswapV2Router02;
use crate::error::Result;
use crate::signer::{PendingTransaction, Signer};

/// Arguments of `addLiquidityETH`; `value` is the native amount attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityEth {
    pub token: Address,
    pub amount_token_desired: U256,
    pub amount_token_min: U256,
    pub amount_eth_min: U256,
    pub to: Address,
    pub deadline: U256,
    pub value: U256,
}

/// Swap router bound to a signer.
#[derive(Debug, Clone)]
pub struct Router {
    address: Address,
    signer: Signer,
}

impl Router {
    pub fn new(address: Address, signer: Signer) -> Self {
        Self { address, signer }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn add_liquidity_eth(
        &self,
        params: &AddLiquidityEth,
        gas: Option<u64>,
    ) -> Result<PendingTransaction> {
        let call = IUniswapV2Router02::addLiquidityETHCall {
            token: params.token,
            amountTokenDesired: params.amount_token_desired,
            amountTokenMin: params.amount_token_min,
            amountETHMin: params.amount_eth_min,
            to: params.to,
            deadline: params.deadline,
        };
        self.signer.send_call(self.address, &call, params.value, gas).await
    }

    pub async fn swap_exact_tokens_for_eth(
        &self,
        amount_in: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        to: Address,
        deadline: U256,
        gas: Option<u64>,
    ) -> Result<PendingTransaction> {
        let call = IUniswapV2Router02::swapExactTokensForETHCall {
            amountIn: amount_in,
            amountOutMin: amount_out_min,
            path,
            to,
            deadline,
        };
        self.signer.send_call(self.address, &call, U256::ZERO, gas).await
    }

    /// `value` is the exact native input.
    pub async fn swap_exact_eth_for_tokens(
        &self,
        value: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        to: Address,
        deadline: U256,
        gas: Option<u64>,
    ) -> Result<PendingTransaction> {
        let call = IUniswapV2Router02::swapExactETHForTokensCall {
            amountOutMin: amount_out_min,
            path,
            to,
            deadline,
        };
        self.signer.send_call(self.address, &call, value, gas).await
    }
}
