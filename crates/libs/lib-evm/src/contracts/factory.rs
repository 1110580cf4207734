//! V2 factory binding.

use alloy_primitives::{Address, U256};

use crate::abi::IUniswapV2Factory;
use crate::error::Result;
use crate::signer::{PendingTransaction, Signer};

/// Pair factory bound to a signer.
#[derive(Debug, Clone)]
pub struct Factory {
    address: Address,
    signer: Signer,
}

impl Factory {
    pub fn new(address: Address, signer: Signer) -> Self {
        Self { address, signer }
    }

    /// Registered pair for `(token_a, token_b)`, `None` when the factory returns the
    /// zero address.
    pub async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        let pair = self
            .signer
            .call(
                self.address,
                &IUniswapV2Factory::getPairCall {
                    tokenA: token_a,
                    tokenB: token_b,
                },
            )
            .await?;
        Ok((pair != Address::ZERO).then_some(pair))
    }

    pub async fn create_pair(
        &self,
        token_a: Address,
        token_b: Address,
        gas: Option<u64>,
    ) -> Result<PendingTransaction> {
        let call = IUniswapV2Factory::createPairCall {
            tokenA: token_a,
            tokenB: token_b,
        };
        self.signer.send_call(self.address, &call, U256::ZERO, gas).await
    }
}
