//! # Signing Capability
//!
//! A [`Signer`] is an authorized account on an injected provider. It submits
//! transactions through `eth_sendTransaction` (the wallet signs), performs read-only
//! `eth_call`s, and hands back a [`PendingTransaction`] that can be awaited until the
//! receipt has the requested number of confirmations.
//!
//! ```rust,ignore
//! let pending = signer.send_transaction(TxRequest::call(token, calldata)).await?;
//! let receipt = pending.wait(&ConfirmationOptions::default()).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::error::{EvmError, Result};
use crate::provider::Eip1193Provider;

/// Transaction handed to the wallet for signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxRequest {
    /// `None` for contract creation
    pub to: Option<Address>,
    pub data: Bytes,
    /// Native value attached to the call
    pub value: U256,
    /// Fixed gas ceiling; `None` lets the wallet estimate
    pub gas: Option<u64>,
}

impl TxRequest {
    /// A call to an existing contract.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to: Some(to),
            data: data.into(),
            ..Default::default()
        }
    }

    /// A contract creation carrying init code.
    pub fn create(init_code: impl Into<Bytes>) -> Self {
        Self {
            to: None,
            data: init_code.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas(mut self, gas: Option<u64>) -> Self {
        self.gas = gas;
        self
    }

    fn to_json(&self, from: Address) -> Value {
        let mut tx = Map::new();
        tx.insert("from".into(), json!(from));
        if let Some(to) = self.to {
            tx.insert("to".into(), json!(to));
        }
        tx.insert("data".into(), json!(self.data));
        if !self.value.is_zero() {
            tx.insert("value".into(), json!(self.value));
        }
        if let Some(gas) = self.gas {
            tx.insert("gas".into(), json!(format!("{gas:#x}")));
        }
        Value::Object(tx)
    }
}

/// Subset of `eth_getTransactionReceipt` the launchpad relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` success, `0x0` reverted
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub gas_used: Option<U256>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status == U64::from(1))
    }

    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// How long and how often to poll for a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationOptions {
    pub confirmations: u64,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ConfirmationOptions {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Duration::from_secs(120),
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// A submitted transaction that has not been confirmed yet.
#[derive(Clone)]
pub struct PendingTransaction {
    provider: Arc<dyn Eip1193Provider>,
    hash: B256,
}

impl std::fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransaction").field("hash", &self.hash).finish()
    }
}

impl PendingTransaction {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Poll until the receipt has `confirmations` blocks on top of it.
    ///
    /// A receipt with status 0 yields [`EvmError::Reverted`]; running out of time
    /// yields [`EvmError::Timeout`].
    pub async fn wait(&self, options: &ConfirmationOptions) -> Result<Receipt> {
        let hash = self.hash;
        match tokio::time::timeout(options.timeout, self.poll_receipt(options)).await {
            Ok(result) => result,
            Err(_) => Err(EvmError::Timeout {
                hash,
                timeout_secs: options.timeout.as_secs(),
            }),
        }
    }

    async fn poll_receipt(&self, options: &ConfirmationOptions) -> Result<Receipt> {
        loop {
            let raw = self
                .provider
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await?;

            if !raw.is_null() {
                let receipt: Receipt = serde_json::from_value(raw)?;
                if !receipt.succeeded() {
                    return Err(EvmError::Reverted { hash: self.hash });
                }
                if self.has_confirmations(&receipt, options.confirmations).await? {
                    debug!(tx_hash = %self.hash, block = ?receipt.block(), "receipt confirmed");
                    return Ok(receipt);
                }
            }

            tokio::time::sleep(options.poll_interval).await;
        }
    }

    async fn has_confirmations(&self, receipt: &Receipt, confirmations: u64) -> Result<bool> {
        if confirmations <= 1 {
            return Ok(true);
        }
        let Some(mined_at) = receipt.block() else {
            return Ok(false);
        };
        let head = block_number(self.provider.as_ref()).await?;
        Ok(head.saturating_sub(mined_at) + 1 >= confirmations)
    }
}

/// An authorized account able to submit transactions through its provider.
#[derive(Clone)]
pub struct Signer {
    provider: Arc<dyn Eip1193Provider>,
    address: Address,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("address", &self.address).finish()
    }
}

impl Signer {
    pub fn new(provider: Arc<dyn Eip1193Provider>, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &Arc<dyn Eip1193Provider> {
        &self.provider
    }

    /// Hand a transaction to the wallet and return as soon as it has a hash.
    pub async fn send_transaction(&self, tx: TxRequest) -> Result<PendingTransaction> {
        let raw = self
            .provider
            .request("eth_sendTransaction", json!([tx.to_json(self.address)]))
            .await?;
        let hash: B256 = serde_json::from_value(raw)?;

        info!(
            tx_hash = %hash,
            from = %self.address,
            to = ?tx.to,
            value = %tx.value,
            gas = ?tx.gas,
            "transaction submitted"
        );

        Ok(PendingTransaction {
            provider: Arc::clone(&self.provider),
            hash,
        })
    }

    /// ABI-encode `call`, submit it to `to` and return the pending transaction.
    pub async fn send_call<C: SolCall>(
        &self,
        to: Address,
        call: &C,
        value: U256,
        gas: Option<u64>,
    ) -> Result<PendingTransaction> {
        let tx = TxRequest::call(to, call.abi_encode())
            .with_value(value)
            .with_gas(gas);
        self.send_transaction(tx).await
    }

    /// Read-only `eth_call` against the latest block, decoded with the call's return type.
    pub async fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return> {
        let request = json!({
            "from": self.address,
            "to": to,
            "data": Bytes::from(call.abi_encode()),
        });
        let raw = self.provider.request("eth_call", json!([request, "latest"])).await?;
        let data: Bytes = serde_json::from_value(raw)?;
        Ok(C::abi_decode_returns(&data)?)
    }

    /// Native balance of `who`.
    pub async fn balance_of(&self, who: Address) -> Result<U256> {
        let raw = self
            .provider
            .request("eth_getBalance", json!([who, "latest"]))
            .await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Native balance of this account.
    pub async fn balance(&self) -> Result<U256> {
        self.balance_of(self.address).await
    }
}

/// Read the active chain id.
pub async fn chain_id(provider: &dyn Eip1193Provider) -> Result<u64> {
    let raw = provider.request("eth_chainId", json!([])).await?;
    let id: U64 = serde_json::from_value(raw)?;
    Ok(id.to::<u64>())
}

/// Read the latest block number.
pub async fn block_number(provider: &dyn Eip1193Provider) -> Result<u64> {
    let raw = provider.request("eth_blockNumber", json!([])).await?;
    let number: U64 = serde_json::from_value(raw)?;
    Ok(number.to::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_tx_request_json_omits_empty_fields() {
        let from = address!("0x1111111111111111111111111111111111111111");
        let to = address!("0x2222222222222222222222222222222222222222");

        let tx = TxRequest::call(to, vec![0xab, 0xcd]).to_json(from);
        assert_eq!(tx["data"], "0xabcd");
        assert!(tx.get("value").is_none());
        assert!(tx.get("gas").is_none());

        let tx = TxRequest::create(vec![0x60])
            .with_value(U256::from(16))
            .with_gas(Some(100_000))
            .to_json(from);
        assert!(tx.get("to").is_none());
        assert_eq!(tx["value"], "0x10");
        assert_eq!(tx["gas"], "0x186a0");
    }

    #[test]
    fn test_receipt_status() {
        let receipt: Receipt = serde_json::from_value(json!({
            "transactionHash": B256::repeat_byte(1),
            "blockNumber": "0x10",
            "status": "0x0",
            "contractAddress": null
        }))
        .unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.block(), Some(16));
        assert_eq!(receipt.contract_address, None);
    }
}
