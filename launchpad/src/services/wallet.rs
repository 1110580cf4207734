//! # Wallet Session Service
//!
//! Obtains an authorized account and signing capability from the injected provider and
//! makes sure the wallet is on the configured chain.
//!
//! ## Connect Flow
//!
//! ```text
//! eth_requestAccounts ──► eth_chainId ──► matches? ──yes──► WalletSession
//!                                            │
//!                                            no
//!                                            ▼
//!                         wallet_switchEthereumChain ──4902──► wallet_addEthereumChain
//!                                            │
//!                                            ▼
//!                                 eth_chainId (one re-check)
//! ```
//!
//! The manager never holds a global provider: one is injected at construction and may
//! be absent, in which case [`WalletSessionManager::connect`] fails with
//! [`AppError::ProviderMissing`] and is not retried.

use std::sync::Arc;

use lib_core::Config;
use lib_evm::alloy_primitives::Address;
use lib_evm::provider::ProviderEvent;
use lib_evm::signer::chain_id;
use lib_evm::{AddChainParams, Eip1193Provider, NativeCurrencyParams, Signer};
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::core::error::{AppError, Result};

/// An authorized account on the expected chain.
#[derive(Debug, Clone)]
pub struct WalletSession {
    pub address: Address,
    pub signer: Signer,
    pub chain_id: u64,
}

impl WalletSession {
    /// `0x1234...abcd`
    pub fn display_address(&self) -> String {
        shared::utils::display_account(&self.address.to_checksum(None))
    }
}

/// Connects to the injected provider and keeps the wallet on the configured network.
#[derive(Clone)]
pub struct WalletSessionManager {
    provider: Option<Arc<dyn Eip1193Provider>>,
    config: Arc<Config>,
}

impl WalletSessionManager {
    pub fn new(provider: Option<Arc<dyn Eip1193Provider>>, config: Arc<Config>) -> Self {
        Self { provider, config }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<&Arc<dyn Eip1193Provider>> {
        self.provider.as_ref()
    }

    /// Request account access and return a session on the expected chain.
    pub async fn connect(&self) -> Result<WalletSession> {
        let provider = self.provider.clone().ok_or(AppError::ProviderMissing)?;

        let raw = provider.request("eth_requestAccounts", json!([])).await?;
        let accounts: Vec<Address> = serde_json::from_value(raw)?;
        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| AppError::Rpc("Wallet returned no accounts".to_string()))?;

        let chain_id = self.ensure_network(provider.as_ref()).await?;

        info!(account = %address, chain_id, "Wallet connected");

        Ok(WalletSession {
            address,
            signer: Signer::new(provider, address),
            chain_id,
        })
    }

    /// Switch (or add, then switch) to the configured chain if the wallet is elsewhere.
    async fn ensure_network(&self, provider: &dyn Eip1193Provider) -> Result<u64> {
        let expected = self.config.network.chain_id;
        let current = chain_id(provider).await?;
        if current == expected {
            return Ok(current);
        }

        info!(current, expected, "Wallet on wrong network, requesting switch");

        if let Err(err) = self.switch_network(provider).await {
            warn!(error = %err, current, expected, "Network switch failed");
            return Err(match err {
                AppError::UserRejected => AppError::UserRejected,
                _ => AppError::NetworkMismatch {
                    expected,
                    actual: current,
                },
            });
        }

        let actual = chain_id(provider).await?;
        if actual != expected {
            return Err(AppError::NetworkMismatch { expected, actual });
        }
        Ok(actual)
    }

    async fn switch_network(&self, provider: &dyn Eip1193Provider) -> Result<()> {
        let params = json!([{ "chainId": self.config.network.chain_id_hex() }]);
        match provider.request("wallet_switchEthereumChain", params).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_unrecognized_chain() => {
                info!(chain_id = self.config.network.chain_id, "Chain unknown to wallet, adding it");
                let descriptor = serde_json::to_value(self.add_chain_params())?;
                provider
                    .request("wallet_addEthereumChain", json!([descriptor]))
                    .await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Full network descriptor sent with `wallet_addEthereumChain`.
    pub fn add_chain_params(&self) -> AddChainParams {
        let network = &self.config.network;
        AddChainParams {
            chain_id: network.chain_id_hex(),
            chain_name: network.chain_name.clone(),
            native_currency: NativeCurrencyParams {
                name: network.native_currency.name.clone(),
                symbol: network.native_currency.symbol.clone(),
                decimals: network.native_currency.decimals,
            },
            rpc_urls: vec![network.rpc_url.clone()],
            block_explorer_urls: vec![network.explorer_url.clone()],
        }
    }

    /// Account and chain change notifications, `None` without a provider.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ProviderEvent>> {
        self.provider.as_ref().map(|provider| provider.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_provider() {
        let manager = WalletSessionManager::new(None, Arc::new(Config::default()));
        assert!(!manager.has_provider());
        assert_eq!(manager.connect().await.unwrap_err(), AppError::ProviderMissing);
        assert!(manager.subscribe().is_none());
    }

    #[test]
    fn test_add_chain_params_carry_full_descriptor() {
        let manager = WalletSessionManager::new(None, Arc::new(Config::default()));
        let params = manager.add_chain_params();
        assert_eq!(params.chain_id, "0x66eee");
        assert_eq!(params.chain_name, "Arbitrum Sepolia");
        assert_eq!(params.native_currency.symbol, "ETH");
        assert_eq!(params.native_currency.decimals, 18);
        assert_eq!(params.rpc_urls, vec!["https://sepolia-rollup.arbitrum.io/rpc"]);
        assert_eq!(params.block_explorer_urls, vec!["https://sepolia.arbiscan.io"]);
    }
}
