//! # Token Deployment
//!
//! Submits the token contract-creation transaction and reduces the confirmed receipt into
//! a [`TokenRecord`]. Status bookkeeping (`Pending` before submission, `Success`/`Error`
//! after) belongs to the caller; see `App::deploy_token`.

use std::sync::Arc;

use lib_core::{Config, TxKind};
use lib_evm::alloy_primitives::{hex, Address};
use lib_evm::{EvmError, Signer, TokenArtifact, TokenConstructorArgs, TxRequest};
use parking_lot::RwLock;
use shared::dto::token::TokenRecord;
use tracing::{debug, info};

use crate::app::tasks::confirmation_options;
use crate::core::error::Result;
use crate::utils::validation::TokenParams;

/// Deploys token contracts from the compiled artifact.
#[derive(Clone)]
pub struct TokenDeployer {
    config: Arc<Config>,
    artifact: Arc<RwLock<Option<TokenArtifact>>>,
}

impl TokenDeployer {
    /// Deployer that reads the artifact from `config.token_artifact_path` on first use.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            artifact: Arc::new(RwLock::new(None)),
        }
    }

    /// Deployer with an already loaded artifact.
    pub fn with_artifact(config: Arc<Config>, artifact: TokenArtifact) -> Self {
        Self {
            config,
            artifact: Arc::new(RwLock::new(Some(artifact))),
        }
    }

    fn artifact(&self) -> Result<TokenArtifact> {
        if let Some(artifact) = self.artifact.read().as_ref() {
            return Ok(artifact.clone());
        }

        let path = &self.config.token_artifact_path;
        debug!(path = %path.display(), "Loading token artifact");
        let artifact = TokenArtifact::load(path)?;
        *self.artifact.write() = Some(artifact.clone());
        Ok(artifact)
    }

    /// Create the token, wait for confirmation and return its record.
    ///
    /// The full supply is minted to `recipient`.
    pub async fn deploy(
        &self,
        signer: &Signer,
        params: &TokenParams,
        recipient: Address,
    ) -> Result<TokenRecord> {
        let artifact = self.artifact()?;
        let args = TokenConstructorArgs {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            initial_supply: params.supply,
            decimals: params.decimals,
            recipient,
        };

        let tx = TxRequest::create(artifact.deploy_data(&args))
            .with_gas(self.config.gas.ceiling(TxKind::Deploy));
        let pending = signer.send_transaction(tx).await?;

        info!(
            tx_hash = %pending.hash(),
            name = %params.name,
            symbol = %params.symbol,
            supply = %params.supply_text,
            decimals = params.decimals,
            "Token deployment submitted"
        );

        let receipt = pending.wait(&confirmation_options(&self.config)).await?;
        let address = receipt
            .contract_address
            .ok_or(EvmError::MissingContractAddress {
                hash: receipt.transaction_hash,
            })?;

        let record = TokenRecord {
            address: address.to_checksum(None),
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            supply: params.supply_text.clone(),
            decimals: params.decimals,
            deployment_tx_hash: hex::encode_prefixed(receipt.transaction_hash),
        };

        info!(
            token = %record.address,
            tx_hash = %record.deployment_tx_hash,
            block = ?receipt.block(),
            "Token deployed"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_evm::alloy_primitives::U256;
    use lib_evm::mock::{MockChain, DEFAULT_ACCOUNT};
    use lib_evm::ProviderError;

    use crate::core::error::AppError;
    use crate::utils::validation::TokenForm;

    fn setup() -> (Arc<MockChain>, TokenDeployer, Signer) {
        let config = Arc::new(Config::default());
        let contracts = &config.contracts;
        let chain = Arc::new(MockChain::new(
            config.network.chain_id,
            contracts.router,
            contracts.factory,
            contracts.wrapped_native,
        ));
        let deployer = TokenDeployer::with_artifact(Arc::clone(&config), MockChain::token_artifact());
        let signer = Signer::new(chain.clone(), DEFAULT_ACCOUNT);
        (chain, deployer, signer)
    }

    #[tokio::test]
    async fn test_deploy_echoes_inputs() {
        let (chain, deployer, signer) = setup();
        let params = TokenForm::new("Test", "TST", "1000", "18").validate().unwrap();

        let record = deployer.deploy(&signer, &params, DEFAULT_ACCOUNT).await.unwrap();

        assert_eq!(record.name, "Test");
        assert_eq!(record.symbol, "TST");
        assert_eq!(record.supply, "1000");
        assert_eq!(record.decimals, 18);
        assert!(record.address.starts_with("0x"));
        assert_eq!(record.deployment_tx_hash.len(), 66);

        let token: Address = record.address.parse().unwrap();
        assert_eq!(
            chain.token_balance(token, DEFAULT_ACCOUNT),
            U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(chain.sent_transactions()[0].to, None);
    }

    #[tokio::test]
    async fn test_rejected_signature_yields_error() {
        let (chain, deployer, signer) = setup();
        chain.fail_next("eth_sendTransaction", ProviderError::user_rejected());
        let params = TokenForm::new("Test", "TST", "1000", "18").validate().unwrap();

        let err = deployer.deploy(&signer, &params, DEFAULT_ACCOUNT).await.unwrap_err();
        assert_eq!(err, AppError::UserRejected);
        assert!(chain.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_missing_artifact_is_config_error() {
        let mut config = Config::default();
        config.token_artifact_path = "does/not/exist.json".into();
        let deployer = TokenDeployer::new(Arc::new(config));
        let (_, _, signer) = setup();
        let params = TokenForm::new("Test", "TST", "1", "0").validate().unwrap();

        let err = deployer.deploy(&signer, &params, DEFAULT_ACCOUNT).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
