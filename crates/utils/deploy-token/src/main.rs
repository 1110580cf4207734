//! # Deploy Token Utility
//!
//! Deploys the token contract from the compiled artifact to the first account of the
//! configured node, then reads the metadata back from the chain.
//!
//! ## Usage
//!
//! ```bash
//! RPC_URL=http://127.0.0.1:8545 cargo run --package deploy-token --bin deploy_token
//! ```
//!
//! The program will:
//! 1. Load the artifact from `TOKEN_ARTIFACT_PATH`
//! 2. Pick the first account the node exposes
//! 3. Deploy "Test Token" (TTK) with a supply of 1,000,000 and 18 decimals
//! 4. Print name, symbol, total supply and decimals as read from the contract

use std::sync::Arc;

use anyhow::{bail, Context};
use lib_core::Config;
use lib_evm::alloy_primitives::{Address, U256};
use lib_evm::signer::chain_id;
use lib_evm::units::format_amount;
use lib_evm::{
    ConfirmationOptions, Eip1193Provider, Erc20, HttpProvider, Signer, TokenArtifact,
    TokenConstructorArgs, TxRequest,
};
use serde_json::json;

const NAME: &str = "Test Token";
const SYMBOL: &str = "TTK";
const INITIAL_SUPPLY: u64 = 1_000_000;
const DECIMALS: u8 = 18;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("============================================");
    println!("  Deploy Token Utility");
    println!("============================================");
    println!();

    let config = Config::from_env()?;
    config.validate()?;

    let artifact = TokenArtifact::load(&config.token_artifact_path).with_context(|| {
        format!("loading artifact {}", config.token_artifact_path.display())
    })?;

    println!("Connecting to {}...", config.network.rpc_url);
    let provider = Arc::new(HttpProvider::new(config.network.rpc_url.clone())?);
    let chain = chain_id(provider.as_ref()).await?;
    let accounts: Vec<Address> =
        serde_json::from_value(provider.request("eth_accounts", json!([])).await?)?;
    let Some(&deployer) = accounts.first() else {
        bail!("node exposes no unlocked accounts");
    };
    println!("Chain {chain}, deploying from {deployer}");
    println!();

    let signer = Signer::new(provider, deployer);
    let args = TokenConstructorArgs {
        name: NAME.to_string(),
        symbol: SYMBOL.to_string(),
        initial_supply: U256::from(INITIAL_SUPPLY),
        decimals: DECIMALS,
        recipient: deployer,
    };

    let pending = signer
        .send_transaction(TxRequest::create(artifact.deploy_data(&args)))
        .await?;
    println!("Deployment submitted: {}", pending.hash());

    let receipt = pending
        .wait(&ConfirmationOptions {
            confirmations: config.confirmations,
            timeout: config.receipt_timeout,
            poll_interval: config.receipt_poll_interval,
        })
        .await?;
    let address = receipt
        .contract_address
        .context("receipt carries no contract address")?;
    println!("Token deployed at {}", address.to_checksum(None));
    println!();

    let token = Erc20::new(address, signer);
    let decimals = token.decimals().await?;
    println!("Name:         {}", token.name().await?);
    println!("Symbol:       {}", token.symbol().await?);
    println!("Total supply: {}", format_amount(token.total_supply().await?, decimals)?);
    println!("Decimals:     {decimals}");

    Ok(())
}
