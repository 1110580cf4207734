//! # Flow Test Helpers
//!
//! Every flow test runs the real [`App`] against an in-memory [`MockChain`] using the
//! default network and contract addresses, with short confirmation and polling timings.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use launchpad::app::App;
use launchpad::utils::validation::TokenForm;
use lib_core::Config;
use lib_evm::alloy_primitives::{Address, U256};
use lib_evm::mock::MockChain;
use lib_evm::Eip1193Provider;
use shared::dto::token::{DeploymentStatus, TokenRecord};

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create test config
pub fn test_config() -> Config {
    Config {
        balance_poll_interval: Duration::from_millis(50),
        receipt_timeout: Duration::from_millis(300),
        receipt_poll_interval: Duration::from_millis(10),
        provider_event_poll_interval: Duration::from_millis(20),
        ..Config::default()
    }
}

pub struct Harness {
    pub chain: Arc<MockChain>,
    pub app: App,
    pub config: Arc<Config>,
}

pub fn harness() -> Harness {
    let config = Arc::new(test_config());
    let chain = Arc::new(MockChain::new(
        config.network.chain_id,
        config.contracts.router,
        config.contracts.factory,
        config.contracts.wrapped_native,
    ));
    let provider: Arc<dyn Eip1193Provider> = chain.clone();
    let app = App::new(Some(provider), Arc::clone(&config)).with_artifact(MockChain::token_artifact());

    Harness { chain, app, config }
}

/// Handle events until one of `kind` has been handled.
pub async fn wait_for(app: &mut App, kind: &str) {
    let result = tokio::time::timeout(EVENT_TIMEOUT, async {
        loop {
            match app.next_event().await {
                Some(handled) if handled == kind => return,
                Some(_) => continue,
                None => panic!("event channel closed"),
            }
        }
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for {kind}");
}

/// Poll `condition` until it holds, yielding to background tasks in between.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + EVENT_TIMEOUT;
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition never became true");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

pub async fn connected() -> Harness {
    let mut h = harness();
    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;
    assert!(h.app.session().is_some(), "wallet should be connected");
    h
}

/// Connected harness with a deployed 1,000,000 TST (18 decimals) token.
pub async fn deployed() -> (Harness, TokenRecord) {
    let mut h = connected().await;
    h.app.set_form(TokenForm::new("Test Token", "TST", "1000000", "18"));
    h.app.deploy_token().expect("deploy should start");
    wait_for(&mut h.app, "DeploymentFinished").await;

    let DeploymentStatus::Success(record) = h.app.deployment_status() else {
        panic!("deployment failed: {:?}", h.app.deployment_status());
    };

    let liquidity = h.app.liquidity().expect("trading interface");
    eventually(|| liquidity.state().balances.is_some()).await;
    (h, record)
}

pub fn token_address(record: &TokenRecord) -> Address {
    record.address.parse().expect("checksummed address")
}

/// `amount * 10^18`
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18u64))
}
