//! # Token Deployment Flow Tests

mod common;

use common::*;
use launchpad::core::error::AppError;
use launchpad::core::messages::{FILL_REQUIRED_FIELDS, USER_REJECTED};
use launchpad::ui::present_deployment;
use launchpad::utils::validation::TokenForm;
use lib_evm::mock::DEFAULT_ACCOUNT;
use lib_evm::ProviderError;
use shared::dto::token::DeploymentStatus;
use shared::dto::trading::TradingTab;

#[tokio::test]
async fn test_deploy_moves_through_pending_to_success() {
    // Arrange
    let mut h = connected().await;
    assert_eq!(h.app.deployment_status(), DeploymentStatus::Idle);
    h.app.set_form(TokenForm::new("Test Token", "TST", "1000000", "18"));

    // Act
    h.app.deploy_token().unwrap();
    assert_eq!(h.app.deployment_status(), DeploymentStatus::Pending);
    wait_for(&mut h.app, "DeploymentFinished").await;

    // Assert
    let DeploymentStatus::Success(record) = h.app.deployment_status() else {
        panic!("expected success, got {:?}", h.app.deployment_status());
    };
    assert_eq!(record.name, "Test Token");
    assert_eq!(record.symbol, "TST");
    assert_eq!(record.supply, "1000000");
    assert_eq!(record.decimals, 18);
    assert_eq!(
        h.chain.token_balance(token_address(&record), DEFAULT_ACCOUNT),
        ether(1_000_000)
    );
    assert_eq!(h.app.active_tab(), Some(TradingTab::Swap));
}

#[tokio::test]
async fn test_deploy_success_renders_explorer_links() {
    let (h, record) = deployed().await;

    let view = present_deployment(&h.app.deployment_status(), &h.config.network.explorer_url).unwrap();

    assert_eq!(view.headline, "Token deployed successfully!");
    assert_eq!(
        view.links[0].1,
        format!("https://sepolia.arbiscan.io/address/{}", record.address)
    );
    assert_eq!(
        view.links[1].1,
        format!("https://sepolia.arbiscan.io/tx/{}", record.deployment_tx_hash)
    );
}

#[tokio::test]
async fn test_deploy_rejected_in_wallet() {
    // Arrange
    let mut h = connected().await;
    h.chain.fail_next("eth_sendTransaction", ProviderError::user_rejected());
    h.app.set_form(TokenForm::new("Test Token", "TST", "1000", "18"));

    // Act
    h.app.deploy_token().unwrap();
    wait_for(&mut h.app, "DeploymentFinished").await;

    // Assert
    assert_eq!(
        h.app.deployment_status(),
        DeploymentStatus::Error(USER_REJECTED.to_string())
    );
    assert!(h.app.swap().is_none());
    assert!(h.chain.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_deploy_requires_wallet() {
    let mut h = harness();
    h.app.set_form(TokenForm::new("Test Token", "TST", "1000", "18"));

    assert_eq!(h.app.deploy_token().unwrap_err(), AppError::NotConnected);
    assert_eq!(h.app.deployment_status(), DeploymentStatus::Idle);
}

#[tokio::test]
async fn test_deploy_validates_form_first() {
    let mut h = connected().await;
    h.app.set_form(TokenForm::new("", "TST", "1000", "18"));

    let err = h.app.deploy_token().unwrap_err();

    assert_eq!(err.user_message(), FILL_REQUIRED_FIELDS);
    assert_eq!(h.app.deployment_status(), DeploymentStatus::Idle);
    assert!(h.chain.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_second_deploy_while_pending_is_refused() {
    let mut h = connected().await;
    h.app.set_form(TokenForm::new("Test Token", "TST", "1000", "18"));

    h.app.deploy_token().unwrap();
    assert_eq!(h.app.deploy_token().unwrap_err(), AppError::Busy("deploying"));
    wait_for(&mut h.app, "DeploymentFinished").await;

    assert_eq!(h.chain.sent_transactions().len(), 1);
}

#[tokio::test]
async fn test_decimals_input_is_clamped() {
    let mut h = connected().await;

    h.app.update_form(|form| form.set_decimals("42"));
    assert_eq!(h.app.form().decimals, "18");
    h.app.update_form(|form| form.set_decimals("-3"));
    assert_eq!(h.app.form().decimals, "0");
}

#[tokio::test]
async fn test_network_change_discards_deployment_and_trading() {
    // Arrange
    let (mut h, _record) = deployed().await;
    assert!(h.app.swap().is_some());

    // Act
    h.chain.switch_network(1);
    wait_for(&mut h.app, "NetworkChanged").await;

    // Assert
    assert_eq!(h.app.deployment_status(), DeploymentStatus::Idle);
    assert!(h.app.swap().is_none());
    assert!(h.app.liquidity().is_none());
    assert_eq!(h.app.form().symbol, "TST");
}
