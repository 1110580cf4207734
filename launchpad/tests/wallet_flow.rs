//! # Wallet Connect Flow Tests

mod common;

use std::sync::Arc;

use common::*;
use launchpad::app::App;
use launchpad::core::messages::{INSTALL_WALLET, USER_REJECTED, WRONG_NETWORK};
use lib_evm::alloy_primitives::address;
use lib_evm::mock::DEFAULT_ACCOUNT;
use lib_evm::provider::ProviderEvent;
use lib_evm::ProviderError;

const TARGET_CHAIN: u64 = 421_614;

#[tokio::test]
async fn test_connect_on_target_chain() {
    // Arrange
    let mut h = harness();

    // Act
    h.app.connect_wallet();
    assert!(h.app.is_connecting());
    wait_for(&mut h.app, "WalletConnected").await;

    // Assert
    let session = h.app.session().unwrap();
    assert_eq!(session.address, DEFAULT_ACCOUNT);
    assert_eq!(session.chain_id, TARGET_CHAIN);
    assert_eq!(session.display_address(), "0x7099...79C8");
    assert!(!h.app.is_connecting());
    assert!(h.app.wallet_error().is_none());
    assert!(!h.chain.requests().iter().any(|m| m == "wallet_switchEthereumChain"));
}

#[tokio::test]
async fn test_connect_switches_network() {
    // Arrange
    let mut h = harness();
    h.chain.set_chain_id(1);

    // Act
    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;

    // Assert
    assert_eq!(h.app.session().unwrap().chain_id, TARGET_CHAIN);
    assert_eq!(h.chain.chain_id(), TARGET_CHAIN);
    assert!(h.chain.requests().iter().any(|m| m == "wallet_switchEthereumChain"));
    assert!(h.chain.added_chains().is_empty());
}

#[tokio::test]
async fn test_connect_adds_unknown_chain() {
    // Arrange
    let mut h = harness();
    h.chain.set_chain_id(1);
    h.chain.forget_chain(TARGET_CHAIN);

    // Act
    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;

    // Assert
    assert_eq!(h.app.session().unwrap().chain_id, TARGET_CHAIN);
    let added = h.chain.added_chains();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].chain_id, "0x66eee");
    assert_eq!(added[0].chain_name, "Arbitrum Sepolia");
    assert_eq!(added[0].native_currency.symbol, "ETH");
}

#[tokio::test]
async fn test_connect_rejected_switch() {
    // Arrange
    let mut h = harness();
    h.chain.set_chain_id(1);
    h.chain.fail_next("wallet_switchEthereumChain", ProviderError::user_rejected());

    // Act
    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;

    // Assert
    assert!(h.app.session().is_none());
    assert_eq!(h.app.wallet_error().as_deref(), Some(USER_REJECTED));
    assert_eq!(h.chain.chain_id(), 1);
}

#[tokio::test]
async fn test_connect_failed_add_reports_wrong_network() {
    // Arrange
    let mut h = harness();
    h.chain.set_chain_id(1);
    h.chain.forget_chain(TARGET_CHAIN);
    h.chain.fail_next("wallet_addEthereumChain", ProviderError::new(-32603, "Internal error"));

    // Act
    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;

    // Assert
    assert!(h.app.session().is_none());
    assert_eq!(h.app.wallet_error().as_deref(), Some(WRONG_NETWORK));
}

#[tokio::test]
async fn test_connect_rejected_accounts() {
    let mut h = harness();
    h.chain.fail_next("eth_requestAccounts", ProviderError::user_rejected());

    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;

    assert!(h.app.session().is_none());
    assert_eq!(h.app.wallet_error().as_deref(), Some(USER_REJECTED));
}

#[tokio::test]
async fn test_connect_without_provider_sets_install_hint() {
    let mut app = App::new(None, Arc::new(test_config()));

    app.connect_wallet();

    assert!(!app.is_connecting());
    assert!(app.session().is_none());
    assert_eq!(app.wallet_error().as_deref(), Some(INSTALL_WALLET));
    assert_eq!(app.process_events(), 0);
}

#[tokio::test]
async fn test_second_connect_while_in_flight_is_ignored() {
    let mut h = harness();

    h.app.connect_wallet();
    h.app.connect_wallet();
    wait_for(&mut h.app, "WalletConnected").await;

    let account_requests = h
        .chain
        .requests()
        .iter()
        .filter(|m| *m == "eth_requestAccounts")
        .count();
    assert_eq!(account_requests, 1);
}

#[tokio::test]
async fn test_account_change_reconnects() {
    // Arrange
    let mut h = connected().await;
    let other = address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

    // Act
    h.chain.set_accounts(vec![other]);
    wait_for(&mut h.app, "WalletConnected").await;

    // Assert
    assert_eq!(h.app.session().unwrap().address, other);
}

#[tokio::test]
async fn test_accounts_cleared_disconnects() {
    let mut h = connected().await;

    h.chain.set_accounts(Vec::new());
    wait_for(&mut h.app, "AccountsChanged").await;

    assert!(h.app.session().is_none());
    assert!(!h.app.is_connecting());
}

#[tokio::test]
async fn test_same_account_notification_keeps_session() {
    let mut h = connected().await;

    h.chain.emit(ProviderEvent::AccountsChanged(vec![DEFAULT_ACCOUNT]));
    wait_for(&mut h.app, "AccountsChanged").await;

    assert_eq!(h.app.session().unwrap().address, DEFAULT_ACCOUNT);
    assert!(!h.app.is_connecting());
}

#[tokio::test]
async fn test_network_change_away_from_target_resets() {
    // Arrange
    let mut h = connected().await;

    // Act
    h.chain.switch_network(1);
    wait_for(&mut h.app, "NetworkChanged").await;

    // Assert
    assert!(h.app.session().is_none());
    assert_eq!(h.app.wallet_error().as_deref(), Some(WRONG_NETWORK));
}
