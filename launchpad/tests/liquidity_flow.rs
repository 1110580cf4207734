//! # Pair & Liquidity Flow Tests

mod common;

use alloy_sol_types::SolCall;
use common::*;
use launchpad::core::messages::{APPROVAL_TIMEOUT, CREATE_PAIR_FAILED, PAIR_EXISTS_NOTICE};
use lib_evm::abi::IUniswapV2Router02;
use lib_evm::alloy_primitives::U256;
use lib_evm::mock::DEFAULT_ACCOUNT;
use lib_utils::time::now_unix_secs;

#[tokio::test]
async fn test_initialize_reports_fresh_token() {
    let (h, _record) = deployed().await;
    let state = h.app.liquidity().unwrap().state();

    assert!(!state.checking_pair);
    assert!(!state.pair_exists);
    assert!(!state.approved);
    let balances = state.balances.unwrap();
    assert_eq!(balances.token, ether(1_000_000));
    assert_eq!(balances.base, ether(100));
}

#[tokio::test]
async fn test_create_pair() {
    // Arrange
    let (h, record) = deployed().await;
    let token = token_address(&record);
    let liquidity = h.app.liquidity().unwrap();

    // Act
    liquidity.create_pair().await;

    // Assert
    let state = liquidity.state();
    assert!(state.pair_exists);
    assert!(!state.creating_pair);
    assert!(state.error_message.is_none());
    assert!(state.last_tx_hash.is_some());
    assert!(h.chain.pair(token, h.config.contracts.wrapped_native).is_some());

    let tx = h.chain.sent_transactions().pop().unwrap();
    assert_eq!(tx.to, Some(h.config.contracts.factory));
    assert_eq!(tx.gas, Some(3_000_000));
}

#[tokio::test]
async fn test_create_existing_pair_is_a_notice() {
    // Arrange
    let (h, record) = deployed().await;
    h.chain.register_pair(token_address(&record), h.config.contracts.wrapped_native);
    let liquidity = h.app.liquidity().unwrap();

    // Act
    liquidity.create_pair().await;

    // Assert
    let state = liquidity.state();
    assert!(state.pair_exists);
    assert_eq!(state.notice.as_deref(), Some(PAIR_EXISTS_NOTICE));
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_mined_revert_on_existing_pair_is_a_notice() {
    // Arrange
    let (h, record) = deployed().await;
    h.chain.register_pair(token_address(&record), h.config.contracts.wrapped_native);
    h.chain.revert_next_transaction();
    let liquidity = h.app.liquidity().unwrap();

    // Act
    liquidity.create_pair().await;

    // Assert
    let state = liquidity.state();
    assert!(state.pair_exists);
    assert_eq!(state.notice.as_deref(), Some(PAIR_EXISTS_NOTICE));
    assert!(state.error_message.is_none(), "{:?}", state.error_message);
    assert!(!state.creating_pair);
}

#[tokio::test]
async fn test_mined_revert_without_pair_is_a_failure() {
    let (h, record) = deployed().await;
    h.chain.revert_next_transaction();
    let liquidity = h.app.liquidity().unwrap();

    liquidity.create_pair().await;

    let state = liquidity.state();
    assert!(!state.pair_exists);
    assert!(state.notice.is_none());
    let message = state.error_message.unwrap();
    assert!(message.starts_with(&format!("{CREATE_PAIR_FAILED}: ")), "{message}");
    assert!(h.chain.pair(token_address(&record), h.config.contracts.wrapped_native).is_none());
}

#[tokio::test]
async fn test_pair_check_sees_external_pair() {
    let (h, record) = deployed().await;
    h.chain.register_pair(h.config.contracts.wrapped_native, token_address(&record));
    let liquidity = h.app.liquidity().unwrap();

    liquidity.check_pair_exists().await;

    assert!(liquidity.state().pair_exists);
}

#[tokio::test]
async fn test_approve_grants_unlimited_allowance() {
    let (h, record) = deployed().await;
    let liquidity = h.app.liquidity().unwrap();

    liquidity.approve().await;

    assert!(liquidity.state().approved);
    assert_eq!(
        h.chain.token_allowance(token_address(&record), DEFAULT_ACCOUNT, h.config.contracts.router),
        U256::MAX
    );
    let tx = h.chain.sent_transactions().pop().unwrap();
    assert_eq!(tx.gas, Some(100_000));
}

#[tokio::test]
async fn test_any_positive_allowance_counts_as_approved() {
    // Arrange
    let (h, record) = deployed().await;
    let liquidity = h.app.liquidity().unwrap();
    let ctx = liquidity.context();
    let router = h.config.contracts.router;
    ctx.confirm(ctx.token.approve(router, U256::from(1u64), None).await)
        .await
        .unwrap();

    // Act
    liquidity.check_allowance().await;

    // Assert
    assert_eq!(
        h.chain.token_allowance(token_address(&record), DEFAULT_ACCOUNT, router),
        U256::from(1u64)
    );
    assert!(liquidity.state().approved);
}

#[tokio::test]
async fn test_add_liquidity_accepts_95_percent() {
    // Arrange
    let (h, record) = deployed().await;
    let token = token_address(&record);
    let liquidity = h.app.liquidity().unwrap();
    liquidity.create_pair().await;
    liquidity.approve().await;
    assert!(liquidity.can_add_liquidity());

    // Act
    liquidity.set_token_amount("1000");
    liquidity.set_base_amount("2");
    liquidity.add_liquidity().await;

    // Assert
    let state = liquidity.state();
    assert!(state.error_message.is_none(), "{:?}", state.error_message);
    assert!(state.token_amount.is_empty());
    assert!(state.base_amount.is_empty());
    assert_eq!(state.balances.unwrap().token, ether(999_000));
    assert_eq!(h.chain.reserves(token), Some((ether(1000), ether(2))));

    let tx = h.chain.sent_transactions().pop().unwrap();
    assert_eq!(tx.to, Some(h.config.contracts.router));
    assert_eq!(tx.value, ether(2));
    let call = IUniswapV2Router02::addLiquidityETHCall::abi_decode(&tx.data).unwrap();
    assert_eq!(call.token, token);
    assert_eq!(call.amountTokenDesired, ether(1000));
    assert_eq!(call.amountTokenMin, ether(950));
    assert_eq!(call.amountETHMin, ether(19) / U256::from(10u64));
    assert_eq!(call.to, DEFAULT_ACCOUNT);

    let deadline = call.deadline.to::<u64>();
    let now = now_unix_secs();
    assert!(deadline > now + 19 * 60 && deadline <= now + 20 * 60 + 5);
}

#[tokio::test]
async fn test_add_liquidity_without_approval_keeps_inputs() {
    let (h, _record) = deployed().await;
    let liquidity = h.app.liquidity().unwrap();
    liquidity.set_token_amount("1000");
    liquidity.set_base_amount("1");

    liquidity.add_liquidity().await;

    let state = liquidity.state();
    let message = state.error_message.unwrap();
    assert!(message.starts_with("Failed to add liquidity: "), "{message}");
    assert!(message.contains("TRANSFER_FROM_FAILED"), "{message}");
    assert_eq!(state.token_amount, "1000");
    assert!(!state.adding_liquidity);
}

#[tokio::test]
async fn test_add_liquidity_requires_both_amounts() {
    let (h, _record) = deployed().await;
    let liquidity = h.app.liquidity().unwrap();
    let sent_before = h.chain.sent_transactions().len();
    liquidity.set_token_amount("1000");

    liquidity.add_liquidity().await;

    assert_eq!(
        liquidity.state().error_message.as_deref(),
        Some("Enter both the token and ETH amounts")
    );
    assert_eq!(h.chain.sent_transactions().len(), sent_before);
}

#[tokio::test]
async fn test_approval_timeout_message() {
    let (h, _record) = deployed().await;
    let liquidity = h.app.liquidity().unwrap();
    h.chain.withhold_receipts(true);

    liquidity.approve().await;

    let state = liquidity.state();
    assert_eq!(state.error_message.as_deref(), Some(APPROVAL_TIMEOUT));
    assert!(!state.approving);
    assert!(!state.approved);
}

#[tokio::test]
async fn test_concurrent_approvals_submit_once() {
    // Arrange
    let (h, record) = deployed().await;
    let token = token_address(&record);
    let liquidity = h.app.liquidity().unwrap();
    h.chain.withhold_receipts(true);

    // Act
    tokio::join!(liquidity.approve(), liquidity.approve());

    // Assert
    let approvals = h
        .chain
        .sent_transactions()
        .iter()
        .filter(|tx| tx.to == Some(token))
        .count();
    assert_eq!(approvals, 1);
    assert!(!liquidity.state().approving);
}

#[tokio::test]
async fn test_max_buttons_copy_balances() {
    let (h, _record) = deployed().await;
    let liquidity = h.app.liquidity().unwrap();

    liquidity.set_max_token();
    liquidity.set_max_base();

    let state = liquidity.state();
    assert_eq!(state.token_amount, "1000000.0");
    assert_eq!(state.base_amount, "100.0");
}
