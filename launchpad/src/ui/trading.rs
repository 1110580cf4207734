//! Wallet badge and trading panels as plain text.

use std::fmt::Write;

use shared::dto::trading::{SwapType, TradingTab};

use crate::app::tasks::liquidity::LiquidityState;
use crate::app::tasks::swap::SwapState;
use crate::services::wallet::WalletSession;

pub fn render_wallet(session: Option<&WalletSession>, connecting: bool, error: Option<&str>) -> String {
    let mut out = match (session, connecting) {
        (Some(session), _) => format!("Connected: {}", session.display_address()),
        (None, true) => "Connecting...".to_string(),
        (None, false) => "Wallet not connected".to_string(),
    };
    if let Some(error) = error {
        let _ = write!(out, " ({error})");
    }
    out
}

pub fn render_tabs(active: TradingTab) -> String {
    TradingTab::all()
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.title())
            } else {
                tab.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_swap(state: &SwapState, symbol: &str, decimals: u8) -> String {
    let (from, to) = match state.swap_type {
        SwapType::TokenToBase => (symbol, "ETH"),
        SwapType::BaseToToken => ("ETH", symbol),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Swap {from} -> {to}");
    if let Some(balances) = state.balances {
        let _ = writeln!(
            out,
            "  Balances: {} ETH, {} {symbol}",
            balances.base_display(),
            balances.token_display(decimals)
        );
    }
    let _ = writeln!(out, "  Amount: {}", display_or_dash(&state.amount));
    let _ = writeln!(out, "  Slippage: {}", state.slippage_label());

    let action = if state.swapping {
        "Swapping..."
    } else if state.approving {
        "Approving..."
    } else if state.swap_type.requires_approval() && !state.approved {
        "Approve required"
    } else {
        "Ready"
    };
    let _ = writeln!(out, "  Status: {action}");
    push_messages(&mut out, state.error_message.as_deref(), None, state.last_tx_hash.as_deref());
    out
}

pub fn render_liquidity(state: &LiquidityState, symbol: &str, decimals: u8) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Add liquidity {symbol} / ETH");

    let pair = if state.checking_pair {
        "checking..."
    } else if state.creating_pair {
        "creating..."
    } else if state.pair_exists {
        "exists"
    } else {
        "not created"
    };
    let _ = writeln!(out, "  Pair: {pair}");

    let approval = if state.checking_approval {
        "checking..."
    } else if state.approving {
        "approving..."
    } else if state.approved {
        "approved"
    } else {
        "not approved"
    };
    let _ = writeln!(out, "  Router allowance: {approval}");

    if let Some(balances) = state.balances {
        let _ = writeln!(
            out,
            "  Balances: {} ETH, {} {symbol}",
            balances.base_display(),
            balances.token_display(decimals)
        );
    }
    let _ = writeln!(
        out,
        "  Amounts: {} {symbol} + {} ETH",
        display_or_dash(&state.token_amount),
        display_or_dash(&state.base_amount)
    );
    if state.adding_liquidity {
        let _ = writeln!(out, "  Adding liquidity...");
    }
    push_messages(
        &mut out,
        state.error_message.as_deref(),
        state.notice.as_deref(),
        state.last_tx_hash.as_deref(),
    );
    out
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn push_messages(out: &mut String, error: Option<&str>, notice: Option<&str>, tx: Option<&str>) {
    if let Some(notice) = notice {
        let _ = writeln!(out, "  Note: {notice}");
    }
    if let Some(error) = error {
        let _ = writeln!(out, "  Error: {error}");
    }
    if let Some(tx) = tx {
        let _ = writeln!(out, "  Last transaction: {tx}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tabs_marks_active() {
        assert_eq!(render_tabs(TradingTab::Swap), "[Swap] | Add Liquidity");
        assert_eq!(render_tabs(TradingTab::Liquidity), "Swap | [Add Liquidity]");
    }

    #[test]
    fn test_render_swap_needs_approval_for_token_side() {
        let state = SwapState::default();
        let out = render_swap(&state, "TST", 18);
        assert!(out.starts_with("Swap TST -> ETH"));
        assert!(out.contains("Approve required"));
        assert!(out.contains("Slippage: 0.5%"));
    }

    #[test]
    fn test_render_liquidity_notice() {
        let state = LiquidityState {
            pair_exists: true,
            notice: Some("Pair already exists!".to_string()),
            ..Default::default()
        };
        let out = render_liquidity(&state, "TST", 18);
        assert!(out.contains("Pair: exists"));
        assert!(out.contains("Note: Pair already exists!"));
    }

    #[test]
    fn test_render_wallet_states() {
        assert_eq!(render_wallet(None, false, None), "Wallet not connected");
        assert_eq!(render_wallet(None, true, None), "Connecting...");
        assert_eq!(
            render_wallet(None, false, Some("Please switch to Arbitrum Sepolia")),
            "Wallet not connected (Please switch to Arbitrum Sepolia)"
        );
    }
}
