//! # Trading DTOs
//!
//! Selectors shared by the trading coordinator and its presenters.

use serde::{Deserialize, Serialize};

/// Tabs of the trading interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingTab {
    #[default]
    Swap,
    Liquidity,
}

impl TradingTab {
    pub fn all() -> &'static [TradingTab] {
        &[TradingTab::Swap, TradingTab::Liquidity]
    }

    pub fn title(&self) -> &'static str {
        match self {
            TradingTab::Swap => "Swap",
            TradingTab::Liquidity => "Add Liquidity",
        }
    }
}

/// Direction of a swap against the base asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapType {
    /// Sell the token for the native base asset
    #[default]
    TokenToBase,
    /// Buy the token with the native base asset
    BaseToToken,
}

impl SwapType {
    pub fn toggled(self) -> Self {
        match self {
            SwapType::TokenToBase => SwapType::BaseToToken,
            SwapType::BaseToToken => SwapType::TokenToBase,
        }
    }

    /// Only spending the ERC-20 side needs a router allowance.
    pub fn requires_approval(self) -> bool {
        matches!(self, SwapType::TokenToBase)
    }
}
