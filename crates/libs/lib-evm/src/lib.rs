//! # EVM Chain Library
//!
//! Everything the launchpad needs to talk to an EVM chain through a wallet.
//!
//! ## Modules
//!
//! - [`provider`]: EIP-1193 provider trait, provider error codes and change events
//! - [`http`]: JSON-RPC over HTTP provider with polled change events
//! - [`signer`]: signing capability, transaction submission and receipt waiting
//! - [`abi`]: ERC-20, factory and router ABI definitions using alloy's `sol!` macro
//! - [`contracts`]: typed wrappers for the token, factory and router
//! - [`artifact`]: compiled token artifact and constructor encoding
//! - [`units`]: decimal string / base unit conversion
//! - [`mock`]: in-memory chain for tests (feature `mock`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lib_evm::{Erc20, HttpProvider, Signer};
//! use lib_evm::alloy_primitives::address;
//!
//! # async fn example() -> lib_evm::Result<()> {
//! let provider = Arc::new(HttpProvider::new("http://127.0.0.1:8545")?);
//! let account = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
//! let signer = Signer::new(provider, account);
//!
//! let token = Erc20::new(address!("0xc336C7309D8a2B0431Edc0f5D40a5E529437FE5a"), signer);
//! println!("{} decimals", token.decimals().await?);
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod artifact;
pub mod contracts;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod provider;
pub mod signer;
pub mod units;

pub use alloy_primitives;

pub use artifact::{TokenArtifact, TokenConstructorArgs};
pub use contracts::{AddLiquidityEth, Erc20, Factory, Router};
pub use error::{EvmError, Result};
pub use http::HttpProvider;
pub use provider::{AddChainParams, Eip1193Provider, NativeCurrencyParams, ProviderError, ProviderEvent};
pub use signer::{ConfirmationOptions, PendingTransaction, Receipt, Signer, TxRequest};
