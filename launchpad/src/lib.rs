//! # Token Launchpad
//!
//! Client-side orchestration for launching an ERC-20 on an EVM chain through the user's
//! own wallet: connect and pin the network, deploy the token, create its pair against
//! the wrapped native asset, seed liquidity and swap.
//!
//! ## Modules
//!
//! - [`app`]: root state holder, event loop, trading coordinator and the async flows
//! - [`services`]: wallet session management over an injected EIP-1193 provider
//! - [`core`]: application error type and user-facing messages
//! - [`ui`]: pure presenters for deployment status and the trading panels
//! - [`utils`]: form validation and task handles
//! - [`logging`]: tracing subscriber setup
//!
//! Nothing here holds keys. Every transaction is signed by the wallet behind the
//! provider handed to [`app::App::new`].

pub mod app;
pub mod core;
pub mod logging;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::App;
pub use crate::core::{AppError, Result};
