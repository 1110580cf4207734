//! # External Services
//!
//! - [`wallet`]: wallet session manager over an injected EIP-1193 provider

pub mod wallet;

pub use wallet::{WalletSession, WalletSessionManager};
