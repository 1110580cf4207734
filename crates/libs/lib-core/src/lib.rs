//! # Core Library
//!
//! Application configuration shared by the launchpad core and its utilities: the target
//! network descriptor, the pre-deployed DEX contract addresses, per-transaction gas
//! ceilings and the confirmation / polling timings.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{
    core_config, init_config, Config, ContractAddresses, GasLimits, NativeCurrency,
    NetworkConfig, TxKind,
};
pub use error::{ConfigError, Result};
