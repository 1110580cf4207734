//! # Configuration Errors
//!
//! Failures while loading or validating [`Config`](crate::config::Config). They are all
//! fatal at startup: binaries report them and exit.

use thiserror::Error;

/// Convenience type alias for `Result<T, ConfigError>`.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing or unparsable environment variable.
    #[error("Environment error: {0}")]
    Env(#[from] lib_utils::envs::Error),

    /// An address variable that is not 20 bytes of hex.
    #[error("Invalid address in {name}: {value}")]
    InvalidAddress { name: &'static str, value: String },

    /// A value that parsed but breaks a configuration rule.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config has already been initialized")]
    AlreadyInitialized,

    #[error("Config must be initialized with init_config() before use")]
    NotInitialized,
}
