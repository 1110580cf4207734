//! # Application Configuration
//!
//! This module manages the launchpad configuration: which network the wallet must be on,
//! where the DEX router / factory / wrapped base asset live, the fixed gas ceilings used
//! instead of estimation, and the timings used for polling and confirmation.
//!
//! [`Config::default()`] carries the Arbitrum Sepolia testnet values. [`Config::from_env()`]
//! starts from those defaults and overrides whatever the environment sets, then the result
//! is validated to fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! Binaries initialize the global instance once with [`init_config()`] and read it with
//! [`core_config()`]. Library code takes an explicit `Arc<Config>` instead.
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config()?;
//! let config = core_config()?;
//! println!("target chain: {}", config.network.chain_id);
//! # Ok::<(), lib_core::ConfigError>(())
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CHAIN_ID` | `421614` |
//! | `CHAIN_NAME` | `Arbitrum Sepolia` |
//! | `RPC_URL` | `https://sepolia-rollup.arbitrum.io/rpc` |
//! | `EXPLORER_URL` | `https://sepolia.arbiscan.io` |
//! | `DEX_ROUTER_ADDRESS` / `DEX_FACTORY_ADDRESS` / `WETH_ADDRESS` | testnet deployments |
//! | `GAS_LIMIT_CREATE_PAIR` | `3000000` |
//! | `GAS_LIMIT_APPROVE` | `100000` |
//! | `GAS_LIMIT_ADD_LIQUIDITY` / `GAS_LIMIT_SWAP` | unset (wallet estimates) |
//! | `TOKEN_ARTIFACT_PATH` | `artifacts/contracts/Token.sol/Token.json` |
//! | `DEADLINE_MINUTES` | `20` |
//! | `BALANCE_POLL_SECS` | `10` |
//! | `CONFIRMATIONS` | `1` |
//! | `RECEIPT_TIMEOUT_SECS` | `120` |
//! | `RECEIPT_POLL_MILLIS` | `2000` |
//! | `PROVIDER_EVENT_POLL_MILLIS` | `4000` |

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use alloy_primitives::{address, Address};
use lib_utils::envs::{get_env_opt, get_env_parse_or};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Native currency of the target network, as sent in `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Everything a wallet needs to switch to, or register, the target network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    /// Display name shown by the wallet
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_url: String,
    /// Block explorer base URL, used only for display links
    pub explorer_url: String,
}

impl NetworkConfig {
    /// Arbitrum Sepolia testnet.
    pub fn arbitrum_sepolia() -> Self {
        Self {
            chain_id: 421_614,
            chain_name: "Arbitrum Sepolia".to_string(),
            native_currency: NativeCurrency {
                name: "ETH".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_url: "https://sepolia-rollup.arbitrum.io/rpc".to_string(),
            explorer_url: "https://sepolia.arbiscan.io".to_string(),
        }
    }

    /// Chain id as the `0x`-prefixed hex quantity wallets expect (`0x66eee`).
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

/// Pre-deployed DEX contracts. Their ABIs are fixed and outside this system's control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// V2-style router (`addLiquidityETH`, `swapExact*`)
    pub router: Address,
    /// V2-style factory (`getPair`, `createPair`)
    pub factory: Address,
    /// Wrapped native asset used as the base side of every pair
    pub wrapped_native: Address,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            router: address!("0xD7f655E006F1aE864bdababC8fC978C3e5B38b7e"),
            factory: address!("0xad4c763Bc17F9893fDd0BAa2Ce5e4F20D3B89d3f"),
            wrapped_native: address!("0xc336C7309D8a2B0431Edc0f5D40a5E529437FE5a"),
        }
    }
}

/// Transaction kinds that can carry a fixed gas ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxKind {
    Deploy,
    CreatePair,
    Approve,
    AddLiquidity,
    Swap,
}

/// Fixed gas ceilings per transaction kind.
///
/// `None` leaves gas estimation to the wallet. Pair creation and approval default to
/// fixed ceilings because estimation fails on pairs that do not have liquidity yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasLimits {
    pub create_pair: Option<u64>,
    pub approve: Option<u64>,
    pub add_liquidity: Option<u64>,
    pub swap: Option<u64>,
}

impl Default for GasLimits {
    fn default() -> Self {
        Self {
            create_pair: Some(3_000_000),
            approve: Some(100_000),
            add_liquidity: None,
            swap: None,
        }
    }
}

impl GasLimits {
    /// Gas ceiling for a transaction kind, if one is configured.
    pub fn ceiling(&self, kind: TxKind) -> Option<u64> {
        match kind {
            TxKind::Deploy => None,
            TxKind::CreatePair => self.create_pair,
            TxKind::Approve => self.approve,
            TxKind::AddLiquidity => self.add_liquidity,
            TxKind::Swap => self.swap,
        }
    }
}

/// Launchpad configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub network: NetworkConfig,
    pub contracts: ContractAddresses,
    pub gas: GasLimits,
    /// Compiled token artifact (`{ "abi": [...], "bytecode": "0x..." }`)
    pub token_artifact_path: PathBuf,
    /// Minutes added to "now" for router deadlines
    pub deadline_minutes: u64,
    /// Swap view balance / allowance refresh period
    pub balance_poll_interval: Duration,
    /// Confirmations awaited after a transaction is mined
    pub confirmations: u64,
    /// How long to wait for a receipt before giving up
    pub receipt_timeout: Duration,
    pub receipt_poll_interval: Duration,
    /// How often the HTTP provider checks for account / chain changes
    pub provider_event_poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::arbitrum_sepolia(),
            contracts: ContractAddresses::default(),
            gas: GasLimits::default(),
            token_artifact_path: PathBuf::from("artifacts/contracts/Token.sol/Token.json"),
            deadline_minutes: 20,
            balance_poll_interval: Duration::from_secs(10),
            confirmations: 1,
            receipt_timeout: Duration::from_secs(120),
            receipt_poll_interval: Duration::from_millis(2_000),
            provider_event_poll_interval: Duration::from_millis(4_000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables on top of the testnet defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let network = NetworkConfig {
            chain_id: get_env_parse_or("CHAIN_ID", defaults.network.chain_id)?,
            chain_name: get_env_opt("CHAIN_NAME").unwrap_or(defaults.network.chain_name),
            native_currency: defaults.network.native_currency,
            rpc_url: get_env_opt("RPC_URL").unwrap_or(defaults.network.rpc_url),
            explorer_url: get_env_opt("EXPLORER_URL").unwrap_or(defaults.network.explorer_url),
        };

        let contracts = ContractAddresses {
            router: env_address("DEX_ROUTER_ADDRESS", defaults.contracts.router)?,
            factory: env_address("DEX_FACTORY_ADDRESS", defaults.contracts.factory)?,
            wrapped_native: env_address("WETH_ADDRESS", defaults.contracts.wrapped_native)?,
        };

        let gas = GasLimits {
            create_pair: env_gas("GAS_LIMIT_CREATE_PAIR", defaults.gas.create_pair)?,
            approve: env_gas("GAS_LIMIT_APPROVE", defaults.gas.approve)?,
            add_liquidity: env_gas("GAS_LIMIT_ADD_LIQUIDITY", defaults.gas.add_liquidity)?,
            swap: env_gas("GAS_LIMIT_SWAP", defaults.gas.swap)?,
        };

        let token_artifact_path = get_env_opt("TOKEN_ARTIFACT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_artifact_path);

        Ok(Self {
            network,
            contracts,
            gas,
            token_artifact_path,
            deadline_minutes: get_env_parse_or("DEADLINE_MINUTES", defaults.deadline_minutes)?,
            balance_poll_interval: Duration::from_secs(get_env_parse_or(
                "BALANCE_POLL_SECS",
                defaults.balance_poll_interval.as_secs(),
            )?),
            confirmations: get_env_parse_or("CONFIRMATIONS", defaults.confirmations)?,
            receipt_timeout: Duration::from_secs(get_env_parse_or(
                "RECEIPT_TIMEOUT_SECS",
                defaults.receipt_timeout.as_secs(),
            )?),
            receipt_poll_interval: Duration::from_millis(get_env_parse_or(
                "RECEIPT_POLL_MILLIS",
                duration_millis(defaults.receipt_poll_interval),
            )?),
            provider_event_poll_interval: Duration::from_millis(get_env_parse_or(
                "PROVIDER_EVENT_POLL_MILLIS",
                duration_millis(defaults.provider_event_poll_interval),
            )?),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.network.chain_id == 0 {
            return Err(ConfigError::Invalid("CHAIN_ID must be non-zero".to_string()));
        }

        if !validate_url(&self.network.rpc_url) {
            return Err(ConfigError::Invalid(format!(
                "RPC_URL must be an http(s) URL: {}",
                self.network.rpc_url
            )));
        }

        if !validate_url(&self.network.explorer_url) {
            return Err(ConfigError::Invalid(format!(
                "EXPLORER_URL must be an http(s) URL: {}",
                self.network.explorer_url
            )));
        }

        let gas = [
            ("GAS_LIMIT_CREATE_PAIR", self.gas.create_pair),
            ("GAS_LIMIT_APPROVE", self.gas.approve),
            ("GAS_LIMIT_ADD_LIQUIDITY", self.gas.add_liquidity),
            ("GAS_LIMIT_SWAP", self.gas.swap),
        ];
        if let Some((name, _)) = gas.iter().find(|(_, limit)| *limit == Some(0)) {
            return Err(ConfigError::Invalid(format!("{name} must be greater than 0")));
        }

        if self.confirmations == 0 {
            return Err(ConfigError::Invalid("CONFIRMATIONS must be at least 1".to_string()));
        }

        let intervals = [
            ("BALANCE_POLL_SECS", self.balance_poll_interval),
            ("RECEIPT_TIMEOUT_SECS", self.receipt_timeout),
            ("RECEIPT_POLL_MILLIS", self.receipt_poll_interval),
            ("PROVIDER_EVENT_POLL_MILLIS", self.provider_event_poll_interval),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::Invalid(format!("{name} must be greater than 0")));
        }

        Ok(())
    }
}

fn env_address(name: &'static str, default: Address) -> Result<Address> {
    match get_env_opt(name) {
        Some(value) => Address::from_str(value.trim())
            .map_err(|_| ConfigError::InvalidAddress { name, value }),
        None => Ok(default),
    }
}

/// `0` or `none` clears a ceiling so the wallet estimates instead.
fn env_gas(name: &'static str, default: Option<u64>) -> Result<Option<u64>> {
    match get_env_opt(name) {
        Some(value) if value.trim().eq_ignore_ascii_case("none") => Ok(None),
        Some(_) => {
            let limit: u64 = get_env_parse_or(name, 0)?;
            Ok((limit > 0).then_some(limit))
        }
        None => Ok(default),
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration from the environment.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are malformed
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        chain_id = config.network.chain_id,
        rpc_url = %config.network.rpc_url,
        router = %config.contracts.router,
        factory = %config.contracts.factory,
        "configuration loaded"
    );

    CONFIG.set(config).map_err(|_| ConfigError::AlreadyInitialized)
}

/// Get a reference to the global configuration.
pub fn core_config() -> Result<&'static Config> {
    CONFIG.get().ok_or(ConfigError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_arbitrum_sepolia() {
        let config = Config::default();
        assert_eq!(config.network.chain_id, 421_614);
        assert_eq!(config.network.chain_id_hex(), "0x66eee");
        assert_eq!(config.deadline_minutes, 20);
        assert_eq!(config.balance_poll_interval, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gas_ceilings_per_kind() {
        let gas = GasLimits::default();
        assert_eq!(gas.ceiling(TxKind::CreatePair), Some(3_000_000));
        assert_eq!(gas.ceiling(TxKind::Approve), Some(100_000));
        assert_eq!(gas.ceiling(TxKind::AddLiquidity), None);
        assert_eq!(gas.ceiling(TxKind::Swap), None);
        assert_eq!(gas.ceiling(TxKind::Deploy), None);
    }

    #[test]
    fn test_validate_rejects_zero_gas_ceiling() {
        let mut config = Config::default();
        config.gas.approve = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = Config::default();
        config.network.rpc_url = "ftp://node.example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.network.explorer_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        let mut config = Config::default();
        config.balance_poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.confirmations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://rpc.example.com"));
        assert!(validate_url("http://localhost:8545"));
        assert!(!validate_url(""));
        assert!(!validate_url("file:///etc/passwd"));
    }

    #[test]
    fn test_core_config_before_init() {
        // Nothing in this test binary initializes the global
        assert!(matches!(core_config(), Err(ConfigError::NotInitialized)));
    }
}
