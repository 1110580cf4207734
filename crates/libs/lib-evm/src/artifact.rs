//! # Token Artifact
//!
//! Contract creation uses a compiled artifact in the Hardhat layout:
//!
//! ```json
//! { "contractName": "Token", "abi": [ ... ], "bytecode": "0x6080..." }
//! ```
//!
//! The init code sent to the wallet is `bytecode ++ abi.encode(constructor args)` with
//! the constructor `(string name, string symbol, uint256 initialSupply, uint8 decimals,
//! address recipient)`.

use std::path::Path;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol_data, SolType};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{EvmError, Result};

/// `(string, string, uint256, uint8, address)`
type ConstructorParams = (
    sol_data::String,
    sol_data::String,
    sol_data::Uint<256>,
    sol_data::Uint<8>,
    sol_data::Address,
);

/// Constructor arguments of the launchpad token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConstructorArgs {
    pub name: String,
    pub symbol: String,
    /// Whole tokens; the contract scales by `10^decimals`
    pub initial_supply: U256,
    pub decimals: u8,
    pub recipient: Address,
}

impl TokenConstructorArgs {
    pub fn abi_encode(&self) -> Vec<u8> {
        ConstructorParams::abi_encode_params(&(
            self.name.clone(),
            self.symbol.clone(),
            self.initial_supply,
            self.decimals,
            self.recipient,
        ))
    }

    pub fn abi_decode(data: &[u8]) -> Result<Self> {
        let (name, symbol, initial_supply, decimals, recipient) =
            ConstructorParams::abi_decode_params(data)?;
        Ok(Self {
            name,
            symbol,
            initial_supply,
            decimals,
            recipient,
        })
    }
}

/// Compiled token contract.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenArtifact {
    #[serde(default)]
    pub abi: Value,
    pub bytecode: Bytes,
}

impl TokenArtifact {
    pub fn new(bytecode: impl Into<Bytes>) -> Self {
        Self {
            abi: Value::Array(Vec::new()),
            bytecode: bytecode.into(),
        }
    }

    /// Read and parse an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EvmError::Artifact(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let artifact: TokenArtifact = serde_json::from_str(contents)
            .map_err(|e| EvmError::Artifact(format!("Invalid artifact JSON: {e}")))?;
        if artifact.bytecode.is_empty() {
            return Err(EvmError::Artifact("Artifact has empty bytecode".to_string()));
        }
        Ok(artifact)
    }

    /// Init code for a deployment with `args`.
    pub fn deploy_data(&self, args: &TokenConstructorArgs) -> Bytes {
        let mut data = self.bytecode.to_vec();
        data.extend_from_slice(&args.abi_encode());
        data.into()
    }
}
