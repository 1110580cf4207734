//! # Token DTOs
//!
//! The record produced by a successful deployment and the status machine that tracks a
//! deployment from submission to confirmation.

use serde::{Deserialize, Serialize};

/// A token produced by a confirmed contract-creation transaction.
///
/// Immutable once created. `supply` and `decimals` are kept exactly as the user
/// entered them so the record echoes its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Checksummed contract address
    pub address: String,
    pub name: String,
    pub symbol: String,
    /// Initial supply in whole tokens, as submitted
    pub supply: String,
    pub decimals: u8,
    /// Hash of the contract-creation transaction
    pub deployment_tx_hash: String,
}

/// Deployment lifecycle.
///
/// `Idle -> Pending -> Success | Error`. A terminal state is left only by starting a
/// fresh deployment, which moves straight back to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Idle,
    Pending,
    Success(TokenRecord),
    Error(String),
}

impl DeploymentStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, DeploymentStatus::Pending)
    }

    /// Deployed token, if the last deployment succeeded.
    pub fn token(&self) -> Option<&TokenRecord> {
        match self {
            DeploymentStatus::Success(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DeploymentStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Lowercase label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentStatus::Idle => "idle",
            DeploymentStatus::Pending => "pending",
            DeploymentStatus::Success(_) => "success",
            DeploymentStatus::Error(_) => "error",
        }
    }
}
