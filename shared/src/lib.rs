//! # Shared Data Transfer Objects Library
//!
//! Types exchanged between the launchpad orchestration core, its presenters and the
//! command-line utilities. Everything here is plain data: addresses and hashes are kept
//! as their canonical `0x`-prefixed string form so this crate stays free of chain
//! dependencies.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::token`]**: Deployed token record and deployment status
//!   - **[`dto::trading`]**: Trading tab and swap direction selectors
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format addresses for display
//!   - **[`utils::display_account`]**: `0x1234...abcd` rendering of a connected account
//!   - **[`utils::explorer_address_url`]** / **[`utils::explorer_tx_url`]**: block explorer links
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using `serde`:
//! - Field names stay **snake_case**
//! - Enums serialize to lowercase tags (`"idle"`, `"pending"`, ...)
//! - `DeploymentStatus` is adjacently tagged so its payload shape is explicit
//!
//! ```rust
//! use shared::dto::token::{DeploymentStatus, TokenRecord};
//!
//! let status = DeploymentStatus::Error("user rejected".to_string());
//! let json = serde_json::to_string(&status).unwrap();
//! assert_eq!(json, r#"{"status":"error","payload":"user rejected"}"#);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library, everything in it is public API
pub use dto::*;
pub use utils::*;
