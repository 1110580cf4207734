//! # Data Transfer Objects (DTOs)
//!
//! ## Module Organization
//!
//! - [`token`] - Deployed token record and the deployment status state machine
//! - [`trading`] - Trading interface selectors (tab, swap direction)
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Enums**: lowercase / snake_case tags
//! - **All types**: implement both `Serialize` and `Deserialize`

pub mod token;
pub mod trading;

pub use token::*;
pub use trading::*;
