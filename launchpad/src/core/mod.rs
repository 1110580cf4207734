//! # Core Abstractions
//!
//! Error taxonomy and user-facing message constants shared by every orchestrator.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`messages`]**: Fixed user-facing strings
//!
//! ## Error Handling
//!
//! Chain errors convert into [`AppError`] with `?`, and each orchestrator reduces the
//! final error into a component-local string with [`AppError::user_message`]:
//!
//! ```rust,no_run
//! use launchpad::core::error::{AppError, Result};
//!
//! fn require_amount(input: &str) -> Result<&str> {
//!     if input.is_empty() {
//!         return Err(AppError::Validation("Amount is required".to_string()));
//!     }
//!     Ok(input)
//! }
//! ```

pub mod error;
pub mod messages;

pub use error::{AppError, Result};
