//! # Utility Functions
//!
//! - [`validation`]: token form validation and decimals clamping

pub mod validation;

pub use validation::{clamp_decimals, TokenForm, TokenParams};
