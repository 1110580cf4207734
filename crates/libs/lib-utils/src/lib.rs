//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, input validation and
//! background task ownership.

pub mod envs;
pub mod task;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_parse, get_env_parse_or};
pub use task::TaskHandle;
pub use time::{get_deadline_timestamp, now_unix_secs};
pub use validation::{validate_decimal_amount, validate_not_empty, validate_unsigned_integer};
