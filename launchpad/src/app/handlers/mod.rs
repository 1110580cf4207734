//! # Action Handlers
//!
//! User action handlers organized by domain. Each takes the shared state and event
//! sender, updates state synchronously where the flow requires it, and spawns the
//! async part.

pub mod deploy;
pub mod trading;
pub mod wallet;
