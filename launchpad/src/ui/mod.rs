//! # Presenters
//!
//! Pure functions from state to display text. Nothing here touches the chain or the
//! shared state lock.
//!
//! - [`deployment_status`]: deployment status panel with explorer links
//! - [`trading`]: wallet badge and the swap / liquidity panels

pub mod deployment_status;
pub mod trading;

pub use deployment_status::{present_deployment, DeploymentView};
