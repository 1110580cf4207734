//! # Contract Bindings
//!
//! Thin typed wrappers over the [`sol!`](alloy_sol_types::sol) bindings in
//! [`crate::abi`]. Views return decoded values; state-changing calls return a
//! [`PendingTransaction`](crate::signer::PendingTransaction) so the caller decides how
//! long to wait.

pub mod factory;
pub mod router;
pub mod token;

pub use factory::Factory;
pub use router::{AddLiquidityEth, Router};
pub use token::Erc20;
