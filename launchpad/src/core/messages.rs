//! User-facing message constants.

pub const TX_FAILED: &str = "Transaction failed";
pub const APPROVAL_FAILED: &str = "Approval failed";
pub const CREATE_PAIR_FAILED: &str = "Failed to create pair";
pub const ADD_LIQUIDITY_FAILED: &str = "Failed to add liquidity";
pub const WALLET_CONNECTION: &str = "Unable to connect wallet";
pub const WRONG_NETWORK: &str = "Please switch to Arbitrum Sepolia";
pub const INSTALL_WALLET: &str = "Please install MetaMask or another Ethereum wallet";
pub const CONNECT_WALLET: &str = "Please connect your wallet to create a token";
pub const FILL_REQUIRED_FIELDS: &str = "Please fill all required fields";
pub const USER_REJECTED: &str = "Request rejected in wallet";
pub const APPROVE_FIRST: &str = "Approve the router to spend your tokens first";

pub const PAIR_EXISTS_NOTICE: &str = "Pair already exists! You can proceed with adding liquidity.";
pub const APPROVAL_TIMEOUT: &str =
    "Transaction was not confirmed in time. Try adding the token to your wallet first, then approve.";
pub const CONFIRMATION_TIMEOUT: &str =
    "Transaction was not confirmed in time. Check the explorer and retry if needed.";

/// Revert reason substring the factory uses for duplicate pairs.
pub const PAIR_EXISTS_REASON: &str = "PAIR_EXISTS";

/// Longest revert reason shown to the user.
pub const MAX_REASON_CHARS: usize = 100;
