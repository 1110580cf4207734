//! # Shared Utility Functions
//!
//! Display helpers used by presenters and the command-line utilities.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`display_account`] - Connected-account rendering, `0x` prefix plus four characters each side
//!
//! ## Explorer Links
//!
//! - [`explorer_address_url`] / [`explorer_tx_url`]
//!
//! ```rust
//! use shared::utils::{display_account, explorer_tx_url};
//!
//! let account = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18";
//! assert_eq!(display_account(account), "0x742d...bD18");
//! assert_eq!(
//!     explorer_tx_url("https://sepolia.arbiscan.io/", "0xabc"),
//!     "https://sepolia.arbiscan.io/tx/0xabc"
//! );
//! ```

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18";
/// assert_eq!(format_address(addr, 4, 4), "0x74...bD18");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Also guards against either length exceeding the address on its own
    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Render a connected account the way the wallet badge shows it: `0x1234...abcd`.
pub fn display_account(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Explorer page for a contract or account.
pub fn explorer_address_url(explorer_base: &str, address: &str) -> String {
    format!("{}/address/{}", explorer_base.trim_end_matches('/'), address)
}

/// Explorer page for a transaction.
pub fn explorer_tx_url(explorer_base: &str, tx_hash: &str) -> String {
    format!("{}/tx/{}", explorer_base.trim_end_matches('/'), tx_hash)
}
