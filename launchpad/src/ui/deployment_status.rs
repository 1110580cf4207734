//! Deployment status panel.

use std::fmt;

use shared::dto::token::DeploymentStatus;
use shared::utils::{explorer_address_url, explorer_tx_url};

/// Display content for one deployment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentView {
    pub headline: String,
    /// Label / value rows
    pub details: Vec<(String, String)>,
    /// Label / URL rows
    pub links: Vec<(String, String)>,
}

/// Map a status to its panel. `Idle` shows nothing.
///
/// ```rust
/// use launchpad::ui::present_deployment;
/// use shared::dto::token::DeploymentStatus;
///
/// assert!(present_deployment(&DeploymentStatus::Idle, "https://sepolia.arbiscan.io").is_none());
/// let pending = present_deployment(&DeploymentStatus::Pending, "https://sepolia.arbiscan.io").unwrap();
/// assert_eq!(pending.headline, "Deploying token...");
/// ```
pub fn present_deployment(status: &DeploymentStatus, explorer: &str) -> Option<DeploymentView> {
    match status {
        DeploymentStatus::Idle => None,
        DeploymentStatus::Pending => Some(DeploymentView {
            headline: "Deploying token...".to_string(),
            details: vec![(
                "Status".to_string(),
                "Waiting for the transaction to be confirmed".to_string(),
            )],
            links: Vec::new(),
        }),
        DeploymentStatus::Success(token) => Some(DeploymentView {
            headline: "Token deployed successfully!".to_string(),
            details: vec![
                ("Name".to_string(), token.name.clone()),
                ("Symbol".to_string(), token.symbol.clone()),
                ("Supply".to_string(), token.supply.clone()),
                ("Decimals".to_string(), token.decimals.to_string()),
                ("Address".to_string(), token.address.clone()),
            ],
            links: vec![
                (
                    "View token".to_string(),
                    explorer_address_url(explorer, &token.address),
                ),
                (
                    "View transaction".to_string(),
                    explorer_tx_url(explorer, &token.deployment_tx_hash),
                ),
            ],
        }),
        DeploymentStatus::Error(message) => Some(DeploymentView {
            headline: "Deployment failed".to_string(),
            details: vec![("Error".to_string(), message.clone())],
            links: Vec::new(),
        }),
    }
}

impl fmt::Display for DeploymentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        for (label, value) in &self.details {
            writeln!(f, "  {label}: {value}")?;
        }
        for (label, url) in &self.links {
            writeln!(f, "  {label}: {url}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::token::TokenRecord;

    const EXPLORER: &str = "https://sepolia.arbiscan.io";

    #[test]
    fn test_success_links_to_explorer() {
        let token = TokenRecord {
            address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            supply: "1000".to_string(),
            decimals: 18,
            deployment_tx_hash: "0xabc".to_string(),
        };
        let view = present_deployment(&DeploymentStatus::Success(token), EXPLORER).unwrap();

        assert_eq!(
            view.links[0].1,
            "https://sepolia.arbiscan.io/address/0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(view.links[1].1, "https://sepolia.arbiscan.io/tx/0xabc");
        assert!(view.to_string().contains("Symbol: TST"));
    }

    #[test]
    fn test_error_shows_message() {
        let view = present_deployment(&DeploymentStatus::Error("rejected".to_string()), EXPLORER).unwrap();
        assert_eq!(view.headline, "Deployment failed");
        assert_eq!(view.details, vec![("Error".to_string(), "rejected".to_string())]);
        assert!(view.links.is_empty());
    }
}
