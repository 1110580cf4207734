//! # Token Form Validation
//!
//! Input layer for the deployment form. Name, symbol and supply are required; decimals
//! default to 18 and are clamped into `[0, 18]` as they are typed.

use lib_evm::alloy_primitives::U256;
use lib_utils::validation::{validate_not_empty, validate_unsigned_integer};

use crate::core::error::{AppError, Result};
use crate::core::messages::FILL_REQUIRED_FIELDS;

pub const DEFAULT_DECIMALS: u8 = 18;
pub const MAX_DECIMALS: u8 = 18;

/// Raw text of the deployment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    /// Whole tokens, scaled by `10^decimals` on chain
    pub supply: String,
    pub decimals: String,
}

impl Default for TokenForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            supply: String::new(),
            decimals: DEFAULT_DECIMALS.to_string(),
        }
    }
}

/// Validated deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    pub supply: U256,
    /// Supply exactly as entered, echoed back in the token record
    pub supply_text: String,
    pub decimals: u8,
}

impl TokenForm {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        supply: impl Into<String>,
        decimals: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            supply: supply.into(),
            decimals: decimals.into(),
        }
    }

    /// Apply the decimals input rule to a freshly typed value.
    pub fn set_decimals(&mut self, input: &str) {
        self.decimals = clamp_decimals(input).to_string();
    }

    pub fn validate(&self) -> Result<TokenParams> {
        let required = [
            (self.name.as_str(), "Name"),
            (self.symbol.as_str(), "Symbol"),
            (self.supply.as_str(), "Supply"),
        ];
        if required
            .iter()
            .any(|(value, field)| validate_not_empty(value, field).is_err())
        {
            return Err(AppError::Validation(FILL_REQUIRED_FIELDS.to_string()));
        }

        let supply_text = self.supply.trim().to_string();
        validate_unsigned_integer(&supply_text, "Supply").map_err(AppError::Validation)?;
        let supply = U256::from_str_radix(&supply_text, 10)
            .map_err(|_| AppError::Validation("Supply is too large".to_string()))?;

        Ok(TokenParams {
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            supply,
            supply_text,
            decimals: clamp_decimals(&self.decimals),
        })
    }
}

/// Decimals input rule: unparsable input falls back to 18, anything else is clamped
/// into `[0, 18]`.
///
/// ```rust
/// use launchpad::utils::validation::clamp_decimals;
///
/// assert_eq!(clamp_decimals("6"), 6);
/// assert_eq!(clamp_decimals("77"), 18);
/// assert_eq!(clamp_decimals("-3"), 0);
/// assert_eq!(clamp_decimals(""), 18);
/// ```
pub fn clamp_decimals(input: &str) -> u8 {
    match input.trim().parse::<i64>() {
        Ok(value) => value.clamp(0, i64::from(MAX_DECIMALS)) as u8,
        Err(_) => DEFAULT_DECIMALS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_form_has_18_decimals() {
        assert_eq!(TokenForm::default().decimals, "18");
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let params = TokenForm::new("Test", "TST", "1000", "18").validate().unwrap();
        assert_eq!(params.name, "Test");
        assert_eq!(params.symbol, "TST");
        assert_eq!(params.supply, U256::from(1000u64));
        assert_eq!(params.supply_text, "1000");
        assert_eq!(params.decimals, 18);
    }

    #[test]
    fn test_missing_fields_rejected() {
        for form in [
            TokenForm::new("", "TST", "1000", "18"),
            TokenForm::new("Test", " ", "1000", "18"),
            TokenForm::new("Test", "TST", "", "18"),
        ] {
            assert_eq!(
                form.validate(),
                Err(AppError::Validation(FILL_REQUIRED_FIELDS.to_string()))
            );
        }
    }

    #[test]
    fn test_fractional_supply_rejected() {
        let err = TokenForm::new("Test", "TST", "1.5", "18").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_set_decimals_clamps() {
        let mut form = TokenForm::default();
        form.set_decimals("30");
        assert_eq!(form.decimals, "18");
        form.set_decimals("abc");
        assert_eq!(form.decimals, "18");
        form.set_decimals("0");
        assert_eq!(form.decimals, "0");
    }

    proptest! {
        #[test]
        fn prop_clamped_decimals_in_range(value in any::<i64>()) {
            let clamped = clamp_decimals(&value.to_string());
            prop_assert!(clamped <= MAX_DECIMALS);
            if (0..=18).contains(&value) {
                prop_assert_eq!(i64::from(clamped), value);
            }
        }

        #[test]
        fn prop_arbitrary_text_never_exceeds_max(input in ".{0,12}") {
            prop_assert!(clamp_decimals(&input) <= MAX_DECIMALS);
        }
    }
}
