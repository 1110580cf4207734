//! Decimal string <-> base unit conversion.

use alloy_primitives::utils::{format_units, parse_units};
use alloy_primitives::U256;

use crate::error::{EvmError, Result};

/// Decimals of the native asset.
pub const NATIVE_DECIMALS: u8 = 18;

/// Parse a decimal string (`"1.5"`) into base units with `decimals` places.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256> {
    let parsed = parse_units(amount.trim(), decimals)
        .map_err(|e| EvmError::Units(format!("{amount}: {e}")))?;
    if parsed.is_negative() {
        return Err(EvmError::Units(format!("{amount}: negative amount")));
    }
    Ok(parsed.get_absolute())
}

/// Format base units as a decimal string, keeping at least one fractional digit
/// (`1000000000000000000` with 18 decimals is `"1.0"`).
pub fn format_amount(value: U256, decimals: u8) -> Result<String> {
    let formatted =
        format_units(value, decimals).map_err(|e| EvmError::Units(format!("{value}: {e}")))?;
    Ok(trim_fraction(formatted))
}

fn trim_fraction(formatted: String) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}
