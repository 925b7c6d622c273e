//! Conversions between on-chain 18-decimal fixed point and the decimal
//! strings the rest of the app works with. All amounts cross this
//! boundary exactly once in each direction: reads are formatted here,
//! writes are parsed here.

use alloy::primitives::{utils::parse_units, U256};

use crate::constants::TOKEN_DECIMALS;
use crate::swap::error::SwapError;

/// Render a base-unit amount as a decimal string, trailing zeros
/// stripped. Values beyond u128 are printed raw.
pub fn format_units(amount: U256, decimals: u32) -> String {
    if amount.is_zero() {
        return "0".into();
    }
    if amount > U256::from(u128::MAX) {
        return format!("{amount}");
    }
    let v: u128 = amount.try_into().unwrap();
    let scale = 10u128.saturating_pow(decimals.min(38));
    let whole = v / scale;
    let frac = v % scale;
    if frac == 0 {
        format!("{whole}")
    } else {
        let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
        while frac_str.ends_with('0') {
            frac_str.pop();
        }
        format!("{whole}.{frac_str}")
    }
}

pub fn format_token(amount: U256) -> String {
    format_units(amount, TOKEN_DECIMALS)
}

/// Parse a user-entered decimal amount into base units. Empty or
/// non-positive input is rejected before anything touches the chain.
pub fn parse_amount(s: &str) -> Result<U256, SwapError> {
    let s = s.trim();
    let value: f64 = s
        .parse()
        .map_err(|_| SwapError::BadAmount(s.to_string()))?;
    if !(value > 0.0) || !value.is_finite() {
        return Err(SwapError::BadAmount(s.to_string()));
    }
    let parsed =
        parse_units(s, TOKEN_DECIMALS as u8).map_err(|_| SwapError::BadAmount(s.to_string()))?;
    Ok(parsed.into())
}
