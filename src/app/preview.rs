//! Local preview conversions shown under the amount input. These use
//! f64 on the decimal strings, not base-unit integers, so amounts right
//! at the desk's limits can disagree with the contract's own checks.

fn to_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

/// VST received for a USDT amount: `(amount - buyFee) / buyPrice`,
/// four decimal places, "0" when the net is non-positive or the price
/// is zero.
pub fn calculate_buy_tokens(usdt_amount: &str, buy_price: &str, buy_fee: &str) -> String {
    let amount = to_f64(usdt_amount);
    let price = to_f64(buy_price);
    if amount <= 0.0 || price <= 0.0 {
        return "0".into();
    }
    let net = amount - to_f64(buy_fee);
    if net <= 0.0 {
        return "0".into();
    }
    format!("{:.4}", net / price)
}

/// USDT received for a VST amount: `amount * sellPrice - sellFee`,
/// four decimal places, clamped at zero.
pub fn calculate_sell_usdt(token_amount: &str, sell_price: &str, sell_fee: &str) -> String {
    let amount = to_f64(token_amount);
    let price = to_f64(sell_price);
    if amount <= 0.0 || price <= 0.0 {
        return "0".into();
    }
    let net = amount * price - to_f64(sell_fee);
    format!("{:.4}", net.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_preview_nets_out_the_fee() {
        // (11 - 1) / 2 = 5
        assert_eq!(calculate_buy_tokens("11", "2.0000", "1.0000"), "5.0000");
    }

    #[test]
    fn buy_preview_is_zero_at_or_below_the_fee() {
        assert_eq!(calculate_buy_tokens("0.5", "2.0000", "1.0000"), "0");
        assert_eq!(calculate_buy_tokens("1.0", "2.0000", "1.0000"), "0");
    }

    #[test]
    fn buy_preview_is_zero_for_missing_input_or_price() {
        assert_eq!(calculate_buy_tokens("", "2.0000", "1.0000"), "0");
        assert_eq!(calculate_buy_tokens("11", "0", "1.0000"), "0");
        assert_eq!(calculate_buy_tokens("11", "", "1.0000"), "0");
    }

    #[test]
    fn sell_preview_applies_price_then_fee() {
        // 10 * 1.5 - 0.5 = 14.5
        assert_eq!(calculate_sell_usdt("10", "1.5000", "0.5000"), "14.5000");
    }

    #[test]
    fn sell_preview_never_goes_negative() {
        assert_eq!(calculate_sell_usdt("0.1", "1.0000", "5.0000"), "0.0000");
        assert_eq!(calculate_sell_usdt("", "1.5000", "0.5000"), "0");
    }
}
