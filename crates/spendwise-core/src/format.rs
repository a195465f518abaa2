//! Currency rendering shared by every presentation surface.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders `amount` with the currency symbol and two decimal places, e.g. `₹4750.00`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{symbol}{:.2}", rounded.abs())
    } else {
        format!("{symbol}{:.2}", rounded.abs())
    }
}

/// Renders a fractional share (0.25) as a whole percentage (`25%`).
pub fn format_share(share: Decimal) -> String {
    let percent = share
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_amount(dec!(4750), "₹"), "₹4750.00");
        assert_eq!(format_amount(dec!(12.5), "$"), "$12.50");
        assert_eq!(format_amount(dec!(0.005), "$"), "$0.01");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_amount(dec!(-50), "₹"), "-₹50.00");
    }

    #[test]
    fn shares_render_as_percentages() {
        assert_eq!(format_share(dec!(0.25)), "25%");
        assert_eq!(format_share(dec!(0.046)), "5%");
    }
}
