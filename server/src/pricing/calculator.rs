use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Convert a stored f64 price to Decimal. Falls back to zero on
/// non-finite input, which cannot come from the database CHECKs.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert a Decimal amount back to f64 for storage, rounded to 2 dp.
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Effective unit price after applying a percent discount (0-100)
///
/// Kept at full precision; amounts are rounded once per line and once
/// per order, never in between.
pub fn discounted_unit_price(unit_price: f64, discount: i64) -> Decimal {
    let price = to_decimal(unit_price);
    let rate = Decimal::from(discount.clamp(0, 100)) / Decimal::ONE_HUNDRED;
    price * (Decimal::ONE - rate)
}

/// Line total: discounted unit price times quantity
pub fn line_total(unit_price: f64, discount: i64, quantity: i64) -> Decimal {
    round_money(discounted_unit_price(unit_price, discount) * Decimal::from(quantity))
}

/// Order total from line totals, rounded to 2 dp
pub fn order_total(lines: impl IntoIterator<Item = Decimal>) -> Decimal {
    round_money(lines.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discounted_unit_price() {
        assert_eq!(discounted_unit_price(100.0, 10), dec!(90.00));
        assert_eq!(discounted_unit_price(100.0, 0), dec!(100.00));
        assert_eq!(discounted_unit_price(100.0, 100), dec!(0.00));
    }

    #[test]
    fn test_line_total_with_discount() {
        // 100 * 0.90 * 2 = 180.00
        assert_eq!(line_total(100.0, 10, 2), dec!(180.00));
    }

    #[test]
    fn test_line_total_rounds_half_up() {
        // 19.99 * 0.85 * 3 = 50.9745 -> 50.97
        assert_eq!(line_total(19.99, 15, 3), dec!(50.97));
    }

    #[test]
    fn test_sub_cent_unit_prices_survive_multiplication() {
        // 0.10 * 0.85 = 0.085 per unit; * 10 = 0.85, not 0.90
        assert_eq!(line_total(0.10, 15, 10), dec!(0.85));
        // 99.99 * 0.67 = 66.9933 per unit; * 100 = 6699.33
        assert_eq!(line_total(99.99, 33, 100), dec!(6699.33));
    }

    #[test]
    fn test_order_total_sums_and_rounds() {
        let total = order_total([dec!(180.00), dec!(50.97), dec!(0.005)]);
        assert_eq!(total, dec!(230.98));
    }

    #[test]
    fn test_f64_round_trip() {
        assert_eq!(to_f64(dec!(230.98)), 230.98);
        assert_eq!(to_f64(dec!(16.995)), 17.0);
    }

    #[test]
    fn test_discount_clamped() {
        assert_eq!(discounted_unit_price(50.0, 150), dec!(0.00));
        assert_eq!(discounted_unit_price(50.0, -5), dec!(50.00));
    }
}
