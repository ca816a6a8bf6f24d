use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero, so 2.345 -> 2.35 and -2.345 -> -2.35.
///
/// Every stored score goes through this rather than `Decimal::round_dp`,
/// which rounds half to even.
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_half_away(Decimal::new(2345, 3), 2), Decimal::new(235, 2));
        assert_eq!(round_half_away(Decimal::new(-2345, 3), 2), Decimal::new(-235, 2));
        assert_eq!(round_half_away(Decimal::new(25, 2), 1), Decimal::new(3, 1));
    }

    #[test]
    fn test_rounding_is_stable() {
        let once = round_half_away(Decimal::new(38449, 4), 2);
        assert_eq!(once, Decimal::new(384, 2));
        assert_eq!(round_half_away(once, 2), once);
    }

    #[test]
    fn test_clamp() {
        let five = Decimal::from(5);
        assert_eq!(clamp(Decimal::from(7), Decimal::ZERO, five), five);
        assert_eq!(clamp(Decimal::from(-1), Decimal::ZERO, five), Decimal::ZERO);
        assert_eq!(clamp(Decimal::TWO, Decimal::ZERO, five), Decimal::TWO);
    }
}
