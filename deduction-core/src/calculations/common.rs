//! Common utility functions for deduction calculations.
//!
//! This module provides shared functionality used across worksheet
//! calculations, including rounding and other common operations.

use rust_decimal::Decimal;

/// Rounds a decimal value up to the next whole yen.
///
/// Statutory thresholds derived from percentages of income round toward
/// positive infinity, so any fractional yen becomes one full yen. This is
/// the rounding direction the NTA worksheet prescribes, not a convention
/// choice.
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded up to zero decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use deduction_core::calculations::common::round_up_to_yen;
///
/// assert_eq!(round_up_to_yen(dec!(50000.05)), dec!(50001));
/// assert_eq!(round_up_to_yen(dec!(50000.00)), dec!(50000));
/// assert_eq!(round_up_to_yen(dec!(0.01)), dec!(1));
/// ```
pub fn round_up_to_yen(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::ToPositiveInfinity)
}

/// Returns the maximum of two decimal values.
///
/// # Arguments
///
/// * `a` - First decimal value
/// * `b` - Second decimal value
///
/// # Returns
///
/// The larger of the two values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use deduction_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(200), dec!(100)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_up_to_yen tests
    // =========================================================================

    #[test]
    fn round_up_to_yen_rounds_fractional_yen_up() {
        let result = round_up_to_yen(dec!(50000.05));

        assert_eq!(result, dec!(50001));
    }

    #[test]
    fn round_up_to_yen_preserves_whole_yen() {
        let result = round_up_to_yen(dec!(50000.00));

        assert_eq!(result, dec!(50000));
    }

    #[test]
    fn round_up_to_yen_rounds_tiny_fractions_up() {
        let result = round_up_to_yen(dec!(0.01));

        assert_eq!(result, dec!(1));
    }

    #[test]
    fn round_up_to_yen_handles_zero() {
        let result = round_up_to_yen(dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn round_up_to_yen_handles_near_whole_values() {
        let result = round_up_to_yen(dec!(99999.95));

        assert_eq!(result, dec!(100000));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        let result = max(dec!(100), dec!(200));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_returns_first_when_larger() {
        let result = max(dec!(200), dec!(100));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_handles_equal_values() {
        let result = max(dec!(150), dec!(150));

        assert_eq!(result, dec!(150));
    }

    #[test]
    fn max_floors_negative_against_zero() {
        let result = max(dec!(-50000), dec!(0));

        assert_eq!(result, dec!(0));
    }
}
