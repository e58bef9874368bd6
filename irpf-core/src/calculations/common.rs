//! Rounding and clamping shared by the regime calculators.

use rust_decimal::Decimal;

/// Rounds to cents, with midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(521.745)), dec!(521.75));
/// assert_eq!(round_half_up(dec!(521.7415)), dec!(521.74));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` to zero from below.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Subtracts `deductions` from `income`, never going below zero.
pub fn taxable_base(
    income: Decimal,
    deductions: Decimal,
) -> Decimal {
    non_negative(round_half_up(income - deductions))
}
