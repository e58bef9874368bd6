//! Progressive table lookup using the subtracted-amount method.
//!
//! Instead of summing each lower bracket's marginal tax, every bracket
//! carries a precomputed `subtracted_amount`, so the tax for any base is a
//! single multiply-subtract against the bracket that contains it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use irpf_core::progressive_tax;
//! use irpf_core::models::tax_year_config::DEFAULT_BRACKETS;
//!
//! // 48,000.00 falls in the 22.5% bracket: 48,000 * 0.225 - 7,942.17
//! assert_eq!(progressive_tax(&DEFAULT_BRACKETS, dec!(48000.00)), dec!(2857.83));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::TaxBracket;
use crate::calculations::common::{non_negative, round_half_up};

/// Tax due on `base` under `brackets`, rounded to cents.
///
/// Negative bases are treated as zero. The first bracket whose upper bound
/// is at least `base` applies. If no bracket matches, which a validated
/// [`crate::IrpfConfig`] rules out, the last bracket is used; an empty table
/// yields zero.
///
/// Published subtracted amounts are rounded, so a bracket can start a
/// fraction of a cent below where the previous one ended. The result is
/// floored at the tax owed at the previous bound, which keeps it
/// non-decreasing in `base`.
pub fn progressive_tax(
    brackets: &[TaxBracket],
    base: Decimal,
) -> Decimal {
    let base = non_negative(base);
    let mut floor = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        let is_last = index + 1 == brackets.len();
        match bracket.upper_bound {
            Some(bound) if bound < base && !is_last => {
                floor = floor.max(round_half_up(bracket.raw_tax(bound)));
            }
            _ => {
                let tax = round_half_up(bracket.raw_tax(base)).max(floor);
                trace!(base = %base, rate = %bracket.rate, tax = %tax, "progressive tax");
                return tax;
            }
        }
    }

    Decimal::ZERO
}
