//! Legal parameters of the annual IRPF calculation.
//!
//! The constants below reproduce the 2024 calendar-year annual table
//! (declaration filed in 2025). They change with tax law; integrators that
//! need another year supply their own [`IrpfConfig`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaxBracket;

pub const DEFAULT_TAX_YEAR: i32 = 2024;

/// Annual progressive table, ascending by upper bound.
pub const DEFAULT_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        upper_bound: Some(dec!(26963.20)),
        rate: dec!(0),
        subtracted_amount: dec!(0),
    },
    TaxBracket {
        upper_bound: Some(dec!(33919.80)),
        rate: dec!(0.075),
        subtracted_amount: dec!(2022.24),
    },
    TaxBracket {
        upper_bound: Some(dec!(45012.60)),
        rate: dec!(0.15),
        subtracted_amount: dec!(4566.23),
    },
    TaxBracket {
        upper_bound: Some(dec!(55976.16)),
        rate: dec!(0.225),
        subtracted_amount: dec!(7942.17),
    },
    TaxBracket {
        upper_bound: None,
        rate: dec!(0.275),
        subtracted_amount: dec!(10740.98),
    },
];

/// Annual deduction per dependent.
pub const DEPENDENT_DEDUCTION: Decimal = dec!(2275.08);

/// Annual education limit per person (taxpayer plus each dependent).
pub const EDUCATION_CAP_PER_PERSON: Decimal = dec!(3561.50);

pub const SIMPLIFIED_DISCOUNT_RATE: Decimal = dec!(0.20);

pub const SIMPLIFIED_DISCOUNT_CAP: Decimal = dec!(16754.34);

/// PGBL contributions are deductible up to this share of taxable income.
pub const PGBL_LIMIT_RATE: Decimal = dec!(0.12);

/// Largest gap tolerated between adjacent brackets evaluated at their shared
/// bound. The published subtraction amounts are rounded to cents, so exact
/// agreement is not expected.
pub const BOUNDARY_TOLERANCE: Decimal = dec!(0.01);

/// Errors raised when validating an [`IrpfConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IrpfConfigError {
    #[error("bracket table is empty")]
    NoBrackets,

    #[error("bracket {index} does not have a bound greater than the previous bracket")]
    BracketsNotAscending { index: usize },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast { index: usize },

    #[error("last bracket must be unbounded")]
    LastBracketBounded,

    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("bracket {index} and the bracket after it disagree by {gap} at their shared bound")]
    DiscontinuousBoundary { index: usize, gap: Decimal },
}

/// Full parameter set for one tax year.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::IrpfConfig;
///
/// let config = IrpfConfig::default();
///
/// assert_eq!(config.tax_year, 2024);
/// assert_eq!(config.simplified_discount_cap, dec!(16754.34));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrpfConfig {
    pub tax_year: i32,
    pub brackets: Vec<TaxBracket>,
    pub dependent_deduction: Decimal,
    pub education_cap_per_person: Decimal,
    pub simplified_discount_rate: Decimal,
    pub simplified_discount_cap: Decimal,
    pub pgbl_limit_rate: Decimal,
}

impl Default for IrpfConfig {
    fn default() -> Self {
        Self {
            tax_year: DEFAULT_TAX_YEAR,
            brackets: DEFAULT_BRACKETS.to_vec(),
            dependent_deduction: DEPENDENT_DEDUCTION,
            education_cap_per_person: EDUCATION_CAP_PER_PERSON,
            simplified_discount_rate: SIMPLIFIED_DISCOUNT_RATE,
            simplified_discount_cap: SIMPLIFIED_DISCOUNT_CAP,
            pgbl_limit_rate: PGBL_LIMIT_RATE,
        }
    }
}

impl IrpfConfig {
    /// Checks that the parameters describe a usable progressive schedule.
    ///
    /// # Errors
    ///
    /// Returns [`IrpfConfigError`] if:
    /// - the bracket table is empty, not strictly ascending, or its last
    ///   bracket is bounded
    /// - any rate lies outside `[0, 1]`
    /// - any amount is negative
    /// - two adjacent brackets differ by more than [`BOUNDARY_TOLERANCE`]
    ///   at their shared bound
    pub fn validate(&self) -> Result<(), IrpfConfigError> {
        self.validate_brackets()?;

        check_rate("simplified_discount_rate", self.simplified_discount_rate)?;
        check_rate("pgbl_limit_rate", self.pgbl_limit_rate)?;
        check_amount("dependent_deduction", self.dependent_deduction)?;
        check_amount("education_cap_per_person", self.education_cap_per_person)?;
        check_amount("simplified_discount_cap", self.simplified_discount_cap)?;

        Ok(())
    }

    fn validate_brackets(&self) -> Result<(), IrpfConfigError> {
        let last = self.brackets.last().ok_or(IrpfConfigError::NoBrackets)?;
        if last.upper_bound.is_some() {
            return Err(IrpfConfigError::LastBracketBounded);
        }

        for bracket in &self.brackets {
            check_rate("bracket rate", bracket.rate)?;
            check_amount("bracket subtracted_amount", bracket.subtracted_amount)?;
        }

        let mut previous: Option<Decimal> = None;
        for (index, pair) in self.brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            let bound = lower
                .upper_bound
                .ok_or(IrpfConfigError::UnboundedBracketNotLast { index })?;

            if previous.is_some_and(|prev| bound <= prev) || bound < Decimal::ZERO {
                return Err(IrpfConfigError::BracketsNotAscending { index });
            }
            previous = Some(bound);

            let gap = (lower.raw_tax(bound) - upper.raw_tax(bound)).abs();
            if gap > BOUNDARY_TOLERANCE {
                return Err(IrpfConfigError::DiscontinuousBoundary { index, gap });
            }
        }

        Ok(())
    }
}

fn check_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), IrpfConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(IrpfConfigError::InvalidRate { field, value });
    }
    Ok(())
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), IrpfConfigError> {
    if value < Decimal::ZERO {
        return Err(IrpfConfigError::NegativeAmount { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(IrpfConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_brackets_meet_within_a_cent() {
        for pair in DEFAULT_BRACKETS.windows(2) {
            let bound = pair[0].upper_bound.unwrap();
            let gap = (pair[0].raw_tax(bound) - pair[1].raw_tax(bound)).abs();

            assert!(gap <= BOUNDARY_TOLERANCE, "gap {gap} at {bound}");
        }
    }

    #[test]
    fn validate_rejects_empty_table() {
        let config = IrpfConfig {
            brackets: vec![],
            ..IrpfConfig::default()
        };

        assert_eq!(config.validate(), Err(IrpfConfigError::NoBrackets));
    }

    #[test]
    fn validate_rejects_bounded_last_bracket() {
        let mut config = IrpfConfig::default();
        config.brackets.pop();

        assert_eq!(config.validate(), Err(IrpfConfigError::LastBracketBounded));
    }

    #[test]
    fn validate_rejects_unbounded_bracket_in_the_middle() {
        let mut config = IrpfConfig::default();
        config.brackets[1].upper_bound = None;

        assert_eq!(
            config.validate(),
            Err(IrpfConfigError::UnboundedBracketNotLast { index: 1 })
        );
    }

    #[test]
    fn validate_rejects_descending_bounds() {
        let config = IrpfConfig {
            brackets: vec![
                TaxBracket::bounded(dec!(2000), dec!(0), dec!(0)),
                TaxBracket::bounded(dec!(1000), dec!(0), dec!(0)),
                TaxBracket::unbounded(dec!(0), dec!(0)),
            ],
            ..IrpfConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(IrpfConfigError::BracketsNotAscending { index: 1 })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let config = IrpfConfig {
            pgbl_limit_rate: dec!(1.2),
            ..IrpfConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(IrpfConfigError::InvalidRate {
                field: "pgbl_limit_rate",
                value: dec!(1.2),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_cap() {
        let config = IrpfConfig {
            simplified_discount_cap: dec!(-1),
            ..IrpfConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(IrpfConfigError::NegativeAmount {
                field: "simplified_discount_cap",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_inconsistent_subtracted_amount() {
        let mut config = IrpfConfig::default();
        config.brackets[1].subtracted_amount = dec!(2000.00);

        // 26963.20 * 0.075 - 2000.00 = 22.24 against 0 in the first bracket
        assert_eq!(
            config.validate(),
            Err(IrpfConfigError::DiscontinuousBoundary {
                index: 0,
                gap: dec!(22.24),
            })
        );
    }
}
