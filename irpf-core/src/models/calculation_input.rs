use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Annual figures supplied by the taxpayer.
///
/// Nothing here is validated on construction. [`CalculationInput::sanitized`]
/// is applied by every calculation entry point, so negative amounts never
/// reach the tax formulas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub annual_taxable_income: Decimal,
    pub number_of_dependents: u32,
    pub education_expenses: Decimal,
    pub health_expenses: Decimal,
    pub pgbl_contributions: Decimal,
}

impl CalculationInput {
    /// Builds an input from floating-point figures as they arrive from a form
    /// or a JSON payload.
    ///
    /// `NaN`, infinities and negative values become zero. Finite amounts too
    /// large for [`Decimal`] saturate at [`Decimal::MAX`]. Dependents are
    /// truncated toward zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use irpf_core::CalculationInput;
    ///
    /// let input = CalculationInput::from_f64(60000.0, -1.0, f64::NAN, 1500.5, f64::INFINITY);
    ///
    /// assert_eq!(input.annual_taxable_income, dec!(60000));
    /// assert_eq!(input.number_of_dependents, 0);
    /// assert_eq!(input.education_expenses, dec!(0));
    /// assert_eq!(input.health_expenses, dec!(1500.5));
    /// assert_eq!(input.pgbl_contributions, dec!(0));
    /// ```
    pub fn from_f64(
        annual_taxable_income: f64,
        number_of_dependents: f64,
        education_expenses: f64,
        health_expenses: f64,
        pgbl_contributions: f64,
    ) -> Self {
        Self {
            annual_taxable_income: money_from_f64("annual_taxable_income", annual_taxable_income),
            number_of_dependents: count_from_f64(number_of_dependents),
            education_expenses: money_from_f64("education_expenses", education_expenses),
            health_expenses: money_from_f64("health_expenses", health_expenses),
            pgbl_contributions: money_from_f64("pgbl_contributions", pgbl_contributions),
        }
    }

    /// Returns a copy with every negative amount clamped to zero.
    pub fn sanitized(&self) -> Self {
        Self {
            annual_taxable_income: clamp_money("annual_taxable_income", self.annual_taxable_income),
            number_of_dependents: self.number_of_dependents,
            education_expenses: clamp_money("education_expenses", self.education_expenses),
            health_expenses: clamp_money("health_expenses", self.health_expenses),
            pgbl_contributions: clamp_money("pgbl_contributions", self.pgbl_contributions),
        }
    }
}

fn clamp_money(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative amount clamped to zero");
        return Decimal::ZERO;
    }
    value
}

fn money_from_f64(
    field: &'static str,
    value: f64,
) -> Decimal {
    if !value.is_finite() {
        warn!(field, value, "non-finite amount clamped to zero");
        return Decimal::ZERO;
    }

    match Decimal::from_f64(value) {
        Some(decimal) => clamp_money(field, decimal),
        None if value > 0.0 => {
            warn!(field, value, "amount exceeds the decimal range, saturated");
            Decimal::MAX
        }
        None => clamp_money(field, Decimal::MIN),
    }
}

fn count_from_f64(value: f64) -> u32 {
    if !value.is_finite() || value < 0.0 {
        warn!(field = "number_of_dependents", value, "invalid count clamped to zero");
        return 0;
    }
    // `as` saturates at u32::MAX
    value.trunc() as u32
}
