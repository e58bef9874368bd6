//! Simplified regime: a flat discount replaces all itemized deductions.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{round_half_up, taxable_base};
use crate::calculations::progressive::progressive_tax;
use crate::{CalculationInput, CalculationResult, DeductionKind, Deductions, IrpfConfig};

/// Runs the Simplified regime on `input`.
///
/// The discount is `simplified_discount_rate` of income, limited to
/// `simplified_discount_cap`. Only income matters; the deduction fields of
/// `input` are ignored.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::{CalculationInput, IrpfConfig, simplified_model};
///
/// let input = CalculationInput {
///     annual_taxable_income: dec!(60000.00),
///     ..CalculationInput::default()
/// };
///
/// let result = simplified_model(&IrpfConfig::default(), &input);
///
/// assert_eq!(result.total_deductions(), dec!(12000.00));
/// assert_eq!(result.taxable_base, dec!(48000.00));
/// assert_eq!(result.tax_due, dec!(2857.83));
/// ```
pub fn simplified_model(
    config: &IrpfConfig,
    input: &CalculationInput,
) -> CalculationResult {
    let income = input.sanitized().annual_taxable_income;

    let discount = simplified_discount(config, income);
    let base = taxable_base(income, discount);
    let tax_due = progressive_tax(&config.brackets, base);

    debug!(
        income = %income,
        discount = %discount,
        taxable_base = %base,
        tax_due = %tax_due,
        "simplified regime"
    );

    let deductions = Deductions::from([
        (DeductionKind::SimplifiedDiscount, discount),
        (DeductionKind::Total, discount),
    ]);

    CalculationResult::new(income, base, tax_due, deductions)
}

fn simplified_discount(
    config: &IrpfConfig,
    income: Decimal,
) -> Decimal {
    round_half_up(income * config.simplified_discount_rate).min(config.simplified_discount_cap)
}
