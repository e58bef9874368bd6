//! Complete regime: itemized deductions.
//!
//! | Deduction  | Amount |
//! |------------|--------|
//! | PGBL       | contributions, capped at `pgbl_limit_rate` of income |
//! | Dependents | `dependent_deduction` per dependent |
//! | Education  | expenses, capped at `education_cap_per_person` for the taxpayer and each dependent |
//! | Health     | expenses, uncapped |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use irpf_core::{CalculationInput, DeductionKind, IrpfConfig, complete_model};
//!
//! let input = CalculationInput {
//!     annual_taxable_income: dec!(100000.00),
//!     number_of_dependents: 2,
//!     education_expenses: dec!(10000.00),
//!     health_expenses: dec!(5000.00),
//!     pgbl_contributions: dec!(15000.00),
//! };
//!
//! let result = complete_model(&IrpfConfig::default(), &input);
//!
//! assert_eq!(result.deduction(DeductionKind::Pgbl), dec!(12000.00));
//! assert_eq!(result.total_deductions(), dec!(31550.16));
//! assert_eq!(result.tax_due, dec!(8082.73));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{round_half_up, taxable_base};
use crate::calculations::progressive::progressive_tax;
use crate::{CalculationInput, CalculationResult, DeductionKind, Deductions, IrpfConfig};

/// Runs the Complete regime on `input`.
///
/// The input is sanitized first, so negative amounts count as zero.
pub fn complete_model(
    config: &IrpfConfig,
    input: &CalculationInput,
) -> CalculationResult {
    let input = input.sanitized();
    let income = input.annual_taxable_income;

    let pgbl = pgbl_deduction(config, income, input.pgbl_contributions);
    let dependents = dependents_deduction(config, input.number_of_dependents);
    let education =
        education_deduction(config, input.number_of_dependents, input.education_expenses);
    let health = input.health_expenses;
    // saturates at Decimal::MAX; the base is then zero
    let total = pgbl
        .saturating_add(dependents)
        .saturating_add(education)
        .saturating_add(health);

    let base = taxable_base(income, total);
    let tax_due = progressive_tax(&config.brackets, base);

    debug!(
        income = %income,
        total_deductions = %total,
        taxable_base = %base,
        tax_due = %tax_due,
        "complete regime"
    );

    let deductions = Deductions::from([
        (DeductionKind::Pgbl, pgbl),
        (DeductionKind::Dependents, dependents),
        (DeductionKind::Education, education),
        (DeductionKind::Health, health),
        (DeductionKind::Total, total),
    ]);

    CalculationResult::new(income, base, tax_due, deductions)
}

fn pgbl_deduction(
    config: &IrpfConfig,
    income: Decimal,
    contributions: Decimal,
) -> Decimal {
    let limit = round_half_up(income * config.pgbl_limit_rate);
    contributions.min(limit)
}

fn dependents_deduction(
    config: &IrpfConfig,
    dependents: u32,
) -> Decimal {
    Decimal::from(dependents) * config.dependent_deduction
}

fn education_deduction(
    config: &IrpfConfig,
    dependents: u32,
    expenses: Decimal,
) -> Decimal {
    // the taxpayer counts as one person
    let people = Decimal::from(dependents) + Decimal::ONE;
    expenses.min(people * config.education_cap_per_person)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input(income: Decimal) -> CalculationInput {
        CalculationInput {
            annual_taxable_income: income,
            ..CalculationInput::default()
        }
    }

    #[test]
    fn pgbl_is_capped_at_twelve_percent_of_income() {
        let config = IrpfConfig::default();

        assert_eq!(pgbl_deduction(&config, dec!(100000.00), dec!(15000.00)), dec!(12000.00));
        assert_eq!(pgbl_deduction(&config, dec!(100000.00), dec!(8000.00)), dec!(8000.00));
    }

    #[test]
    fn dependents_deduction_scales_per_dependent() {
        let config = IrpfConfig::default();

        assert_eq!(dependents_deduction(&config, 0), dec!(0));
        assert_eq!(dependents_deduction(&config, 3), dec!(6825.24));
    }

    #[test]
    fn education_cap_counts_taxpayer_and_dependents() {
        let config = IrpfConfig::default();

        assert_eq!(education_deduction(&config, 0, dec!(5000.00)), dec!(3561.50));
        assert_eq!(education_deduction(&config, 1, dec!(5000.00)), dec!(5000.00));
        assert_eq!(education_deduction(&config, 1, dec!(9000.00)), dec!(7123.00));
    }

    #[test]
    fn health_expenses_are_uncapped() {
        let result = complete_model(
            &IrpfConfig::default(),
            &CalculationInput {
                health_expenses: dec!(250000.00),
                ..input(dec!(100000.00))
            },
        );

        assert_eq!(result.deduction(DeductionKind::Health), dec!(250000.00));
        assert_eq!(result.taxable_base, dec!(0));
        assert_eq!(result.tax_due, dec!(0));
    }

    #[test]
    fn without_deductions_base_equals_income() {
        let result = complete_model(&IrpfConfig::default(), &input(dec!(60000.00)));

        assert_eq!(result.taxable_base, dec!(60000.00));
        assert_eq!(result.total_deductions(), dec!(0));
        assert_eq!(result.tax_due, dec!(5759.02));
    }

    #[test]
    fn breakdown_lists_every_category_and_total() {
        let result = complete_model(&IrpfConfig::default(), &input(dec!(60000.00)));

        let kinds: Vec<_> = result.deductions.keys().copied().collect();
        assert_eq!(
            kinds,
            vec![
                DeductionKind::Pgbl,
                DeductionKind::Dependents,
                DeductionKind::Education,
                DeductionKind::Health,
                DeductionKind::Total,
            ]
        );
    }

    #[test]
    fn negative_inputs_count_as_zero() {
        let result = complete_model(
            &IrpfConfig::default(),
            &CalculationInput {
                annual_taxable_income: dec!(40000.00),
                number_of_dependents: 0,
                education_expenses: dec!(-1000.00),
                health_expenses: dec!(-2000.00),
                pgbl_contributions: dec!(-3000.00),
            },
        );

        assert_eq!(result.total_deductions(), dec!(0));
        assert_eq!(result.tax_due, dec!(1433.77));
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let result = complete_model(
            &IrpfConfig::default(),
            &CalculationInput {
                number_of_dependents: 1,
                health_expenses: Decimal::MAX,
                ..input(dec!(1000.00))
            },
        );

        assert_eq!(result.total_deductions(), Decimal::MAX);
        assert_eq!(result.taxable_base, dec!(0));
        assert_eq!(result.tax_due, dec!(0));
    }

    #[test]
    fn zero_income_has_zero_effective_rate() {
        let result = complete_model(&IrpfConfig::default(), &input(dec!(0)));

        assert_eq!(result.tax_due, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
    }
}
