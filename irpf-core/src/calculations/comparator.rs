//! Side-by-side comparison of the two regimes.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use irpf_core::{CalculationInput, RecommendedModel, compare};
//!
//! let input = CalculationInput {
//!     annual_taxable_income: dec!(60000.00),
//!     ..CalculationInput::default()
//! };
//!
//! let result = compare(&input);
//!
//! assert_eq!(result.simplified.tax_due, dec!(2857.83));
//! assert_eq!(result.complete.tax_due, dec!(5759.02));
//! assert_eq!(result.recommended_model, RecommendedModel::Simplified);
//! ```

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::complete::complete_model;
use crate::calculations::simplified::simplified_model;
use crate::{CalculationInput, ComparisonResult, IrpfConfig, IrpfConfigError, RecommendedModel};

/// Tax differences below one cent are reported as a tie.
pub const TIE_TOLERANCE: Decimal = dec!(0.01);

static DEFAULT_CONFIG: LazyLock<IrpfConfig> = LazyLock::new(IrpfConfig::default);

/// Compares both regimes using the built-in parameter set.
///
/// Never fails: malformed amounts are clamped to zero before use.
pub fn compare(input: &CalculationInput) -> ComparisonResult {
    IrpfComparator {
        config: &DEFAULT_CONFIG,
    }
    .compare(input)
}

/// Comparator bound to a validated parameter set.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::{CalculationInput, IrpfComparator, IrpfConfig, RecommendedModel};
///
/// let config = IrpfConfig {
///     simplified_discount_cap: dec!(10000.00),
///     ..IrpfConfig::default()
/// };
/// let comparator = IrpfComparator::new(&config).unwrap();
///
/// let result = comparator.compare(&CalculationInput {
///     annual_taxable_income: dec!(80000.00),
///     health_expenses: dec!(12000.00),
///     ..CalculationInput::default()
/// });
///
/// assert_eq!(result.simplified.total_deductions(), dec!(10000.00));
/// assert_eq!(result.recommended_model, RecommendedModel::Complete);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IrpfComparator<'a> {
    config: &'a IrpfConfig,
}

impl<'a> IrpfComparator<'a> {
    /// Validates `config` and binds a comparator to it.
    ///
    /// # Errors
    ///
    /// Returns [`IrpfConfigError`] if the parameters fail
    /// [`IrpfConfig::validate`].
    pub fn new(config: &'a IrpfConfig) -> Result<Self, IrpfConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &'a IrpfConfig {
        self.config
    }

    /// Runs both regimes on the same sanitized input and picks the cheaper.
    pub fn compare(
        &self,
        input: &CalculationInput,
    ) -> ComparisonResult {
        let input = input.sanitized();

        let complete = complete_model(self.config, &input);
        let simplified = simplified_model(self.config, &input);
        let recommended_model = recommend(complete.tax_due, simplified.tax_due);

        debug!(
            complete = %complete.tax_due,
            simplified = %simplified.tax_due,
            recommended = %recommended_model,
            "regimes compared"
        );

        ComparisonResult {
            complete,
            simplified,
            recommended_model,
        }
    }
}

fn recommend(
    complete_tax: Decimal,
    simplified_tax: Decimal,
) -> RecommendedModel {
    if (complete_tax - simplified_tax).abs() < TIE_TOLERANCE {
        RecommendedModel::Tie
    } else if complete_tax < simplified_tax {
        RecommendedModel::Complete
    } else {
        RecommendedModel::Simplified
    }
}
