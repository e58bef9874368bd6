use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the annual progressive table.
///
/// Tax for a base inside this bracket is `base * rate - subtracted_amount`,
/// where `subtracted_amount` folds the lower brackets' marginal rates into a
/// single constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket. `None` means unbounded.
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub subtracted_amount: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
        subtracted_amount: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
            subtracted_amount,
        }
    }

    pub fn unbounded(
        rate: Decimal,
        subtracted_amount: Decimal,
    ) -> Self {
        Self {
            upper_bound: None,
            rate,
            subtracted_amount,
        }
    }

    /// Returns `true` if `base` does not exceed this bracket's upper bound.
    pub fn covers(
        &self,
        base: Decimal,
    ) -> bool {
        self.upper_bound.is_none_or(|bound| base <= bound)
    }

    /// Unrounded, unclamped bracket formula.
    pub fn raw_tax(
        &self,
        base: Decimal,
    ) -> Decimal {
        base * self.rate - self.subtracted_amount
    }
}
