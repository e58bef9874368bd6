use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named deduction lines shown in the breakdown of each regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    Pgbl,
    Dependents,
    Education,
    Health,
    SimplifiedDiscount,
    Total,
}

impl DeductionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pgbl => "pgbl",
            Self::Dependents => "dependents",
            Self::Education => "education",
            Self::Health => "health",
            Self::SimplifiedDiscount => "simplified_discount",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for DeductionKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Deductions = BTreeMap<DeductionKind, Decimal>;

/// Outcome of one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub annual_taxable_income: Decimal,
    pub taxable_base: Decimal,
    pub tax_due: Decimal,
    /// `tax_due / annual_taxable_income`, zero when there is no income.
    pub effective_rate: Decimal,
    /// Always contains [`DeductionKind::Total`].
    pub deductions: Deductions,
}

impl CalculationResult {
    pub(crate) fn new(
        annual_taxable_income: Decimal,
        taxable_base: Decimal,
        tax_due: Decimal,
        deductions: Deductions,
    ) -> Self {
        let effective_rate = if annual_taxable_income.is_zero() {
            Decimal::ZERO
        } else {
            tax_due / annual_taxable_income
        };

        Self {
            annual_taxable_income,
            taxable_base,
            tax_due,
            effective_rate,
            deductions,
        }
    }

    pub fn deduction(
        &self,
        kind: DeductionKind,
    ) -> Decimal {
        self.deductions.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_deductions(&self) -> Decimal {
        self.deduction(DeductionKind::Total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedModel {
    Complete,
    Simplified,
    Tie,
}

impl RecommendedModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Simplified => "Simplified",
            Self::Tie => "Tie",
        }
    }
}

impl fmt::Display for RecommendedModel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub complete: CalculationResult,
    pub simplified: CalculationResult,
    pub recommended_model: RecommendedModel,
}

impl ComparisonResult {
    /// Result of the recommended regime, `None` on a tie.
    pub fn recommended(&self) -> Option<&CalculationResult> {
        match self.recommended_model {
            RecommendedModel::Complete => Some(&self.complete),
            RecommendedModel::Simplified => Some(&self.simplified),
            RecommendedModel::Tie => None,
        }
    }

    /// Tax saved by choosing the cheaper regime.
    pub fn savings(&self) -> Decimal {
        (self.complete.tax_due - self.simplified.tax_due).abs()
    }
}
