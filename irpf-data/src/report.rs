//! Plain-text rendering of a regime comparison.

use std::fmt;

use irpf_core::{CalculationResult, ComparisonResult, DeductionKind, RecommendedModel};

use crate::money::{format_brl, format_percent};

const LABEL_WIDTH: usize = 22;
const COLUMN_WIDTH: usize = 18;

/// Both regimes side by side followed by the recommendation.
///
/// ```text
/// == family ==
///                               Complete        Simplified
/// Income                   R$ 100.000,00     R$ 100.000,00
/// ...
/// Recommended: Complete (saves R$ 4.068,85)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    result: &'a ComparisonResult,
    label: Option<&'a str>,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(
        result: &'a ComparisonResult,
        label: Option<&'a str>,
    ) -> Self {
        Self { result, label }
    }

    /// Itemized lines of the Complete regime, skipping the total.
    fn fmt_breakdown(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Complete deductions:")?;
        for (kind, amount) in &self.result.complete.deductions {
            if *kind == DeductionKind::Total {
                continue;
            }
            writeln!(f, "  {:<20}{:>COLUMN_WIDTH$}", kind.as_str(), format_brl(*amount))?;
        }
        Ok(())
    }

    fn fmt_recommendation(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.result.recommended_model {
            RecommendedModel::Tie => {
                writeln!(f, "Recommended: either (both regimes owe the same tax)")
            }
            model => writeln!(
                f,
                "Recommended: {model} (saves {})",
                format_brl(self.result.savings())
            ),
        }
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if let Some(label) = self.label {
            writeln!(f, "== {label} ==")?;
        }
        writeln!(
            f,
            "{:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            "", "Complete", "Simplified"
        )?;

        let rows: [(&str, fn(&CalculationResult) -> String); 5] = [
            ("Income", |r| format_brl(r.annual_taxable_income)),
            ("Deductions", |r| format_brl(r.total_deductions())),
            ("Taxable base", |r| format_brl(r.taxable_base)),
            ("Tax due", |r| format_brl(r.tax_due)),
            ("Effective rate", |r| format_percent(r.effective_rate)),
        ];
        for (name, cell) in rows {
            writeln!(
                f,
                "{name:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
                cell(&self.result.complete),
                cell(&self.result.simplified)
            )?;
        }

        self.fmt_breakdown(f)?;
        self.fmt_recommendation(f)
    }
}

/// Renders a [`ComparisonReport`] to a string.
pub fn render_comparison(
    result: &ComparisonResult,
    label: Option<&str>,
) -> String {
    ComparisonReport::new(result, label).to_string()
}
