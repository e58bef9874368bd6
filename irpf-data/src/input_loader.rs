//! CSV loader for batches of taxpayer inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column                  | Required | Type    | Notes                                  |
//! |-------------------------|----------|---------|----------------------------------------|
//! | `label`                 | no       | string  | Defaults to `row N`                    |
//! | `annual_taxable_income` | yes      | money   | `60000.00` or `"60.000,00"`            |
//! | `number_of_dependents`  | no       | integer | Empty for 0; negative counts become 0  |
//! | `education_expenses`    | no       | money   | Empty for 0                            |
//! | `health_expenses`       | no       | money   | Empty for 0                            |
//! | `pgbl_contributions`    | no       | money   | Empty for 0                            |
//!
//! ### Example
//!
//! ```csv
//! label,annual_taxable_income,number_of_dependents,education_expenses,health_expenses,pgbl_contributions
//! salaried,60000.00,,,,
//! family,100000.00,2,10000.00,5000.00,15000.00
//! ```
use std::path::Path;

use irpf_core::CalculationInput;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::money::{ParseMoneyError, parse_money};

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    annual_taxable_income: String,
    number_of_dependents: Option<i64>,
    education_expenses: Option<String>,
    health_expenses: Option<String>,
    pgbl_contributions: Option<String>,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum InputLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A money cell could not be parsed. `row` is 1-based (header = row 0).
    #[error("invalid {column} on row {row}: {source}")]
    InvalidAmount {
        column: &'static str,
        row: usize,
        #[source]
        source: ParseMoneyError,
    },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One taxpayer scenario from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledInput {
    pub label: String,
    pub input: CalculationInput,
}

fn money_cell(
    column: &'static str,
    cell: Option<&str>,
    row: usize,
) -> Result<Decimal, InputLoadError> {
    cell.map_or(Ok(Decimal::ZERO), parse_money)
        .map_err(|source| InputLoadError::InvalidAmount {
            column,
            row,
            source,
        })
}

fn dependents_cell(
    value: Option<i64>,
    row: usize,
) -> u32 {
    let value = value.unwrap_or(0);
    if value < 0 {
        warn!(row, value, "negative number_of_dependents clamped to zero");
    }
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LabeledInput, InputLoadError> {
    let input = CalculationInput {
        annual_taxable_income: money_cell(
            "annual_taxable_income",
            Some(row.annual_taxable_income.as_str()),
            row_number,
        )?,
        number_of_dependents: dependents_cell(row.number_of_dependents, row_number),
        education_expenses: money_cell(
            "education_expenses",
            row.education_expenses.as_deref(),
            row_number,
        )?,
        health_expenses: money_cell("health_expenses", row.health_expenses.as_deref(), row_number)?,
        pgbl_contributions: money_cell(
            "pgbl_contributions",
            row.pgbl_contributions.as_deref(),
            row_number,
        )?,
    };

    let label = row
        .label
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| format!("row {row_number}"));

    Ok(LabeledInput { label, input })
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// * [InputLoadError::Parse] – if the CSV is structurally invalid or the
///   required column is missing.
/// * [InputLoadError::InvalidAmount] – if a money cell is not a number.
pub fn load_from_str(input: &str) -> Result<Vec<LabeledInput>, InputLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<LabeledInput>, InputLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
