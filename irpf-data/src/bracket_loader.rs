use std::io::Read;

use irpf_core::{IrpfConfig, IrpfConfigError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid bracket table: {0}")]
    Config(#[from] IrpfConfigError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the brackets CSV file.
///
/// - `upper_bound`: inclusive upper bound of the bracket (empty for unbounded)
/// - `rate`: marginal rate as a decimal (e.g. 0.075 for 7.5%)
/// - `subtracted_amount`: amount subtracted after applying the rate
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub subtracted_amount: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            upper_bound: record.upper_bound,
            rate: record.rate,
            subtracted_amount: record.subtracted_amount,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for annual bracket tables stored as CSV.
///
/// ```csv
/// upper_bound,rate,subtracted_amount
/// 26963.20,0,0
/// 33919.80,0.075,2022.24
/// 45012.60,0.15,4566.23
/// 55976.16,0.225,7942.17
/// ,0.275,10740.98
/// ```
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket rows from a CSV reader, in file order.
    ///
    /// No validation happens here; see [`BracketTableLoader::load_into`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracket>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut brackets = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            brackets.push(record.into());
        }

        Ok(brackets)
    }

    /// Replace the bracket table of `config` with the rows read from
    /// `reader` and validate the result.
    pub fn load_into<R: Read>(
        mut config: IrpfConfig,
        reader: R,
    ) -> Result<IrpfConfig, BracketLoaderError> {
        config.brackets = Self::parse(reader)?;
        config.validate()?;

        info!(
            tax_year = config.tax_year,
            brackets = config.brackets.len(),
            "bracket table loaded"
        );

        Ok(config)
    }
}
