//! TOML parameter files.
//!
//! Every key is optional; anything left out keeps the built-in value.
//!
//! ```toml
//! tax_year = 2023
//! dependent_deduction = "2275.08"
//! education_cap_per_person = "3561.50"
//! simplified_discount_rate = "0.20"
//! simplified_discount_cap = "16754.34"
//! pgbl_limit_rate = "0.12"
//!
//! [[brackets]]
//! upper_bound = "24511.92"
//! rate = "0"
//! subtracted_amount = "0"
//!
//! [[brackets]]
//! rate = "0.275"
//! subtracted_amount = "10432.32"
//! ```

use std::path::{Path, PathBuf};

use irpf_core::{IrpfConfig, IrpfConfigError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ParameterFileError {
    #[error("cannot read parameter file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid tax parameters: {0}")]
    Config(#[from] IrpfConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterFile {
    pub tax_year: Option<i32>,
    pub brackets: Option<Vec<TaxBracket>>,
    pub dependent_deduction: Option<Decimal>,
    pub education_cap_per_person: Option<Decimal>,
    pub simplified_discount_rate: Option<Decimal>,
    pub simplified_discount_cap: Option<Decimal>,
    pub pgbl_limit_rate: Option<Decimal>,
}

impl ParameterFile {
    pub fn from_toml_str(input: &str) -> Result<Self, ParameterFileError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ParameterFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ParameterFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "read parameter file");
        Self::from_toml_str(&contents)
    }

    /// Overlays the file onto the built-in parameters and validates the
    /// result.
    pub fn into_config(self) -> Result<IrpfConfig, ParameterFileError> {
        let defaults = IrpfConfig::default();
        let config = IrpfConfig {
            tax_year: self.tax_year.unwrap_or(defaults.tax_year),
            brackets: self.brackets.unwrap_or(defaults.brackets),
            dependent_deduction: self
                .dependent_deduction
                .unwrap_or(defaults.dependent_deduction),
            education_cap_per_person: self
                .education_cap_per_person
                .unwrap_or(defaults.education_cap_per_person),
            simplified_discount_rate: self
                .simplified_discount_rate
                .unwrap_or(defaults.simplified_discount_rate),
            simplified_discount_cap: self
                .simplified_discount_cap
                .unwrap_or(defaults.simplified_discount_cap),
            pgbl_limit_rate: self.pgbl_limit_rate.unwrap_or(defaults.pgbl_limit_rate),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = ParameterFile::from_toml_str("").unwrap().into_config().unwrap();

        assert_eq!(config, IrpfConfig::default());
    }

    #[test]
    fn scalar_overrides_keep_default_brackets() {
        let file = ParameterFile::from_toml_str(
            r#"
            tax_year = 2025
            simplified_discount_cap = "17640.00"
            "#,
        )
        .unwrap();

        let config = file.into_config().unwrap();

        assert_eq!(config.tax_year, 2025);
        assert_eq!(config.simplified_discount_cap, dec!(17640.00));
        assert_eq!(config.brackets, IrpfConfig::default().brackets);
    }

    #[test]
    fn bracket_array_replaces_table() {
        let file = ParameterFile::from_toml_str(
            r#"
            [[brackets]]
            upper_bound = "10000"
            rate = "0"
            subtracted_amount = "0"

            [[brackets]]
            rate = "0.10"
            subtracted_amount = "1000"
            "#,
        )
        .unwrap();

        let config = file.into_config().unwrap();

        assert_eq!(
            config.brackets,
            vec![
                TaxBracket::bounded(dec!(10000), dec!(0), dec!(0)),
                TaxBracket::unbounded(dec!(0.10), dec!(1000)),
            ]
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = ParameterFile::from_toml_str("dependant_deduction = \"1\"");

        assert!(matches!(result, Err(ParameterFileError::Toml(_))));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let file = ParameterFile::from_toml_str("pgbl_limit_rate = \"1.5\"").unwrap();

        assert!(matches!(
            file.into_config(),
            Err(ParameterFileError::Config(IrpfConfigError::InvalidRate { .. }))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let result = ParameterFile::from_path(Path::new("does/not/exist.toml"));

        match result {
            Err(ParameterFileError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.toml"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
