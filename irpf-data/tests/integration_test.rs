//! End-to-end tests: files on disk through to rendered comparisons.

use std::fs::File;
use std::path::{Path, PathBuf};

use irpf_core::{CalculationInput, IrpfComparator, IrpfConfig, RecommendedModel};
use irpf_data::{BracketTableLoader, ParameterFile, input_loader, report};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

#[test]
fn bracket_csv_reproduces_built_in_table() {
    let file = File::open(test_data("brackets_2024.csv")).expect("fixture exists");

    let config = BracketTableLoader::load_into(IrpfConfig::default(), file)
        .expect("Failed to load brackets");

    assert_eq!(config, IrpfConfig::default());
}

#[test]
fn parameter_override_changes_simplified_cap() {
    let config = ParameterFile::from_path(&test_data("params_override.toml"))
        .and_then(ParameterFile::into_config)
        .expect("Failed to load parameters");
    let comparator = IrpfComparator::new(&config).expect("valid parameters");

    let result = comparator.compare(&CalculationInput {
        annual_taxable_income: dec!(100000.00),
        ..CalculationInput::default()
    });

    assert_eq!(config.tax_year, 2025);
    assert_eq!(result.simplified.total_deductions(), dec!(17640.00));
    assert_eq!(result.simplified.taxable_base, dec!(82360.00));
    assert_eq!(result.simplified.tax_due, dec!(11908.02));
}

#[test]
fn batch_scenarios_get_expected_recommendations() {
    let scenarios =
        input_loader::load_from_file(&test_data("scenarios.csv")).expect("Failed to load scenarios");
    let config = IrpfConfig::default();
    let comparator = IrpfComparator::new(&config).expect("valid parameters");

    let outcomes: Vec<_> = scenarios
        .iter()
        .map(|s| (s.label.as_str(), comparator.compare(&s.input).recommended_model))
        .collect();

    assert_eq!(
        outcomes,
        vec![
            ("salaried", RecommendedModel::Simplified),
            ("family", RecommendedModel::Complete),
            ("exempt", RecommendedModel::Tie),
            ("medical", RecommendedModel::Complete),
        ]
    );
}

#[test]
fn batch_matches_default_compare() {
    let scenarios =
        input_loader::load_from_file(&test_data("scenarios.csv")).expect("Failed to load scenarios");
    let config = IrpfConfig::default();
    let comparator = IrpfComparator::new(&config).expect("valid parameters");

    for scenario in &scenarios {
        assert_eq!(
            comparator.compare(&scenario.input),
            irpf_core::compare(&scenario.input),
            "{}",
            scenario.label
        );
    }
}

#[test]
fn rendered_report_for_medical_scenario() {
    let scenarios =
        input_loader::load_from_file(&test_data("scenarios.csv")).expect("Failed to load scenarios");
    let medical = scenarios
        .iter()
        .find(|s| s.label == "medical")
        .expect("medical row");

    let text = report::render_comparison(&irpf_core::compare(&medical.input), Some(&medical.label));

    assert!(text.starts_with("== medical ==\n"));
    assert!(text.contains("R$ 5.759,02"));
    assert!(text.contains("R$ 6.859,02"));
    assert!(text.ends_with("Recommended: Complete (saves R$ 1.100,00)\n"));
}

#[test]
fn missing_batch_file_is_reported() {
    let result = input_loader::load_from_file(&test_data("nope.csv"));

    assert!(matches!(result, Err(input_loader::InputLoadError::Io { .. })));
}
