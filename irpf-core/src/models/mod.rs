mod calculation_input;
mod calculation_result;
mod tax_bracket;
pub mod tax_year_config;

pub use calculation_input::CalculationInput;
pub use calculation_result::{
    CalculationResult, ComparisonResult, DeductionKind, Deductions, RecommendedModel,
};
pub use tax_bracket::TaxBracket;
pub use tax_year_config::{IrpfConfig, IrpfConfigError};
