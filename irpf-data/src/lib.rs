pub mod bracket_loader;
pub mod input_loader;
pub mod logging;
pub mod money;
pub mod params;
pub mod report;

pub use bracket_loader::{BracketLoaderError, BracketTableLoader};
pub use input_loader::{InputLoadError, LabeledInput};
pub use money::{ParseMoneyError, format_brl, parse_money};
pub use params::{ParameterFile, ParameterFileError};
pub use report::{ComparisonReport, render_comparison};
