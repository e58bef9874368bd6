pub mod calculations;
pub mod models;

pub use calculations::{IrpfComparator, compare, complete_model, progressive_tax, simplified_model};
pub use models::*;
