//! IRPF calculations.
//!
//! Both regimes share [`progressive_tax`] and differ only in how the taxable
//! base is reduced before the table is applied.

pub mod common;
pub mod comparator;
pub mod complete;
pub mod progressive;
pub mod simplified;

pub use comparator::{IrpfComparator, TIE_TOLERANCE, compare};
pub use complete::complete_model;
pub use progressive::progressive_tax;
pub use simplified::simplified_model;
