//! Data models for doccompare.

mod comparison;
mod side;

pub use comparison::{ComparisonResult, Difference, DifferenceKind, ErrorBody, ShapeError};
pub use side::Side;
