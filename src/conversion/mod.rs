//! Conversion engine
//!
//! Category/unit data model, base-unit conversion, input validation and
//! result formatting.

pub mod converter;
pub mod error;
pub mod input;
pub mod table;
pub mod units;

pub use converter::{swap, ConversionEngine, ConversionRequest, ConversionResult};
pub use error::{ConversionError, ConvertResult, TableError, TableResult};
pub use input::{format_result, validate_input, RESULT_PRECISION};
pub use table::{UnitDefinition, UnitTable, BUILTIN_TABLE};
pub use units::Category;
