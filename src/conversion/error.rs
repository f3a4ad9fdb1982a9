//! Conversion and unit table error types

use thiserror::Error;

use super::units::Category;

/// Errors raised while validating input or converting a value.
///
/// The first three are user input errors and render as field-level
/// messages; the rest indicate a caller handed the engine bad data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Please enter a value")]
    EmptyInput,

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("Value cannot be negative (got {0})")]
    NegativeValue(f64),

    #[error("Unit '{unit}' is not a {category} unit")]
    InvalidUnit { category: Category, unit: String },

    #[error("Cannot convert value {0}: input must be finite and non-negative")]
    InvalidValue(f64),

    #[error("Value {0} is too large to convert")]
    OutOfRange(f64),
}

impl ConversionError {
    /// True for errors caused by what the user typed
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ConversionError::EmptyInput
                | ConversionError::NotANumber(_)
                | ConversionError::NegativeValue(_)
                | ConversionError::OutOfRange(_)
        )
    }
}

pub type ConvertResult<T> = Result<T, ConversionError>;

/// Errors raised while loading or validating a unit table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read unit table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid unit table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{category} needs at least 2 units, found {count}")]
    TooFewUnits { category: Category, count: usize },

    #[error("{category} unit '{unit}' has invalid factor {factor}: factors must be positive and finite")]
    InvalidFactor {
        category: Category,
        unit: String,
        factor: f64,
    },

    #[error("{category} unit '{unit}' is defined more than once")]
    DuplicateUnit { category: Category, unit: String },

    #[error("{category} has a unit with an empty name")]
    EmptyName { category: Category },
}

pub type TableResult<T> = Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(ConversionError::EmptyInput.is_input_error());
        assert!(ConversionError::NotANumber("x".into()).is_input_error());
        assert!(ConversionError::NegativeValue(-1.0).is_input_error());
        assert!(ConversionError::OutOfRange(1e308).is_input_error());
        assert!(!ConversionError::InvalidValue(f64::NAN).is_input_error());
        assert!(!ConversionError::InvalidUnit {
            category: Category::Length,
            unit: "parsecs".into(),
        }
        .is_input_error());
    }

    #[test]
    fn test_invalid_unit_message() {
        let err = ConversionError::InvalidUnit {
            category: Category::Weight,
            unit: "feet (ft)".into(),
        };
        assert_eq!(err.to_string(), "Unit 'feet (ft)' is not a Weight unit");
    }
}
