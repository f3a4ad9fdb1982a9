//! Conversion engine
//!
//! Converts between any two units of a category by normalizing through the
//! category's base unit: `value * factor(from) / factor(to)`. Each unit only
//! stores its factor to the base, never a pairwise formula.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{ConversionError, ConvertResult};
use super::input::{format_result, validate_input};
use super::table::{UnitTable, BUILTIN_TABLE};
use super::units::Category;

/// A single conversion action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: f64,
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: f64,
    pub value: f64,
    /// `value` rendered for display
    pub display: String,
}

/// Stateless conversion over a shared, read-only unit table
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    table: Arc<UnitTable>,
}

impl ConversionEngine {
    pub fn new(table: Arc<UnitTable>) -> Self {
        Self { table }
    }

    /// Engine over the compiled-in unit table
    pub fn builtin() -> Self {
        Self::new(Arc::new(BUILTIN_TABLE.clone()))
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    /// Unit names of a category in definition order
    pub fn units_for(&self, category: Category) -> Vec<&str> {
        self.table.unit_names(category)
    }

    /// Default (from, to) selection for a category
    pub fn default_units(&self, category: Category) -> (&str, &str) {
        self.table.default_pair(category)
    }

    /// True if `unit` is one of the category's unit names
    pub fn has_unit(&self, category: Category, unit: &str) -> bool {
        self.table.find(category, unit).is_some()
    }

    fn factor(&self, category: Category, unit: &str) -> ConvertResult<f64> {
        self.table.factor_to_base(category, unit).ok_or_else(|| {
            tracing::warn!("Unit '{}' is not registered under {}", unit, category);
            ConversionError::InvalidUnit {
                category,
                unit: unit.to_string(),
            }
        })
    }

    /// Convert `value` from one unit to another within `category`.
    ///
    /// Fails with `InvalidUnit` if either unit is not in the category and
    /// with `InvalidValue` for negative or non-finite input. A finite input
    /// whose converted value overflows fails with `OutOfRange`.
    pub fn convert(
        &self,
        category: Category,
        from_unit: &str,
        to_unit: &str,
        value: f64,
    ) -> ConvertResult<f64> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConversionError::InvalidValue(value));
        }

        let from_factor = self.factor(category, from_unit)?;
        let to_factor = self.factor(category, to_unit)?;

        if from_unit == to_unit {
            return Ok(value);
        }

        let base_value = value * from_factor;
        let result = base_value / to_factor;

        if !base_value.is_finite() || !result.is_finite() {
            tracing::warn!("{} {} overflows when converted to {}", value, from_unit, to_unit);
            return Err(ConversionError::OutOfRange(value));
        }

        tracing::debug!(
            "{} {} -> {} {} (base {})",
            value,
            from_unit,
            result,
            to_unit,
            base_value
        );

        Ok(result)
    }

    /// Convert a request and format the outcome
    pub fn convert_request(&self, request: &ConversionRequest) -> ConvertResult<ConversionResult> {
        let value = self.convert(
            request.category,
            &request.from_unit,
            &request.to_unit,
            request.input_value,
        )?;

        Ok(ConversionResult {
            category: request.category,
            from_unit: request.from_unit.clone(),
            to_unit: request.to_unit.clone(),
            input_value: request.input_value,
            value,
            display: format_result(value),
        })
    }

    /// Validate raw text, convert it and format the result
    pub fn convert_text(
        &self,
        category: Category,
        from_unit: &str,
        to_unit: &str,
        raw: &str,
    ) -> ConvertResult<ConversionResult> {
        let input_value = validate_input(raw)?;
        self.convert_request(&ConversionRequest {
            category,
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            input_value,
        })
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Exchange the from/to selection
pub fn swap<T>(from_unit: T, to_unit: T) -> (T, T) {
    (to_unit, from_unit)
}
