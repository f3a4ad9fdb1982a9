//! Measurement categories and conversion constants
//!
//! Every factor below converts one unit into its category's base unit
//! (meters for length, kilograms for weight).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement category a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Distance units, normalized to meters
    Length,
    /// Mass units, normalized to kilograms
    Weight,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 2] = [Category::Length, Category::Weight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
        }
    }

    /// Parse a category name. Unknown names are rejected rather than defaulted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "length" | "distance" => Some(Category::Length),
            "weight" | "mass" => Some(Category::Weight),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
        }
    }

    /// Name of the unit every factor in this category is relative to
    pub fn base_unit(&self) -> &'static str {
        match self {
            Category::Length => "meters (m)",
            Category::Weight => "kilograms (kg)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Length Conversion Constants (to meters)
// ============================================================================

pub const M_PER_KM: f64 = 1000.0;
pub const M_PER_CM: f64 = 0.01;
pub const M_PER_MM: f64 = 0.001;
/// International mile
pub const M_PER_MI: f64 = 1609.344;
pub const M_PER_YD: f64 = 0.9144;
pub const M_PER_FT: f64 = 0.3048;
pub const M_PER_IN: f64 = 0.0254;

// ============================================================================
// Weight Conversion Constants (to kilograms)
// ============================================================================

pub const KG_PER_G: f64 = 0.001;
pub const KG_PER_MG: f64 = 0.000_001;
/// Metric ton (tonne)
pub const KG_PER_T: f64 = 1000.0;
/// International avoirdupois pound
pub const KG_PER_LB: f64 = 0.453_592_37;
pub const KG_PER_OZ: f64 = 0.028_349_523_125;
/// 14 pounds
pub const KG_PER_ST: f64 = 6.350_293_18;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::from_str("length"), Some(Category::Length));
        assert_eq!(Category::from_str(" Weight "), Some(Category::Weight));
        assert_eq!(Category::from_str("mass"), Some(Category::Weight));
        assert_eq!(Category::from_str("volume"), None);
        assert_eq!(Category::from_str(""), None);
    }

    #[test]
    fn test_category_round_trips_through_as_str() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_serde_names() {
        assert_eq!(serde_json::to_string(&Category::Length).unwrap(), "\"length\"");
        let parsed: Category = serde_json::from_str("\"weight\"").unwrap();
        assert_eq!(parsed, Category::Weight);
    }

    #[test]
    fn test_imperial_factors_are_consistent() {
        assert!((M_PER_IN * 12.0 - M_PER_FT).abs() < 1e-12);
        assert!((M_PER_FT * 3.0 - M_PER_YD).abs() < 1e-12);
        assert!((M_PER_YD * 1760.0 - M_PER_MI).abs() < 1e-9);
        assert!((KG_PER_OZ * 16.0 - KG_PER_LB).abs() < 1e-12);
        assert!((KG_PER_LB * 14.0 - KG_PER_ST).abs() < 1e-12);
    }
}
