//! Unit table
//!
//! Maps each category to an ordered list of unit definitions. Order is
//! significant: the first two units are the default from/to selection and the
//! list order is the display order.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::{TableError, TableResult};
use super::units::{
    Category, KG_PER_G, KG_PER_LB, KG_PER_MG, KG_PER_OZ, KG_PER_ST, KG_PER_T, M_PER_CM,
    M_PER_FT, M_PER_IN, M_PER_KM, M_PER_MI, M_PER_MM, M_PER_YD,
};

/// The compiled-in table, built on first use and never mutated
pub static BUILTIN_TABLE: Lazy<UnitTable> = Lazy::new(UnitTable::builtin);

/// A single unit and its multiplier into the category's base unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Display label with abbreviation, e.g. "feet (ft)"
    pub name: String,
    pub factor_to_base: f64,
}

impl UnitDefinition {
    pub fn new(name: impl Into<String>, factor_to_base: f64) -> Self {
        Self {
            name: name.into(),
            factor_to_base,
        }
    }
}

/// Shape of a unit table on disk, before validation
#[derive(Debug, Deserialize)]
struct RawUnitTable {
    length: Vec<UnitDefinition>,
    weight: Vec<UnitDefinition>,
}

/// Validated, immutable category → ordered units mapping.
///
/// Only constructible through [`UnitTable::new`] (or the built-in table), so
/// every instance upholds the table invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitTable {
    length: Vec<UnitDefinition>,
    weight: Vec<UnitDefinition>,
}

impl UnitTable {
    /// Build a table, checking unit counts, factors and name uniqueness
    pub fn new(length: Vec<UnitDefinition>, weight: Vec<UnitDefinition>) -> TableResult<Self> {
        validate_units(Category::Length, &length)?;
        validate_units(Category::Weight, &weight)?;
        Ok(Self { length, weight })
    }

    /// Parse and validate a table from JSON
    pub fn from_json(json: &str) -> TableResult<Self> {
        let raw: RawUnitTable = serde_json::from_str(json)?;
        Self::new(raw.length, raw.weight)
    }

    /// Load and validate a table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        tracing::info!(
            "Loaded unit table from {} ({} length, {} weight units)",
            path.display(),
            table.length.len(),
            table.weight.len()
        );
        Ok(table)
    }

    /// Serialize in the format accepted by [`UnitTable::from_json`]
    pub fn to_json_pretty(&self) -> TableResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn builtin() -> Self {
        let length = vec![
            UnitDefinition::new(Category::Length.base_unit(), 1.0),
            UnitDefinition::new("kilometers (km)", M_PER_KM),
            UnitDefinition::new("centimeters (cm)", M_PER_CM),
            UnitDefinition::new("millimeters (mm)", M_PER_MM),
            UnitDefinition::new("miles (mi)", M_PER_MI),
            UnitDefinition::new("yards (yd)", M_PER_YD),
            UnitDefinition::new("feet (ft)", M_PER_FT),
            UnitDefinition::new("inches (in)", M_PER_IN),
        ];
        let weight = vec![
            UnitDefinition::new(Category::Weight.base_unit(), 1.0),
            UnitDefinition::new("grams (g)", KG_PER_G),
            UnitDefinition::new("milligrams (mg)", KG_PER_MG),
            UnitDefinition::new("metric tons (t)", KG_PER_T),
            UnitDefinition::new("pounds (lb)", KG_PER_LB),
            UnitDefinition::new("ounces (oz)", KG_PER_OZ),
            UnitDefinition::new("stones (st)", KG_PER_ST),
        ];
        Self { length, weight }
    }

    /// Units of a category in definition order
    pub fn units(&self, category: Category) -> &[UnitDefinition] {
        match category {
            Category::Length => &self.length,
            Category::Weight => &self.weight,
        }
    }

    pub fn unit_names(&self, category: Category) -> Vec<&str> {
        self.units(category).iter().map(|u| u.name.as_str()).collect()
    }

    /// Look up a unit by exact name within a category
    pub fn find(&self, category: Category, name: &str) -> Option<&UnitDefinition> {
        self.units(category).iter().find(|u| u.name == name)
    }

    pub fn factor_to_base(&self, category: Category, name: &str) -> Option<f64> {
        self.find(category, name).map(|u| u.factor_to_base)
    }

    /// First and second units of the category
    pub fn default_pair(&self, category: Category) -> (&str, &str) {
        let units = self.units(category);
        // At least two units per category is a construction invariant
        (units[0].name.as_str(), units[1].name.as_str())
    }
}

fn validate_units(category: Category, units: &[UnitDefinition]) -> TableResult<()> {
    if units.len() < 2 {
        return Err(TableError::TooFewUnits {
            category,
            count: units.len(),
        });
    }

    let mut seen = HashSet::new();
    for unit in units {
        if unit.name.trim().is_empty() {
            return Err(TableError::EmptyName { category });
        }
        if !unit.factor_to_base.is_finite() || unit.factor_to_base <= 0.0 {
            return Err(TableError::InvalidFactor {
                category,
                unit: unit.name.clone(),
                factor: unit.factor_to_base,
            });
        }
        if !seen.insert(unit.name.as_str()) {
            return Err(TableError::DuplicateUnit {
                category,
                unit: unit.name.clone(),
            });
        }
    }

    Ok(())
}
