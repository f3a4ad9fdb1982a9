//! Conversion MCP Tools
//!
//! Stateless tools over the conversion engine.

use serde::Serialize;

use crate::conversion::{
    format_result, swap, validate_input, Category, ConversionEngine, ConversionResult,
};

/// Category summary for list_categories
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub display_name: &'static str,
    pub base_unit: &'static str,
    pub unit_count: usize,
    pub default_from: String,
    pub default_to: String,
}

#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub name: String,
    pub factor_to_base: f64,
}

#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub category: Category,
    pub base_unit: &'static str,
    pub units: Vec<UnitSummary>,
}

#[derive(Debug, Serialize)]
pub struct ValidateInputResponse {
    pub valid: bool,
    pub value: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatResultResponse {
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct SwapUnitsResponse {
    pub from_unit: String,
    pub to_unit: String,
}

/// Parse a category name supplied by a tool caller
pub fn parse_category(name: &str) -> Result<Category, String> {
    Category::from_str(name).ok_or_else(|| {
        format!(
            "Unknown category '{}'. Expected one of: {}",
            name,
            Category::ALL.map(|c| c.as_str()).join(", ")
        )
    })
}

pub fn list_categories(engine: &ConversionEngine) -> ListCategoriesResponse {
    let categories = Category::ALL
        .iter()
        .map(|&category| {
            let (from, to) = engine.default_units(category);
            CategorySummary {
                category,
                display_name: category.display_name(),
                base_unit: category.base_unit(),
                unit_count: engine.units_for(category).len(),
                default_from: from.to_string(),
                default_to: to.to_string(),
            }
        })
        .collect();
    ListCategoriesResponse { categories }
}

pub fn list_units(engine: &ConversionEngine, category: &str) -> Result<ListUnitsResponse, String> {
    let category = parse_category(category)?;
    let units = engine
        .table()
        .units(category)
        .iter()
        .map(|u| UnitSummary {
            name: u.name.clone(),
            factor_to_base: u.factor_to_base,
        })
        .collect();
    Ok(ListUnitsResponse {
        category,
        base_unit: category.base_unit(),
        units,
    })
}

/// Full validate → convert → format pipeline on raw text
pub fn convert(
    engine: &ConversionEngine,
    category: &str,
    from_unit: &str,
    to_unit: &str,
    value: &str,
) -> Result<ConversionResult, String> {
    let category = parse_category(category)?;
    engine
        .convert_text(category, from_unit, to_unit, value)
        .map_err(|e| e.to_string())
}

pub fn validate(text: &str) -> ValidateInputResponse {
    match validate_input(text) {
        Ok(value) => ValidateInputResponse {
            valid: true,
            value: Some(value),
            error: None,
        },
        Err(e) => ValidateInputResponse {
            valid: false,
            value: None,
            error: Some(e.to_string()),
        },
    }
}

pub fn format(value: f64) -> FormatResultResponse {
    FormatResultResponse {
        value,
        display: format_result(value),
    }
}

pub fn swap_units(from_unit: String, to_unit: String) -> SwapUnitsResponse {
    let (from_unit, to_unit) = swap(from_unit, to_unit);
    SwapUnitsResponse { from_unit, to_unit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_rejects_unknown() {
        assert_eq!(parse_category("Length"), Ok(Category::Length));
        let err = parse_category("volume").unwrap_err();
        assert!(err.contains("length, weight"));
    }

    #[test]
    fn test_list_categories() {
        let engine = ConversionEngine::builtin();
        let response = list_categories(&engine);
        assert_eq!(response.categories.len(), 2);
        assert_eq!(response.categories[1].category, Category::Weight);
        assert_eq!(response.categories[1].default_from, "kilograms (kg)");
        assert_eq!(response.categories[1].unit_count, 7);
    }

    #[test]
    fn test_list_units_keeps_order() {
        let engine = ConversionEngine::builtin();
        let response = list_units(&engine, "weight").unwrap();
        let names: Vec<_> = response.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names[0], "kilograms (kg)");
        assert_eq!(names[4], "pounds (lb)");
        assert!(list_units(&engine, "time").is_err());
    }

    #[test]
    fn test_convert_tool() {
        let engine = ConversionEngine::builtin();
        let result = convert(&engine, "weight", "pounds (lb)", "kilograms (kg)", "10").unwrap();
        assert_eq!(result.display, "4.535924");

        let err = convert(&engine, "weight", "pounds (lb)", "kilograms (kg)", "").unwrap_err();
        assert_eq!(err, "Please enter a value");

        assert!(convert(&engine, "length", "pounds (lb)", "feet (ft)", "1").is_err());
    }

    #[test]
    fn test_validate_and_format_tools() {
        let ok = validate("3.5");
        assert!(ok.valid);
        assert_eq!(ok.value, Some(3.5));

        let bad = validate("-5");
        assert!(!bad.valid);
        assert!(bad.error.unwrap().contains("negative"));

        assert_eq!(format(3.0).display, "3");
    }

    #[test]
    fn test_swap_tool() {
        let response = swap_units("a".into(), "b".into());
        assert_eq!(response.from_unit, "b");
        assert_eq!(response.to_unit, "a");
    }
}
