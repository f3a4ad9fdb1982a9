//! Converter session
//!
//! Holds the form state a front end keeps between user actions: the selected
//! category and units, the raw input text and the last successful result.

use serde::Serialize;

use crate::conversion::{
    swap, Category, ConversionEngine, ConversionError, ConversionResult, ConvertResult,
};

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub input: String,
    /// Unit names available for the selected category
    pub available_units: Vec<String>,
    pub last_result: Option<ConversionResult>,
}

/// Response for a session conversion attempt
#[derive(Debug, Serialize)]
pub struct SessionConvertResponse {
    pub success: bool,
    pub error: Option<String>,
    /// True when `error` is a field-level message about the typed input,
    /// false when the selection itself was unusable
    pub input_error: bool,
    pub state: SessionSnapshot,
}

pub struct ConverterSession {
    engine: ConversionEngine,
    category: Category,
    from_unit: String,
    to_unit: String,
    input: String,
    last_result: Option<ConversionResult>,
}

impl ConverterSession {
    /// New session on the first category with its default unit pair
    pub fn new(engine: ConversionEngine) -> Self {
        let category = Category::Length;
        let (from_unit, to_unit) = default_pair(&engine, category);
        Self {
            engine,
            category,
            from_unit,
            to_unit,
            input: String::new(),
            last_result: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn units(&self) -> (&str, &str) {
        (&self.from_unit, &self.to_unit)
    }

    pub fn last_result(&self) -> Option<&ConversionResult> {
        self.last_result.as_ref()
    }

    /// Switch category. Units reset to the new category's defaults so the
    /// engine never sees a unit from the previous category.
    pub fn select_category(&mut self, category: Category) {
        if category == self.category {
            return;
        }
        let (from_unit, to_unit) = default_pair(&self.engine, category);
        self.category = category;
        self.from_unit = from_unit;
        self.to_unit = to_unit;
        self.last_result = None;
    }

    /// Select units; both must belong to the current category
    pub fn select_units(&mut self, from_unit: &str, to_unit: &str) -> ConvertResult<()> {
        for unit in [from_unit, to_unit] {
            if !self.engine.has_unit(self.category, unit) {
                return Err(ConversionError::InvalidUnit {
                    category: self.category,
                    unit: unit.to_string(),
                });
            }
        }
        self.from_unit = from_unit.to_string();
        self.to_unit = to_unit.to_string();
        Ok(())
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Swap from/to. A displayed result is recomputed for the new direction.
    pub fn swap_units(&mut self) -> ConvertResult<()> {
        let from = std::mem::take(&mut self.from_unit);
        let to = std::mem::take(&mut self.to_unit);
        (self.from_unit, self.to_unit) = swap(from, to);

        if self.last_result.is_some() {
            self.convert()?;
        }
        Ok(())
    }

    /// Convert the current input. On failure the previous result stays.
    pub fn convert(&mut self) -> ConvertResult<&ConversionResult> {
        let result =
            self.engine
                .convert_text(self.category, &self.from_unit, &self.to_unit, &self.input)?;
        Ok(&*self.last_result.insert(result))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category,
            from_unit: self.from_unit.clone(),
            to_unit: self.to_unit.clone(),
            input: self.input.clone(),
            available_units: self
                .engine
                .units_for(self.category)
                .into_iter()
                .map(String::from)
                .collect(),
            last_result: self.last_result.clone(),
        }
    }

    /// Convert and package the outcome for a tool response
    pub fn convert_response(&mut self) -> SessionConvertResponse {
        let (error, input_error) = match self.convert() {
            Ok(_) => (None, false),
            Err(e) => {
                if !e.is_input_error() {
                    tracing::warn!("Session conversion failed: {}", e);
                }
                (Some(e.to_string()), e.is_input_error())
            }
        };
        SessionConvertResponse {
            success: error.is_none(),
            error,
            input_error,
            state: self.snapshot(),
        }
    }
}

fn default_pair(engine: &ConversionEngine, category: Category) -> (String, String) {
    let (from, to) = engine.default_units(category);
    (from.to_string(), to.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ConverterSession {
        ConverterSession::new(ConversionEngine::builtin())
    }

    #[test]
    fn test_new_session_defaults() {
        let s = session();
        assert_eq!(s.category(), Category::Length);
        assert_eq!(s.units(), ("meters (m)", "kilometers (km)"));
        assert!(s.last_result().is_none());
    }

    #[test]
    fn test_convert_updates_result() {
        let mut s = session();
        s.select_units("meters (m)", "feet (ft)").unwrap();
        s.set_input("1");
        let display = s.convert().unwrap().display.clone();
        assert_eq!(display, "3.28084");
    }

    #[test]
    fn test_failed_convert_keeps_previous_result() {
        let mut s = session();
        s.set_input("1500");
        s.convert().unwrap();
        assert_eq!(s.last_result().unwrap().display, "1.5");

        s.set_input("abc");
        assert!(matches!(s.convert(), Err(ConversionError::NotANumber(_))));
        assert_eq!(s.last_result().unwrap().display, "1.5");

        s.set_input("-3");
        let response = s.convert_response();
        assert!(!response.success);
        assert!(response.error.is_some());
        assert!(response.input_error);
        assert_eq!(response.state.last_result.unwrap().display, "1.5");
    }

    #[test]
    fn test_convert_response_flags_oversized_input() {
        let mut s = session();
        s.select_units("miles (mi)", "millimeters (mm)").unwrap();
        s.set_input("2");
        assert!(s.convert_response().success);

        s.set_input(&format!("1{}", "0".repeat(307)));
        let response = s.convert_response();
        assert!(!response.success);
        assert!(response.input_error);
        assert_eq!(response.state.last_result.unwrap().input_value, 2.0);
    }

    #[test]
    fn test_select_category_resets_units() {
        let mut s = session();
        s.set_input("2");
        s.convert().unwrap();
        s.select_category(Category::Weight);
        assert_eq!(s.units(), ("kilograms (kg)", "grams (g)"));
        assert!(s.last_result().is_none());
        assert_eq!(s.convert().unwrap().display, "2000");
    }

    #[test]
    fn test_select_units_rejects_foreign_unit() {
        let mut s = session();
        let err = s.select_units("meters (m)", "pounds (lb)").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidUnit { .. }));
        assert_eq!(s.units(), ("meters (m)", "kilometers (km)"));
    }

    #[test]
    fn test_swap_recomputes_displayed_result() {
        let mut s = session();
        s.set_input("1");
        s.convert().unwrap();
        assert_eq!(s.last_result().unwrap().display, "0.001");

        s.swap_units().unwrap();
        assert_eq!(s.units(), ("kilometers (km)", "meters (m)"));
        assert_eq!(s.last_result().unwrap().display, "1000");

        s.swap_units().unwrap();
        assert_eq!(s.units(), ("meters (m)", "kilometers (km)"));
    }

    #[test]
    fn test_swap_without_result_does_not_convert() {
        let mut s = session();
        s.set_input("not a number");
        assert!(s.swap_units().is_ok());
        assert!(s.last_result().is_none());
    }

    #[test]
    fn test_snapshot_lists_units() {
        let s = session();
        let snap = s.snapshot();
        assert_eq!(snap.available_units.len(), 8);
        assert_eq!(snap.available_units[0], "meters (m)");
    }
}
