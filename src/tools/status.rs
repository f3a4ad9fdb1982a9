//! Converter Status Tool
//!
//! Runtime status and usage instructions for the converter service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const CONVERTER_INSTRUCTIONS: &str = r#"
# Unit Converter Instructions

## Categories

Two categories are supported: `length` (base unit: meters) and `weight`
(base unit: kilograms). Units never convert across categories.

## Unit Names

Units are addressed by their full display name, including the abbreviation,
exactly as returned by `list_units`:

- "meters (m)", "feet (ft)", "miles (mi)", ...
- "kilograms (kg)", "pounds (lb)", "ounces (oz)", ...

Call `list_units` first if unsure. Abbreviations alone ("ft") are rejected.

## One-off Conversions

`convert` takes the category, from_unit, to_unit and the value as TEXT.
The value must be a plain non-negative decimal: digits with at most one
decimal point. No exponents ("1e3"), no thousands separators ("1,000").

Results are rounded to 6 decimal places with trailing zeros removed:
- 1 meter in feet → "3.28084"
- 10 pounds in kilograms → "4.535924"

## Session Workflow

The session tools mirror a converter form:
1. `session_select_category` (resets units to that category's defaults)
2. `session_select_units`
3. `session_set_input`
4. `session_convert`

If the input is rejected, the previous result stays in `last_result` and the
error is returned alongside it. `session_swap` exchanges from/to and
recomputes a displayed result.
"#;

/// Runtime status of the converter service
#[derive(Debug, Clone, Serialize)]
pub struct ConverterStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Unit table information
    pub unit_table_source: String,
    pub length_units: usize,
    pub weight_units: usize,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    table_source: String,
    length_units: usize,
    weight_units: usize,
}

impl StatusTracker {
    /// `table_source` is a path or "builtin"
    pub fn new(table_source: impl Into<String>, length_units: usize, weight_units: usize) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            table_source: table_source.into(),
            length_units,
            weight_units,
        }
    }

    pub fn get_status(&self) -> ConverterStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ConverterStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            unit_table_source: self.table_source.clone(),
            length_units: self.length_units,
            weight_units: self.weight_units,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_table() {
        let tracker = StatusTracker::new("builtin", 8, 7);
        let status = tracker.get_status();
        assert_eq!(status.unit_table_source, "builtin");
        assert_eq!(status.length_units, 8);
        assert_eq!(status.weight_units, 7);
        assert_eq!(status.process_id, std::process::id());
    }
}
