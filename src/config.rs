//! Startup configuration
//!
//! Resolves which unit table the process runs with.

use std::path::PathBuf;
use std::sync::Arc;

use crate::conversion::{ConversionEngine, TableResult, UnitTable};

/// Environment variable naming a JSON unit table file
pub const UNIT_TABLE_ENV: &str = "UCONV_UNIT_TABLE";

/// Label reported when no table file is configured
pub const BUILTIN_SOURCE: &str = "builtin";

/// Get the unit table path from the environment, if set and non-empty
pub fn unit_table_path() -> Option<PathBuf> {
    std::env::var(UNIT_TABLE_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Build the engine for this process along with a label for its table source.
///
/// A configured file that fails to load or validate is an error; the
/// built-in table is not substituted for it.
pub fn load_engine() -> TableResult<(ConversionEngine, String)> {
    load_engine_from(unit_table_path())
}

/// Build the engine from an explicit table path, or the built-in table
pub fn load_engine_from(path: Option<PathBuf>) -> TableResult<(ConversionEngine, String)> {
    match path {
        Some(path) => {
            let table = UnitTable::load(&path)?;
            Ok((
                ConversionEngine::new(Arc::new(table)),
                path.display().to_string(),
            ))
        }
        None => Ok((ConversionEngine::builtin(), BUILTIN_SOURCE.to_string())),
    }
}
