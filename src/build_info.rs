//! Build metadata stamped in by `build.rs`

use std::fmt;

use serde::Serialize;

const BUILD_NUMBER_RAW: Option<&str> = option_env!("UCONV_BUILD_NUMBER");
const BUILD_TIMESTAMP_RAW: Option<&str> = option_env!("UCONV_BUILD_TIMESTAMP");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of the running binary, reported by the banner and the status tool
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when built without the build script's counter
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: VERSION,
            build_number: parse_build_number(BUILD_NUMBER_RAW),
            build_timestamp: BUILD_TIMESTAMP_RAW.unwrap_or("unknown"),
        }
    }
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} (build {}, {})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Startup banner on stderr; stdout is reserved for the MCP transport
pub fn print_startup_banner() {
    let rule = "=".repeat(47);
    eprintln!("{}", rule);
    eprintln!("  Unit Converter: {}", BuildInfo::current());
    eprintln!("{}", rule);
}
