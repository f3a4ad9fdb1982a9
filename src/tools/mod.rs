//! Converter Tools module
//!
//! Tool implementations backing the MCP server.

pub mod conversions;
pub mod converter;
pub mod status;
