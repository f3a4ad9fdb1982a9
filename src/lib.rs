//! Unit Converter (uconv) Library
//!
//! Length and weight conversion engine plus the MCP tools built on it.

pub mod build_info;
pub mod config;
pub mod conversion;
pub mod mcp;
pub mod tools;
