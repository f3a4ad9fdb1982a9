//! MCP server module
//!
//! Exposes the conversion engine as MCP tools over stdio.

mod server;

pub use server::ConverterService;
