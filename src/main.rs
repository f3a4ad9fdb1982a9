//! Unit Converter (uconv)
//!
//! An MCP server exposing length and weight conversion over stdio.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use uconv::build_info;
use uconv::config;
use uconv::mcp::ConverterService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr; stdout carries the MCP stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uconv=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let (engine, table_source) = config::load_engine()?;
    tracing::info!("Unit table: {}", table_source);

    let service = ConverterService::new(engine, table_source);

    eprintln!("Starting MCP server on stdio...");
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
