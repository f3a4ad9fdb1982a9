//! Utility to print the active unit table as JSON
//!
//! The output is accepted as-is by `UCONV_UNIT_TABLE`, so it doubles as a
//! starting point for a custom table.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (engine, source) = uconv::config::load_engine()?;
    eprintln!("Unit table source: {}", source);
    println!("{}", engine.table().to_json_pretty()?);
    Ok(())
}
