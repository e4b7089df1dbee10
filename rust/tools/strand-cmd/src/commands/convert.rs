use anyhow::{Context, Result};
use std::io::Write;

use strand::Mode;

use crate::commands::load_items;

pub fn run(mode: Option<String>, file: String) -> Result<()> {
    let stdout = std::io::stdout();
    execute(mode.as_deref(), &file, &mut stdout.lock())
}

fn execute<W: Write>(mode: Option<&str>, file: &str, out: &mut W) -> Result<()> {
    let mode = Mode::parse_optional(mode)?;
    let items = load_items(file)?;
    let structure = items
        .to_structure(mode)
        .with_context(|| format!("Failed to convert elements of {}", file))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&structure)?)?;
    Ok(())
}
