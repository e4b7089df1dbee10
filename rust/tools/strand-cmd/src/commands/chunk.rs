use anyhow::{Context, Result};
use std::io::Write;

use crate::commands::load_items;

pub fn run(size: i64, file: String) -> Result<()> {
    let stdout = std::io::stdout();
    execute(size, &file, &mut stdout.lock())
}

fn execute<W: Write>(size: i64, file: &str, out: &mut W) -> Result<()> {
    let items = load_items(file)?;
    let chunks = items
        .chunk(size)
        .with_context(|| format!("Failed to split into chunks of {}", size))?;
    for chunk in chunks {
        writeln!(out, "{}", chunk.to_text()?)?;
    }
    Ok(())
}
