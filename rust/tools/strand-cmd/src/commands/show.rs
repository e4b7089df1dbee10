use anyhow::{Context, Result};
use std::io::Write;

use crate::commands::load_items;

pub fn run(file: String) -> Result<()> {
    let stdout = std::io::stdout();
    execute(&file, &mut stdout.lock())
}

fn execute<W: Write>(file: &str, out: &mut W) -> Result<()> {
    let items = load_items(file)?;
    items
        .dump_to(out)
        .with_context(|| "Failed to write collection dump")
}
