use anyhow::{Context, Result};
use std::io::Write;

use strand::{Mode, Structurizer, Value};

use crate::commands::load_items;

pub fn run(field: Option<String>, equals: Option<String>, file: String) -> Result<()> {
    let stdout = std::io::stdout();
    execute(field, equals, &file, &mut stdout.lock())
}

fn execute<W: Write>(
    field: Option<String>,
    equals: Option<String>,
    file: &str,
    out: &mut W,
) -> Result<()> {
    let items = load_items(file)?;
    let found = match (field, equals) {
        (Some(field), Some(equals)) => {
            let expected: serde_json::Value = serde_json::from_str(&equals)
                .with_context(|| format!("Failed to parse --equals as JSON: {}", equals))?;
            let expected = Value::from_json(&expected);
            items
                .first_or_fail_where(|item| item.lookup(&field).is_ok_and(|v| v == expected))
                .with_context(|| format!("No element with {} equal to {}", field, equals))?
        }
        _ => items.first_or_fail().with_context(|| "No first element")?,
    };

    let structure = Structurizer::new().convert(found, Mode::Json)?;
    writeln!(out, "{}", serde_json::to_string(&structure)?)?;
    Ok(())
}
