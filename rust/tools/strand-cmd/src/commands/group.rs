use anyhow::{Context, Result};
use std::io::Write;

use strand::Mode;

use crate::commands::{load_items, selector_for};

pub fn run(by: Option<String>, file: String) -> Result<()> {
    let stdout = std::io::stdout();
    execute(by, &file, &mut stdout.lock())
}

fn execute<W: Write>(by: Option<String>, file: &str, out: &mut W) -> Result<()> {
    let items = load_items(file)?;
    let groups = items.group_by(selector_for(by));

    writeln!(
        out,
        "{} groups, {} elements",
        groups.len(),
        groups.total_items()
    )?;
    for (key, size) in groups.group_sizes() {
        writeln!(out, "  {key}: {size}")?;
    }

    let structure = groups
        .to_structure(Mode::Json)
        .with_context(|| "Failed to convert groups")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&structure)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::*;

    #[test]
    fn test_group_by_field() {
        let file = json_file(r#"[{"d": "Eng"}, {"d": "Sales"}, {"d": "Eng"}, {"x": 1}]"#);
        let mut out = Vec::new();
        execute(Some("d".to_string()), &path_of(&file), &mut out).unwrap();
        let text = utf8(out);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("3 groups, 4 elements"));
        assert_eq!(lines.next(), Some("  Eng: 2"));
        assert_eq!(lines.next(), Some("  Sales: 1"));
        assert_eq!(lines.next(), Some("  null: 1"));

        let json_start = text.find('{').unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text[json_start..]).unwrap();
        assert_eq!(parsed["Eng"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["Sales"][0]["d"], "Sales");
    }

    #[test]
    fn test_group_by_identity() {
        let file = json_file("[1, 2, 1]");
        let mut out = Vec::new();
        execute(None, &path_of(&file), &mut out).unwrap();
        let text = utf8(out);
        assert!(text.starts_with("2 groups, 3 elements\n  1: 2\n  2: 1\n"));
    }
}
