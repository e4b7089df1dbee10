use anyhow::{Context, Result};
use std::io::Write;

use crate::commands::{load_items, selector_for};

pub fn run(by: Option<String>, file: String) -> Result<()> {
    let stdout = std::io::stdout();
    execute(by, &file, &mut stdout.lock())
}

fn execute<W: Write>(by: Option<String>, file: &str, out: &mut W) -> Result<()> {
    let items = load_items(file)?;
    let average = items
        .average(selector_for(by))
        .with_context(|| format!("Failed to average elements of {}", file))?;
    writeln!(out, "{average}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::*;

    #[test]
    fn test_average() {
        let file = json_file("[1, 2, 3, 4, 5]");
        let mut out = Vec::new();
        execute(None, &path_of(&file), &mut out).unwrap();
        assert_eq!(utf8(out), "3\n");
    }

    #[test]
    fn test_average_by_field() {
        let file = json_file(r#"[{"p": 1.5}, {"p": 2.5}]"#);
        let mut out = Vec::new();
        execute(Some("p".into()), &path_of(&file), &mut out).unwrap();
        assert_eq!(utf8(out), "2\n");
    }

    #[test]
    fn test_average_errors() {
        let file = json_file(r#"[{"p": 1}, {"q": 2}]"#);
        let mut out = Vec::new();
        let err = execute(Some("p".into()), &path_of(&file), &mut out).unwrap_err();
        let kind = err.downcast_ref::<strand::Error>().unwrap().kind();
        assert!(matches!(kind, strand::ErrorKind::KeyMissing { .. }));

        let file = json_file("[]");
        assert!(execute(None, &path_of(&file), &mut out).is_err());
    }
}
