//! Debug dumps of a collection's contents.

use std::fmt;
use std::io::{self, Write};

use crate::collection::Collection;

impl<T: fmt::Debug> Collection<T> {
    /// Writes a readable listing of the collection: its length and every
    /// element with its index.
    pub fn dump_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "=== Collection Dump ===")?;
        writeln!(out, "Collection: {self}")?;
        writeln!(out, "Type: Collection<{}>", std::any::type_name::<T>())?;
        writeln!(out, "Length: {}", self.len())?;
        writeln!(out, "Elements:")?;
        if self.is_empty() {
            writeln!(out, "  (empty collection)")?;
        }
        for (i, item) in self.iter().enumerate() {
            writeln!(out, "  [{i}]: {item:?}")?;
        }
        writeln!(out, "=== End Collection Dump ===")?;
        writeln!(out)
    }

    /// Dumps to standard output.
    pub fn dump(&self) {
        let stdout = io::stdout();
        if let Err(e) = self.dump_to(&mut stdout.lock()) {
            log::warn!("collection dump failed: {e}");
        }
    }

    /// Dumps to standard output and asks the caller to stop.
    ///
    /// The returned [`Halt`] does nothing by itself; the caller either calls
    /// [`Halt::exit`] or unwinds in its own way.
    pub fn dump_and_halt(&self) -> Halt {
        self.dump();
        Halt {
            message: format!("halted after dumping {} elements", self.len()),
            code: 1,
        }
    }
}

/// A request to terminate after a debug dump.
#[must_use = "a halt request does nothing unless acted upon"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halt {
    message: String,
    code: i32,
}

impl Halt {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit status used by [`exit`](Self::exit).
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn exit(self) -> ! {
        eprintln!("{}", self.message);
        std::process::exit(self.code)
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use strand_value::Value;

    use super::*;

    fn dumped<T: fmt::Debug>(c: &Collection<T>) -> String {
        let mut out = Vec::new();
        c.dump_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_dump_lists_elements() {
        let text = dumped(&Collection::from(vec![Value::Int(1), Value::from("two")]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=== Collection Dump ===");
        assert!(lines[2].starts_with("Collection("));
        assert!(lines[3].starts_with("Type: Collection<"));
        assert_eq!(lines[4], "Length: 2");
        assert_eq!(lines[5], "Elements:");
        assert_eq!(lines[6], "  [0]: 1");
        assert_eq!(lines[7], "  [1]: \"two\"");
        assert_eq!(lines[8], "=== End Collection Dump ===");
    }

    #[test]
    fn test_dump_empty() {
        let text = dumped(&Collection::<i32>::new());
        assert!(text.contains("Length: 0\n"));
        assert!(text.contains("  (empty collection)\n"));
    }

    #[test]
    fn test_dump_and_halt_returns_request() {
        let halt = Collection::from(vec![1, 2, 3]).dump_and_halt();
        assert_eq!(halt.code(), 1);
        assert!(halt.message().contains("3 elements"));
        assert_eq!(halt.to_string(), halt.message());
    }
}
