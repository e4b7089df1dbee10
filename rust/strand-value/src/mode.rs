use std::str::FromStr;

use strand_common::{Error, Result};

/// Flavor of structural conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keeps mapping keys as converted values and library scalars as text.
    #[default]
    Native,
    /// Every mapping key becomes text and the whole result is
    /// JSON-serializable.
    Json,
}

impl Mode {
    /// Parses an optional mode name; an absent name selects [`Mode::Native`].
    pub fn parse_optional(name: Option<&str>) -> Result<Mode> {
        name.map_or(Ok(Mode::Native), str::parse)
    }

    pub fn is_json(self) -> bool {
        self == Mode::Json
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "json" => Ok(Mode::Json),
            "native" | "" => Ok(Mode::Native),
            other => Err(Error::invalid_arg(
                "mode",
                format!("unknown conversion mode '{other}', expected 'json' or 'native'"),
            )),
        }
    }
}
