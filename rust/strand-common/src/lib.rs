//! Core definitions (error kinds and result helpers), relied upon by all strand-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind, NotFoundReason};
pub use result::Result;
