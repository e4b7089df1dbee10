use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn index_out_of_range(index: isize, len: usize) -> Error {
        ErrorKind::IndexOutOfRange { index, len }.into()
    }

    pub fn item_not_found(reason: NotFoundReason) -> Error {
        ErrorKind::ItemNotFound { reason }.into()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn type_mismatch(context: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::TypeMismatch {
            context: context.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn key_missing(key: impl Into<String>) -> Error {
        ErrorKind::KeyMissing { key: key.into() }.into()
    }

    pub fn attribute_missing(type_name: impl Into<String>, attribute: impl Into<String>) -> Error {
        ErrorKind::AttributeMissing {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
        .into()
    }

    pub fn no_values(operation: impl Into<String>) -> Error {
        ErrorKind::NoValues {
            operation: operation.into(),
        }
        .into()
    }

    pub fn duplicate_key(key: impl Into<String>) -> Error {
        ErrorKind::DuplicateKey { key: key.into() }.into()
    }

    pub fn conversion(type_name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::Conversion {
            type_name: type_name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfRange { .. })
    }

    pub fn is_item_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::ItemNotFound { .. })
    }

    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind(), ErrorKind::TypeMismatch { .. })
    }
}

/// Why a lookup that had to produce an element came back empty-handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The collection holds no elements at all.
    Empty,
    /// The collection is non-empty but no element satisfies the predicate.
    NoMatch,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundReason::Empty => write!(f, "the collection is empty"),
            NotFoundReason::NoMatch => write!(f, "no element satisfies the predicate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("item not found: {reason}")]
    ItemNotFound { reason: NotFoundReason },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("type mismatch in {context}: {message}")]
    TypeMismatch { context: String, message: String },

    #[error("key '{key}' is missing")]
    KeyMissing { key: String },

    #[error("'{type_name}' has no attribute '{attribute}'")]
    AttributeMissing {
        type_name: String,
        attribute: String,
    },

    #[error("{operation}: no values to aggregate")]
    NoValues { operation: String },

    #[error("duplicate key '{key}' after converting mapping keys to text")]
    DuplicateKey { key: String },

    #[error("failed to convert '{type_name}': {message}")]
    Conversion { type_name: String, message: String },

    #[error("JSON error: {source}")]
    Json { source: serde_json::Error },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        ErrorKind::Json { source: e }.into()
    }
}
