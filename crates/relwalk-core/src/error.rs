//! Error types for relwalk operations.
//!
//! Traversal itself never fails on absent data: a nil pointer simply yields
//! nothing. The errors below are caller contract breaches (a path or a field
//! descriptor that does not fit the graph it is applied to) and are reported
//! immediately, before any partial output is handed back.

use std::fmt;

/// The primary error type for all relwalk operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A relation path does not fit the graph it was applied to
    Path(PathError),
    /// A field descriptor points at a slot that cannot be serialized
    Type(TypeError),
    /// Custom error with message
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub kind: PathErrorKind,
    /// Name of the record type the failing step was applied to
    pub record_type: &'static str,
    /// Position of the failing step within the path, if known
    pub step: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathErrorKind {
    /// Field index does not exist on the resolved record type
    NoSuchField,
    /// A field step was applied to a scalar value
    NotARecord,
    /// A collection element is itself a collection
    NestedCollection,
    /// The write-preparing accessor reached a collection before the last step
    CollectionInWritePath,
    /// Elements of an interface-typed collection do not share one record type
    HeterogeneousCollection,
    /// A field name could not be found while resolving a path by name
    UnknownName,
    /// A named path crosses a slot whose record type is only known at runtime
    Unresolvable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

impl PathError {
    pub fn new(kind: PathErrorKind, record_type: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            record_type,
            step: None,
            message: message.into(),
        }
    }

    /// Attach the position of the failing step.
    #[must_use]
    pub fn at_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }
}

impl Error {
    /// Shorthand for a path error without step information.
    pub fn path(kind: PathErrorKind, record_type: &'static str, message: impl Into<String>) -> Self {
        Error::Path(PathError::new(kind, record_type, message))
    }

    /// The path error kind, if this is a path error.
    pub fn path_kind(&self) -> Option<PathErrorKind> {
        match self {
            Error::Path(p) => Some(p.kind),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Path(e) => {
                if let Some(step) = e.step {
                    write!(
                        f,
                        "Path error at step {} on '{}': {}",
                        step, e.record_type, e.message
                    )
                } else {
                    write!(f, "Path error on '{}': {}", e.record_type, e.message)
                }
            }
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Error::Path(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

/// Result type alias for relwalk operations.
pub type Result<T> = std::result::Result<T, Error>;
