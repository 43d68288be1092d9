//! LDIF parse error types.

use std::fmt;

/// Result type for LDIF parsing operations.
pub type LdifResult<T> = Result<T, LdifError>;

/// An error that occurred during LDIF parsing.
#[derive(Debug, Clone)]
pub struct LdifError {
    /// The kind of error.
    pub kind: LdifErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl LdifError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: LdifErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for LdifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for LdifError {}

/// The kind of LDIF parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdifErrorKind {
    /// Line has no `:` separator.
    MissingSeparator,
    /// Record does not start with a `dn:` line.
    MissingDn,
    /// Base64 value failed to decode.
    InvalidBase64,
    /// Value form the reader does not handle (`:<` URLs).
    Unsupported,
}

impl fmt::Display for LdifErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "missing separator"),
            Self::MissingDn => write!(f, "missing dn"),
            Self::InvalidBase64 => write!(f, "invalid base64"),
            Self::Unsupported => write!(f, "unsupported value"),
        }
    }
}
