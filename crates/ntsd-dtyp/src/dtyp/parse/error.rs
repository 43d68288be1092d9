//! Decode error types.

use std::fmt;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// An error that occurred while decoding a security descriptor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// The kind of error.
    pub kind: DecodeErrorKind,
    /// Absolute buffer position where the failing read began.
    pub offset: usize,
    /// Additional context or message.
    pub message: String,
}

impl DecodeError {
    /// Creates a new decode error.
    #[must_use]
    pub fn new(kind: DecodeErrorKind, offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            message: message.into(),
        }
    }

    /// Creates a truncated buffer error for a read of `needed` bytes with
    /// only `available` left.
    #[must_use]
    pub fn truncated(offset: usize, what: &str, needed: usize, available: usize) -> Self {
        Self::new(
            DecodeErrorKind::TruncatedBuffer,
            offset,
            format!("{what} needs {needed} bytes, {available} available"),
        )
    }

    /// Creates an invalid offset error for a header offset outside the buffer.
    #[must_use]
    pub fn invalid_offset(field: &str, value: u32, buffer_len: usize) -> Self {
        Self::new(
            DecodeErrorKind::InvalidOffset,
            usize::try_from(value).unwrap_or(usize::MAX),
            format!("{field} offset {value} is outside the {buffer_len}-byte buffer"),
        )
    }

    /// Returns whether this is a truncated buffer error.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.kind == DecodeErrorKind::TruncatedBuffer
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}: {}: {}", self.offset, self.kind, self.message)
    }
}

impl std::error::Error for DecodeError {}

/// The kind of decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A field extends past the end of the buffer (or of its enclosing record).
    TruncatedBuffer,
    /// A descriptor header offset points outside the buffer.
    InvalidOffset,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedBuffer => write!(f, "truncated buffer"),
            Self::InvalidOffset => write!(f, "invalid offset"),
        }
    }
}
