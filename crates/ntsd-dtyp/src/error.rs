use thiserror::Error;

use crate::dtyp::parse::DecodeError;

/// Security descriptor codec errors
#[derive(Error, Debug)]
pub enum DtypError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Encoded {what} is {len} bytes, exceeding the {max}-byte field limit")]
    Oversized {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error(transparent)]
    CoreError(#[from] ntsd_core::error::CoreError),
}

pub type DtypResult<T> = std::result::Result<T, DtypError>;
