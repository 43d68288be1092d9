use thiserror::Error;

/// Driver-level errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    DtypError(#[from] ntsd_dtyp::error::DtypError),

    #[error(transparent)]
    DecodeError(#[from] ntsd_dtyp::dtyp::DecodeError),

    #[error(transparent)]
    CoreError(#[from] ntsd_core::error::CoreError),

    #[error(transparent)]
    LdifError(#[from] crate::ldif::LdifError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Hex decode error: {0}")]
    HexError(#[from] hex::FromHexError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
