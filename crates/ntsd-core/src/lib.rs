//! Shared building blocks for the `ntsd` workspace: configuration, the
//! core error type, and constants used by both the codec and the driver.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
