//! Security descriptor decoding.
//!
//! ## Usage
//!
//! ```rust
//! use ntsd_dtyp::dtyp::parse::decode_sid;
//!
//! let sid = decode_sid(&[0x01, 0x01, 0, 0, 0, 0, 0, 0x05, 0x12, 0, 0, 0], 0).unwrap();
//! assert_eq!(sid.to_string(), "S-1-5-18");
//! ```
//!
//! Decoding is all-or-nothing: a failure anywhere aborts the enclosing
//! record, and [`decode_descriptor`] never returns a partial descriptor.

mod decoder;
mod error;
mod reader;

pub use decoder::{decode_ace, decode_acl, decode_descriptor, decode_guid, decode_sid};
pub use error::{DecodeError, DecodeErrorKind, DecodeResult};
