//! Security descriptor encoding.
//!
//! Encoding is the mirror of [`crate::dtyp::parse`]: each record writes its
//! own span and the descriptor concatenates them after its header. Byte
//! identity with the original input is not guaranteed (offsets may move),
//! but decoding the output yields an equal value.

mod encoder;

pub use encoder::{encode_ace, encode_acl, encode_descriptor, encode_guid, encode_sid};
