//! Security descriptor codec (MS-DTYP §2.4).
//!
//! This module decodes the self-relative binary security descriptor stored in
//! the `nTSecurityDescriptor` attribute of directory objects, and encodes one
//! back.
//!
//! ## Overview
//!
//! A descriptor is a 20-byte header (revision, control bits, four offsets)
//! followed by an owner and group identifier and two access-control lists:
//! the SACL (audit) and the DACL (access). Each list is an ordered sequence of
//! entries; each entry names a trustee identifier and, for object entries,
//! the schema GUIDs it applies to.
//!
//! ## Usage
//!
//! ### Decoding
//!
//! ```rust
//! use ntsd_dtyp::dtyp::decode_descriptor;
//!
//! let bytes = [
//!     0x01, 0x00, 0x00, 0x80, // revision, control (self-relative)
//!     0x14, 0x00, 0x00, 0x00, // owner at 20
//!     0x00, 0x00, 0x00, 0x00, // no group
//!     0x00, 0x00, 0x00, 0x00, // no SACL
//!     0x00, 0x00, 0x00, 0x00, // no DACL
//!     0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x12, 0x00, 0x00, 0x00,
//! ];
//!
//! let sd = decode_descriptor(&bytes).unwrap();
//! assert_eq!(sd.owner.unwrap().to_string(), "S-1-5-18");
//! ```
//!
//! ### Encoding
//!
//! ```rust
//! use ntsd_dtyp::dtyp::{Ace, AceType, Acl, SecurityDescriptor, Sid, encode_descriptor};
//!
//! let system: Sid = "S-1-5-18".parse().unwrap();
//! let allow = Ace::new(AceType::AccessAllowed, 0, 0x000F_01FF, system.clone()).unwrap();
//! let dacl = Acl::new(2, vec![allow]);
//! let sd = SecurityDescriptor::new(system.clone(), system, Acl::default(), dacl);
//!
//! let bytes = encode_descriptor(&sd).unwrap();
//! assert_eq!(bytes.len(), sd.encoded_len());
//! ```
//!
//! ## Round-Trip Fidelity
//!
//! Decoding an encoded value gives back an equal value. The encoder always
//! lays components out as SACL, DACL, owner, group, so re-encoding a decoded
//! buffer may move components and change offsets.
//!
//! ## Submodules
//!
//! - [`core`] - Value types (`Sid`, `Guid`, `Ace`, `Acl`, `SecurityDescriptor`)
//! - [`parse`] - Decoding functions and error types
//! - [`build`] - Encoding functions
//! - [`tree`] - Presentation tree

pub mod build;
pub mod core;
pub mod parse;
pub mod tree;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use self::core::{
    Ace, AceType, Acl, Canonical, Guid, ObjectAceData, SecurityDescriptor, Sid, canonical_eq,
};
pub use build::{encode_ace, encode_acl, encode_descriptor, encode_guid, encode_sid};
pub use parse::{
    DecodeError, DecodeErrorKind, DecodeResult, decode_ace, decode_acl, decode_descriptor,
    decode_guid, decode_sid,
};
pub use tree::{TreeNode, TreeValue};
