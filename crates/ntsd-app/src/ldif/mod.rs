//! LDIF reading (RFC 2849).
//!
//! Reads directory exports so a descriptor can be fetched by DN without a
//! live directory connection.
//!
//! ## Usage
//!
//! ```rust
//! use ntsd_app::ldif::parse;
//!
//! let input = "\
//! dn: CN=Alice,DC=example,DC=com\n\
//! cn: Alice\n\
//! nTSecurityDescriptor:: AQAEgA==\n";
//!
//! let entries = parse(input).unwrap();
//! assert_eq!(entries[0].get("ntsecuritydescriptor"), Some(&[1u8, 0, 4, 0x80][..]));
//! ```
//!
//! ## Features
//!
//! - Handles line folding/unfolding
//! - Skips `version:` lines and `#` comments
//! - Decodes `attr:: base64` values; `attr:< url` values are rejected

mod error;
mod lexer;
mod parser;

pub use error::{LdifError, LdifErrorKind, LdifResult};
pub use lexer::{AttrLine, AttrValue, logical_lines, parse_attr_line};
pub use parser::{LdifEntry, parse};
