//! GUID as laid out in object ACEs (MS-DTYP §2.3.4.2).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use ntsd_core::error::CoreError;

use super::canonical::Canonical;
use crate::error::DtypError;

/// Encoded size of a GUID.
pub const GUID_LEN: usize = 16;

/// A 128-bit identifier scoping an object ACE to a schema class or attribute.
///
/// The first three fields are little-endian on the wire; `clock_seq` and
/// `node` are opaque byte strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Guid {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_hi_and_version: u16,
    pub clock_seq: [u8; 2],
    pub node: [u8; 6],
}

impl Guid {
    #[must_use]
    pub const fn new(
        time_low: u32,
        time_mid: u16,
        time_hi_and_version: u16,
        clock_seq: [u8; 2],
        node: [u8; 6],
    ) -> Self {
        Self {
            time_low,
            time_mid,
            time_hi_and_version,
            clock_seq,
            node,
        }
    }

    /// Returns the five fields as unpadded lowercase hex joined by hyphens.
    ///
    /// `clock_seq` and `node` are read as big-endian integers, so leading zero
    /// nibbles are dropped like in the other fields. Use [`Guid::hyphenated`]
    /// for the fixed-width form.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    /// Returns the standard zero-padded `8-4-4-4-12` form.
    #[must_use]
    pub fn hyphenated(&self) -> String {
        self.to_uuid().hyphenated().to_string()
    }

    #[must_use]
    pub fn to_uuid(&self) -> uuid::Uuid {
        uuid::Uuid::from_fields(
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            &self.tail(),
        )
    }

    fn tail(&self) -> [u8; 8] {
        let mut tail = [0u8; 8];
        tail[..2].copy_from_slice(&self.clock_seq);
        tail[2..].copy_from_slice(&self.node);
        tail
    }

    fn node_value(&self) -> u64 {
        self.node
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    }
}

impl From<uuid::Uuid> for Guid {
    fn from(value: uuid::Uuid) -> Self {
        let (time_low, time_mid, time_hi_and_version, tail) = value.as_fields();
        let mut clock_seq = [0u8; 2];
        let mut node = [0u8; 6];
        clock_seq.copy_from_slice(&tail[..2]);
        node.copy_from_slice(&tail[2..]);
        Self {
            time_low,
            time_mid,
            time_hi_and_version,
            clock_seq,
            node,
        }
    }
}

impl From<Guid> for uuid::Uuid {
    fn from(value: Guid) -> Self {
        value.to_uuid()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:x}-{:x}-{:x}-{:x}-{:x}",
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            u16::from_be_bytes(self.clock_seq),
            self.node_value()
        )
    }
}

impl Canonical for Guid {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_canonical_string())
    }
}

impl FromStr for Guid {
    type Err = DtypError;

    /// Parses the standard padded text form (with or without braces).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self::from)
            .map_err(|e| CoreError::InvalidInput(format!("not a GUID string: {s}: {e}")).into())
    }
}
