//! Security identifier (MS-DTYP §2.4.2).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use ntsd_core::error::CoreError;

use super::canonical::Canonical;
use crate::error::{DtypError, DtypResult};

/// Largest value the 6-byte identifier authority can hold.
pub const MAX_AUTHORITY: u64 = (1 << 48) - 1;

/// Size of the fixed part of an encoded identifier (revision, count, authority).
pub const SID_HEADER_LEN: usize = 8;

/// A security identifier: an authority plus an ordered list of sub-authorities.
///
/// The sub-authority count is not stored; it is always the length of
/// `sub_authorities`. Construct through [`Sid::new`] so the count fits in a
/// byte and the authority in 48 bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid {
    revision: u8,
    authority: u64,
    sub_authorities: Vec<u32>,
}

impl Sid {
    /// Creates an identifier.
    ///
    /// ## Errors
    /// Returns an error if `authority` does not fit in 48 bits or there are
    /// more than 255 sub-authorities.
    pub fn new(revision: u8, authority: u64, sub_authorities: Vec<u32>) -> DtypResult<Self> {
        if authority > MAX_AUTHORITY {
            return Err(DtypError::InvalidValue(format!(
                "identifier authority {authority} does not fit in 48 bits"
            )));
        }
        if u8::try_from(sub_authorities.len()).is_err() {
            return Err(DtypError::InvalidValue(format!(
                "identifier has {} sub-authorities, at most 255 allowed",
                sub_authorities.len()
            )));
        }
        Ok(Self {
            revision,
            authority,
            sub_authorities,
        })
    }

    /// Caller guarantees `authority <= MAX_AUTHORITY` and at most 255
    /// sub-authorities.
    pub(crate) fn from_parts(revision: u8, authority: u64, sub_authorities: Vec<u32>) -> Self {
        debug_assert!(authority <= MAX_AUTHORITY && sub_authorities.len() <= 255);
        Self {
            revision,
            authority,
            sub_authorities,
        }
    }

    #[must_use]
    pub fn revision(&self) -> u8 {
        self.revision
    }

    #[must_use]
    pub fn authority(&self) -> u64 {
        self.authority
    }

    #[must_use]
    pub fn sub_authorities(&self) -> &[u32] {
        &self.sub_authorities
    }

    /// Number of sub-authorities, as written in the encoded count byte.
    #[must_use]
    pub fn sub_authority_count(&self) -> u8 {
        // Bounded by `Sid::new`.
        u8::try_from(self.sub_authorities.len()).unwrap_or(u8::MAX)
    }

    /// The last sub-authority, which is the relative identifier for domain
    /// principals.
    #[must_use]
    pub fn rid(&self) -> Option<u32> {
        self.sub_authorities.last().copied()
    }

    /// Exact encoded length in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        SID_HEADER_LEN + 4 * self.sub_authorities.len()
    }

    /// Returns the `S-R-A-S1-S2...` form with every field in decimal.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    /// Display name for a handful of well-known identifiers.
    #[must_use]
    pub fn well_known_name(&self) -> Option<&'static str> {
        let name = match (self.authority, self.sub_authorities.as_slice()) {
            (0, [0]) => "Nobody",
            (1, [0]) => "Everyone",
            (3, [0]) => "Creator Owner",
            (3, [1]) => "Creator Group",
            (5, [7]) => "Anonymous Logon",
            (5, [9]) => "Enterprise Domain Controllers",
            (5, [10]) => "Principal Self",
            (5, [11]) => "Authenticated Users",
            (5, [18]) => "Local System",
            (5, [19]) => "Local Service",
            (5, [20]) => "Network Service",
            (5, [32, 544]) => "BUILTIN\\Administrators",
            (5, [32, 545]) => "BUILTIN\\Users",
            (5, [32, 554]) => "BUILTIN\\Pre-Windows 2000 Compatible Access",
            (5, [32, 560]) => "BUILTIN\\Windows Authorization Access Group",
            (5, [21, .., 512]) => "Domain Admins",
            (5, [21, .., 513]) => "Domain Users",
            (5, [21, .., 516]) => "Domain Controllers",
            (5, [21, .., 518]) => "Schema Admins",
            (5, [21, .., 519]) => "Enterprise Admins",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.authority)?;
        for sub in &self.sub_authorities {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

impl Canonical for Sid {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_canonical_string())
    }
}

impl FromStr for Sid {
    type Err = DtypError;

    /// Parses `S-R-A[-S]*`. The authority may be decimal or `0x` hex.
    ///
    /// Every number must be plain digits; signs and whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            let message = format!("not an identifier string: {s}");
            DtypError::from(CoreError::InvalidInput(message))
        };

        let mut parts = s.split('-');
        match parts.next() {
            Some(prefix) if prefix.eq_ignore_ascii_case("S") => {}
            _ => return Err(invalid()),
        }

        let revision = parts
            .next()
            .and_then(|p| digits(p, 10))
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        let authority_str = parts.next().ok_or_else(invalid)?;
        let authority = match authority_str
            .strip_prefix("0x")
            .or_else(|| authority_str.strip_prefix("0X"))
        {
            Some(hex) => digits(hex, 16).and_then(|h| u64::from_str_radix(h, 16).ok()),
            None => digits(authority_str, 10).and_then(|d| d.parse::<u64>().ok()),
        }
        .ok_or_else(invalid)?;

        let sub_authorities = parts
            .map(|p| {
                digits(p, 10)
                    .and_then(|d| d.parse::<u32>().ok())
                    .ok_or_else(invalid)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(revision, authority, sub_authorities)
    }
}

/// Returns `text` if it is a non-empty run of digits in `radix`.
fn digits(text: &str, radix: u32) -> Option<&str> {
    (!text.is_empty() && text.chars().all(|c| c.is_digit(radix))).then_some(text)
}
