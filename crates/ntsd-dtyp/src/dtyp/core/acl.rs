//! Access-control list (MS-DTYP §2.4.5).

use super::ace::Ace;

/// Size of the ACL header: revision, size, entry count.
pub const ACL_HEADER_LEN: usize = 8;

/// `ACL_REVISION`, for lists without object entries.
pub const ACL_REVISION: u16 = 2;

/// `ACL_REVISION_DS`, required once any object entry is present.
pub const ACL_REVISION_DS: u16 = 4;

/// An ordered list of access-control entries.
///
/// Entry order is evaluation order and is preserved exactly. Size and
/// count are derived from `entries` at encode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Acl {
    pub revision: u16,
    pub entries: Vec<Ace>,
}

impl Acl {
    #[must_use]
    pub fn new(revision: u16, entries: Vec<Ace>) -> Self {
        Self { revision, entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact encoded length in bytes, which may exceed the `u16` size field.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        ACL_HEADER_LEN + self.entries.iter().map(Ace::encoded_len).sum::<usize>()
    }

    /// Whether any entry uses the object layout.
    #[must_use]
    pub fn has_object_entries(&self) -> bool {
        self.entries.iter().any(|ace| ace.ace_type().is_object())
    }
}
