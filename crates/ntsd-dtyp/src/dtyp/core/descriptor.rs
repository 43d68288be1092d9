//! Self-relative security descriptor (MS-DTYP §2.4.6).

use super::acl::Acl;
use super::flags::control::{SE_DACL_PRESENT, SE_SACL_PRESENT, SE_SELF_RELATIVE};
use super::sid::Sid;

/// Size of the fixed header: revision, control, and four offsets.
pub const DESCRIPTOR_HEADER_LEN: usize = 20;

pub const SECURITY_DESCRIPTOR_REVISION: u16 = 1;

/// A security descriptor: owner, group, and the two access-control lists.
///
/// Any component may be absent, which is encoded as a zero offset. The
/// header offsets are not stored; the encoder lays components out and
/// computes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SecurityDescriptor {
    pub revision: u16,
    /// Control bits, kept opaque. See [`super::flags::control`].
    pub control: u16,
    pub owner: Option<Sid>,
    pub group: Option<Sid>,
    /// Audit entries (SACL).
    pub system_acl: Option<Acl>,
    /// Access entries (DACL).
    pub discretionary_acl: Option<Acl>,
}

impl SecurityDescriptor {
    /// Creates a descriptor with every component present, with control bits
    /// marking both lists present and the layout self-relative.
    #[must_use]
    pub fn new(owner: Sid, group: Sid, system_acl: Acl, discretionary_acl: Acl) -> Self {
        Self {
            revision: SECURITY_DESCRIPTOR_REVISION,
            control: SE_SELF_RELATIVE | SE_SACL_PRESENT | SE_DACL_PRESENT,
            owner: Some(owner),
            group: Some(group),
            system_acl: Some(system_acl),
            discretionary_acl: Some(discretionary_acl),
        }
    }

    /// Whether `flag` is set in the control field.
    #[must_use]
    pub fn has_control(&self, flag: u16) -> bool {
        self.control & flag == flag
    }

    /// Exact encoded length in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        DESCRIPTOR_HEADER_LEN
            + self.system_acl.as_ref().map_or(0, Acl::encoded_len)
            + self.discretionary_acl.as_ref().map_or(0, Acl::encoded_len)
            + self.owner.as_ref().map_or(0, Sid::encoded_len)
            + self.group.as_ref().map_or(0, Sid::encoded_len)
    }
}
