//! Security descriptor value types.
//!
//! Every type here is an immutable value once decoded. Sizes, counts and
//! offsets that appear on the wire are derived from the live structure when
//! encoding and are never stored.

mod ace;
mod acl;
mod canonical;
mod descriptor;
pub mod flags;
mod guid;
mod sid;

pub use ace::{ACE_HEADER_LEN, Ace, AceType, OBJECT_FLAGS_LEN, ObjectAceData};
pub use acl::{ACL_HEADER_LEN, ACL_REVISION, ACL_REVISION_DS, Acl};
pub use canonical::{Canonical, canonical_eq};
pub use descriptor::{DESCRIPTOR_HEADER_LEN, SECURITY_DESCRIPTOR_REVISION, SecurityDescriptor};
pub use guid::{GUID_LEN, Guid};
pub use sid::{MAX_AUTHORITY, SID_HEADER_LEN, Sid};
