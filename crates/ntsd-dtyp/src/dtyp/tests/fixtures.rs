//! Hand-assembled descriptor buffers.

use crate::dtyp::core::{Ace, AceType, Acl, Guid, ObjectAceData, SecurityDescriptor, Sid};

/// A descriptor laid out owner, group, DACL (no SACL), the way directory
/// servers return it when the SACL is not requested.
///
/// - control `0x8404`: `SE_DACL_PRESENT | SE_DACL_AUTO_INHERITED | SE_SELF_RELATIVE`
/// - owner `S-1-5-21-1-2-3-512` at 20, group `S-1-5-21-1-2-3-513` at 48
/// - DACL at 76 with three entries:
///   1. allow `0x000F01FF` to `S-1-5-18`
///   2. object allow `0x100` to `S-1-1-0`, object type
///      `00299570-246d-11d0-a768-00aa006e0529`, inherited object type
///      `bf967aba-0de6-11d0-a285-00aa003049e2`, flags `0x12`
///   3. object deny `0x10` to `S-1-5-11`, object type
///      `bf967aba-0de6-11d0-a285-00aa003049e2`
pub const SERVER_ORDER_HEX: &str = concat!(
    // header
    "01000484",
    "14000000",
    "30000000",
    "00000000",
    "4c000000",
    // owner
    "010500000000000515000000010000000200000003000000",
    "00020000",
    // group
    "010500000000000515000000010000000200000003000000",
    "01020000",
    // DACL header: revision 4, size 124, 3 entries
    "04007c0003000000",
    // ACE 1
    "00001400ff010f00",
    "010100000000000512000000",
    // ACE 2
    "05123800000100000300000070952900",
    "6d24d011a76800aa006e0529",
    "ba7a96bfe60dd011a28500aa003049e2",
    "010100000000000100000000",
    // ACE 3
    "0600280010000000",
    "01000000",
    "ba7a96bfe60dd011a28500aa003049e2",
    "01010000000000050b000000",
);

#[must_use]
pub fn server_order_bytes() -> Vec<u8> {
    hex::decode(SERVER_ORDER_HEX).expect("fixture hex is valid")
}

pub fn sid(text: &str) -> Sid {
    text.parse().expect("fixture identifier is valid")
}

pub fn guid(text: &str) -> Guid {
    text.parse().expect("fixture GUID is valid")
}

pub fn user_class() -> Guid {
    guid("bf967aba-0de6-11d0-a285-00aa003049e2")
}

pub fn force_change_password() -> Guid {
    guid("00299570-246d-11d0-a768-00aa006e0529")
}

/// The value `SERVER_ORDER_HEX` decodes to.
pub fn server_order_descriptor() -> SecurityDescriptor {
    let dacl = Acl::new(
        4,
        vec![
            Ace::new(AceType::AccessAllowed, 0, 0x000F_01FF, sid("S-1-5-18")).expect("plain"),
            Ace::new_object(
                AceType::AccessAllowedObject,
                0x12,
                0x0000_0100,
                ObjectAceData::new(Some(force_change_password()), Some(user_class())),
                sid("S-1-1-0"),
            )
            .expect("object"),
            Ace::new_object(
                AceType::AccessDeniedObject,
                0,
                0x0000_0010,
                ObjectAceData::new(Some(user_class()), None),
                sid("S-1-5-11"),
            )
            .expect("object"),
        ],
    );
    SecurityDescriptor {
        revision: 1,
        control: 0x8404,
        owner: Some(sid("S-1-5-21-1-2-3-512")),
        group: Some(sid("S-1-5-21-1-2-3-513")),
        system_acl: None,
        discretionary_acl: Some(dacl),
    }
}

/// A descriptor with every component present and audit entries in the SACL.
pub fn full_descriptor() -> SecurityDescriptor {
    let sacl = Acl::new(
        4,
        vec![
            Ace::new(AceType::SystemAudit, 0xC0, 0x000F_003F, sid("S-1-1-0")).expect("plain"),
            Ace::new_object(
                AceType::SystemAuditObject,
                0x52,
                0x0000_0020,
                ObjectAceData::new(None, Some(user_class())),
                sid("S-1-1-0"),
            )
            .expect("object"),
        ],
    );
    let dacl = Acl::new(
        2,
        vec![
            Ace::new(AceType::AccessDenied, 0, 0x0001_0000, sid("S-1-5-7")).expect("plain"),
            Ace::new(
                AceType::AccessAllowed,
                0x02,
                0x001F_01FF,
                sid("S-1-5-32-544"),
            )
            .expect("plain"),
            Ace::new(AceType::SystemAlarm, 0, 0x1, sid("S-1-5-18")).expect("plain"),
        ],
    );
    SecurityDescriptor::new(
        sid("S-1-5-21-3623811015-3361044348-30300820-512"),
        sid("S-1-5-32-544"),
        sacl,
        dacl,
    )
}
