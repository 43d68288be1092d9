//! Named bits of the opaque flag fields.
//!
//! The codec never interprets these; they label set bits in the
//! presentation tree and help callers build values.

/// Security descriptor control bits (MS-DTYP §2.4.6).
pub mod control {
    pub const SE_OWNER_DEFAULTED: u16 = 0x0001;
    pub const SE_GROUP_DEFAULTED: u16 = 0x0002;
    pub const SE_DACL_PRESENT: u16 = 0x0004;
    pub const SE_DACL_DEFAULTED: u16 = 0x0008;
    pub const SE_SACL_PRESENT: u16 = 0x0010;
    pub const SE_SACL_DEFAULTED: u16 = 0x0020;
    pub const SE_DACL_TRUSTED: u16 = 0x0040;
    pub const SE_SERVER_SECURITY: u16 = 0x0080;
    pub const SE_DACL_AUTO_INHERIT_REQ: u16 = 0x0100;
    pub const SE_SACL_AUTO_INHERIT_REQ: u16 = 0x0200;
    pub const SE_DACL_AUTO_INHERITED: u16 = 0x0400;
    pub const SE_SACL_AUTO_INHERITED: u16 = 0x0800;
    pub const SE_DACL_PROTECTED: u16 = 0x1000;
    pub const SE_SACL_PROTECTED: u16 = 0x2000;
    pub const SE_RM_CONTROL_VALID: u16 = 0x4000;
    pub const SE_SELF_RELATIVE: u16 = 0x8000;

    pub const NAMES: &[(u16, &str)] = &[
        (SE_OWNER_DEFAULTED, "SE_OWNER_DEFAULTED"),
        (SE_GROUP_DEFAULTED, "SE_GROUP_DEFAULTED"),
        (SE_DACL_PRESENT, "SE_DACL_PRESENT"),
        (SE_DACL_DEFAULTED, "SE_DACL_DEFAULTED"),
        (SE_SACL_PRESENT, "SE_SACL_PRESENT"),
        (SE_SACL_DEFAULTED, "SE_SACL_DEFAULTED"),
        (SE_DACL_TRUSTED, "SE_DACL_TRUSTED"),
        (SE_SERVER_SECURITY, "SE_SERVER_SECURITY"),
        (SE_DACL_AUTO_INHERIT_REQ, "SE_DACL_AUTO_INHERIT_REQ"),
        (SE_SACL_AUTO_INHERIT_REQ, "SE_SACL_AUTO_INHERIT_REQ"),
        (SE_DACL_AUTO_INHERITED, "SE_DACL_AUTO_INHERITED"),
        (SE_SACL_AUTO_INHERITED, "SE_SACL_AUTO_INHERITED"),
        (SE_DACL_PROTECTED, "SE_DACL_PROTECTED"),
        (SE_SACL_PROTECTED, "SE_SACL_PROTECTED"),
        (SE_RM_CONTROL_VALID, "SE_RM_CONTROL_VALID"),
        (SE_SELF_RELATIVE, "SE_SELF_RELATIVE"),
    ];
}

/// ACE header flag bits (MS-DTYP §2.4.4.1).
pub mod ace {
    pub const OBJECT_INHERIT_ACE: u8 = 0x01;
    pub const CONTAINER_INHERIT_ACE: u8 = 0x02;
    pub const NO_PROPAGATE_INHERIT_ACE: u8 = 0x04;
    pub const INHERIT_ONLY_ACE: u8 = 0x08;
    pub const INHERITED_ACE: u8 = 0x10;
    pub const SUCCESSFUL_ACCESS_ACE_FLAG: u8 = 0x40;
    pub const FAILED_ACCESS_ACE_FLAG: u8 = 0x80;

    pub const NAMES: &[(u8, &str)] = &[
        (OBJECT_INHERIT_ACE, "OBJECT_INHERIT_ACE"),
        (CONTAINER_INHERIT_ACE, "CONTAINER_INHERIT_ACE"),
        (NO_PROPAGATE_INHERIT_ACE, "NO_PROPAGATE_INHERIT_ACE"),
        (INHERIT_ONLY_ACE, "INHERIT_ONLY_ACE"),
        (INHERITED_ACE, "INHERITED_ACE"),
        (SUCCESSFUL_ACCESS_ACE_FLAG, "SUCCESSFUL_ACCESS_ACE_FLAG"),
        (FAILED_ACCESS_ACE_FLAG, "FAILED_ACCESS_ACE_FLAG"),
    ];
}

/// Object ACE presence bits.
pub mod object {
    pub const ACE_OBJECT_TYPE_PRESENT: u32 = 0x0000_0001;
    pub const ACE_INHERITED_OBJECT_TYPE_PRESENT: u32 = 0x0000_0002;

    pub const PRESENCE_MASK: u32 = ACE_OBJECT_TYPE_PRESENT | ACE_INHERITED_OBJECT_TYPE_PRESENT;

    pub const NAMES: &[(u32, &str)] = &[
        (ACE_OBJECT_TYPE_PRESENT, "ACE_OBJECT_TYPE_PRESENT"),
        (
            ACE_INHERITED_OBJECT_TYPE_PRESENT,
            "ACE_INHERITED_OBJECT_TYPE_PRESENT",
        ),
    ];
}

/// Returns the names of the bits of `value` listed in `names`, in table order.
#[must_use]
pub fn set_flag_names<T>(value: T, names: &[(T, &'static str)]) -> Vec<&'static str>
where
    T: Copy + PartialEq + Default + std::ops::BitAnd<Output = T>,
{
    names
        .iter()
        .filter(|(bit, _)| value & *bit != T::default())
        .map(|(_, name)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_set_control_bits() {
        let names = set_flag_names(
            control::SE_DACL_PRESENT | control::SE_SELF_RELATIVE,
            control::NAMES,
        );
        assert_eq!(names, vec!["SE_DACL_PRESENT", "SE_SELF_RELATIVE"]);
    }

    #[test]
    fn unnamed_bits_are_skipped() {
        assert!(set_flag_names(0x20u8, ace::NAMES).is_empty());
    }
}
