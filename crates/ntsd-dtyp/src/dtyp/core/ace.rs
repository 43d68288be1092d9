//! Access-control entry (MS-DTYP §2.4.4).

use std::fmt;

use super::flags::object::{
    ACE_INHERITED_OBJECT_TYPE_PRESENT, ACE_OBJECT_TYPE_PRESENT, PRESENCE_MASK,
};
use super::guid::{GUID_LEN, Guid};
use super::sid::Sid;
use crate::error::{DtypError, DtypResult};

/// Size of the ACE header: type, flags, size, access mask.
pub const ACE_HEADER_LEN: usize = 8;

/// Size of the object flags field in object ACEs.
pub const OBJECT_FLAGS_LEN: usize = 4;

/// ACE type code.
///
/// Codes outside the eight known ones are kept as [`AceType::Unknown`] and
/// use the plain layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AceType {
    AccessAllowed,
    AccessDenied,
    SystemAudit,
    SystemAlarm,
    AccessAllowedObject,
    AccessDeniedObject,
    SystemAuditObject,
    SystemAlarmObject,
    Unknown(u8),
}

impl AceType {
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::AccessAllowed,
            0x01 => Self::AccessDenied,
            0x02 => Self::SystemAudit,
            0x03 => Self::SystemAlarm,
            0x05 => Self::AccessAllowedObject,
            0x06 => Self::AccessDeniedObject,
            0x07 => Self::SystemAuditObject,
            0x08 => Self::SystemAlarmObject,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::AccessAllowed => 0x00,
            Self::AccessDenied => 0x01,
            Self::SystemAudit => 0x02,
            Self::SystemAlarm => 0x03,
            Self::AccessAllowedObject => 0x05,
            Self::AccessDeniedObject => 0x06,
            Self::SystemAuditObject => 0x07,
            Self::SystemAlarmObject => 0x08,
            Self::Unknown(code) => code,
        }
    }

    /// Whether entries of this type carry object flags and optional GUIDs.
    #[must_use]
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            Self::AccessAllowedObject
                | Self::AccessDeniedObject
                | Self::SystemAuditObject
                | Self::SystemAlarmObject
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessAllowed => "ACCESS_ALLOWED",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::SystemAudit => "SYSTEM_AUDIT",
            Self::SystemAlarm => "SYSTEM_ALARM",
            Self::AccessAllowedObject => "ACCESS_ALLOWED_OBJECT",
            Self::AccessDeniedObject => "ACCESS_DENIED_OBJECT",
            Self::SystemAuditObject => "SYSTEM_AUDIT_OBJECT",
            Self::SystemAlarmObject => "SYSTEM_ALARM_OBJECT",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<u8> for AceType {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for AceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "UNKNOWN(0x{code:02x})"),
            known => f.write_str(known.as_str()),
        }
    }
}

/// The extra fields of an object ACE.
///
/// The presence bits of the object flags are derived from which GUIDs are
/// set; any other bits are kept as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObjectAceData {
    other_flags: u32,
    object_type: Option<Guid>,
    inherited_object_type: Option<Guid>,
}

impl ObjectAceData {
    #[must_use]
    pub fn new(object_type: Option<Guid>, inherited_object_type: Option<Guid>) -> Self {
        Self {
            other_flags: 0,
            object_type,
            inherited_object_type,
        }
    }

    /// Keeps the non-presence bits of `flags` alongside the GUIDs.
    #[must_use]
    pub fn with_other_flags(mut self, flags: u32) -> Self {
        self.other_flags = flags & !PRESENCE_MASK;
        self
    }

    /// Object flags as written on the wire.
    #[must_use]
    pub fn flags(&self) -> u32 {
        let mut flags = self.other_flags;
        if self.object_type.is_some() {
            flags |= ACE_OBJECT_TYPE_PRESENT;
        }
        if self.inherited_object_type.is_some() {
            flags |= ACE_INHERITED_OBJECT_TYPE_PRESENT;
        }
        flags
    }

    #[must_use]
    pub fn object_type(&self) -> Option<&Guid> {
        self.object_type.as_ref()
    }

    #[must_use]
    pub fn inherited_object_type(&self) -> Option<&Guid> {
        self.inherited_object_type.as_ref()
    }

    /// Encoded length of the flags and any present GUIDs.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        OBJECT_FLAGS_LEN
            + usize::from(self.object_type.is_some()) * GUID_LEN
            + usize::from(self.inherited_object_type.is_some()) * GUID_LEN
    }
}

/// One access-control entry.
///
/// `object` is present exactly when `kind` is an object type. The
/// encoded size is never stored; see [`Ace::size`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ace {
    kind: AceType,
    flags: u8,
    access_mask: u32,
    object: Option<ObjectAceData>,
    trustee: Sid,
}

impl Ace {
    /// Creates a plain entry (header and trustee only).
    ///
    /// ## Errors
    /// Returns an error if `ace_type` is an object type.
    pub fn new(ace_type: AceType, flags: u8, access_mask: u32, trustee: Sid) -> DtypResult<Self> {
        let ace_type = AceType::from_code(ace_type.code());
        if ace_type.is_object() {
            return Err(DtypError::InvalidValue(format!(
                "{ace_type} entries need object data"
            )));
        }
        Ok(Self::from_parts(
            ace_type,
            flags,
            access_mask,
            None,
            trustee,
        ))
    }

    /// Creates an object entry.
    ///
    /// ## Errors
    /// Returns an error if `ace_type` is not an object type.
    pub fn new_object(
        ace_type: AceType,
        flags: u8,
        access_mask: u32,
        object: ObjectAceData,
        trustee: Sid,
    ) -> DtypResult<Self> {
        let ace_type = AceType::from_code(ace_type.code());
        if !ace_type.is_object() {
            return Err(DtypError::InvalidValue(format!(
                "{ace_type} entries cannot carry object data"
            )));
        }
        Ok(Self::from_parts(
            ace_type,
            flags,
            access_mask,
            Some(object),
            trustee,
        ))
    }

    /// Caller guarantees `object.is_some() == ace_type.is_object()`.
    pub(crate) fn from_parts(
        ace_type: AceType,
        flags: u8,
        access_mask: u32,
        object: Option<ObjectAceData>,
        trustee: Sid,
    ) -> Self {
        debug_assert_eq!(object.is_some(), ace_type.is_object());
        Self {
            kind: ace_type,
            flags,
            access_mask,
            object,
            trustee,
        }
    }

    #[must_use]
    pub fn ace_type(&self) -> AceType {
        self.kind
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    #[must_use]
    pub fn access_mask(&self) -> u32 {
        self.access_mask
    }

    #[must_use]
    pub fn object(&self) -> Option<&ObjectAceData> {
        self.object.as_ref()
    }

    #[must_use]
    pub fn object_flags(&self) -> Option<u32> {
        self.object.as_ref().map(ObjectAceData::flags)
    }

    #[must_use]
    pub fn object_type(&self) -> Option<&Guid> {
        self.object.as_ref().and_then(ObjectAceData::object_type)
    }

    #[must_use]
    pub fn inherited_object_type(&self) -> Option<&Guid> {
        self.object
            .as_ref()
            .and_then(ObjectAceData::inherited_object_type)
    }

    #[must_use]
    pub fn trustee(&self) -> &Sid {
        &self.trustee
    }

    /// Exact encoded length in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        ACE_HEADER_LEN
            + self.object.as_ref().map_or(0, ObjectAceData::encoded_len)
            + self.trustee.encoded_len()
    }

    /// The size field written in the header.
    #[must_use]
    pub fn size(&self) -> u16 {
        // At most 8 + 36 + 1028 bytes given the `Sid` bounds.
        u16::try_from(self.encoded_len()).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trustee() -> Sid {
        Sid::new(1, 5, vec![21]).expect("valid")
    }

    #[test]
    fn type_codes_round_trip() {
        for code in 0u8..=0x10 {
            assert_eq!(AceType::from_code(code).code(), code);
        }
    }

    #[test]
    fn compound_code_is_unknown_and_plain() {
        let t = AceType::from_code(0x04);
        assert_eq!(t, AceType::Unknown(0x04));
        assert!(!t.is_object());
        assert_eq!(t.to_string(), "UNKNOWN(0x04)");
    }

    #[test]
    fn exactly_four_object_types() {
        let object_codes: Vec<u8> = (0u8..=0xff)
            .filter(|&c| AceType::from_code(c).is_object())
            .collect();
        assert_eq!(object_codes, vec![0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn plain_entry_size() {
        let ace = Ace::new(AceType::AccessAllowed, 0, 0x001F_01FF, trustee()).expect("plain");
        assert_eq!(ace.size(), 20);
        assert_eq!(ace.object_flags(), None);
    }

    #[test]
    fn object_entry_size_counts_present_guids() {
        let guid = Guid::new(1, 2, 3, [4, 5], [6, 7, 8, 9, 10, 11]);
        let none = ObjectAceData::new(None, None);
        let one = ObjectAceData::new(Some(guid), None);
        let both = ObjectAceData::new(Some(guid), Some(guid));

        for (data, expected) in [(none, 24), (one, 40), (both, 56)] {
            let ace = Ace::new_object(AceType::AccessAllowedObject, 0, 0x100, data, trustee())
                .expect("object");
            assert_eq!(usize::from(ace.size()), expected);
        }
    }

    #[test]
    fn presence_bits_follow_guids() {
        let guid = Guid::default();
        let data = ObjectAceData::new(None, Some(guid)).with_other_flags(0x8000_0003);
        assert_eq!(data.flags(), 0x8000_0002);
    }

    #[test]
    fn constructors_check_variant() {
        let plain = |kind| Ace::new(kind, 0, 0, trustee());
        assert!(plain(AceType::SystemAuditObject).is_err());
        assert!(
            Ace::new_object(
                AceType::AccessDenied,
                0,
                0,
                ObjectAceData::default(),
                trustee()
            )
            .is_err()
        );
        assert!(plain(AceType::Unknown(0x11)).is_ok());
        // A known code smuggled in as `Unknown` is normalized first.
        assert!(plain(AceType::Unknown(0x05)).is_err());
    }
}
