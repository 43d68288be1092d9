//! Encoders for each record.
//!
//! Every size, count and offset is computed from the value being written.
//! Nothing stored from an earlier decode is trusted.

use bytes::{BufMut, Bytes, BytesMut};

use crate::dtyp::core::{
    Ace, Acl, DESCRIPTOR_HEADER_LEN, Guid, ObjectAceData, SecurityDescriptor, Sid,
};
use crate::error::{DtypError, DtypResult};

/// Encodes an identifier; always `8 + 4 * n` bytes.
#[must_use]
pub fn encode_sid(sid: &Sid) -> Bytes {
    let mut out = BytesMut::with_capacity(sid.encoded_len());
    put_sid(&mut out, sid);
    out.freeze()
}

/// Encodes a GUID; always 16 bytes.
#[must_use]
pub fn encode_guid(guid: &Guid) -> Bytes {
    let mut out = BytesMut::with_capacity(crate::dtyp::core::GUID_LEN);
    put_guid(&mut out, guid);
    out.freeze()
}

/// Encodes one access-control entry with its size recomputed.
#[must_use]
pub fn encode_ace(ace: &Ace) -> Bytes {
    let mut out = BytesMut::with_capacity(ace.encoded_len());
    put_ace(&mut out, ace);
    out.freeze()
}

/// Encodes an access-control list, entries in their given order.
///
/// ## Errors
/// Returns [`DtypError::Oversized`] if the list does not fit the 16-bit size
/// field.
pub fn encode_acl(acl: &Acl) -> DtypResult<Bytes> {
    let mut out = BytesMut::with_capacity(acl.encoded_len());
    put_acl(&mut out, acl)?;
    Ok(out.freeze())
}

/// Encodes a self-relative security descriptor.
///
/// Components follow the header in the order SACL, DACL, owner, group;
/// absent components take no space and get a zero offset.
///
/// ## Errors
/// Returns [`DtypError::Oversized`] if an ACL or the whole descriptor is too
/// large for its size or offset fields.
pub fn encode_descriptor(sd: &SecurityDescriptor) -> DtypResult<Bytes> {
    let total = sd.encoded_len();
    let mut out = BytesMut::with_capacity(total);

    let mut next = DESCRIPTOR_HEADER_LEN;
    let mut place = |len: Option<usize>| -> DtypResult<u32> {
        let Some(len) = len else {
            return Ok(0);
        };
        let offset = u32::try_from(next).map_err(|_err| DtypError::Oversized {
            what: "security descriptor",
            len: total,
            max: usize::try_from(u32::MAX).unwrap_or(usize::MAX),
        })?;
        next += len;
        Ok(offset)
    };

    let sacl_offset = place(sd.system_acl.as_ref().map(Acl::encoded_len))?;
    let dacl_offset = place(sd.discretionary_acl.as_ref().map(Acl::encoded_len))?;
    let owner_offset = place(sd.owner.as_ref().map(Sid::encoded_len))?;
    let group_offset = place(sd.group.as_ref().map(Sid::encoded_len))?;

    out.put_u16_le(sd.revision);
    out.put_u16_le(sd.control);
    out.put_u32_le(owner_offset);
    out.put_u32_le(group_offset);
    out.put_u32_le(sacl_offset);
    out.put_u32_le(dacl_offset);

    if let Some(sacl) = &sd.system_acl {
        put_acl(&mut out, sacl)?;
    }
    if let Some(dacl) = &sd.discretionary_acl {
        put_acl(&mut out, dacl)?;
    }
    if let Some(owner) = &sd.owner {
        put_sid(&mut out, owner);
    }
    if let Some(group) = &sd.group {
        put_sid(&mut out, group);
    }

    debug_assert_eq!(out.len(), total);
    tracing::debug!(
        len = out.len(),
        owner_offset,
        group_offset,
        sacl_offset,
        dacl_offset,
        "Encoded security descriptor"
    );

    Ok(out.freeze())
}

fn put_sid(out: &mut BytesMut, sid: &Sid) {
    out.put_u8(sid.revision());
    out.put_u8(sid.sub_authority_count());
    out.put_uint(sid.authority(), 6);
    for &sub in sid.sub_authorities() {
        out.put_u32_le(sub);
    }
}

fn put_guid(out: &mut BytesMut, guid: &Guid) {
    out.put_u32_le(guid.time_low);
    out.put_u16_le(guid.time_mid);
    out.put_u16_le(guid.time_hi_and_version);
    out.put_slice(&guid.clock_seq);
    out.put_slice(&guid.node);
}

fn put_object(out: &mut BytesMut, object: &ObjectAceData) {
    out.put_u32_le(object.flags());
    if let Some(guid) = object.object_type() {
        put_guid(out, guid);
    }
    if let Some(guid) = object.inherited_object_type() {
        put_guid(out, guid);
    }
}

fn put_ace(out: &mut BytesMut, ace: &Ace) {
    out.put_u8(ace.ace_type().code());
    out.put_u8(ace.flags());
    out.put_u16_le(ace.size());
    out.put_u32_le(ace.access_mask());
    if let Some(object) = ace.object() {
        put_object(out, object);
    }
    put_sid(out, ace.trustee());
}

fn put_acl(out: &mut BytesMut, acl: &Acl) -> DtypResult<()> {
    let len = acl.encoded_len();
    let size = u16::try_from(len).map_err(|_err| DtypError::Oversized {
        what: "access-control list",
        len,
        max: usize::from(u16::MAX),
    })?;
    // Bounded by the size check: every entry is at least 16 bytes.
    let count = u32::try_from(acl.entries.len()).unwrap_or(u32::MAX);

    out.put_u16_le(acl.revision);
    out.put_u16_le(size);
    out.put_u32_le(count);
    for ace in &acl.entries {
        put_ace(out, ace);
    }

    Ok(())
}
