//! Decoders for each record, innermost first.
//!
//! The `read_*` functions consume from a [`Reader`] whose end bound is the
//! enclosing record, so a field that overruns its record is reported as
//! truncated even when the buffer itself is longer.

use super::error::{DecodeError, DecodeErrorKind, DecodeResult};
use super::reader::Reader;
use crate::dtyp::core::flags::object::ACE_INHERITED_OBJECT_TYPE_PRESENT;
use crate::dtyp::core::flags::object::ACE_OBJECT_TYPE_PRESENT;
use crate::dtyp::core::{
    ACE_HEADER_LEN, ACL_HEADER_LEN, Ace, AceType, Acl, DESCRIPTOR_HEADER_LEN, GUID_LEN, Guid,
    ObjectAceData, SecurityDescriptor, Sid,
};

/// Decodes an identifier starting at `offset`.
///
/// ## Errors
/// Returns a truncated buffer error if fewer than `8 + 4 * count` bytes
/// remain from `offset`.
pub fn decode_sid(buf: &[u8], offset: usize) -> DecodeResult<Sid> {
    read_sid(&mut Reader::at(buf, offset, "identifier")?)
}

/// Decodes a GUID starting at `offset`.
///
/// ## Errors
/// Returns a truncated buffer error if fewer than 16 bytes remain.
pub fn decode_guid(buf: &[u8], offset: usize) -> DecodeResult<Guid> {
    read_guid(&mut Reader::at(buf, offset, "GUID")?)
}

/// Decodes one access-control entry starting at `offset`.
///
/// ## Errors
/// Returns a truncated buffer error if the declared size runs past the
/// buffer or a field runs past the declared size.
pub fn decode_ace(buf: &[u8], offset: usize) -> DecodeResult<Ace> {
    read_ace(&mut Reader::at(buf, offset, "ACE")?)
}

/// Decodes an access-control list starting at `offset`.
///
/// ## Errors
/// Returns a truncated buffer error if the header, the declared size, or
/// any entry does not fit.
pub fn decode_acl(buf: &[u8], offset: usize) -> DecodeResult<Acl> {
    read_acl(&mut Reader::at(buf, offset, "ACL")?)
}

/// Decodes a self-relative security descriptor occupying `buf`.
///
/// Offsets in the header are relative to the start of `buf`; a zero offset
/// marks the component absent.
///
/// ## Errors
/// Returns a truncated buffer error if the 20-byte header is incomplete or a
/// component overruns the buffer, and an invalid offset error if a non-zero
/// offset is at or beyond the end of the buffer.
pub fn decode_descriptor(buf: &[u8]) -> DecodeResult<SecurityDescriptor> {
    let mut header = Reader::at(buf, 0, "descriptor header")?;
    header.require(DESCRIPTOR_HEADER_LEN, "descriptor header")?;

    let revision = header.u16_le("descriptor revision")?;
    let control = header.u16_le("descriptor control")?;
    let owner_offset = header.u32_le("owner offset")?;
    let group_offset = header.u32_le("group offset")?;
    let sacl_offset = header.u32_le("SACL offset")?;
    let dacl_offset = header.u32_le("DACL offset")?;

    tracing::debug!(
        len = buf.len(),
        revision,
        control,
        owner_offset,
        group_offset,
        sacl_offset,
        dacl_offset,
        "Decoding security descriptor"
    );

    let owner = component(buf, "owner", owner_offset, decode_sid)?;
    let group = component(buf, "group", group_offset, decode_sid)?;
    let system_acl = component(buf, "SACL", sacl_offset, decode_acl)?;
    let discretionary_acl = component(buf, "DACL", dacl_offset, decode_acl)?;

    Ok(SecurityDescriptor {
        revision,
        control,
        owner,
        group,
        system_acl,
        discretionary_acl,
    })
}

fn component<T>(
    buf: &[u8],
    field: &str,
    offset: u32,
    decode: fn(&[u8], usize) -> DecodeResult<T>,
) -> DecodeResult<Option<T>> {
    if offset == 0 {
        return Ok(None);
    }
    let start = usize::try_from(offset)
        .ok()
        .filter(|&start| start < buf.len())
        .ok_or_else(|| DecodeError::invalid_offset(field, offset, buf.len()))?;
    decode(buf, start).map(Some)
}

fn read_sid(r: &mut Reader<'_>) -> DecodeResult<Sid> {
    let revision = r.u8("identifier revision")?;
    let count = r.u8("identifier sub-authority count")?;
    r.require(6 + 4 * usize::from(count), "identifier body")?;

    let authority = r.u48_be("identifier authority")?;
    let sub_authorities = (0..count)
        .map(|_| r.u32_le("identifier sub-authority"))
        .collect::<DecodeResult<Vec<_>>>()?;

    Ok(Sid::from_parts(revision, authority, sub_authorities))
}

fn read_guid(r: &mut Reader<'_>) -> DecodeResult<Guid> {
    r.require(GUID_LEN, "GUID")?;
    Ok(Guid {
        time_low: r.u32_le("GUID time_low")?,
        time_mid: r.u16_le("GUID time_mid")?,
        time_hi_and_version: r.u16_le("GUID time_hi_and_version")?,
        clock_seq: r.array("GUID clock_seq")?,
        node: r.array("GUID node")?,
    })
}

fn read_ace(r: &mut Reader<'_>) -> DecodeResult<Ace> {
    let start = r.position();

    // The declared size bounds everything else, so read it before the body.
    let mut peek = r.clone();
    peek.require(ACE_HEADER_LEN, "ACE header")?;
    peek.take(2, "ACE type and flags")?;
    let size = usize::from(peek.u16_le("ACE size")?);
    if size < ACE_HEADER_LEN {
        return Err(DecodeError::new(
            DecodeErrorKind::TruncatedBuffer,
            start,
            format!("ACE size {size} is smaller than its {ACE_HEADER_LEN}-byte header"),
        ));
    }

    let mut rec = r.sub_reader(size, "ACE")?;
    let ace_type = AceType::from_code(rec.u8("ACE type")?);
    let flags = rec.u8("ACE flags")?;
    rec.u16_le("ACE size")?;
    let access_mask = rec.u32_le("ACE access mask")?;

    if let AceType::Unknown(code) = ace_type {
        tracing::warn!(
            offset = start,
            code,
            "Unknown ACE type, decoding with the plain layout"
        );
    }

    let object = if ace_type.is_object() {
        let object_flags = rec.u32_le("ACE object flags")?;
        let object_type = if object_flags & ACE_OBJECT_TYPE_PRESENT == 0 {
            None
        } else {
            Some(read_guid(&mut rec)?)
        };
        let inherited_object_type = if object_flags & ACE_INHERITED_OBJECT_TYPE_PRESENT == 0 {
            None
        } else {
            Some(read_guid(&mut rec)?)
        };
        Some(
            ObjectAceData::new(object_type, inherited_object_type)
                .with_other_flags(object_flags),
        )
    } else {
        None
    };

    let trustee = read_sid(&mut rec)?;

    tracing::trace!(offset = start, size, %ace_type, %trustee, "Decoded ACE");

    Ok(Ace::from_parts(
        ace_type,
        flags,
        access_mask,
        object,
        trustee,
    ))
}

fn read_acl(r: &mut Reader<'_>) -> DecodeResult<Acl> {
    let start = r.position();

    let mut header = r.clone();
    let revision = header.u16_le("ACL revision")?;
    let size = usize::from(header.u16_le("ACL size")?);
    let count = header.u32_le("ACL entry count")?;
    if size < ACL_HEADER_LEN {
        return Err(DecodeError::new(
            DecodeErrorKind::TruncatedBuffer,
            start,
            format!("ACL size {size} is smaller than its {ACL_HEADER_LEN}-byte header"),
        ));
    }

    let mut body = r.sub_reader(size, "ACL")?;
    body.take(ACL_HEADER_LEN, "ACL header")?;

    // Each entry takes at least a header, which caps a hostile count.
    let capacity = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(body.remaining() / ACE_HEADER_LEN);
    let mut entries = Vec::with_capacity(capacity);
    for _ in 0..count {
        entries.push(read_ace(&mut body)?);
    }

    tracing::debug!(offset = start, size, count, revision, "Decoded ACL");

    Ok(Acl { revision, entries })
}
