//! Bounds-checked little-endian reader over a borrowed buffer.

use bytes::Buf;

use super::error::{DecodeError, DecodeResult};

/// A cursor over `buf[start..end]` that reports absolute positions.
///
/// Every read checks the remaining length first, so the `bytes::Buf`
/// getters used underneath never panic.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over the whole buffer, starting at `offset`.
    ///
    /// ## Errors
    /// Returns a truncated buffer error if `offset` is past the end.
    pub fn at(buf: &'a [u8], offset: usize, what: &str) -> DecodeResult<Self> {
        if offset > buf.len() {
            return Err(DecodeError::truncated(offset, what, 1, 0));
        }
        Ok(Self {
            buf,
            pos: offset,
            end: buf.len(),
        })
    }

    /// Current absolute position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the reader's end bound.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Splits off a reader over the next `len` bytes and advances past them.
    ///
    /// ## Errors
    /// Returns a truncated buffer error if fewer than `len` bytes remain.
    pub fn sub_reader(&mut self, len: usize, what: &str) -> DecodeResult<Reader<'a>> {
        let start = self.pos;
        self.take(len, what)?;
        Ok(Reader {
            buf: self.buf,
            pos: start,
            end: start + len,
        })
    }

    /// Returns the next `len` bytes and advances past them.
    ///
    /// ## Errors
    /// Returns a truncated buffer error if fewer than `len` bytes remain.
    pub fn take(&mut self, len: usize, what: &str) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::truncated(
                self.pos,
                what,
                len,
                self.remaining(),
            ));
        }
        let chunk = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(chunk)
    }

    /// Returns an error unless at least `len` bytes remain; does not advance.
    ///
    /// ## Errors
    /// Returns a truncated buffer error if fewer than `len` bytes remain.
    pub fn require(&self, len: usize, what: &str) -> DecodeResult<()> {
        if len > self.remaining() {
            return Err(DecodeError::truncated(
                self.pos,
                what,
                len,
                self.remaining(),
            ));
        }
        Ok(())
    }

    pub fn u8(&mut self, what: &str) -> DecodeResult<u8> {
        Ok(self.take(1, what)?.get_u8())
    }

    pub fn u16_le(&mut self, what: &str) -> DecodeResult<u16> {
        Ok(self.take(2, what)?.get_u16_le())
    }

    pub fn u32_le(&mut self, what: &str) -> DecodeResult<u32> {
        Ok(self.take(4, what)?.get_u32_le())
    }

    /// Reads a 48-bit big-endian unsigned value, zero-extended.
    pub fn u48_be(&mut self, what: &str) -> DecodeResult<u64> {
        Ok(self.take(6, what)?.get_uint(6))
    }

    pub fn array<const N: usize>(&mut self, what: &str) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        self.take(N, what)?.copy_to_slice(&mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut r = Reader::at(&buf, 0, "test").expect("offset in range");
        assert_eq!(r.u8("a").expect("u8"), 0x01);
        assert_eq!(r.u16_le("b").expect("u16"), 0x0302);
        assert_eq!(r.u32_le("c").expect("u32"), 0x0706_0504);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn reads_48_bit_big_endian() {
        let buf = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05];
        let mut r = Reader::at(&buf, 1, "test").expect("offset in range");
        assert_eq!(r.u48_be("authority").expect("u48"), 5);
    }

    #[test]
    fn high_bit_authority_is_not_sign_extended() {
        let buf = [0x80, 0x00, 0x00, 0x00, 0x00, 0x01];
        let mut r = Reader::at(&buf, 0, "test").expect("offset in range");
        assert_eq!(r.u48_be("authority").expect("u48"), 0x8000_0000_0001);
    }

    #[test]
    fn short_read_reports_absolute_position() {
        let buf = [0u8; 6];
        let mut r = Reader::at(&buf, 4, "test").expect("offset in range");
        let err = r.u32_le("mask").unwrap_err();
        assert!(err.is_truncated());
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn sub_reader_is_bounded() {
        let buf = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut r = Reader::at(&buf, 0, "test").expect("offset in range");
        let mut sub = r.sub_reader(3, "record").expect("fits");
        assert_eq!(r.position(), 3);
        assert_eq!(sub.position(), 0);
        assert!(sub.u32_le("too wide").is_err());
        assert_eq!(sub.u16_le("fits").expect("u16"), 0x0201);
    }

    #[test]
    fn offset_past_end_is_truncated() {
        let buf = [0u8; 2];
        assert!(Reader::at(&buf, 3, "test").unwrap_err().is_truncated());
    }
}
