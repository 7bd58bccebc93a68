//! Wire format primitives.
//!
//! [`WireReader`] is a bounds-checked cursor over an inbound datagram;
//! [`WireWriter`] is a growable buffer for outbound messages. Both work
//! in network byte order. The reader never copies or mutates the
//! underlying buffer; slices it returns borrow from the datagram.

use crate::error::{Error, Result};
use crate::name::Name;
use bytes::{BufMut, Bytes, BytesMut};
use std::net::{Ipv4Addr, Ipv6Addr};

/// A cursor for reading DNS wire format data.
///
/// Every read checks bounds and fails with [`Error::UnexpectedEof`]
/// rather than panicking, so a hostile datagram can never read out of
/// range.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    /// The underlying datagram.
    data: &'a [u8],
    /// Current position.
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a new wire reader over a datagram.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the underlying datagram.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the current position.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Sets the position.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true if no bytes remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Advances the position by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) -> Result<()> {
        if self.pos + n > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + n));
        }
        self.pos += n;
        Ok(())
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        if self.pos >= self.data.len() {
            return Err(Error::unexpected_eof(self.pos));
        }
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        if self.pos + 2 > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + 2));
        }
        let value = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    /// Reads a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        if self.pos + 4 > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + 4));
        }
        let value = u32::from_be_bytes(self.data[self.pos..self.pos + 4].try_into().unwrap());
        self.pos += 4;
        Ok(value)
    }

    /// Reads a slice of `len` bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads the rest of the buffer.
    #[inline]
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    /// Peeks at the next byte without advancing.
    #[inline]
    pub fn peek_u8(&self) -> Result<u8> {
        if self.pos >= self.data.len() {
            return Err(Error::unexpected_eof(self.pos));
        }
        Ok(self.data[self.pos])
    }

    /// Peeks at the next `len` bytes without advancing.
    #[inline]
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + len));
        }
        Ok(&self.data[self.pos..self.pos + len])
    }

    /// Reads an IPv4 address (4 bytes, network order).
    #[inline]
    pub fn read_ipv4(&mut self) -> Result<Ipv4Addr> {
        let octets: [u8; 4] = self.read_bytes(4)?.try_into().unwrap();
        Ok(Ipv4Addr::from(octets))
    }

    /// Reads an IPv6 address (16 bytes, network order).
    #[inline]
    pub fn read_ipv6(&mut self) -> Result<Ipv6Addr> {
        let octets: [u8; 16] = self.read_bytes(16)?.try_into().unwrap();
        Ok(Ipv6Addr::from(octets))
    }

    /// Reads a DNS character-string: one length byte, then that many bytes.
    ///
    /// Zero-length strings are legal and return an empty slice.
    pub fn read_character_string(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u8()? as usize;
        self.read_bytes(len)
    }

    /// Reads exactly `len` bytes as strict UTF-8.
    pub fn read_string(&mut self, len: usize) -> Result<&'a str> {
        let offset = self.pos;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { offset })
    }
}

/// A writer for DNS wire format data.
///
/// Wraps a `BytesMut` that grows on demand. An optional maximum size
/// turns overruns into [`Error::BufferOverflow`] instead of growth,
/// which outbound UDP paths use to respect the payload limit.
#[derive(Debug)]
pub struct WireWriter {
    /// The underlying buffer.
    buf: BytesMut,
    /// Maximum size, if bounded.
    max_size: Option<usize>,
}

impl WireWriter {
    /// Creates a new unbounded wire writer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            max_size: None,
        }
    }

    /// Creates a wire writer with a maximum size limit.
    pub fn with_max_size(capacity: usize, max_size: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity.min(max_size)),
            max_size: Some(max_size),
        }
    }

    /// Returns the current length.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the remaining capacity before the size limit.
    pub fn remaining(&self) -> usize {
        self.max_size
            .map(|max| max.saturating_sub(self.buf.len()))
            .unwrap_or(usize::MAX)
    }

    /// Returns true if writing `n` more bytes would exceed the limit.
    pub fn would_overflow(&self, n: usize) -> bool {
        self.max_size
            .map(|max| self.buf.len() + n > max)
            .unwrap_or(false)
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        if self.would_overflow(1) {
            return Err(Error::buffer_overflow(1, self.remaining()));
        }
        self.buf.put_u8(value);
        Ok(())
    }

    /// Writes a big-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        if self.would_overflow(2) {
            return Err(Error::buffer_overflow(2, self.remaining()));
        }
        self.buf.put_u16(value);
        Ok(())
    }

    /// Writes a big-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        if self.would_overflow(4) {
            return Err(Error::buffer_overflow(4, self.remaining()));
        }
        self.buf.put_u32(value);
        Ok(())
    }

    /// Writes a slice of bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.would_overflow(bytes.len()) {
            return Err(Error::buffer_overflow(bytes.len(), self.remaining()));
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes a domain name as an uncompressed label sequence.
    ///
    /// Outbound names are never compressed; the root name is a single
    /// zero byte.
    pub fn write_name(&mut self, name: &Name) -> Result<()> {
        let wire = name.as_wire();
        if wire.is_empty() {
            self.write_u8(0)
        } else {
            self.write_bytes(wire)
        }
    }

    /// Returns the underlying buffer.
    #[inline]
    pub fn into_bytes(self) -> BytesMut {
        self.buf
    }

    /// Returns the data as frozen bytes.
    #[inline]
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Returns a view of the data written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_reader_primitives() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC];
        let mut reader = WireReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x12);
        assert_eq!(reader.read_u16().unwrap(), 0x3456);
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.peek_u8().unwrap(), 0x78);
        assert_eq!(reader.read_bytes(3).unwrap(), &[0x78, 0x9A, 0xBC]);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reader_bounds() {
        let data = [0x12, 0x34];
        let mut reader = WireReader::new(&data);

        assert!(matches!(
            reader.read_u32(),
            Err(Error::UnexpectedEof { offset: 4 })
        ));
        // A failed read leaves the cursor untouched.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_reader_addresses() {
        let data = [192, 0, 2, 1];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_ipv4().unwrap(), Ipv4Addr::new(192, 0, 2, 1));

        let mut v6 = [0u8; 16];
        v6[15] = 1;
        let mut reader = WireReader::new(&v6);
        assert_eq!(reader.read_ipv6().unwrap(), Ipv6Addr::LOCALHOST);
    }

    #[test]
    fn test_reader_character_string() {
        let data = [3, b'a', b'b', b'c', 0, 2, b'x'];
        let mut reader = WireReader::new(&data);

        assert_eq!(reader.read_character_string().unwrap(), b"abc");
        assert_eq!(reader.read_character_string().unwrap(), b"");
        assert!(reader.read_character_string().is_err());
    }

    #[test]
    fn test_reader_strict_utf8() {
        let data = [b'o', b'k', 0xFF, 0xFE];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_string(2).unwrap(), "ok");
        assert!(matches!(
            reader.read_string(2),
            Err(Error::InvalidUtf8 { offset: 2 })
        ));
    }

    #[test]
    fn test_writer() {
        let mut writer = WireWriter::new(16);

        writer.write_u8(0x12).unwrap();
        writer.write_u16(0x3456).unwrap();
        writer.write_u32(0x789A_BCDE).unwrap();

        assert_eq!(writer.len(), 7);
        assert_eq!(
            writer.as_bytes(),
            &[0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE]
        );
    }

    #[test]
    fn test_writer_max_size() {
        let mut writer = WireWriter::with_max_size(100, 4);

        writer.write_u16(0x1234).unwrap();
        assert!(matches!(
            writer.write_u32(0x1234_5678),
            Err(Error::BufferOverflow { .. })
        ));
    }

    #[test]
    fn test_writer_name() {
        let mut writer = WireWriter::new(32);
        writer
            .write_name(&Name::from_str("query.").unwrap())
            .unwrap();
        assert_eq!(writer.as_bytes(), &[5, b'q', b'u', b'e', b'r', b'y', 0]);

        let mut writer = WireWriter::new(4);
        writer.write_name(&Name::root()).unwrap();
        assert_eq!(writer.as_bytes(), &[0]);
    }
}
