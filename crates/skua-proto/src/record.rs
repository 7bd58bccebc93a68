//! DNS resource records.
//!
//! A resource record is the owner name, the 10-byte TYPE/CLASS/TTL/
//! RDLENGTH preamble, and the type-specific RDATA. After dispatching
//! the RDATA decoder, the parser verifies the decoder consumed exactly
//! RDLENGTH bytes; a mismatch rejects the record (strict mode) or
//! downgrades it to an opaque unknown record (lenient mode).

use crate::class::Class;
use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::{RData, Unknown};
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// How the record parser treats a structurally bad RDATA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Reject the whole message on any malformed record.
    #[default]
    Strict,
    /// Downgrade a malformed record to [`RData::Unknown`] over its
    /// claimed RDLENGTH window and continue. Header counts must still
    /// be satisfied.
    Lenient,
}

/// A DNS resource record.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                      NAME                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     CLASS                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TTL                      |
/// |                                               |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                   RDLENGTH                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                     RDATA                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// For OPT pseudo-records the CLASS and TTL slots carry EDNS data;
/// the message layer preserves those raw values when it lifts OPT into
/// [`crate::edns::Edns`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The owner name.
    name: Name,
    /// The record type.
    rtype: Type,
    /// The record class.
    rclass: Class,
    /// Time to live in seconds.
    ttl: u32,
    /// The parsed record data.
    rdata: RData,
}

impl ResourceRecord {
    /// Creates a new resource record.
    pub fn new(name: Name, rtype: Type, rclass: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// Creates an A record.
    pub fn a(name: Name, ttl: u32, addr: std::net::Ipv4Addr) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::A),
            Class::default(),
            ttl,
            RData::A(crate::rdata::A::new(addr)),
        )
    }

    /// Creates an AAAA record.
    pub fn aaaa(name: Name, ttl: u32, addr: std::net::Ipv6Addr) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::AAAA),
            Class::default(),
            ttl,
            RData::AAAA(crate::rdata::AAAA::new(addr)),
        )
    }

    /// Creates a CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::CNAME),
            Class::default(),
            ttl,
            RData::CNAME(crate::rdata::CNAME::new(target)),
        )
    }

    /// Creates a TXT record.
    pub fn txt(name: Name, ttl: u32, text: impl Into<Vec<u8>>) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::TXT),
            Class::default(),
            ttl,
            RData::TXT(crate::rdata::TXT::from_string(text)),
        )
    }

    /// Returns the owner name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// Returns the record type if known.
    #[inline]
    pub fn record_type(&self) -> Option<RecordType> {
        self.rtype.as_known()
    }

    /// Returns the record class.
    #[inline]
    pub fn rclass(&self) -> Class {
        self.rclass
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the record data.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// Returns true if this is a DNSSEC-related record.
    #[inline]
    pub fn is_dnssec(&self) -> bool {
        self.rtype
            .as_known()
            .map(|t| t.is_dnssec())
            .unwrap_or(false)
    }

    /// Parses a resource record in strict mode.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        Self::parse_with_mode(data, offset, ParseMode::Strict)
    }

    /// Parses a resource record with the given mode.
    ///
    /// The owner name and the fixed preamble always parse strictly:
    /// without them there is no way to find the next record. Only the
    /// RDATA stage is recoverable in lenient mode.
    pub fn parse_with_mode(data: &[u8], offset: usize, mode: ParseMode) -> Result<(Self, usize)> {
        let (name, name_len) = NameParser::new(data).parse_name(offset)?;

        let mut reader = WireReader::new(data);
        reader.set_position(offset + name_len);
        let rtype_value = reader.read_u16()?;
        let rclass_value = reader.read_u16()?;
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()?;

        let rdata_start = reader.position();
        let rdata_end = rdata_start + rdlength as usize;
        if rdata_end > data.len() {
            return Err(Error::buffer_too_short(rdata_end, data.len()));
        }

        let rtype = Type::from_u16(rtype_value);
        let rclass = Class::from_u16(rclass_value);

        let rdata = match rtype {
            Type::Known(known) => {
                match Self::parse_rdata_checked(known, data, rdata_start, rdlength) {
                    Ok(rdata) => rdata,
                    Err(err) if mode == ParseMode::Lenient && err.is_malformed() => {
                        warn!(
                            rtype = %rtype,
                            offset = rdata_start,
                            %err,
                            "downgrading malformed record to opaque RDATA"
                        );
                        RData::Unknown(Unknown::new(
                            rtype_value,
                            &data[rdata_start..rdata_end],
                        ))
                    }
                    Err(err) => return Err(err),
                }
            }
            Type::Unknown(value) => {
                RData::Unknown(Unknown::new(value, &data[rdata_start..rdata_end]))
            }
        };

        Ok((
            Self {
                name,
                rtype,
                rclass,
                ttl,
                rdata,
            },
            name_len + 10 + rdlength as usize,
        ))
    }

    /// Dispatches the RDATA decoder and enforces RDLENGTH conservation.
    fn parse_rdata_checked(
        rtype: RecordType,
        data: &[u8],
        rdata_start: usize,
        rdlength: u16,
    ) -> Result<RData> {
        let (rdata, consumed) = RData::parse(rtype, data, rdata_start, rdlength)?;

        if consumed != rdlength as usize {
            return Err(Error::rdata_length_mismatch(
                rtype.name(),
                rdlength as usize,
                consumed,
            ));
        }

        Ok(rdata)
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 10 + self.rdata.wire_len()
    }

    /// Writes the resource record to wire format (names uncompressed).
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.name.write_wire(buf);
        buf.extend_from_slice(&self.rtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.rclass.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());

        let rdlength = self.rdata.wire_len() as u16;
        buf.extend_from_slice(&rdlength.to_be_bytes());
        self.rdata.write_to(buf);
    }

    /// Converts the record to wire format bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.to_vec()
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.rclass, self.rtype, self.rdata
        )
    }
}

/// Sequential parser for a record section.
#[derive(Debug)]
pub struct RecordParser<'a> {
    /// The message data.
    data: &'a [u8],
    /// Current offset in the message.
    offset: usize,
    /// Number of records remaining.
    remaining: u16,
    /// Strict or lenient RDATA handling.
    mode: ParseMode,
}

impl<'a> RecordParser<'a> {
    /// Creates a strict record parser.
    #[inline]
    pub const fn new(data: &'a [u8], offset: usize, count: u16) -> Self {
        Self::with_mode(data, offset, count, ParseMode::Strict)
    }

    /// Creates a record parser with the given mode.
    #[inline]
    pub const fn with_mode(data: &'a [u8], offset: usize, count: u16, mode: ParseMode) -> Self {
        Self {
            data,
            offset,
            remaining: count,
            mode,
        }
    }

    /// Returns the current offset.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of records remaining.
    #[inline]
    pub const fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Parses the next record, or `None` when the section is done.
    pub fn next(&mut self) -> Result<Option<ResourceRecord>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let (record, consumed) = ResourceRecord::parse_with_mode(self.data, self.offset, self.mode)?;
        self.offset += consumed;
        self.remaining -= 1;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    #[test]
    fn test_record_roundtrip() {
        let name = Name::from_str("www.example.com").unwrap();
        let original = ResourceRecord::a(name, 3600, Ipv4Addr::new(10, 0, 0, 1));

        let wire = original.to_wire();
        let (parsed, consumed) = ResourceRecord::parse(&wire, 0).unwrap();

        assert_eq!(consumed, wire.len());
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_rdlength_conservation_violation() {
        // An NSEC3PARAM with 2 bytes of junk after the salt: the
        // decoder consumes less than RDLENGTH claims.
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        wire.extend_from_slice(&51u16.to_be_bytes()); // NSEC3PARAM
        wire.extend_from_slice(&1u16.to_be_bytes()); // IN
        wire.extend_from_slice(&300u32.to_be_bytes());
        wire.extend_from_slice(&7u16.to_be_bytes()); // rdlength
        wire.extend_from_slice(&[1, 0, 0, 10, 0, 0xBE, 0xEF]);

        let err = ResourceRecord::parse(&wire, 0).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_lenient_mode_downgrades() {
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        wire.extend_from_slice(&13u16.to_be_bytes()); // HINFO
        wire.extend_from_slice(&1u16.to_be_bytes());
        wire.extend_from_slice(&300u32.to_be_bytes());
        wire.extend_from_slice(&3u16.to_be_bytes());
        // Truncated HINFO: CPU string claims 9 bytes.
        wire.extend_from_slice(&[9, b'x', b'y']);

        assert!(ResourceRecord::parse(&wire, 0).is_err());

        let (record, consumed) =
            ResourceRecord::parse_with_mode(&wire, 0, ParseMode::Lenient).unwrap();
        assert_eq!(consumed, wire.len());
        assert!(matches!(record.rdata(), RData::Unknown(u) if u.data() == [9, b'x', b'y']));
    }

    #[test]
    fn test_unknown_type_preserved() {
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        wire.extend_from_slice(&65280u16.to_be_bytes());
        wire.extend_from_slice(&1u16.to_be_bytes());
        wire.extend_from_slice(&60u32.to_be_bytes());
        wire.extend_from_slice(&4u16.to_be_bytes());
        wire.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let (record, _) = ResourceRecord::parse(&wire, 0).unwrap();
        assert_eq!(record.rtype(), Type::Unknown(65280));
        assert!(matches!(record.rdata(), RData::Unknown(u) if u.data().len() == 4));
    }

    #[test]
    fn test_rdata_window_overruns_buffer() {
        // A record claiming rdlength=8 with only 4 bytes present.
        let mut wire = Name::from_str("query").unwrap().as_wire().to_vec();
        wire.extend_from_slice(&1u16.to_be_bytes());
        wire.extend_from_slice(&1u16.to_be_bytes());
        wire.extend_from_slice(&100u32.to_be_bytes());
        wire.extend_from_slice(&8u16.to_be_bytes());
        wire.extend_from_slice(&[0x7B, 0x2D, 0x43, 0x09]);

        let err = ResourceRecord::parse(&wire, 0).unwrap_err();
        assert!(err.is_truncated() || err.is_malformed());
    }

    #[test]
    fn test_record_display() {
        let name = Name::from_str("example.com").unwrap();
        let rr = ResourceRecord::a(name, 300, Ipv4Addr::new(192, 0, 2, 1));

        let display = rr.to_string();
        assert!(display.contains("example.com."));
        assert!(display.contains("300"));
        assert!(display.contains("IN"));
        assert!(display.contains('A'));
        assert!(display.contains("192.0.2.1"));
    }
}
