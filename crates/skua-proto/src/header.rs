//! DNS message header.
//!
//! The fixed 12-byte structure at the start of every message: the
//! transaction ID, the packed flags word, and the four section counts.

use crate::error::{Error, Result};
use crate::opcode::OpCode;
use crate::rcode::ResponseCode;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

bitflags! {
    /// DNS header flag bits.
    ///
    /// The opcode and rcode live in the same 16-bit word but are
    /// modeled separately; this set covers only the single-bit flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HeaderFlags: u16 {
        /// Query/Response: 0 = query, 1 = response.
        const QR = 0x8000;

        /// Authoritative Answer.
        const AA = 0x0400;

        /// Truncation.
        const TC = 0x0200;

        /// Recursion Desired.
        const RD = 0x0100;

        /// Recursion Available.
        const RA = 0x0080;

        /// Reserved, must be zero.
        const Z = 0x0040;

        /// Authentic Data (DNSSEC).
        const AD = 0x0020;

        /// Checking Disabled (DNSSEC).
        const CD = 0x0010;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// DNS message header.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Transaction ID for matching requests to responses.
    pub id: u16,

    /// The single-bit flags.
    pub flags: HeaderFlags,

    /// Operation code.
    pub opcode: OpCode,

    /// Response code (possibly extended via EDNS0).
    pub rcode: ResponseCode,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new header with the given transaction ID.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a query header with a random transaction ID.
    ///
    /// Recursion is requested by default, as a stub resolver does.
    pub fn query() -> Self {
        Self {
            id: rand::random(),
            flags: HeaderFlags::RD,
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qd_count: 1,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the response is authoritative.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(HeaderFlags::AA)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Returns true if recursion is available.
    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags.contains(HeaderFlags::RA)
    }

    /// Returns true if the response data is authenticated (AD).
    #[inline]
    pub fn is_authentic_data(&self) -> bool {
        self.flags.contains(HeaderFlags::AD)
    }

    /// Returns true if DNSSEC checking is disabled (CD).
    #[inline]
    pub fn checking_disabled(&self) -> bool {
        self.flags.contains(HeaderFlags::CD)
    }

    /// Sets or clears the QR flag.
    #[inline]
    pub fn set_response(&mut self, response: bool) {
        self.flags.set(HeaderFlags::QR, response);
    }

    /// Sets or clears the TC flag.
    #[inline]
    pub fn set_truncated(&mut self, tc: bool) {
        self.flags.set(HeaderFlags::TC, tc);
    }

    /// Sets or clears the RD flag.
    #[inline]
    pub fn set_recursion_desired(&mut self, rd: bool) {
        self.flags.set(HeaderFlags::RD, rd);
    }

    /// Sets or clears the CD flag.
    #[inline]
    pub fn set_checking_disabled(&mut self, cd: bool) {
        self.flags.set(HeaderFlags::CD, cd);
    }

    /// Returns the raw 16-bit flags word as it appears on the wire,
    /// opcode and rcode included.
    #[inline]
    pub fn flags_word(&self) -> u16 {
        self.flags.bits()
            | (self.opcode.to_u8() as u16) << 11
            | self.rcode.header_rcode() as u16
    }

    /// Returns the total record count across the three record sections.
    #[inline]
    pub fn total_record_count(&self) -> usize {
        self.an_count as usize + self.ns_count as usize + self.ar_count as usize
    }

    /// Parses a header from the start of a datagram.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::buffer_too_short(HEADER_SIZE, data.len()));
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let flags_raw = u16::from_be_bytes([data[2], data[3]]);

        let opcode_value = ((flags_raw >> 11) & 0x0F) as u8;
        let opcode = OpCode::from_u8(opcode_value).ok_or(Error::InvalidOpCode {
            value: opcode_value,
        })?;

        let rcode_value = (flags_raw & 0x0F) as u8;
        let rcode = ResponseCode::from_header(rcode_value).ok_or(Error::InvalidResponseCode {
            value: u16::from(rcode_value),
        })?;

        let flags = HeaderFlags::from_bits_truncate(flags_raw);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qd_count: u16::from_be_bytes([data[4], data[5]]),
            an_count: u16::from_be_bytes([data[6], data[7]]),
            ns_count: u16::from_be_bytes([data[8], data[9]]),
            ar_count: u16::from_be_bytes([data[10], data[11]]),
        })
    }

    /// Serializes the header to its wire form.
    pub fn to_wire(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&self.flags_word().to_be_bytes());
        buf[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.ar_count.to_be_bytes());

        buf
    }

    /// Writes the header to a buffer.
    pub fn write_to(&self, buf: &mut bytes::BytesMut) {
        buf.extend_from_slice(&self.to_wire());
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID:{:04X} {} {}", self.id, self.opcode, self.rcode)?;

        if self.is_response() {
            write!(f, " QR")?;
        }
        if self.is_authoritative() {
            write!(f, " AA")?;
        }
        if self.is_truncated() {
            write!(f, " TC")?;
        }
        if self.recursion_desired() {
            write!(f, " RD")?;
        }
        if self.recursion_available() {
            write!(f, " RA")?;
        }
        if self.is_authentic_data() {
            write!(f, " AD")?;
        }
        if self.checking_disabled() {
            write!(f, " CD")?;
        }

        write!(
            f,
            " QD:{} AN:{} NS:{} AR:{}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let mut header = Header::new(0x1234);
        header.set_recursion_desired(true);
        header.qd_count = 1;
        header.an_count = 2;

        let wire = header.to_wire();
        let parsed = Header::parse(&wire).unwrap();

        assert_eq!(header, parsed);
    }

    #[test]
    fn test_flags_word() {
        // id=42, flags=0x0100 (RD), an=1: the sample fixture header.
        let wire = [
            0x00, 0x2A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];
        let header = Header::parse(&wire).unwrap();

        assert_eq!(header.id, 42);
        assert_eq!(header.flags_word(), 0x0100);
        assert!(header.recursion_desired());
        assert!(header.is_query());
        assert_eq!(header.an_count, 1);
    }

    #[test]
    fn test_header_flags() {
        let mut header = Header::new(0);

        header.set_response(true);
        assert!(header.is_response());
        assert!(!header.is_query());

        header.set_truncated(true);
        assert!(header.is_truncated());

        header.set_checking_disabled(true);
        assert!(header.checking_disabled());
    }

    #[test]
    fn test_header_parse_too_short() {
        // Truncated header: 3 bytes.
        let result = Header::parse(&[0x00, 0x2A, 0x01]);
        assert!(matches!(result, Err(Error::BufferTooShort { .. })));
    }

    #[test]
    fn test_query_header() {
        let header = Header::query();
        assert!(header.is_query());
        assert!(header.recursion_desired());
        assert_eq!(header.qd_count, 1);
        assert_eq!(header.total_record_count(), 0);
    }

    #[test]
    fn test_header_display() {
        let mut header = Header::query();
        header.id = 0xABCD;

        let display = header.to_string();
        assert!(display.contains("ABCD"));
        assert!(display.contains("QUERY"));
        assert!(display.contains("RD"));
    }
}
