//! EDNS(0) support (RFC 6891).
//!
//! The OPT pseudo-record overloads its fixed fields: CLASS carries the
//! requestor's UDP payload size and TTL packs the extended RCODE,
//! version, and flags. Both are preserved raw here and exposed through
//! named accessors. The RDATA is a `{code, length, data}` TLV stream;
//! NSID (RFC 5001) and Extended DNS Errors (RFC 8914) are decoded,
//! everything else is skipped forward.

use crate::error::{Error, Result};
use crate::wire::WireReader;
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
pub use skua_ede::EdeCode;
use smallvec::SmallVec;
use std::fmt;
use tracing::trace;

/// NSID option code (RFC 5001).
const OPTION_NSID: u16 = 3;
/// Extended DNS Error option code (RFC 8914).
const OPTION_EDE: u16 = 15;

/// A decoded EDNS option.
///
/// Only the options this resolver client acts on are represented;
/// unrecognized codes are skipped during parse and never surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdnsOption {
    /// Name Server Identifier (RFC 5001).
    Nsid {
        /// The raw identifier bytes.
        data: Vec<u8>,
        /// Strict UTF-8 view of the bytes; `None` when not valid
        /// UTF-8. No replacement characters are introduced.
        utf8: Option<String>,
    },

    /// Extended DNS Error (RFC 8914).
    Ede {
        /// The info code exactly as received.
        raw_info_code: u16,
        /// The registry value, `EdeCode::Unknown` when unregistered.
        info_code: EdeCode,
        /// Optional extra text; `None` when absent or not valid UTF-8.
        extra_text: Option<String>,
    },
}

impl EdnsOption {
    /// Returns the option code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Nsid { .. } => OPTION_NSID,
            Self::Ede { .. } => OPTION_EDE,
        }
    }

    /// Returns the wire length of the option payload.
    fn payload_len(&self) -> usize {
        match self {
            Self::Nsid { data, .. } => data.len(),
            Self::Ede { extra_text, .. } => {
                2 + extra_text.as_ref().map(|t| t.len()).unwrap_or(0)
            }
        }
    }

    /// Returns the wire length including the code/length header.
    pub fn wire_len(&self) -> usize {
        4 + self.payload_len()
    }

    /// Writes the option to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.code().to_be_bytes());
        buf.extend_from_slice(&(self.payload_len() as u16).to_be_bytes());

        match self {
            Self::Nsid { data, .. } => {
                buf.extend_from_slice(data);
            }
            Self::Ede {
                raw_info_code,
                extra_text,
                ..
            } => {
                buf.extend_from_slice(&raw_info_code.to_be_bytes());
                if let Some(text) = extra_text {
                    buf.extend_from_slice(text.as_bytes());
                }
            }
        }
    }
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nsid { data, utf8 } => match utf8 {
                Some(text) => write!(f, "NSID: {text}"),
                None => write!(f, "NSID: {} opaque bytes", data.len()),
            },
            Self::Ede {
                raw_info_code,
                info_code,
                extra_text,
            } => {
                write!(f, "EDE {raw_info_code} ({info_code})")?;
                if let Some(text) = extra_text {
                    write!(f, ": {text}")?;
                }
                Ok(())
            }
        }
    }
}

/// EDNS(0) information from an OPT pseudo-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edns {
    /// EDNS version; only 0 is defined.
    version: u8,
    /// Requestor's UDP payload size, from the CLASS slot.
    udp_size: u16,
    /// Extended RCODE bits, from the top byte of the TTL slot.
    extended_rcode: u8,
    /// DNSSEC OK flag, from the TTL flags half.
    dnssec_ok: bool,
    /// Decoded options.
    options: SmallVec<[EdnsOption; 2]>,
    /// The OPT RDATA exactly as received, for round-tripping.
    raw_rdata: Bytes,
}

impl Default for Edns {
    fn default() -> Self {
        Self::new()
    }
}

impl Edns {
    /// Default advertised UDP payload size.
    pub const DEFAULT_UDP_SIZE: u16 = 4096;

    /// Creates EDNS information with default settings.
    pub fn new() -> Self {
        Self {
            version: 0,
            udp_size: Self::DEFAULT_UDP_SIZE,
            extended_rcode: 0,
            dnssec_ok: false,
            options: SmallVec::new(),
            raw_rdata: Bytes::new(),
        }
    }

    /// Creates EDNS information with the DNSSEC OK flag set.
    pub fn with_dnssec() -> Self {
        let mut edns = Self::new();
        edns.dnssec_ok = true;
        edns
    }

    /// Returns the EDNS version.
    #[inline]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Returns the advertised UDP payload size.
    #[inline]
    pub const fn udp_size(&self) -> u16 {
        self.udp_size
    }

    /// Sets the UDP payload size.
    pub fn set_udp_size(&mut self, size: u16) {
        self.udp_size = size;
    }

    /// Returns the extended RCODE bits.
    #[inline]
    pub const fn extended_rcode(&self) -> u8 {
        self.extended_rcode
    }

    /// Sets the extended RCODE bits.
    pub fn set_extended_rcode(&mut self, rcode: u8) {
        self.extended_rcode = rcode;
    }

    /// Returns true if the DNSSEC OK flag is set.
    #[inline]
    pub const fn dnssec_ok(&self) -> bool {
        self.dnssec_ok
    }

    /// Sets the DNSSEC OK flag.
    pub fn set_dnssec_ok(&mut self, ok: bool) {
        self.dnssec_ok = ok;
    }

    /// Returns the decoded options.
    pub fn options(&self) -> &[EdnsOption] {
        &self.options
    }

    /// Adds an option.
    pub fn add_option(&mut self, option: EdnsOption) {
        self.options.push(option);
    }

    /// Returns the OPT RDATA exactly as received.
    ///
    /// Empty for locally constructed EDNS.
    pub fn raw_rdata(&self) -> &[u8] {
        &self.raw_rdata
    }

    /// Returns the NSID option if present.
    pub fn nsid(&self) -> Option<&EdnsOption> {
        self.options
            .iter()
            .find(|o| matches!(o, EdnsOption::Nsid { .. }))
    }

    /// Returns the Extended DNS Error if present.
    pub fn ede(&self) -> Option<(EdeCode, Option<&str>)> {
        self.options.iter().find_map(|o| match o {
            EdnsOption::Ede {
                info_code,
                extra_text,
                ..
            } => Some((*info_code, extra_text.as_deref())),
            _ => None,
        })
    }

    /// Parses EDNS information from an OPT record's CLASS, TTL, and
    /// RDATA.
    ///
    /// The TLV walk consumes the RDATA exactly: a recognized option's
    /// decoder reads its `length` bytes, and an unrecognized code is
    /// skipped forward by its `length`.
    pub fn parse(class: u16, ttl: u32, rdata: &[u8]) -> Result<Self> {
        let udp_size = class;
        let extended_rcode = (ttl >> 24) as u8;
        let version = ((ttl >> 16) & 0xFF) as u8;
        let flags = (ttl & 0xFFFF) as u16;
        let dnssec_ok = (flags & 0x8000) != 0;

        if version != 0 {
            return Err(Error::invalid_edns_option(
                0,
                format!("unsupported EDNS version {version}"),
            ));
        }

        let mut options = SmallVec::new();
        let mut reader = WireReader::new(rdata);

        while !reader.is_empty() {
            let code = reader.read_u16()?;
            let length = reader.read_u16()? as usize;
            let payload = reader.read_bytes(length)?;

            match code {
                OPTION_NSID => {
                    options.push(EdnsOption::Nsid {
                        data: payload.to_vec(),
                        utf8: std::str::from_utf8(payload).ok().map(str::to_owned),
                    });
                }
                OPTION_EDE => {
                    if length < 2 {
                        return Err(Error::invalid_edns_option(code, "EDE shorter than 2 bytes"));
                    }
                    let raw_info_code = u16::from_be_bytes([payload[0], payload[1]]);
                    let extra_text = if length > 2 {
                        std::str::from_utf8(&payload[2..]).ok().map(str::to_owned)
                    } else {
                        None
                    };
                    options.push(EdnsOption::Ede {
                        raw_info_code,
                        info_code: EdeCode::from_u16(raw_info_code),
                        extra_text,
                    });
                }
                _ => {
                    trace!(code, length, "skipping unrecognized EDNS option");
                }
            }
        }

        Ok(Self {
            version,
            udp_size,
            extended_rcode,
            dnssec_ok,
            options,
            raw_rdata: Bytes::copy_from_slice(rdata),
        })
    }

    /// Returns the wire length of the re-encoded OPT RDATA.
    pub fn rdata_len(&self) -> usize {
        self.options.iter().map(|o| o.wire_len()).sum()
    }

    /// Returns the wire length of the full OPT pseudo-record.
    pub fn wire_len(&self) -> usize {
        // root (1) + TYPE (2) + CLASS (2) + TTL (4) + RDLENGTH (2)
        11 + self.rdata_len()
    }

    /// Writes the OPT pseudo-record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        // Root owner name.
        buf.extend_from_slice(&[0]);

        // TYPE = OPT (41).
        buf.extend_from_slice(&41u16.to_be_bytes());

        // CLASS slot carries the UDP payload size.
        buf.extend_from_slice(&self.udp_size.to_be_bytes());

        // TTL slot packs extended RCODE, version, and flags.
        let flags: u16 = if self.dnssec_ok { 0x8000 } else { 0 };
        let ttl = u32::from(self.extended_rcode) << 24
            | u32::from(self.version) << 16
            | u32::from(flags);
        buf.extend_from_slice(&ttl.to_be_bytes());

        buf.extend_from_slice(&(self.rdata_len() as u16).to_be_bytes());

        for option in &self.options {
            option.write_to(buf);
        }
    }
}

impl fmt::Display for Edns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EDNS(version={}, udp={}, dnssec_ok={})",
            self.version, self.udp_size, self.dnssec_ok
        )?;

        for option in &self.options {
            write!(f, " [{option}]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edns_defaults() {
        let edns = Edns::new();
        assert_eq!(edns.version(), 0);
        assert_eq!(edns.udp_size(), 4096);
        assert!(!edns.dnssec_ok());
        assert!(edns.raw_rdata().is_empty());
    }

    #[test]
    fn test_class_and_ttl_overloads() {
        // udp=1232, extended_rcode=1, version=0, DO set.
        let edns = Edns::parse(1232, 0x0100_8000, &[]).unwrap();
        assert_eq!(edns.udp_size(), 1232);
        assert_eq!(edns.extended_rcode(), 1);
        assert!(edns.dnssec_ok());
    }

    #[test]
    fn test_unsupported_version_rejected() {
        assert!(Edns::parse(512, 0x0001_0000, &[]).is_err());
    }

    #[test]
    fn test_nsid_and_ede() {
        // NSID "abcd", then EDE code 6 with text "Hello".
        let rdata = [
            0x00, 0x03, 0x00, 0x04, 0x61, 0x62, 0x63, 0x64, // NSID
            0x00, 0x0F, 0x00, 0x07, 0x00, 0x06, 0x48, 0x65, 0x6C, 0x6C, 0x6F, // EDE
        ];

        let edns = Edns::parse(4096, 0, &rdata).unwrap();
        assert_eq!(edns.options().len(), 2);

        match &edns.options()[0] {
            EdnsOption::Nsid { data, utf8 } => {
                assert_eq!(data, b"abcd");
                assert_eq!(utf8.as_deref(), Some("abcd"));
            }
            other => panic!("expected NSID, got {other:?}"),
        }

        assert_eq!(
            edns.ede(),
            Some((EdeCode::DnssecBogus, Some("Hello")))
        );
        assert_eq!(edns.raw_rdata(), &rdata);
    }

    #[test]
    fn test_nsid_invalid_utf8_has_no_text_view() {
        let rdata = [0x00, 0x03, 0x00, 0x02, 0xFF, 0xFE];
        let edns = Edns::parse(4096, 0, &rdata).unwrap();

        match &edns.options()[0] {
            EdnsOption::Nsid { data, utf8 } => {
                assert_eq!(data, &[0xFF, 0xFE]);
                assert!(utf8.is_none());
            }
            other => panic!("expected NSID, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_option_skipped() {
        // Code 0x63 with 2 bytes, then zero-length NSID.
        let rdata = [0x00, 0x63, 0x00, 0x02, 0xDE, 0xAD, 0x00, 0x03, 0x00, 0x00];
        let edns = Edns::parse(4096, 0, &rdata).unwrap();

        assert_eq!(edns.options().len(), 1);
        assert!(matches!(&edns.options()[0], EdnsOption::Nsid { data, .. } if data.is_empty()));
    }

    #[test]
    fn test_option_length_overrun_rejected() {
        // EDE claims 8 bytes of payload but only 2 follow.
        let rdata = [0x00, 0x0F, 0x00, 0x08, 0x00, 0x06];
        assert!(Edns::parse(4096, 0, &rdata).is_err());
    }

    #[test]
    fn test_roundtrip_via_opt_record() {
        let mut original = Edns::new();
        original.set_dnssec_ok(true);
        original.add_option(EdnsOption::Nsid {
            data: b"resolver-1".to_vec(),
            utf8: Some("resolver-1".to_string()),
        });

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        // Skip name (1) and type (2); unpack class, ttl, rdlength.
        let class = u16::from_be_bytes([buf[3], buf[4]]);
        let ttl = u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]);
        let rdlength = u16::from_be_bytes([buf[9], buf[10]]) as usize;
        let rdata = &buf[11..11 + rdlength];

        let parsed = Edns::parse(class, ttl, rdata).unwrap();

        assert_eq!(parsed.udp_size(), original.udp_size());
        assert_eq!(parsed.dnssec_ok(), original.dnssec_ok());
        assert_eq!(parsed.options(), original.options());
    }

    #[test]
    fn test_ede_unregistered_code() {
        let rdata = [0x00, 0x0F, 0x00, 0x02, 0x40, 0x00];
        let edns = Edns::parse(4096, 0, &rdata).unwrap();

        match &edns.options()[0] {
            EdnsOption::Ede {
                raw_info_code,
                info_code,
                extra_text,
            } => {
                assert_eq!(*raw_info_code, 0x4000);
                assert_eq!(*info_code, EdeCode::Unknown);
                assert!(extra_text.is_none());
            }
            other => panic!("expected EDE, got {other:?}"),
        }
    }
}
