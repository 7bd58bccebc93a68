//! Text-based record types (TXT, HINFO) and character-string
//! presentation.
//!
//! TXT bytes are formally opaque but usually carry text, so the record
//! keeps three views: the raw strings, the escaped presentation form,
//! and a best-effort strict-UTF-8 decode per string.

use crate::error::{Error, Result};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Renders bytes using the DNS character-string escaping convention.
///
/// Printable ASCII (`0x21..=0x7E`) passes through, except `"`, `\`,
/// `(`, `)`, `;`, `@` and `$` which take a backslash prefix. Everything
/// else renders as a three-digit decimal `\ddd` escape. Note that the
/// space character is outside the printable range and escapes as
/// `\032`.
pub fn escape_bytes(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'"' | b'\\' | b'(' | b')' | b';' | b'@' | b'$' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x21..=0x7E => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{:03}", byte);
            }
        }
    }
    out
}

/// TXT record - Text (RFC 1035).
///
/// The RDATA is a concatenation of character-strings, each up to 255
/// bytes, whose total length equals RDLENGTH. Zero-length strings are
/// legal and preserved. SPF records (type 99) share this layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TXT {
    /// The character-strings, in wire order.
    strings: SmallVec<[Vec<u8>; 2]>,
}

impl TXT {
    /// Creates a TXT record from the given strings.
    pub fn new(strings: impl IntoIterator<Item = impl Into<Vec<u8>>>) -> Self {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a TXT record holding a single string.
    pub fn from_string(s: impl Into<Vec<u8>>) -> Self {
        Self {
            strings: smallvec::smallvec![s.into()],
        }
    }

    /// Returns the raw character-strings.
    pub fn strings(&self) -> &[Vec<u8>] {
        &self.strings
    }

    /// Returns the escaped presentation form of each string.
    pub fn escaped(&self) -> Vec<String> {
        self.strings.iter().map(|s| escape_bytes(s)).collect()
    }

    /// Returns a strict UTF-8 view of each string.
    ///
    /// Strings that are not valid UTF-8 yield `None`; no replacement
    /// characters are introduced. The raw bytes stay available through
    /// [`strings`](Self::strings).
    pub fn texts(&self) -> Vec<Option<String>> {
        self.strings
            .iter()
            .map(|s| std::str::from_utf8(s).ok().map(str::to_owned))
            .collect()
    }

    /// Returns all strings concatenated.
    ///
    /// Protocols like SPF treat the record as one logical value spread
    /// over multiple character-strings.
    pub fn data(&self) -> Vec<u8> {
        self.strings.iter().flatten().copied().collect()
    }

    /// Returns the concatenated data as UTF-8 if valid.
    pub fn text(&self) -> Option<String> {
        String::from_utf8(self.data()).ok()
    }

    /// Parses a TXT record from its RDATA window.
    ///
    /// The window is exactly RDLENGTH bytes; a string length that runs
    /// past it is rejected rather than read beyond.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut strings = SmallVec::new();
        let mut reader = WireReader::new(data);

        while !reader.is_empty() {
            let s = reader
                .read_character_string()
                .map_err(|_| Error::invalid_rdata("TXT", "string length exceeds RDATA"))?;
            strings.push(s.to_vec());
        }

        Ok(Self { strings })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.strings.iter().map(|s| 1 + s.len()).sum()
    }

    /// Writes the TXT record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        for s in &self.strings {
            // Oversized strings split at the 255-byte cap.
            for chunk in s.chunks(255) {
                buf.extend_from_slice(&[chunk.len() as u8]);
                buf.extend_from_slice(chunk);
            }
        }
    }
}

impl fmt::Display for TXT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for s in &self.strings {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "\"{}\"", escape_bytes(s))?;
        }
        Ok(())
    }
}

/// HINFO record - Host information (RFC 1035).
///
/// Two character-strings describing CPU and OS. Rarely published
/// today, but RFC 8482 responses still use it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HINFO {
    /// CPU type.
    cpu: Vec<u8>,
    /// Operating system.
    os: Vec<u8>,
}

impl HINFO {
    /// Creates a new HINFO record.
    pub fn new(cpu: impl Into<Vec<u8>>, os: impl Into<Vec<u8>>) -> Self {
        Self {
            cpu: cpu.into(),
            os: os.into(),
        }
    }

    /// Returns the CPU field.
    pub fn cpu(&self) -> &[u8] {
        &self.cpu
    }

    /// Returns the OS field.
    pub fn os(&self) -> &[u8] {
        &self.os
    }

    /// Returns the CPU field as UTF-8 if valid.
    pub fn cpu_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.cpu).ok()
    }

    /// Returns the OS field as UTF-8 if valid.
    pub fn os_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.os).ok()
    }

    /// Parses an HINFO record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(data);

        let cpu = reader
            .read_character_string()
            .map_err(|_| Error::invalid_rdata("HINFO", "truncated CPU string"))?
            .to_vec();
        let os = reader
            .read_character_string()
            .map_err(|_| Error::invalid_rdata("HINFO", "truncated OS string"))?
            .to_vec();

        if !reader.is_empty() {
            return Err(Error::invalid_rdata("HINFO", "trailing bytes after OS"));
        }

        Ok(Self { cpu, os })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        2 + self.cpu.len() + self.os.len()
    }

    /// Writes the HINFO record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.cpu.len() as u8]);
        buf.extend_from_slice(&self.cpu);
        buf.extend_from_slice(&[self.os.len() as u8]);
        buf.extend_from_slice(&self.os);
    }
}

impl fmt::Display for HINFO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" \"{}\"",
            escape_bytes(&self.cpu),
            escape_bytes(&self.os)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_convention() {
        assert_eq!(escape_bytes(b"plain"), "plain");
        assert_eq!(escape_bytes(b"a b"), "a\\032b");
        assert_eq!(escape_bytes(b"v=spf1"), "v=spf1");
        assert_eq!(escape_bytes(br#"say "hi""#), "say\\032\\\"hi\\\"");
        assert_eq!(escape_bytes(b"a@b;c$d"), "a\\@b\\;c\\$d");
        assert_eq!(escape_bytes(b"(x)"), "\\(x\\)");
        assert_eq!(escape_bytes(&[0x00, 0xFF]), "\\000\\255");
    }

    #[test]
    fn test_txt_parse() {
        let data = [5, b'h', b'e', b'l', b'l', b'o', 0, 2, b'h', b'i'];
        let txt = TXT::parse(&data).unwrap();

        assert_eq!(txt.strings().len(), 3);
        assert_eq!(txt.strings()[0], b"hello");
        assert!(txt.strings()[1].is_empty());
        assert_eq!(txt.strings()[2], b"hi");
    }

    #[test]
    fn test_txt_rejects_overread() {
        // Claims 5 bytes but only 2 remain.
        let data = [5, b'h', b'i'];
        assert!(matches!(
            TXT::parse(&data),
            Err(Error::InvalidRData { .. })
        ));
    }

    #[test]
    fn test_txt_views() {
        let txt = TXT::new([&b"ok"[..], &[0xFF, 0xFE][..]]);

        assert_eq!(txt.escaped(), vec!["ok".to_string(), "\\255\\254".to_string()]);
        assert_eq!(txt.texts(), vec![Some("ok".to_string()), None]);
    }

    #[test]
    fn test_txt_concatenated_data() {
        let txt = TXT::new(["v=spf1 ", "include:example.com"]);
        assert_eq!(txt.text().as_deref(), Some("v=spf1 include:example.com"));
    }

    #[test]
    fn test_txt_roundtrip() {
        let original = TXT::new(["first", "", "second"]);

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);
        let parsed = TXT::parse(&buf).unwrap();

        assert_eq!(original, parsed);
    }

    #[test]
    fn test_txt_display() {
        let txt = TXT::from_string("hello world");
        assert_eq!(txt.to_string(), "\"hello\\032world\"");
    }

    #[test]
    fn test_hinfo() {
        let hinfo = HINFO::new("ARM64", "Linux");
        assert_eq!(hinfo.cpu_str(), Some("ARM64"));
        assert_eq!(hinfo.os_str(), Some("Linux"));

        let mut buf = BytesMut::new();
        hinfo.write_to(&mut buf);
        assert_eq!(HINFO::parse(&buf).unwrap(), hinfo);
    }

    #[test]
    fn test_hinfo_rejects_trailing() {
        let data = [1, b'x', 1, b'y', 0xAA];
        assert!(HINFO::parse(&data).is_err());
    }
}
