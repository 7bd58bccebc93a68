//! Service-related record types (SRV, NAPTR, URI, CAA).

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::text::escape_bytes;
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SRV record - Service locator (RFC 2782).
///
/// Used by SIP, XMPP, LDAP and friends to locate service endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SRV {
    /// Priority: lower values are more preferred.
    priority: u16,
    /// Weight for load balancing among equal priorities.
    weight: u16,
    /// TCP/UDP port number.
    port: u16,
    /// Target host name.
    target: Name,
}

impl SRV {
    /// Creates a new SRV record.
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Self {
            priority,
            weight,
            port,
            target,
        }
    }

    /// Returns the priority.
    #[inline]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// Returns the weight.
    #[inline]
    pub const fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the port number.
    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the target host name.
    #[inline]
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// Returns true if the record declares the service unavailable.
    ///
    /// Per RFC 2782 a target of "." means no service.
    pub fn is_unavailable(&self) -> bool {
        self.target.is_root()
    }

    /// Parses an SRV record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = WireReader::new(message);
        reader.set_position(offset);

        let priority = reader.read_u16()?;
        let weight = reader.read_u16()?;
        let port = reader.read_u16()?;

        let (target, name_len) = NameParser::new(message).parse_name(offset + 6)?;

        Ok((
            Self {
                priority,
                weight,
                port,
                target,
            },
            6 + name_len,
        ))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        6 + self.target.wire_len()
    }

    /// Writes the SRV record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.priority.to_be_bytes());
        buf.extend_from_slice(&self.weight.to_be_bytes());
        buf.extend_from_slice(&self.port.to_be_bytes());
        self.target.write_wire(buf);
    }
}

impl fmt::Display for SRV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

/// NAPTR record - Naming authority pointer (RFC 3403).
///
/// Three character-strings (flags, services, regexp) followed by a
/// replacement name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NAPTR {
    /// Order: lower values are processed first.
    order: u16,
    /// Preference among equal order values.
    preference: u16,
    /// Flags controlling interpretation.
    flags: Vec<u8>,
    /// Services field.
    services: Vec<u8>,
    /// Regular expression for rewriting.
    regexp: Vec<u8>,
    /// Replacement domain name.
    replacement: Name,
}

impl NAPTR {
    /// Creates a new NAPTR record.
    pub fn new(
        order: u16,
        preference: u16,
        flags: impl Into<Vec<u8>>,
        services: impl Into<Vec<u8>>,
        regexp: impl Into<Vec<u8>>,
        replacement: Name,
    ) -> Self {
        Self {
            order,
            preference,
            flags: flags.into(),
            services: services.into(),
            regexp: regexp.into(),
            replacement,
        }
    }

    /// Returns the order value.
    #[inline]
    pub const fn order(&self) -> u16 {
        self.order
    }

    /// Returns the preference value.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the flags field.
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// Returns the services field.
    pub fn services(&self) -> &[u8] {
        &self.services
    }

    /// Returns the regexp field.
    pub fn regexp(&self) -> &[u8] {
        &self.regexp
    }

    /// Returns the replacement name.
    pub fn replacement(&self) -> &Name {
        &self.replacement
    }

    /// Parses a NAPTR record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = WireReader::new(message);
        reader.set_position(offset);

        let order = reader.read_u16()?;
        let preference = reader.read_u16()?;
        let flags = reader.read_character_string()?.to_vec();
        let services = reader.read_character_string()?.to_vec();
        let regexp = reader.read_character_string()?.to_vec();

        let (replacement, name_len) = NameParser::new(message).parse_name(reader.position())?;
        let consumed = reader.position() - offset + name_len;

        Ok((
            Self {
                order,
                preference,
                flags,
                services,
                regexp,
                replacement,
            },
            consumed,
        ))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        4 + 1
            + self.flags.len()
            + 1
            + self.services.len()
            + 1
            + self.regexp.len()
            + self.replacement.wire_len()
    }

    /// Writes the NAPTR record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.order.to_be_bytes());
        buf.extend_from_slice(&self.preference.to_be_bytes());
        buf.extend_from_slice(&[self.flags.len() as u8]);
        buf.extend_from_slice(&self.flags);
        buf.extend_from_slice(&[self.services.len() as u8]);
        buf.extend_from_slice(&self.services);
        buf.extend_from_slice(&[self.regexp.len() as u8]);
        buf.extend_from_slice(&self.regexp);
        self.replacement.write_wire(buf);
    }
}

impl fmt::Display for NAPTR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\" \"{}\" \"{}\" {}",
            self.order,
            self.preference,
            escape_bytes(&self.flags),
            escape_bytes(&self.services),
            escape_bytes(&self.regexp),
            self.replacement
        )
    }
}

/// URI record - Uniform Resource Identifier (RFC 7553).
///
/// The target occupies the rest of the RDATA after the two u16 fields:
/// its length is RDLENGTH - 4. The bytes are kept raw; a strict UTF-8
/// view is offered, since a hostile response may carry anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct URI {
    /// Priority: lower values are more preferred.
    priority: u16,
    /// Weight for load balancing among equal priorities.
    weight: u16,
    /// The URI itself, raw.
    target: Vec<u8>,
}

impl URI {
    /// Creates a new URI record.
    pub fn new(priority: u16, weight: u16, target: impl Into<Vec<u8>>) -> Self {
        Self {
            priority,
            weight,
            target: target.into(),
        }
    }

    /// Returns the priority.
    #[inline]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// Returns the weight.
    #[inline]
    pub const fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the raw target bytes.
    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Returns the target as UTF-8 if valid.
    pub fn target_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.target).ok()
    }

    /// Parses a URI record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::invalid_rdata("URI", "too short"));
        }

        let mut reader = WireReader::new(data);
        let priority = reader.read_u16()?;
        let weight = reader.read_u16()?;
        let target = reader.read_remaining().to_vec();

        Ok(Self {
            priority,
            weight,
            target,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        4 + self.target.len()
    }

    /// Writes the URI record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.priority.to_be_bytes());
        buf.extend_from_slice(&self.weight.to_be_bytes());
        buf.extend_from_slice(&self.target);
    }
}

impl fmt::Display for URI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\"",
            self.priority,
            self.weight,
            escape_bytes(&self.target)
        )
    }
}

/// CAA record - Certification Authority Authorization (RFC 8659).
///
/// The value occupies the rest of the RDATA after the flags byte and
/// the length-prefixed tag: its length is RDLENGTH - 2 - tag length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CAA {
    /// Flags; bit 7 is the critical bit.
    flags: u8,
    /// Property tag (e.g. `issue`, `issuewild`, `iodef`).
    tag: Vec<u8>,
    /// Property value, raw.
    value: Vec<u8>,
}

impl CAA {
    /// Critical flag bit.
    pub const FLAG_CRITICAL: u8 = 0x80;

    /// Creates a new CAA record.
    pub fn new(flags: u8, tag: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            flags,
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Returns the flags byte.
    #[inline]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns true if the critical bit is set.
    #[inline]
    pub const fn is_critical(&self) -> bool {
        (self.flags & Self::FLAG_CRITICAL) != 0
    }

    /// Returns the property tag.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Returns the tag as UTF-8 if valid.
    pub fn tag_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.tag).ok()
    }

    /// Returns the property value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Parses a CAA record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error::invalid_rdata("CAA", "too short"));
        }

        let mut reader = WireReader::new(data);
        let flags = reader.read_u8()?;
        let tag = reader
            .read_character_string()
            .map_err(|_| Error::invalid_rdata("CAA", "tag length exceeds RDATA"))?
            .to_vec();
        let value = reader.read_remaining().to_vec();

        Ok(Self { flags, tag, value })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        2 + self.tag.len() + self.value.len()
    }

    /// Writes the CAA record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.flags, self.tag.len() as u8]);
        buf.extend_from_slice(&self.tag);
        buf.extend_from_slice(&self.value);
    }
}

impl fmt::Display for CAA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\"",
            self.flags,
            escape_bytes(&self.tag),
            escape_bytes(&self.value)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_srv_roundtrip() {
        let srv = SRV::new(10, 60, 5060, Name::from_str("sip.example.com").unwrap());

        let mut buf = BytesMut::new();
        srv.write_to(&mut buf);

        let (parsed, consumed) = SRV::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, srv);
        assert!(!parsed.is_unavailable());
    }

    #[test]
    fn test_srv_unavailable() {
        let srv = SRV::new(0, 0, 0, Name::root());
        assert!(srv.is_unavailable());
    }

    #[test]
    fn test_naptr_roundtrip() {
        let naptr = NAPTR::new(
            100,
            50,
            &b"u"[..],
            &b"E2U+sip"[..],
            &b"!^.*$!sip:info@example.com!"[..],
            Name::root(),
        );

        let mut buf = BytesMut::new();
        naptr.write_to(&mut buf);

        let (parsed, consumed) = NAPTR::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, naptr);
    }

    #[test]
    fn test_naptr_truncated_string() {
        // services string claims 9 bytes but the buffer ends.
        let data = [0, 100, 0, 50, 1, b'u', 9, b'E'];
        assert!(NAPTR::parse(&data, 0).is_err());
    }

    #[test]
    fn test_uri_roundtrip() {
        let uri = URI::new(10, 1, &b"https://example.com/"[..]);

        let mut buf = BytesMut::new();
        uri.write_to(&mut buf);

        let parsed = URI::parse(&buf).unwrap();
        assert_eq!(parsed, uri);
        assert_eq!(parsed.target_str(), Some("https://example.com/"));
    }

    #[test]
    fn test_uri_invalid_utf8_is_kept_raw() {
        let data = [0, 10, 0, 1, 0xFF, 0xFE];
        let uri = URI::parse(&data).unwrap();

        assert_eq!(uri.target(), &[0xFF, 0xFE]);
        assert_eq!(uri.target_str(), None);
    }

    #[test]
    fn test_caa_parse() {
        // flags=0, tag="issue", value="ca.example.net"
        let mut data = vec![0u8, 5];
        data.extend_from_slice(b"issue");
        data.extend_from_slice(b"ca.example.net");

        let caa = CAA::parse(&data).unwrap();
        assert!(!caa.is_critical());
        assert_eq!(caa.tag_str(), Some("issue"));
        assert_eq!(caa.value(), b"ca.example.net");

        let mut buf = BytesMut::new();
        caa.write_to(&mut buf);
        assert_eq!(&buf[..], &data[..]);
    }

    #[test]
    fn test_caa_tag_overrun() {
        let data = [0x80, 9, b'i'];
        assert!(CAA::parse(&data).is_err());
    }
}
