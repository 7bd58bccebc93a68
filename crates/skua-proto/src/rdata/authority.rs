//! Authority record types (SOA).

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SOA record - Start of Authority (RFC 1035).
///
/// Names the primary server and responsible mailbox for a zone and
/// carries its serial number and transfer/negative-caching timers.
///
/// # Wire Format
///
/// ```text
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                     MNAME                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                     RNAME                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    SERIAL                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    REFRESH                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     RETRY                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    EXPIRE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    MINIMUM                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SOA {
    /// Primary name server for the zone.
    mname: Name,
    /// Responsible person's mailbox (first label is the local part).
    rname: Name,
    /// Zone serial number.
    serial: u32,
    /// Secondary refresh interval, seconds.
    refresh: u32,
    /// Retry interval after a failed refresh, seconds.
    retry: u32,
    /// Expiry of zone data on secondaries, seconds.
    expire: u32,
    /// Minimum TTL / negative-caching TTL, seconds.
    minimum: u32,
}

impl SOA {
    /// Creates a new SOA record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// Returns the primary name server.
    #[inline]
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// Returns the responsible mailbox in domain name form.
    #[inline]
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// Returns the responsible mailbox as an email address.
    ///
    /// The first label becomes the local part: `hostmaster.example.com.`
    /// renders as `hostmaster@example.com`.
    pub fn email(&self) -> String {
        let rname_str = self.rname.to_string();
        let mut result = String::with_capacity(rname_str.len());
        let mut chars = rname_str.chars();
        let mut found_at = false;

        while let Some(c) = chars.next() {
            if c == '\\' {
                result.push(c);
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            } else if c == '.' && !found_at {
                result.push('@');
                found_at = true;
            } else {
                result.push(c);
            }
        }

        if result.ends_with('.') {
            result.pop();
        }

        result
    }

    /// Returns the zone serial number.
    #[inline]
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Returns the refresh interval in seconds.
    #[inline]
    pub const fn refresh(&self) -> u32 {
        self.refresh
    }

    /// Returns the retry interval in seconds.
    #[inline]
    pub const fn retry(&self) -> u32 {
        self.retry
    }

    /// Returns the expire time in seconds.
    #[inline]
    pub const fn expire(&self) -> u32 {
        self.expire
    }

    /// Returns the minimum / negative-caching TTL in seconds.
    #[inline]
    pub const fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Parses an SOA record, returning it and the bytes consumed.
    ///
    /// Both MNAME and RNAME may use compression back into the message.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(message);
        let (mname, mname_len) = parser.parse_name(offset)?;
        let (rname, rname_len) = parser.parse_name(offset + mname_len)?;

        let mut reader = WireReader::new(message);
        reader.set_position(offset + mname_len + rname_len);

        let serial = reader.read_u32()?;
        let refresh = reader.read_u32()?;
        let retry = reader.read_u32()?;
        let expire = reader.read_u32()?;
        let minimum = reader.read_u32()?;

        Ok((
            Self {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            },
            mname_len + rname_len + 20,
        ))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.mname.wire_len() + self.rname.wire_len() + 20
    }

    /// Writes the SOA record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.mname.write_wire(buf);
        self.rname.write_wire(buf);
        buf.extend_from_slice(&self.serial.to_be_bytes());
        buf.extend_from_slice(&self.refresh.to_be_bytes());
        buf.extend_from_slice(&self.retry.to_be_bytes());
        buf.extend_from_slice(&self.expire.to_be_bytes());
        buf.extend_from_slice(&self.minimum.to_be_bytes());
    }
}

impl fmt::Display for SOA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> SOA {
        SOA::new(
            Name::from_str("ns1.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024_01_01,
            7200,
            3600,
            1_209_600,
            300,
        )
    }

    #[test]
    fn test_soa_roundtrip() {
        let original = sample();

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        let (parsed, consumed) = SOA::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_soa_email() {
        assert_eq!(sample().email(), "hostmaster@example.com");
    }

    #[test]
    fn test_soa_truncated_timers() {
        let mut buf = BytesMut::new();
        sample().write_to(&mut buf);
        buf.truncate(buf.len() - 4);

        assert!(SOA::parse(&buf, 0).is_err());
    }

    #[test]
    fn test_soa_display() {
        let display = sample().to_string();
        assert!(display.contains("ns1.example.com."));
        assert!(display.contains("20240101"));
        assert!(display.contains("300"));
    }
}
