//! Address record types (A, AAAA, WKS).

use crate::error::{Error, Result};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A record - IPv4 address (RFC 1035).
///
/// The RDATA is exactly 4 bytes in network byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct A {
    /// The IPv4 address.
    address: Ipv4Addr,
}

impl A {
    /// Creates a new A record.
    #[inline]
    pub const fn new(address: Ipv4Addr) -> Self {
        Self { address }
    }

    /// Returns the IPv4 address.
    #[inline]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Parses an A record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != 4 {
            return Err(Error::rdata_length_mismatch("A", 4, data.len()));
        }

        let mut reader = WireReader::new(data);
        Ok(Self {
            address: reader.read_ipv4()?,
        })
    }

    /// Returns the wire format length (always 4).
    #[inline]
    pub const fn wire_len(&self) -> usize {
        4
    }

    /// Writes the A record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.address.octets());
    }
}

impl From<Ipv4Addr> for A {
    fn from(address: Ipv4Addr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// AAAA record - IPv6 address (RFC 3596).
///
/// The RDATA is exactly 16 bytes in network byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AAAA {
    /// The IPv6 address.
    address: Ipv6Addr,
}

impl AAAA {
    /// Creates a new AAAA record.
    #[inline]
    pub const fn new(address: Ipv6Addr) -> Self {
        Self { address }
    }

    /// Returns the IPv6 address.
    #[inline]
    pub const fn address(&self) -> Ipv6Addr {
        self.address
    }

    /// Parses an AAAA record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != 16 {
            return Err(Error::rdata_length_mismatch("AAAA", 16, data.len()));
        }

        let mut reader = WireReader::new(data);
        Ok(Self {
            address: reader.read_ipv6()?,
        })
    }

    /// Returns the wire format length (always 16).
    #[inline]
    pub const fn wire_len(&self) -> usize {
        16
    }

    /// Writes the AAAA record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.address.octets());
    }
}

impl From<Ipv6Addr> for AAAA {
    fn from(address: Ipv6Addr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for AAAA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// WKS record - Well-known services (RFC 1035).
///
/// An IPv4 address, an IP protocol number, and a bitmap of port
/// numbers. Obsolete in practice; the bitmap is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WKS {
    /// The host address.
    address: Ipv4Addr,
    /// IP protocol number (6 = TCP, 17 = UDP).
    protocol: u8,
    /// Service bitmap: bit N set means port N is served.
    bitmap: Vec<u8>,
}

impl WKS {
    /// Creates a new WKS record.
    pub fn new(address: Ipv4Addr, protocol: u8, bitmap: impl Into<Vec<u8>>) -> Self {
        Self {
            address,
            protocol,
            bitmap: bitmap.into(),
        }
    }

    /// Returns the host address.
    #[inline]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Returns the IP protocol number.
    #[inline]
    pub const fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Returns the raw service bitmap.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Returns true if the bitmap marks `port` as served.
    pub fn serves_port(&self, port: u16) -> bool {
        let byte = usize::from(port / 8);
        let bit = 7 - (port % 8);
        self.bitmap
            .get(byte)
            .map(|b| b & (1 << bit) != 0)
            .unwrap_or(false)
    }

    /// Parses a WKS record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 5 {
            return Err(Error::invalid_rdata("WKS", "too short"));
        }

        let mut reader = WireReader::new(data);
        let address = reader.read_ipv4()?;
        let protocol = reader.read_u8()?;
        let bitmap = reader.read_remaining().to_vec();

        Ok(Self {
            address,
            protocol,
            bitmap,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        5 + self.bitmap.len()
    }

    /// Writes the WKS record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.address.octets());
        buf.extend_from_slice(&[self.protocol]);
        buf.extend_from_slice(&self.bitmap);
    }
}

impl fmt::Display for WKS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} bitmap bytes)",
            self.address,
            self.protocol,
            self.bitmap.len()
        )
    }
}
