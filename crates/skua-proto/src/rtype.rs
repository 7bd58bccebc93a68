//! DNS record types.
//!
//! The registry of record types this codec decodes, plus the QTYPE
//! values a resolver client sends. Type values outside the registry
//! flow through [`Type::Unknown`] and their RDATA is preserved opaque.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record type.
///
/// See RFC 1035 and the per-type RFCs noted on each variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordType {
    /// IPv4 address - RFC 1035.
    A = 1,

    /// Authoritative name server - RFC 1035.
    NS = 2,

    /// Canonical name (alias) - RFC 1035.
    CNAME = 5,

    /// Start of authority - RFC 1035.
    SOA = 6,

    /// Mailbox domain name - RFC 1035.
    MB = 7,

    /// Mail group member - RFC 1035.
    MG = 8,

    /// Mail rename domain name - RFC 1035.
    MR = 9,

    /// Null record - RFC 1035.
    NULL = 10,

    /// Well-known services - RFC 1035.
    WKS = 11,

    /// Domain name pointer - RFC 1035.
    PTR = 12,

    /// Host information - RFC 1035.
    HINFO = 13,

    /// Mailbox information - RFC 1035.
    MINFO = 14,

    /// Mail exchange - RFC 1035.
    MX = 15,

    /// Text strings - RFC 1035.
    TXT = 16,

    /// Responsible person - RFC 1183.
    RP = 17,

    /// AFS database location - RFC 1183.
    AFSDB = 18,

    /// IPv6 address - RFC 3596.
    AAAA = 28,

    /// Server selection - RFC 2782.
    SRV = 33,

    /// Naming authority pointer - RFC 3403.
    NAPTR = 35,

    /// Certificate - RFC 4398.
    CERT = 37,

    /// EDNS(0) option pseudo-record - RFC 6891.
    OPT = 41,

    /// Delegation signer - RFC 4034.
    DS = 43,

    /// SSH key fingerprint - RFC 4255.
    SSHFP = 44,

    /// DNSSEC signature - RFC 4034.
    RRSIG = 46,

    /// Next secure - RFC 4034.
    NSEC = 47,

    /// DNS public key - RFC 4034.
    DNSKEY = 48,

    /// Next secure v3 - RFC 5155.
    NSEC3 = 50,

    /// NSEC3 parameters - RFC 5155.
    NSEC3PARAM = 51,

    /// TLSA certificate association - RFC 6698.
    TLSA = 52,

    /// Sender policy framework - RFC 7208. Decoded like TXT.
    SPF = 99,

    /// Any record type (QTYPE) - RFC 1035, RFC 8482.
    ANY = 255,

    /// URI - RFC 7553.
    URI = 256,

    /// Certification authority authorization - RFC 8659.
    CAA = 257,
}

impl RecordType {
    /// Returns the numeric value of the record type.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a record type from its numeric value.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns true if this is a DNSSEC-related record type.
    #[inline]
    pub const fn is_dnssec(self) -> bool {
        matches!(
            self,
            Self::DNSKEY | Self::DS | Self::RRSIG | Self::NSEC | Self::NSEC3 | Self::NSEC3PARAM
        )
    }

    /// Returns true if this is a query-only type (QTYPE).
    #[inline]
    pub const fn is_query_type(self) -> bool {
        matches!(self, Self::ANY)
    }

    /// Returns true if this is a pseudo-record type.
    #[inline]
    pub const fn is_pseudo_record(self) -> bool {
        matches!(self, Self::OPT)
    }

    /// Returns true if this type's RDATA embeds a domain name, which
    /// may use message compression and needs the full datagram to
    /// decode.
    #[inline]
    pub const fn has_embedded_name(self) -> bool {
        matches!(
            self,
            Self::NS
                | Self::CNAME
                | Self::SOA
                | Self::MB
                | Self::MG
                | Self::MR
                | Self::PTR
                | Self::MINFO
                | Self::MX
                | Self::RP
                | Self::AFSDB
                | Self::SRV
                | Self::NAPTR
                | Self::RRSIG
                | Self::NSEC
        )
    }

    /// Returns the fixed RDATA length of this type, if it has one.
    #[inline]
    pub const fn fixed_rdata_len(self) -> Option<usize> {
        match self {
            Self::A => Some(4),
            Self::AAAA => Some(16),
            _ => None,
        }
    }

    /// Returns the conventional name of the record type.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::MB => "MB",
            Self::MG => "MG",
            Self::MR => "MR",
            Self::NULL => "NULL",
            Self::WKS => "WKS",
            Self::PTR => "PTR",
            Self::HINFO => "HINFO",
            Self::MINFO => "MINFO",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::RP => "RP",
            Self::AFSDB => "AFSDB",
            Self::AAAA => "AAAA",
            Self::SRV => "SRV",
            Self::NAPTR => "NAPTR",
            Self::CERT => "CERT",
            Self::OPT => "OPT",
            Self::DS => "DS",
            Self::SSHFP => "SSHFP",
            Self::RRSIG => "RRSIG",
            Self::NSEC => "NSEC",
            Self::DNSKEY => "DNSKEY",
            Self::NSEC3 => "NSEC3",
            Self::NSEC3PARAM => "NSEC3PARAM",
            Self::TLSA => "TLSA",
            Self::SPF => "SPF",
            Self::ANY => "ANY",
            Self::URI => "URI",
            Self::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::A
    }
}

/// A type value that can also represent unknown code points.
///
/// Unknown type values are preserved for forward compatibility; their
/// records decode to opaque RDATA and display in RFC 3597 `TYPE####`
/// notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    /// A registered record type.
    Known(RecordType),
    /// An unregistered type value.
    Unknown(u16),
}

impl Type {
    /// Creates a type from a u16 value.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        RecordType::from_u16(value)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(value))
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(t) => t.to_u16(),
            Self::Unknown(v) => v,
        }
    }

    /// Returns the registered type if known.
    #[inline]
    pub const fn as_known(self) -> Option<RecordType> {
        match self {
            Self::Known(t) => Some(t),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordType> for Type {
    fn from(t: RecordType) -> Self {
        Self::Known(t)
    }
}

impl From<u16> for Type {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(t) => write!(f, "{t}"),
            Self::Unknown(v) => write!(f, "TYPE{v}"),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Known(RecordType::A)
    }
}
