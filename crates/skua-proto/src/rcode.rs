//! DNS response codes.
//!
//! The RCODE is 4 bits in the header; EDNS(0) extends it to 12 bits by
//! carrying the upper 8 bits in the OPT record's TTL field. This module
//! models the combined value. See RFC 1035 Section 4.1.1 and RFC 6895.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS response code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum ResponseCode {
    /// No error condition - RFC 1035.
    NoError = 0,

    /// Format error: the server could not interpret the query - RFC 1035.
    FormErr = 1,

    /// Server failure - RFC 1035.
    ServFail = 2,

    /// Name error: the queried name does not exist - RFC 1035.
    NXDomain = 3,

    /// Not implemented: query kind unsupported - RFC 1035.
    NotImp = 4,

    /// Refused for policy reasons - RFC 1035.
    Refused = 5,

    /// Name exists when it should not - RFC 2136.
    YXDomain = 6,

    /// RRset exists when it should not - RFC 2136.
    YXRRSet = 7,

    /// RRset that should exist does not - RFC 2136.
    NXRRSet = 8,

    /// Server not authoritative / not authorized - RFC 2136, RFC 8945.
    NotAuth = 9,

    /// Name not contained in zone - RFC 2136.
    NotZone = 10,

    /// DSO-TYPE not implemented - RFC 8490.
    DsoTypeNI = 11,

    // Extended RCODEs (require EDNS0)
    /// Bad OPT version (BADVERS) - RFC 6891.
    BadVers = 16,

    /// Key not recognized - RFC 8945.
    BadKey = 17,

    /// Signature out of time window - RFC 8945.
    BadTime = 18,

    /// Bad TKEY mode - RFC 2930.
    BadMode = 19,

    /// Duplicate key name - RFC 2930.
    BadName = 20,

    /// Algorithm not supported - RFC 2930.
    BadAlg = 21,

    /// Bad truncation - RFC 8945.
    BadTrunc = 22,

    /// Bad or missing server cookie - RFC 7873.
    BadCookie = 23,
}

impl ResponseCode {
    /// Returns the numeric value of the response code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Returns the low 4 bits carried in the header RCODE field.
    #[inline]
    pub const fn header_rcode(self) -> u8 {
        (self as u16 & 0x0F) as u8
    }

    /// Returns the upper 8 bits carried in the OPT record.
    #[inline]
    pub const fn extended_rcode(self) -> u8 {
        ((self as u16) >> 4) as u8
    }

    /// Recombines the header RCODE with the EDNS extended bits.
    #[inline]
    pub fn from_parts(header_rcode: u8, extended_rcode: u8) -> Option<Self> {
        let value = u16::from(extended_rcode) << 4 | u16::from(header_rcode & 0x0F);
        Self::try_from(value).ok()
    }

    /// Creates a response code from its 4-bit header value alone.
    #[inline]
    pub fn from_header(value: u8) -> Option<Self> {
        Self::try_from(u16::from(value & 0x0F)).ok()
    }

    /// Returns true if this response indicates success.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns true if the queried name does not exist.
    #[inline]
    pub const fn is_nxdomain(self) -> bool {
        matches!(self, Self::NXDomain)
    }

    /// Returns true if the server reported a failure.
    #[inline]
    pub const fn is_server_error(self) -> bool {
        matches!(self, Self::ServFail)
    }

    /// Returns true if the value needs EDNS extended bits to encode.
    #[inline]
    pub const fn is_extended(self) -> bool {
        (self as u16) > 15
    }

    /// Returns the conventional name of the response code.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::YXDomain => "YXDOMAIN",
            Self::YXRRSet => "YXRRSET",
            Self::NXRRSet => "NXRRSET",
            Self::NotAuth => "NOTAUTH",
            Self::NotZone => "NOTZONE",
            Self::DsoTypeNI => "DSOTYPENI",
            Self::BadVers => "BADVERS",
            Self::BadKey => "BADKEY",
            Self::BadTime => "BADTIME",
            Self::BadMode => "BADMODE",
            Self::BadName => "BADNAME",
            Self::BadAlg => "BADALG",
            Self::BadTrunc => "BADTRUNC",
            Self::BadCookie => "BADCOOKIE",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::NoError
    }
}
