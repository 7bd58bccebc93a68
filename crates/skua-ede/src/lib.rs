//! # Extended DNS Errors (RFC 8914)
//!
//! The Extended DNS Error registry: the 25 codepoints assigned by
//! RFC 8914 plus an [`EdeCode::Unknown`] sentinel for values outside
//! the registered range. The sentinel keeps the conversion from wire
//! values total, which the EDNS option decoder relies on: an
//! unregistered info code must decode, not fail.
//!
//! ```rust
//! use skua_ede::EdeCode;
//!
//! assert_eq!(EdeCode::from_u16(6), EdeCode::DnssecBogus);
//! assert_eq!(EdeCode::from_u16(40_000), EdeCode::Unknown);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extended DNS Error code (RFC 8914 Section 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdeCode {
    /// Other Error (0) - a catch-all when no other code applies.
    Other,
    /// Unsupported DNSKEY Algorithm (1).
    UnsupportedDnskeyAlgorithm,
    /// Unsupported DS Digest Type (2).
    UnsupportedDsDigestType,
    /// Stale Answer (3).
    StaleAnswer,
    /// Forged Answer (4).
    ForgedAnswer,
    /// DNSSEC Indeterminate (5).
    DnssecIndeterminate,
    /// DNSSEC Bogus (6).
    DnssecBogus,
    /// Signature Expired (7).
    SignatureExpired,
    /// Signature Not Yet Valid (8).
    SignatureNotYetValid,
    /// DNSKEY Missing (9).
    DnskeyMissing,
    /// RRSIGs Missing (10).
    RrsigsMissing,
    /// No Zone Key Bit Set (11).
    NoZoneKeyBitSet,
    /// NSEC Missing (12).
    NsecMissing,
    /// Cached Error (13).
    CachedError,
    /// Not Ready (14).
    NotReady,
    /// Blocked (15).
    Blocked,
    /// Censored (16).
    Censored,
    /// Filtered (17).
    Filtered,
    /// Prohibited (18).
    Prohibited,
    /// Stale NXDomain Answer (19).
    StaleNxdomainAnswer,
    /// Not Authoritative (20).
    NotAuthoritative,
    /// Not Supported (21).
    NotSupported,
    /// No Reachable Authority (22).
    NoReachableAuthority,
    /// Network Error (23).
    NetworkError,
    /// Invalid Data (24).
    InvalidData,
    /// A value outside the registered range.
    Unknown,
}

impl EdeCode {
    /// Maps a wire value onto the registry.
    ///
    /// Total: unregistered values map to [`EdeCode::Unknown`]. Callers
    /// that need the original value keep the raw `u16` alongside.
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Other,
            1 => Self::UnsupportedDnskeyAlgorithm,
            2 => Self::UnsupportedDsDigestType,
            3 => Self::StaleAnswer,
            4 => Self::ForgedAnswer,
            5 => Self::DnssecIndeterminate,
            6 => Self::DnssecBogus,
            7 => Self::SignatureExpired,
            8 => Self::SignatureNotYetValid,
            9 => Self::DnskeyMissing,
            10 => Self::RrsigsMissing,
            11 => Self::NoZoneKeyBitSet,
            12 => Self::NsecMissing,
            13 => Self::CachedError,
            14 => Self::NotReady,
            15 => Self::Blocked,
            16 => Self::Censored,
            17 => Self::Filtered,
            18 => Self::Prohibited,
            19 => Self::StaleNxdomainAnswer,
            20 => Self::NotAuthoritative,
            21 => Self::NotSupported,
            22 => Self::NoReachableAuthority,
            23 => Self::NetworkError,
            24 => Self::InvalidData,
            _ => Self::Unknown,
        }
    }

    /// Returns the registered wire value, or `None` for [`EdeCode::Unknown`].
    pub const fn to_u16(self) -> Option<u16> {
        match self {
            Self::Other => Some(0),
            Self::UnsupportedDnskeyAlgorithm => Some(1),
            Self::UnsupportedDsDigestType => Some(2),
            Self::StaleAnswer => Some(3),
            Self::ForgedAnswer => Some(4),
            Self::DnssecIndeterminate => Some(5),
            Self::DnssecBogus => Some(6),
            Self::SignatureExpired => Some(7),
            Self::SignatureNotYetValid => Some(8),
            Self::DnskeyMissing => Some(9),
            Self::RrsigsMissing => Some(10),
            Self::NoZoneKeyBitSet => Some(11),
            Self::NsecMissing => Some(12),
            Self::CachedError => Some(13),
            Self::NotReady => Some(14),
            Self::Blocked => Some(15),
            Self::Censored => Some(16),
            Self::Filtered => Some(17),
            Self::Prohibited => Some(18),
            Self::StaleNxdomainAnswer => Some(19),
            Self::NotAuthoritative => Some(20),
            Self::NotSupported => Some(21),
            Self::NoReachableAuthority => Some(22),
            Self::NetworkError => Some(23),
            Self::InvalidData => Some(24),
            Self::Unknown => None,
        }
    }

    /// Returns the registered name of the code.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Other => "Other Error",
            Self::UnsupportedDnskeyAlgorithm => "Unsupported DNSKEY Algorithm",
            Self::UnsupportedDsDigestType => "Unsupported DS Digest Type",
            Self::StaleAnswer => "Stale Answer",
            Self::ForgedAnswer => "Forged Answer",
            Self::DnssecIndeterminate => "DNSSEC Indeterminate",
            Self::DnssecBogus => "DNSSEC Bogus",
            Self::SignatureExpired => "Signature Expired",
            Self::SignatureNotYetValid => "Signature Not Yet Valid",
            Self::DnskeyMissing => "DNSKEY Missing",
            Self::RrsigsMissing => "RRSIGs Missing",
            Self::NoZoneKeyBitSet => "No Zone Key Bit Set",
            Self::NsecMissing => "NSEC Missing",
            Self::CachedError => "Cached Error",
            Self::NotReady => "Not Ready",
            Self::Blocked => "Blocked",
            Self::Censored => "Censored",
            Self::Filtered => "Filtered",
            Self::Prohibited => "Prohibited",
            Self::StaleNxdomainAnswer => "Stale NXDomain Answer",
            Self::NotAuthoritative => "Not Authoritative",
            Self::NotSupported => "Not Supported",
            Self::NoReachableAuthority => "No Reachable Authority",
            Self::NetworkError => "Network Error",
            Self::InvalidData => "Invalid Data",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true if the code reports a DNSSEC validation problem.
    pub const fn is_dnssec_related(self) -> bool {
        matches!(
            self,
            Self::UnsupportedDnskeyAlgorithm
                | Self::UnsupportedDsDigestType
                | Self::DnssecIndeterminate
                | Self::DnssecBogus
                | Self::SignatureExpired
                | Self::SignatureNotYetValid
                | Self::DnskeyMissing
                | Self::RrsigsMissing
                | Self::NoZoneKeyBitSet
                | Self::NsecMissing
        )
    }

    /// Returns true if the code reports policy blocking or filtering.
    pub const fn is_blocking(self) -> bool {
        matches!(
            self,
            Self::Blocked | Self::Censored | Self::Filtered | Self::Prohibited
        )
    }

    /// Returns true if the code reports stale data being served.
    pub const fn is_stale(self) -> bool {
        matches!(self, Self::StaleAnswer | Self::StaleNxdomainAnswer)
    }
}

impl fmt::Display for EdeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_roundtrip() {
        for value in 0..=24u16 {
            let code = EdeCode::from_u16(value);
            assert_ne!(code, EdeCode::Unknown, "code {value} should be registered");
            assert_eq!(code.to_u16(), Some(value));
        }
    }

    #[test]
    fn unregistered_values_map_to_unknown() {
        assert_eq!(EdeCode::from_u16(25), EdeCode::Unknown);
        assert_eq!(EdeCode::from_u16(u16::MAX), EdeCode::Unknown);
        assert_eq!(EdeCode::Unknown.to_u16(), None);
    }

    #[test]
    fn classification() {
        assert!(EdeCode::DnssecBogus.is_dnssec_related());
        assert!(!EdeCode::NetworkError.is_dnssec_related());

        assert!(EdeCode::Blocked.is_blocking());
        assert!(!EdeCode::StaleAnswer.is_blocking());

        assert!(EdeCode::StaleNxdomainAnswer.is_stale());
    }

    #[test]
    fn display_uses_registered_name() {
        assert_eq!(EdeCode::DnssecBogus.to_string(), "DNSSEC Bogus");
        assert_eq!(EdeCode::from_u16(16).to_string(), "Censored");
    }
}
