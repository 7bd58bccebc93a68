//! DNS record data (RDATA) types.
//!
//! One decoder per catalog row, grouped by shape:
//!
//! - **Address records**: A, AAAA, WKS
//! - **Name-shaped records**: NS, CNAME, PTR, MB, MG, MR, MX, MINFO, RP, AFSDB
//! - **Authority records**: SOA
//! - **Text records**: TXT (and SPF, which shares its layout), HINFO
//! - **Service records**: SRV, NAPTR, URI, CAA
//! - **Certificate records**: CERT, TLSA, SSHFP
//! - **DNSSEC records**: DNSKEY, DS, RRSIG, NSEC, NSEC3, NSEC3PARAM
//! - **Opaque records**: NULL, unknown types
//!
//! [`RData::parse`] dispatches on the type code and reports how many
//! bytes the chosen decoder consumed, so the record layer can verify
//! the cursor advanced exactly RDLENGTH.

pub mod address;
pub mod authority;
pub mod cert;
pub mod dnssec;
pub mod host;
pub mod service;
pub mod text;
pub mod unknown;

pub use address::{A, AAAA, WKS};
pub use authority::SOA;
pub use cert::{CERT, SSHFP, TLSA};
pub use dnssec::{DNSKEY, DS, DigestType, DnsSecAlgorithm, NSEC, NSEC3, NSEC3PARAM, RRSIG};
pub use host::{AFSDB, CNAME, MB, MG, MINFO, MR, MX, NS, PTR, RP};
pub use service::{CAA, NAPTR, SRV, URI};
pub use text::{HINFO, TXT, escape_bytes};
pub use unknown::{NULL, Unknown};

use crate::error::{Error, Result};
use crate::name::Name;
use crate::rtype::RecordType;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Parsed DNS record data.
///
/// One variant per supported record type, plus [`RData::Unknown`] for
/// everything else. OPT pseudo-records are not represented here; the
/// message layer lifts them into [`crate::edns::Edns`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RData {
    /// IPv4 address.
    A(A),
    /// IPv6 address.
    AAAA(AAAA),
    /// Well-known services.
    WKS(WKS),
    /// Name server.
    NS(NS),
    /// Canonical name.
    CNAME(CNAME),
    /// Domain name pointer.
    PTR(PTR),
    /// Mailbox domain name.
    MB(MB),
    /// Mail group member.
    MG(MG),
    /// Mail rename domain name.
    MR(MR),
    /// Mail exchange.
    MX(MX),
    /// Mailbox information.
    MINFO(MINFO),
    /// Responsible person.
    RP(RP),
    /// AFS database location.
    AFSDB(AFSDB),
    /// Start of authority.
    SOA(SOA),
    /// Text strings.
    TXT(TXT),
    /// Sender policy framework; same layout as TXT.
    SPF(TXT),
    /// Host information.
    HINFO(HINFO),
    /// Service locator.
    SRV(SRV),
    /// Naming authority pointer.
    NAPTR(NAPTR),
    /// Uniform resource identifier.
    URI(URI),
    /// Certification authority authorization.
    CAA(CAA),
    /// Certificate.
    CERT(CERT),
    /// TLS certificate association.
    TLSA(TLSA),
    /// SSH key fingerprint.
    SSHFP(SSHFP),
    /// DNS public key.
    DNSKEY(DNSKEY),
    /// Delegation signer.
    DS(DS),
    /// DNSSEC signature.
    RRSIG(RRSIG),
    /// Next secure.
    NSEC(NSEC),
    /// Hashed next secure.
    NSEC3(NSEC3),
    /// NSEC3 parameters.
    NSEC3PARAM(NSEC3PARAM),
    /// Null record.
    NULL(NULL),
    /// Unknown record type, raw bytes preserved.
    Unknown(Unknown),
}

impl RData {
    /// Parses RDATA for the given type code.
    ///
    /// Name-bearing layouts parse against the whole message so
    /// compression pointers resolve; everything else parses against
    /// the exact RDLENGTH window. Returns the parsed data and the
    /// number of RDATA bytes the decoder consumed.
    ///
    /// # Arguments
    ///
    /// * `rtype` - the record type
    /// * `data` - the complete message
    /// * `offset` - start of the RDATA
    /// * `rdlength` - declared RDATA length
    pub fn parse(
        rtype: RecordType,
        data: &[u8],
        offset: usize,
        rdlength: u16,
    ) -> Result<(Self, usize)> {
        let rdlen = rdlength as usize;
        let window = data
            .get(offset..offset + rdlen)
            .ok_or_else(|| Error::buffer_too_short(offset + rdlen, data.len()))?;

        let parsed = match rtype {
            RecordType::A => (RData::A(A::parse(window)?), rdlen),
            RecordType::AAAA => (RData::AAAA(AAAA::parse(window)?), rdlen),
            RecordType::WKS => (RData::WKS(WKS::parse(window)?), rdlen),
            RecordType::NS => {
                let (rr, n) = NS::parse(data, offset)?;
                (RData::NS(rr), n)
            }
            RecordType::CNAME => {
                let (rr, n) = CNAME::parse(data, offset)?;
                (RData::CNAME(rr), n)
            }
            RecordType::PTR => {
                let (rr, n) = PTR::parse(data, offset)?;
                (RData::PTR(rr), n)
            }
            RecordType::MB => {
                let (rr, n) = MB::parse(data, offset)?;
                (RData::MB(rr), n)
            }
            RecordType::MG => {
                let (rr, n) = MG::parse(data, offset)?;
                (RData::MG(rr), n)
            }
            RecordType::MR => {
                let (rr, n) = MR::parse(data, offset)?;
                (RData::MR(rr), n)
            }
            RecordType::MX => {
                let (rr, n) = MX::parse(data, offset)?;
                (RData::MX(rr), n)
            }
            RecordType::MINFO => {
                let (rr, n) = MINFO::parse(data, offset)?;
                (RData::MINFO(rr), n)
            }
            RecordType::RP => {
                let (rr, n) = RP::parse(data, offset)?;
                (RData::RP(rr), n)
            }
            RecordType::AFSDB => {
                let (rr, n) = AFSDB::parse(data, offset)?;
                (RData::AFSDB(rr), n)
            }
            RecordType::SOA => {
                let (rr, n) = SOA::parse(data, offset)?;
                (RData::SOA(rr), n)
            }
            RecordType::TXT => (RData::TXT(TXT::parse(window)?), rdlen),
            RecordType::SPF => (RData::SPF(TXT::parse(window)?), rdlen),
            RecordType::HINFO => (RData::HINFO(HINFO::parse(window)?), rdlen),
            RecordType::SRV => {
                let (rr, n) = SRV::parse(data, offset)?;
                (RData::SRV(rr), n)
            }
            RecordType::NAPTR => {
                let (rr, n) = NAPTR::parse(data, offset)?;
                (RData::NAPTR(rr), n)
            }
            RecordType::URI => (RData::URI(URI::parse(window)?), rdlen),
            RecordType::CAA => (RData::CAA(CAA::parse(window)?), rdlen),
            RecordType::CERT => (RData::CERT(CERT::parse(window)?), rdlen),
            RecordType::TLSA => (RData::TLSA(TLSA::parse(window)?), rdlen),
            RecordType::SSHFP => (RData::SSHFP(SSHFP::parse(window)?), rdlen),
            RecordType::DNSKEY => (RData::DNSKEY(DNSKEY::parse(window)?), rdlen),
            RecordType::DS => (RData::DS(DS::parse(window)?), rdlen),
            RecordType::RRSIG => {
                let (rr, n) = RRSIG::parse(data, offset, rdlength)?;
                (RData::RRSIG(rr), n)
            }
            RecordType::NSEC => {
                let (rr, n) = NSEC::parse(data, offset, rdlength)?;
                (RData::NSEC(rr), n)
            }
            RecordType::NSEC3 => (RData::NSEC3(NSEC3::parse(window)?), rdlen),
            RecordType::NSEC3PARAM => (RData::NSEC3PARAM(NSEC3PARAM::parse(window)?), rdlen),
            RecordType::NULL => (RData::NULL(NULL::parse(window)), rdlen),
            // OPT is lifted into Edns by the message layer; ANY never
            // appears in a record.
            RecordType::OPT | RecordType::ANY => {
                (RData::Unknown(Unknown::new(rtype.to_u16(), window)), rdlen)
            }
        };

        Ok(parsed)
    }

    /// Returns the record type code of this RDATA.
    pub fn type_code(&self) -> u16 {
        match self {
            RData::A(_) => RecordType::A.to_u16(),
            RData::AAAA(_) => RecordType::AAAA.to_u16(),
            RData::WKS(_) => RecordType::WKS.to_u16(),
            RData::NS(_) => RecordType::NS.to_u16(),
            RData::CNAME(_) => RecordType::CNAME.to_u16(),
            RData::PTR(_) => RecordType::PTR.to_u16(),
            RData::MB(_) => RecordType::MB.to_u16(),
            RData::MG(_) => RecordType::MG.to_u16(),
            RData::MR(_) => RecordType::MR.to_u16(),
            RData::MX(_) => RecordType::MX.to_u16(),
            RData::MINFO(_) => RecordType::MINFO.to_u16(),
            RData::RP(_) => RecordType::RP.to_u16(),
            RData::AFSDB(_) => RecordType::AFSDB.to_u16(),
            RData::SOA(_) => RecordType::SOA.to_u16(),
            RData::TXT(_) => RecordType::TXT.to_u16(),
            RData::SPF(_) => RecordType::SPF.to_u16(),
            RData::HINFO(_) => RecordType::HINFO.to_u16(),
            RData::SRV(_) => RecordType::SRV.to_u16(),
            RData::NAPTR(_) => RecordType::NAPTR.to_u16(),
            RData::URI(_) => RecordType::URI.to_u16(),
            RData::CAA(_) => RecordType::CAA.to_u16(),
            RData::CERT(_) => RecordType::CERT.to_u16(),
            RData::TLSA(_) => RecordType::TLSA.to_u16(),
            RData::SSHFP(_) => RecordType::SSHFP.to_u16(),
            RData::DNSKEY(_) => RecordType::DNSKEY.to_u16(),
            RData::DS(_) => RecordType::DS.to_u16(),
            RData::RRSIG(_) => RecordType::RRSIG.to_u16(),
            RData::NSEC(_) => RecordType::NSEC.to_u16(),
            RData::NSEC3(_) => RecordType::NSEC3.to_u16(),
            RData::NSEC3PARAM(_) => RecordType::NSEC3PARAM.to_u16(),
            RData::NULL(_) => RecordType::NULL.to_u16(),
            RData::Unknown(u) => u.type_code(),
        }
    }

    /// Returns the wire format length of this RDATA.
    pub fn wire_len(&self) -> usize {
        match self {
            RData::A(r) => r.wire_len(),
            RData::AAAA(r) => r.wire_len(),
            RData::WKS(r) => r.wire_len(),
            RData::NS(r) => r.wire_len(),
            RData::CNAME(r) => r.wire_len(),
            RData::PTR(r) => r.wire_len(),
            RData::MB(r) => r.wire_len(),
            RData::MG(r) => r.wire_len(),
            RData::MR(r) => r.wire_len(),
            RData::MX(r) => r.wire_len(),
            RData::MINFO(r) => r.wire_len(),
            RData::RP(r) => r.wire_len(),
            RData::AFSDB(r) => r.wire_len(),
            RData::SOA(r) => r.wire_len(),
            RData::TXT(r) | RData::SPF(r) => r.wire_len(),
            RData::HINFO(r) => r.wire_len(),
            RData::SRV(r) => r.wire_len(),
            RData::NAPTR(r) => r.wire_len(),
            RData::URI(r) => r.wire_len(),
            RData::CAA(r) => r.wire_len(),
            RData::CERT(r) => r.wire_len(),
            RData::TLSA(r) => r.wire_len(),
            RData::SSHFP(r) => r.wire_len(),
            RData::DNSKEY(r) => r.wire_len(),
            RData::DS(r) => r.wire_len(),
            RData::RRSIG(r) => r.wire_len(),
            RData::NSEC(r) => r.wire_len(),
            RData::NSEC3(r) => r.wire_len(),
            RData::NSEC3PARAM(r) => r.wire_len(),
            RData::NULL(r) => r.wire_len(),
            RData::Unknown(r) => r.wire_len(),
        }
    }

    /// Writes this RDATA to wire format (names uncompressed).
    pub fn write_to(&self, buf: &mut BytesMut) {
        match self {
            RData::A(r) => r.write_to(buf),
            RData::AAAA(r) => r.write_to(buf),
            RData::WKS(r) => r.write_to(buf),
            RData::NS(r) => r.write_to(buf),
            RData::CNAME(r) => r.write_to(buf),
            RData::PTR(r) => r.write_to(buf),
            RData::MB(r) => r.write_to(buf),
            RData::MG(r) => r.write_to(buf),
            RData::MR(r) => r.write_to(buf),
            RData::MX(r) => r.write_to(buf),
            RData::MINFO(r) => r.write_to(buf),
            RData::RP(r) => r.write_to(buf),
            RData::AFSDB(r) => r.write_to(buf),
            RData::SOA(r) => r.write_to(buf),
            RData::TXT(r) | RData::SPF(r) => r.write_to(buf),
            RData::HINFO(r) => r.write_to(buf),
            RData::SRV(r) => r.write_to(buf),
            RData::NAPTR(r) => r.write_to(buf),
            RData::URI(r) => r.write_to(buf),
            RData::CAA(r) => r.write_to(buf),
            RData::CERT(r) => r.write_to(buf),
            RData::TLSA(r) => r.write_to(buf),
            RData::SSHFP(r) => r.write_to(buf),
            RData::DNSKEY(r) => r.write_to(buf),
            RData::DS(r) => r.write_to(buf),
            RData::RRSIG(r) => r.write_to(buf),
            RData::NSEC(r) => r.write_to(buf),
            RData::NSEC3(r) => r.write_to(buf),
            RData::NSEC3PARAM(r) => r.write_to(buf),
            RData::NULL(r) => r.write_to(buf),
            RData::Unknown(r) => r.write_to(buf),
        }
    }

    /// Returns the IPv4 address if this is an A record.
    pub fn as_a(&self) -> Option<Ipv4Addr> {
        match self {
            RData::A(a) => Some(a.address()),
            _ => None,
        }
    }

    /// Returns the IPv6 address if this is an AAAA record.
    pub fn as_aaaa(&self) -> Option<Ipv6Addr> {
        match self {
            RData::AAAA(aaaa) => Some(aaaa.address()),
            _ => None,
        }
    }

    /// Returns the target name if this is a CNAME record.
    pub fn as_cname(&self) -> Option<&Name> {
        match self {
            RData::CNAME(cname) => Some(cname.target()),
            _ => None,
        }
    }

    /// Returns true if this RDATA aliases another name.
    pub fn is_alias(&self) -> bool {
        matches!(self, RData::CNAME(_))
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(r) => write!(f, "{r}"),
            RData::AAAA(r) => write!(f, "{r}"),
            RData::WKS(r) => write!(f, "{r}"),
            RData::NS(r) => write!(f, "{r}"),
            RData::CNAME(r) => write!(f, "{r}"),
            RData::PTR(r) => write!(f, "{r}"),
            RData::MB(r) => write!(f, "{r}"),
            RData::MG(r) => write!(f, "{r}"),
            RData::MR(r) => write!(f, "{r}"),
            RData::MX(r) => write!(f, "{r}"),
            RData::MINFO(r) => write!(f, "{r}"),
            RData::RP(r) => write!(f, "{r}"),
            RData::AFSDB(r) => write!(f, "{r}"),
            RData::SOA(r) => write!(f, "{r}"),
            RData::TXT(r) | RData::SPF(r) => write!(f, "{r}"),
            RData::HINFO(r) => write!(f, "{r}"),
            RData::SRV(r) => write!(f, "{r}"),
            RData::NAPTR(r) => write!(f, "{r}"),
            RData::URI(r) => write!(f, "{r}"),
            RData::CAA(r) => write!(f, "{r}"),
            RData::CERT(r) => write!(f, "{r}"),
            RData::TLSA(r) => write!(f, "{r}"),
            RData::SSHFP(r) => write!(f, "{r}"),
            RData::DNSKEY(r) => write!(f, "{r}"),
            RData::DS(r) => write!(f, "{r}"),
            RData::RRSIG(r) => write!(f, "{r}"),
            RData::NSEC(r) => write!(f, "{r}"),
            RData::NSEC3(r) => write!(f, "{r}"),
            RData::NSEC3PARAM(r) => write!(f, "{r}"),
            RData::NULL(r) => write!(f, "{r}"),
            RData::Unknown(r) => write!(f, "{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_consumes_window_types() {
        // A record: window-shaped, consumed equals RDLENGTH.
        let message = [0x7B, 0x2D, 0x43, 0x09];
        let (rdata, consumed) = RData::parse(RecordType::A, &message, 0, 4).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(rdata.as_a(), Some(Ipv4Addr::new(123, 45, 67, 9)));
    }

    #[test]
    fn test_dispatch_reports_name_consumption() {
        // MX with a compressed exchange: 2 (preference) + 2 (pointer).
        let message = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // offset 0
            0x00, 0x0A, 0xC0, 0x00, // MX rdata at offset 13
        ];
        let (rdata, consumed) = RData::parse(RecordType::MX, &message, 13, 4).unwrap();
        assert_eq!(consumed, 4);
        assert!(matches!(rdata, RData::MX(_)));
    }

    #[test]
    fn test_spf_shares_txt_layout() {
        let window = [4, b's', b'p', b'f', b'1'];
        let (rdata, _) = RData::parse(RecordType::SPF, &window, 0, 5).unwrap();

        match &rdata {
            RData::SPF(txt) => assert_eq!(txt.strings()[0], b"spf1"),
            other => panic!("expected SPF, got {other:?}"),
        }
        assert_eq!(rdata.type_code(), 99);
    }

    #[test]
    fn test_unknown_window_too_short() {
        let message = [0x01, 0x02];
        assert!(RData::parse(RecordType::TXT, &message, 0, 8).is_err());
    }
}
