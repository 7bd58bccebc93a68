//! Certificate-related record types (CERT, TLSA, SSHFP).

use crate::error::{Error, Result};
use crate::wire::WireReader;
use bytes::BytesMut;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CERT record - Certificate (RFC 4398).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CERT {
    /// Certificate type (1 = PKIX, 2 = SPKI, 3 = PGP, ...).
    cert_type: u16,
    /// Key tag of the covering key.
    key_tag: u16,
    /// Algorithm number.
    algorithm: u8,
    /// Certificate or CRL bytes.
    certificate: Vec<u8>,
}

impl CERT {
    /// Creates a new CERT record.
    pub fn new(cert_type: u16, key_tag: u16, algorithm: u8, certificate: impl Into<Vec<u8>>) -> Self {
        Self {
            cert_type,
            key_tag,
            algorithm,
            certificate: certificate.into(),
        }
    }

    /// Returns the certificate type.
    #[inline]
    pub const fn cert_type(&self) -> u16 {
        self.cert_type
    }

    /// Returns the key tag.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Returns the algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the certificate bytes.
    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }

    /// Parses a CERT record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 5 {
            return Err(Error::invalid_rdata("CERT", "too short"));
        }

        let mut reader = WireReader::new(data);
        let cert_type = reader.read_u16()?;
        let key_tag = reader.read_u16()?;
        let algorithm = reader.read_u8()?;
        let certificate = reader.read_remaining().to_vec();

        Ok(Self {
            cert_type,
            key_tag,
            algorithm,
            certificate,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        5 + self.certificate.len()
    }

    /// Writes the CERT record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.cert_type.to_be_bytes());
        buf.extend_from_slice(&self.key_tag.to_be_bytes());
        buf.extend_from_slice(&[self.algorithm]);
        buf.extend_from_slice(&self.certificate);
    }
}

impl fmt::Display for CERT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({} bytes)",
            self.cert_type,
            self.key_tag,
            self.algorithm,
            self.certificate.len()
        )
    }
}

/// TLSA record - TLS certificate association (RFC 6698).
///
/// Used by DANE to pin certificates or public keys to a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TLSA {
    /// Certificate usage (0-3).
    usage: u8,
    /// Selector: 0 = full certificate, 1 = SubjectPublicKeyInfo.
    selector: u8,
    /// Matching type: 0 = exact, 1 = SHA-256, 2 = SHA-512.
    matching_type: u8,
    /// Certificate association data.
    data: Vec<u8>,
}

impl TLSA {
    /// Creates a new TLSA record.
    pub fn new(usage: u8, selector: u8, matching_type: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            usage,
            selector,
            matching_type,
            data: data.into(),
        }
    }

    /// Returns the certificate usage.
    #[inline]
    pub const fn usage(&self) -> u8 {
        self.usage
    }

    /// Returns the selector.
    #[inline]
    pub const fn selector(&self) -> u8 {
        self.selector
    }

    /// Returns the matching type.
    #[inline]
    pub const fn matching_type(&self) -> u8 {
        self.matching_type
    }

    /// Returns the association data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the association data as lowercase hex.
    pub fn data_hex(&self) -> String {
        HEXLOWER.encode(&self.data)
    }

    /// Parses a TLSA record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 3 {
            return Err(Error::invalid_rdata("TLSA", "too short"));
        }

        let mut reader = WireReader::new(data);
        let usage = reader.read_u8()?;
        let selector = reader.read_u8()?;
        let matching_type = reader.read_u8()?;
        let assoc = reader.read_remaining().to_vec();

        Ok(Self {
            usage,
            selector,
            matching_type,
            data: assoc,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        3 + self.data.len()
    }

    /// Writes the TLSA record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.usage, self.selector, self.matching_type]);
        buf.extend_from_slice(&self.data);
    }
}

impl fmt::Display for TLSA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.usage,
            self.selector,
            self.matching_type,
            self.data_hex()
        )
    }
}

/// SSHFP record - SSH public key fingerprint (RFC 4255).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SSHFP {
    /// Key algorithm: 1 = RSA, 2 = DSA, 3 = ECDSA, 4 = Ed25519.
    algorithm: u8,
    /// Fingerprint type: 1 = SHA-1, 2 = SHA-256.
    fp_type: u8,
    /// The fingerprint bytes.
    fingerprint: Vec<u8>,
}

impl SSHFP {
    /// Creates a new SSHFP record.
    pub fn new(algorithm: u8, fp_type: u8, fingerprint: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            fp_type,
            fingerprint: fingerprint.into(),
        }
    }

    /// Returns the key algorithm.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the fingerprint type.
    #[inline]
    pub const fn fp_type(&self) -> u8 {
        self.fp_type
    }

    /// Returns the fingerprint bytes.
    pub fn fingerprint(&self) -> &[u8] {
        &self.fingerprint
    }

    /// Returns the fingerprint as lowercase hex.
    pub fn fingerprint_hex(&self) -> String {
        HEXLOWER.encode(&self.fingerprint)
    }

    /// Parses an SSHFP record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error::invalid_rdata("SSHFP", "too short"));
        }

        let mut reader = WireReader::new(data);
        let algorithm = reader.read_u8()?;
        let fp_type = reader.read_u8()?;
        let fingerprint = reader.read_remaining().to_vec();

        Ok(Self {
            algorithm,
            fp_type,
            fingerprint,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        2 + self.fingerprint.len()
    }

    /// Writes the SSHFP record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.algorithm, self.fp_type]);
        buf.extend_from_slice(&self.fingerprint);
    }
}

impl fmt::Display for SSHFP {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.algorithm,
            self.fp_type,
            self.fingerprint_hex()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cert_roundtrip() {
        let cert = CERT::new(1, 12345, 8, vec![0xDE, 0xAD, 0xBE, 0xEF]);

        let mut buf = BytesMut::new();
        cert.write_to(&mut buf);

        let parsed = CERT::parse(&buf).unwrap();
        assert_eq!(parsed, cert);
    }

    #[test]
    fn test_cert_too_short() {
        assert!(CERT::parse(&[0, 1, 0]).is_err());
    }

    #[test]
    fn test_tlsa_parse() {
        // DANE-EE, SPKI, SHA-256.
        let mut data = vec![3u8, 1, 1];
        data.extend_from_slice(&[0xAB; 32]);

        let tlsa = TLSA::parse(&data).unwrap();
        assert_eq!(tlsa.usage(), 3);
        assert_eq!(tlsa.selector(), 1);
        assert_eq!(tlsa.matching_type(), 1);
        assert_eq!(tlsa.data().len(), 32);
        assert!(tlsa.data_hex().starts_with("abab"));
    }

    #[test]
    fn test_sshfp_display() {
        let sshfp = SSHFP::new(4, 2, vec![0x01, 0x02, 0x03]);
        assert_eq!(sshfp.to_string(), "4 2 010203");
    }
}
