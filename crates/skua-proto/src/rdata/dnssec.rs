//! DNSSEC record types (DNSKEY, DS, RRSIG, NSEC, NSEC3, NSEC3PARAM).
//!
//! These records are parsed into their wire fields; signature
//! verification is a collaborator's job, not the codec's.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNSSEC algorithm numbers (RFC 8624).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DnsSecAlgorithm {
    /// RSA/MD5 (deprecated).
    RsaMd5 = 1,
    /// Diffie-Hellman.
    Dh = 2,
    /// DSA/SHA-1.
    Dsa = 3,
    /// RSA/SHA-1.
    RsaSha1 = 5,
    /// DSA-NSEC3-SHA1.
    DsaNsec3Sha1 = 6,
    /// RSA/SHA-1 with NSEC3.
    RsaSha1Nsec3Sha1 = 7,
    /// RSA/SHA-256.
    RsaSha256 = 8,
    /// RSA/SHA-512.
    RsaSha512 = 10,
    /// GOST R 34.10-2001.
    EccGost = 12,
    /// ECDSA P-256 with SHA-256.
    EcdsaP256Sha256 = 13,
    /// ECDSA P-384 with SHA-384.
    EcdsaP384Sha384 = 14,
    /// Ed25519.
    Ed25519 = 15,
    /// Ed448.
    Ed448 = 16,
}

impl DnsSecAlgorithm {
    /// Creates from a wire value.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::RsaMd5),
            2 => Some(Self::Dh),
            3 => Some(Self::Dsa),
            5 => Some(Self::RsaSha1),
            6 => Some(Self::DsaNsec3Sha1),
            7 => Some(Self::RsaSha1Nsec3Sha1),
            8 => Some(Self::RsaSha256),
            10 => Some(Self::RsaSha512),
            12 => Some(Self::EccGost),
            13 => Some(Self::EcdsaP256Sha256),
            14 => Some(Self::EcdsaP384Sha384),
            15 => Some(Self::Ed25519),
            16 => Some(Self::Ed448),
            _ => None,
        }
    }

    /// Returns true if RFC 8624 recommends this algorithm for signing.
    pub const fn is_recommended(&self) -> bool {
        matches!(
            self,
            Self::RsaSha256 | Self::EcdsaP256Sha256 | Self::EcdsaP384Sha384 | Self::Ed25519 | Self::Ed448
        )
    }
}

/// DS digest types (RFC 8624).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DigestType {
    /// SHA-1 (deprecated).
    Sha1 = 1,
    /// SHA-256.
    Sha256 = 2,
    /// GOST R 34.11-94.
    GostR34_11_94 = 3,
    /// SHA-384.
    Sha384 = 4,
}

impl DigestType {
    /// Creates from a wire value.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Sha1),
            2 => Some(Self::Sha256),
            3 => Some(Self::GostR34_11_94),
            4 => Some(Self::Sha384),
            _ => None,
        }
    }

    /// Returns the expected digest length in bytes.
    pub const fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 | Self::GostR34_11_94 => 32,
            Self::Sha384 => 48,
        }
    }
}

/// Decodes an NSEC/NSEC3 type bitmap into record type values.
///
/// The bitmap is a sequence of `{window, length, bits}` blocks; bit N
/// of window W set means type W*256+N is present. A malformed tail
/// ends the decode rather than failing it, since the bitmap is kept
/// raw anyway and this view only feeds rendering.
pub(crate) fn decode_type_bitmap(bytes: &[u8]) -> Vec<u16> {
    let mut types = Vec::new();
    let mut pos = 0;

    while pos + 2 <= bytes.len() {
        let window = u16::from(bytes[pos]);
        let len = bytes[pos + 1] as usize;
        pos += 2;

        if len == 0 || len > 32 || pos + len > bytes.len() {
            break;
        }

        for (i, &byte) in bytes[pos..pos + len].iter().enumerate() {
            for bit in 0u16..8 {
                if byte & (0x80u8 >> bit) != 0 {
                    types.push(window * 256 + (i as u16) * 8 + bit);
                }
            }
        }

        pos += len;
    }

    types
}

fn fmt_type_bitmap(f: &mut fmt::Formatter<'_>, bitmap: &[u8]) -> fmt::Result {
    for (i, t) in decode_type_bitmap(bitmap).into_iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        match crate::rtype::RecordType::from_u16(t) {
            Some(known) => write!(f, "{known}")?,
            None => write!(f, "TYPE{t}")?,
        }
    }
    Ok(())
}

/// DNSKEY record - DNS public key (RFC 4034).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DNSKEY {
    /// Flags: zone key, secure entry point.
    flags: u16,
    /// Protocol; must be 3.
    protocol: u8,
    /// Algorithm number.
    algorithm: u8,
    /// Public key bytes.
    public_key: Vec<u8>,
}

impl DNSKEY {
    /// Zone Key flag bit.
    pub const FLAG_ZONE_KEY: u16 = 0x0100;
    /// Secure Entry Point flag bit.
    pub const FLAG_SEP: u16 = 0x0001;

    /// Creates a new DNSKEY record.
    pub fn new(flags: u16, protocol: u8, algorithm: u8, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            flags,
            protocol,
            algorithm,
            public_key: public_key.into(),
        }
    }

    /// Returns the flags.
    #[inline]
    pub const fn flags(&self) -> u16 {
        self.flags
    }

    /// Returns true if this is a zone signing key.
    #[inline]
    pub const fn is_zone_key(&self) -> bool {
        (self.flags & Self::FLAG_ZONE_KEY) != 0
    }

    /// Returns true if this is a secure entry point (KSK).
    #[inline]
    pub const fn is_sep(&self) -> bool {
        (self.flags & Self::FLAG_SEP) != 0
    }

    /// Returns the protocol field.
    #[inline]
    pub const fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Returns the algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the algorithm as a registry value if known.
    pub fn algorithm_enum(&self) -> Option<DnsSecAlgorithm> {
        DnsSecAlgorithm::from_u8(self.algorithm)
    }

    /// Returns the public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Computes the key tag (RFC 4034 Appendix B).
    ///
    /// Algorithm 1 (RSA/MD5) does not use the generic checksum: its
    /// tag is the most significant 16 bits of the least significant
    /// 24 bits of the public key modulus (Appendix B.1), i.e. the
    /// fourth-to-last and third-to-last octets of the key data.
    pub fn key_tag(&self) -> u16 {
        if self.algorithm == 1 {
            let len = self.public_key.len();
            if len < 3 {
                return 0;
            }
            return u16::from_be_bytes([self.public_key[len - 3], self.public_key[len - 2]]);
        }

        let mut buf = BytesMut::new();
        self.write_to(&mut buf);

        let mut ac: u32 = 0;
        for (i, &byte) in buf.iter().enumerate() {
            if i & 1 == 0 {
                ac += u32::from(byte) << 8;
            } else {
                ac += u32::from(byte);
            }
        }
        ac += ac >> 16;
        (ac & 0xFFFF) as u16
    }

    /// Parses a DNSKEY record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::invalid_rdata("DNSKEY", "too short"));
        }

        let mut reader = WireReader::new(data);
        Ok(Self {
            flags: reader.read_u16()?,
            protocol: reader.read_u8()?,
            algorithm: reader.read_u8()?,
            public_key: reader.read_remaining().to_vec(),
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        4 + self.public_key.len()
    }

    /// Writes the DNSKEY record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&[self.protocol, self.algorithm]);
        buf.extend_from_slice(&self.public_key);
    }
}

impl fmt::Display for DNSKEY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({} bytes, tag={})",
            self.flags,
            self.protocol,
            self.algorithm,
            self.public_key.len(),
            self.key_tag()
        )
    }
}

/// DS record - Delegation signer (RFC 4034).
///
/// Links a child zone to its parent through a digest of the child's
/// key-signing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DS {
    /// Key tag of the referenced DNSKEY.
    key_tag: u16,
    /// Algorithm number.
    algorithm: u8,
    /// Digest type.
    digest_type: u8,
    /// Digest bytes.
    digest: Vec<u8>,
}

impl DS {
    /// Creates a new DS record.
    pub fn new(key_tag: u16, algorithm: u8, digest_type: u8, digest: impl Into<Vec<u8>>) -> Self {
        Self {
            key_tag,
            algorithm,
            digest_type,
            digest: digest.into(),
        }
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

    /// Returns the digest type.
    #[inline]
    pub const fn digest_type(&self) -> u8 {
        self.digest_type
    }

    /// Returns the digest type as a registry value if known.
    pub fn digest_type_enum(&self) -> Option<DigestType> {
        DigestType::from_u8(self.digest_type)
    }

    /// Returns the digest bytes.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Returns the digest as lowercase hex.
    pub fn digest_hex(&self) -> String {
        HEXLOWER.encode(&self.digest)
    }

    /// Parses a DS record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::invalid_rdata("DS", "too short"));
        }

        let mut reader = WireReader::new(data);
        Ok(Self {
            key_tag: reader.read_u16()?,
            algorithm: reader.read_u8()?,
            digest_type: reader.read_u8()?,
            digest: reader.read_remaining().to_vec(),
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        4 + self.digest.len()
    }

    /// Writes the DS record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.key_tag.to_be_bytes());
        buf.extend_from_slice(&[self.algorithm, self.digest_type]);
        buf.extend_from_slice(&self.digest);
    }
}

impl fmt::Display for DS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            self.digest_hex()
        )
    }
}

/// RRSIG record - DNSSEC signature (RFC 4034).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RRSIG {
    /// Type covered by this signature.
    type_covered: u16,
    /// Algorithm number.
    algorithm: u8,
    /// Label count of the original owner name.
    labels: u8,
    /// Original TTL of the covered RRset.
    original_ttl: u32,
    /// Signature expiration, Unix seconds.
    expiration: u32,
    /// Signature inception, Unix seconds.
    inception: u32,
    /// Key tag of the signing key.
    key_tag: u16,
    /// Signer's name.
    signer: Name,
    /// Signature bytes.
    signature: Vec<u8>,
}

impl RRSIG {
    /// Creates a new RRSIG record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: u16,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer: Name,
        signature: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer,
            signature: signature.into(),
        }
    }

    /// Returns the covered type value.
    #[inline]
    pub const fn type_covered(&self) -> u16 {
        self.type_covered
    }

    /// Returns the algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the original owner label count.
    #[inline]
    pub const fn labels(&self) -> u8 {
        self.labels
    }

    /// Returns the original TTL.
    #[inline]
    pub const fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    /// Returns the expiration timestamp.
    #[inline]
    pub const fn expiration(&self) -> u32 {
        self.expiration
    }

    /// Returns the inception timestamp.
    #[inline]
    pub const fn inception(&self) -> u32 {
        self.inception
    }

    /// Returns the key tag.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Returns the signer's name.
    #[inline]
    pub fn signer(&self) -> &Name {
        &self.signer
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Parses an RRSIG record, returning it and the bytes consumed.
    ///
    /// The signature runs from after the signer name to the end of the
    /// RDATA window.
    pub fn parse(message: &[u8], offset: usize, rdlength: u16) -> Result<(Self, usize)> {
        let end = offset + rdlength as usize;

        let mut reader = WireReader::new(message);
        reader.set_position(offset);

        let type_covered = reader.read_u16()?;
        let algorithm = reader.read_u8()?;
        let labels = reader.read_u8()?;
        let original_ttl = reader.read_u32()?;
        let expiration = reader.read_u32()?;
        let inception = reader.read_u32()?;
        let key_tag = reader.read_u16()?;

        let (signer, signer_len) = NameParser::new(message).parse_name(reader.position())?;

        let sig_start = reader.position() + signer_len;
        if sig_start > end {
            return Err(Error::invalid_rdata("RRSIG", "signer name exceeds RDATA"));
        }
        let signature = message
            .get(sig_start..end)
            .ok_or(Error::UnexpectedEof { offset: end })?
            .to_vec();

        Ok((
            Self {
                type_covered,
                algorithm,
                labels,
                original_ttl,
                expiration,
                inception,
                key_tag,
                signer,
                signature,
            },
            rdlength as usize,
        ))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        18 + self.signer.wire_len() + self.signature.len()
    }

    /// Writes the RRSIG record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.type_covered.to_be_bytes());
        buf.extend_from_slice(&[self.algorithm, self.labels]);
        buf.extend_from_slice(&self.original_ttl.to_be_bytes());
        buf.extend_from_slice(&self.expiration.to_be_bytes());
        buf.extend_from_slice(&self.inception.to_be_bytes());
        buf.extend_from_slice(&self.key_tag.to_be_bytes());
        self.signer.write_wire(buf);
        buf.extend_from_slice(&self.signature);
    }
}

impl fmt::Display for RRSIG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} ({} byte signature)",
            match crate::rtype::RecordType::from_u16(self.type_covered) {
                Some(t) => t.name().to_string(),
                None => format!("TYPE{}", self.type_covered),
            },
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer,
            self.signature.len()
        )
    }
}

/// NSEC record - Next secure (RFC 4034).
///
/// Proves nonexistence of names between the owner and the next owner
/// in canonical order. The type bitmap is kept raw with a decoded view
/// for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NSEC {
    /// Next owner name in canonical order.
    next_name: Name,
    /// Type bitmap, raw.
    type_bitmaps: Vec<u8>,
}

impl NSEC {
    /// Creates a new NSEC record.
    pub fn new(next_name: Name, type_bitmaps: impl Into<Vec<u8>>) -> Self {
        Self {
            next_name,
            type_bitmaps: type_bitmaps.into(),
        }
    }

    /// Returns the next owner name.
    #[inline]
    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    /// Returns the raw type bitmap.
    pub fn type_bitmaps(&self) -> &[u8] {
        &self.type_bitmaps
    }

    /// Returns the record type values present in the bitmap.
    pub fn types(&self) -> Vec<u16> {
        decode_type_bitmap(&self.type_bitmaps)
    }

    /// Parses an NSEC record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize, rdlength: u16) -> Result<(Self, usize)> {
        let end = offset + rdlength as usize;

        let (next_name, name_len) = NameParser::new(message).parse_name(offset)?;

        let bitmap_start = offset + name_len;
        if bitmap_start > end {
            return Err(Error::invalid_rdata("NSEC", "next name exceeds RDATA"));
        }
        let type_bitmaps = message
            .get(bitmap_start..end)
            .ok_or(Error::UnexpectedEof { offset: end })?
            .to_vec();

        Ok((
            Self {
                next_name,
                type_bitmaps,
            },
            rdlength as usize,
        ))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.next_name.wire_len() + self.type_bitmaps.len()
    }

    /// Writes the NSEC record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.next_name.write_wire(buf);
        buf.extend_from_slice(&self.type_bitmaps);
    }
}

impl fmt::Display for NSEC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.next_name)?;
        fmt_type_bitmap(f, &self.type_bitmaps)
    }
}

/// NSEC3 record - Hashed next secure (RFC 5155).
///
/// Salt and next-owner hash carry their own one-byte length prefixes
/// inside the RDATA; the type bitmap runs to the end of the window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NSEC3 {
    /// Hash algorithm (1 = SHA-1).
    hash_algorithm: u8,
    /// Flags; bit 0 is opt-out.
    flags: u8,
    /// Additional hash iterations.
    iterations: u16,
    /// Salt bytes.
    salt: Vec<u8>,
    /// Hashed next owner name.
    next_owner: Vec<u8>,
    /// Type bitmap, raw.
    type_bitmaps: Vec<u8>,
}

impl NSEC3 {
    /// Opt-out flag bit.
    pub const FLAG_OPT_OUT: u8 = 0x01;

    /// Creates a new NSEC3 record.
    pub fn new(
        hash_algorithm: u8,
        flags: u8,
        iterations: u16,
        salt: impl Into<Vec<u8>>,
        next_owner: impl Into<Vec<u8>>,
        type_bitmaps: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            hash_algorithm,
            flags,
            iterations,
            salt: salt.into(),
            next_owner: next_owner.into(),
            type_bitmaps: type_bitmaps.into(),
        }
    }

    /// Returns the hash algorithm.
    #[inline]
    pub const fn hash_algorithm(&self) -> u8 {
        self.hash_algorithm
    }

    /// Returns the flags byte.
    #[inline]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns true if the opt-out flag is set.
    #[inline]
    pub const fn opt_out(&self) -> bool {
        (self.flags & Self::FLAG_OPT_OUT) != 0
    }

    /// Returns the iteration count.
    #[inline]
    pub const fn iterations(&self) -> u16 {
        self.iterations
    }

    /// Returns the salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the hashed next owner.
    pub fn next_owner(&self) -> &[u8] {
        &self.next_owner
    }

    /// Returns the raw type bitmap.
    pub fn type_bitmaps(&self) -> &[u8] {
        &self.type_bitmaps
    }

    /// Returns the record type values present in the bitmap.
    pub fn types(&self) -> Vec<u16> {
        decode_type_bitmap(&self.type_bitmaps)
    }

    /// Parses an NSEC3 record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 5 {
            return Err(Error::invalid_rdata("NSEC3", "too short"));
        }

        let mut reader = WireReader::new(data);
        let hash_algorithm = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let iterations = reader.read_u16()?;
        let salt = reader
            .read_character_string()
            .map_err(|_| Error::invalid_rdata("NSEC3", "salt exceeds RDATA"))?
            .to_vec();
        let next_owner = reader
            .read_character_string()
            .map_err(|_| Error::invalid_rdata("NSEC3", "next owner exceeds RDATA"))?
            .to_vec();
        let type_bitmaps = reader.read_remaining().to_vec();

        Ok(Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            type_bitmaps,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        6 + self.salt.len() + self.next_owner.len() + self.type_bitmaps.len()
    }

    /// Writes the NSEC3 record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.hash_algorithm, self.flags]);
        buf.extend_from_slice(&self.iterations.to_be_bytes());
        buf.extend_from_slice(&[self.salt.len() as u8]);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&[self.next_owner.len() as u8]);
        buf.extend_from_slice(&self.next_owner);
        buf.extend_from_slice(&self.type_bitmaps);
    }
}

impl fmt::Display for NSEC3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salt = if self.salt.is_empty() {
            "-".to_string()
        } else {
            HEXLOWER.encode(&self.salt)
        };
        write!(
            f,
            "{} {} {} {} {} ",
            self.hash_algorithm,
            self.flags,
            self.iterations,
            salt,
            HEXLOWER.encode(&self.next_owner)
        )?;
        fmt_type_bitmap(f, &self.type_bitmaps)
    }
}

/// NSEC3PARAM record - NSEC3 parameters (RFC 5155).
///
/// The same leading fields as NSEC3 without next-owner or bitmap. A
/// window longer than the salt is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NSEC3PARAM {
    /// Hash algorithm (1 = SHA-1).
    hash_algorithm: u8,
    /// Flags.
    flags: u8,
    /// Additional hash iterations.
    iterations: u16,
    /// Salt bytes.
    salt: Vec<u8>,
}

impl NSEC3PARAM {
    /// Creates a new NSEC3PARAM record.
    pub fn new(hash_algorithm: u8, flags: u8, iterations: u16, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            hash_algorithm,
            flags,
            iterations,
            salt: salt.into(),
        }
    }

    /// Returns the hash algorithm.
    #[inline]
    pub const fn hash_algorithm(&self) -> u8 {
        self.hash_algorithm
    }

    /// Returns the flags byte.
    #[inline]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns the iteration count.
    #[inline]
    pub const fn iterations(&self) -> u16 {
        self.iterations
    }

    /// Returns the salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Parses an NSEC3PARAM record from its RDATA window.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 5 {
            return Err(Error::invalid_rdata("NSEC3PARAM", "too short"));
        }

        let mut reader = WireReader::new(data);
        let hash_algorithm = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let iterations = reader.read_u16()?;
        let salt = reader
            .read_character_string()
            .map_err(|_| Error::invalid_rdata("NSEC3PARAM", "salt exceeds RDATA"))?
            .to_vec();

        if !reader.is_empty() {
            return Err(Error::invalid_rdata("NSEC3PARAM", "trailing bytes after salt"));
        }

        Ok(Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        5 + self.salt.len()
    }

    /// Writes the NSEC3PARAM record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.hash_algorithm, self.flags]);
        buf.extend_from_slice(&self.iterations.to_be_bytes());
        buf.extend_from_slice(&[self.salt.len() as u8]);
        buf.extend_from_slice(&self.salt);
    }
}

impl fmt::Display for NSEC3PARAM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salt = if self.salt.is_empty() {
            "-".to_string()
        } else {
            HEXLOWER.encode(&self.salt)
        };
        write!(
            f,
            "{} {} {} {}",
            self.hash_algorithm, self.flags, self.iterations, salt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_dnskey_roundtrip() {
        let key = DNSKEY::new(0x0101, 3, 13, vec![0x01, 0x02, 0x03, 0x04]);
        assert!(key.is_zone_key());
        assert!(key.is_sep());
        assert_eq!(key.algorithm_enum(), Some(DnsSecAlgorithm::EcdsaP256Sha256));

        let mut buf = BytesMut::new();
        key.write_to(&mut buf);
        assert_eq!(DNSKEY::parse(&buf).unwrap(), key);
    }

    #[test]
    fn test_dnskey_key_tag_is_stable() {
        let key = DNSKEY::new(256, 3, 8, vec![0xAB; 64]);
        assert_eq!(key.key_tag(), key.key_tag());
    }

    #[test]
    fn test_rsamd5_key_tag_comes_from_modulus() {
        // Algorithm 1 takes the tag from the fourth- and third-to-last
        // octets of the key data, not the generic checksum.
        let mut modulus = vec![0u8; 16];
        modulus[13] = 0x12;
        modulus[14] = 0x34;
        modulus[15] = 0x56;
        let key = DNSKEY::new(256, 3, 1, modulus.clone());
        assert_eq!(key.key_tag(), 0x1234);

        // The same key data under another algorithm uses the checksum.
        let generic = DNSKEY::new(256, 3, 8, modulus);
        assert_ne!(generic.key_tag(), 0x1234);

        // Degenerate modulus shorter than three octets.
        let short = DNSKEY::new(256, 3, 1, vec![0x01, 0x02]);
        assert_eq!(short.key_tag(), 0);
    }

    #[test]
    fn test_ds_roundtrip() {
        let ds = DS::new(20326, 8, 2, vec![0xE0; 32]);
        assert_eq!(ds.digest_type_enum(), Some(DigestType::Sha256));
        assert_eq!(ds.digest_type_enum().unwrap().digest_len(), 32);

        let mut buf = BytesMut::new();
        ds.write_to(&mut buf);
        assert_eq!(DS::parse(&buf).unwrap(), ds);
    }

    #[test]
    fn test_rrsig_roundtrip() {
        let rrsig = RRSIG::new(
            1,
            13,
            2,
            3600,
            1_700_000_000,
            1_690_000_000,
            20326,
            Name::from_str("example.com").unwrap(),
            vec![0x55; 64],
        );

        let mut buf = BytesMut::new();
        rrsig.write_to(&mut buf);

        let (parsed, consumed) = RRSIG::parse(&buf, 0, buf.len() as u16).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, rrsig);
    }

    #[test]
    fn test_rrsig_signer_overruns_rdata() {
        let rrsig = RRSIG::new(
            1,
            13,
            2,
            3600,
            0,
            0,
            1,
            Name::from_str("example.com").unwrap(),
            vec![],
        );

        let mut buf = BytesMut::new();
        rrsig.write_to(&mut buf);

        // Claim an RDLENGTH that ends inside the signer name.
        assert!(RRSIG::parse(&buf, 0, 20).is_err());
    }

    #[test]
    fn test_type_bitmap_decode() {
        // Window 0, 1 byte: bits for A (1) and NS (2).
        let bitmap = [0x00, 0x01, 0b0110_0000];
        assert_eq!(decode_type_bitmap(&bitmap), vec![1, 2]);

        // Window 1: CAA (257) = bit 1 of window 1.
        let bitmap = [0x01, 0x01, 0b0100_0000];
        assert_eq!(decode_type_bitmap(&bitmap), vec![257]);
    }

    #[test]
    fn test_nsec_roundtrip() {
        let nsec = NSEC::new(
            Name::from_str("b.example.com").unwrap(),
            vec![0x00, 0x01, 0b0110_0000],
        );

        let mut buf = BytesMut::new();
        nsec.write_to(&mut buf);

        let (parsed, consumed) = NSEC::parse(&buf, 0, buf.len() as u16).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed.types(), vec![1, 2]);
        assert_eq!(parsed, nsec);
    }

    #[test]
    fn test_nsec3_internal_lengths() {
        let nsec3 = NSEC3::new(1, 1, 10, vec![0xAA, 0xBB], vec![0x11; 20], vec![]);
        assert!(nsec3.opt_out());

        let mut buf = BytesMut::new();
        nsec3.write_to(&mut buf);
        assert_eq!(NSEC3::parse(&buf).unwrap(), nsec3);
    }

    #[test]
    fn test_nsec3_salt_overrun() {
        // Salt claims 200 bytes in a 6-byte window.
        let data = [1, 0, 0, 10, 200, 0xAA];
        assert!(NSEC3::parse(&data).is_err());
    }

    #[test]
    fn test_nsec3param_rejects_trailing() {
        let data = [1, 0, 0, 1, 1, 0xAA, 0xFF];
        assert!(NSEC3PARAM::parse(&data).is_err());

        let data = [1, 0, 0, 1, 1, 0xAA];
        let param = NSEC3PARAM::parse(&data).unwrap();
        assert_eq!(param.salt(), &[0xAA]);
    }
}
