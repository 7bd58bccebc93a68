//! Name-shaped record types (NS, CNAME, PTR, MB, MG, MR, MX, MINFO,
//! RP, AFSDB).
//!
//! These RDATA layouts embed domain names, which responses may
//! compress with pointers into earlier parts of the message. Their
//! parsers therefore take the whole datagram plus an offset, and
//! report how many bytes they consumed at that offset so the record
//! layer can enforce RDLENGTH conservation.

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NS record - Authoritative name server (RFC 1035).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NS {
    /// The name server's domain name.
    nsdname: Name,
}

impl NS {
    /// Creates a new NS record.
    #[inline]
    pub fn new(nsdname: Name) -> Self {
        Self { nsdname }
    }

    /// Returns the name server name.
    #[inline]
    pub fn nsdname(&self) -> &Name {
        &self.nsdname
    }

    /// Parses an NS record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (nsdname, consumed) = NameParser::new(message).parse_name(offset)?;
        Ok((Self { nsdname }, consumed))
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.nsdname.wire_len()
    }

    /// Writes the NS record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.nsdname.write_wire(buf);
    }
}

impl fmt::Display for NS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nsdname)
    }
}

/// CNAME record - Canonical name (RFC 1035).
///
/// Marks the owner name as an alias; resolution restarts at the
/// canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CNAME {
    /// The canonical domain name.
    cname: Name,
}

impl CNAME {
    /// Creates a new CNAME record.
    #[inline]
    pub fn new(cname: Name) -> Self {
        Self { cname }
    }

    /// Returns the canonical name.
    #[inline]
    pub fn target(&self) -> &Name {
        &self.cname
    }

    /// Parses a CNAME record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (cname, consumed) = NameParser::new(message).parse_name(offset)?;
        Ok((Self { cname }, consumed))
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.cname.wire_len()
    }

    /// Writes the CNAME record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.cname.write_wire(buf);
    }
}

impl fmt::Display for CNAME {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cname)
    }
}

/// PTR record - Domain name pointer (RFC 1035). Reverse lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PTR {
    /// The pointed-to domain name.
    ptrdname: Name,
}

impl PTR {
    /// Creates a new PTR record.
    #[inline]
    pub fn new(ptrdname: Name) -> Self {
        Self { ptrdname }
    }

    /// Returns the pointed-to name.
    #[inline]
    pub fn ptrdname(&self) -> &Name {
        &self.ptrdname
    }

    /// Parses a PTR record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ptrdname, consumed) = NameParser::new(message).parse_name(offset)?;
        Ok((Self { ptrdname }, consumed))
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.ptrdname.wire_len()
    }

    /// Writes the PTR record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.ptrdname.write_wire(buf);
    }
}

impl fmt::Display for PTR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ptrdname)
    }
}

/// MB record - Mailbox domain name (RFC 1035, experimental).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MB {
    /// Host holding the mailbox.
    madname: Name,
}

impl MB {
    /// Creates a new MB record.
    #[inline]
    pub fn new(madname: Name) -> Self {
        Self { madname }
    }

    /// Returns the mailbox host name.
    #[inline]
    pub fn madname(&self) -> &Name {
        &self.madname
    }

    /// Parses an MB record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (madname, consumed) = NameParser::new(message).parse_name(offset)?;
        Ok((Self { madname }, consumed))
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.madname.wire_len()
    }

    /// Writes the MB record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.madname.write_wire(buf);
    }
}

impl fmt::Display for MB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.madname)
    }
}

/// MG record - Mail group member (RFC 1035, experimental).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MG {
    /// Mailbox that is a member of the group.
    mgmname: Name,
}

impl MG {
    /// Creates a new MG record.
    #[inline]
    pub fn new(mgmname: Name) -> Self {
        Self { mgmname }
    }

    /// Returns the member mailbox name.
    #[inline]
    pub fn mgmname(&self) -> &Name {
        &self.mgmname
    }

    /// Parses an MG record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (mgmname, consumed) = NameParser::new(message).parse_name(offset)?;
        Ok((Self { mgmname }, consumed))
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.mgmname.wire_len()
    }

    /// Writes the MG record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.mgmname.write_wire(buf);
    }
}

impl fmt::Display for MG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mgmname)
    }
}

/// MR record - Mail rename domain name (RFC 1035, experimental).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MR {
    /// New mailbox name.
    newname: Name,
}

impl MR {
    /// Creates a new MR record.
    #[inline]
    pub fn new(newname: Name) -> Self {
        Self { newname }
    }

    /// Returns the renamed mailbox name.
    #[inline]
    pub fn newname(&self) -> &Name {
        &self.newname
    }

    /// Parses an MR record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (newname, consumed) = NameParser::new(message).parse_name(offset)?;
        Ok((Self { newname }, consumed))
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.newname.wire_len()
    }

    /// Writes the MR record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.newname.write_wire(buf);
    }
}

impl fmt::Display for MR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.newname)
    }
}

/// MX record - Mail exchange (RFC 1035).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MX {
    /// Preference: lower values are tried first.
    preference: u16,
    /// The mail exchange host.
    exchange: Name,
}

impl MX {
    /// Creates a new MX record.
    pub fn new(preference: u16, exchange: Name) -> Self {
        Self {
            preference,
            exchange,
        }
    }

    /// Returns the preference value.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the exchange host name.
    #[inline]
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    /// Parses an MX record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = WireReader::new(message);
        reader.set_position(offset);
        let preference = reader.read_u16()?;

        let (exchange, name_len) = NameParser::new(message).parse_name(offset + 2)?;

        Ok((
            Self {
                preference,
                exchange,
            },
            2 + name_len,
        ))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        2 + self.exchange.wire_len()
    }

    /// Writes the MX record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.preference.to_be_bytes());
        self.exchange.write_wire(buf);
    }
}

impl fmt::Display for MX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

/// MINFO record - Mailbox information (RFC 1035, experimental).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MINFO {
    /// Mailbox responsible for the mailing list.
    rmailbx: Name,
    /// Mailbox receiving error messages.
    emailbx: Name,
}

impl MINFO {
    /// Creates a new MINFO record.
    pub fn new(rmailbx: Name, emailbx: Name) -> Self {
        Self { rmailbx, emailbx }
    }

    /// Returns the responsible mailbox.
    #[inline]
    pub fn rmailbx(&self) -> &Name {
        &self.rmailbx
    }

    /// Returns the error mailbox.
    #[inline]
    pub fn emailbx(&self) -> &Name {
        &self.emailbx
    }

    /// Parses a MINFO record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(message);
        let (rmailbx, rmail_len) = parser.parse_name(offset)?;
        let (emailbx, email_len) = parser.parse_name(offset + rmail_len)?;

        Ok((Self { rmailbx, emailbx }, rmail_len + email_len))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.rmailbx.wire_len() + self.emailbx.wire_len()
    }

    /// Writes the MINFO record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.rmailbx.write_wire(buf);
        self.emailbx.write_wire(buf);
    }
}

impl fmt::Display for MINFO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rmailbx, self.emailbx)
    }
}

/// RP record - Responsible person (RFC 1183).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RP {
    /// Mailbox of the responsible person, in domain name form.
    mbox: Name,
    /// Name of a TXT record with further information.
    txt: Name,
}

impl RP {
    /// Creates a new RP record.
    pub fn new(mbox: Name, txt: Name) -> Self {
        Self { mbox, txt }
    }

    /// Returns the mailbox name.
    #[inline]
    pub fn mbox(&self) -> &Name {
        &self.mbox
    }

    /// Returns the TXT reference name.
    #[inline]
    pub fn txt(&self) -> &Name {
        &self.txt
    }

    /// Parses an RP record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(message);
        let (mbox, mbox_len) = parser.parse_name(offset)?;
        let (txt, txt_len) = parser.parse_name(offset + mbox_len)?;

        Ok((Self { mbox, txt }, mbox_len + txt_len))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.mbox.wire_len() + self.txt.wire_len()
    }

    /// Writes the RP record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.mbox.write_wire(buf);
        self.txt.write_wire(buf);
    }
}

impl fmt::Display for RP {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mbox, self.txt)
    }
}

/// AFSDB record - AFS database location (RFC 1183).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AFSDB {
    /// Subtype: 1 = AFS cell database server, 2 = DCE authenticated
    /// name server.
    subtype: u16,
    /// The server's host name.
    hostname: Name,
}

impl AFSDB {
    /// Creates a new AFSDB record.
    pub fn new(subtype: u16, hostname: Name) -> Self {
        Self { subtype, hostname }
    }

    /// Returns the subtype.
    #[inline]
    pub const fn subtype(&self) -> u16 {
        self.subtype
    }

    /// Returns the server host name.
    #[inline]
    pub fn hostname(&self) -> &Name {
        &self.hostname
    }

    /// Parses an AFSDB record, returning it and the bytes consumed.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = WireReader::new(message);
        reader.set_position(offset);
        let subtype = reader.read_u16()?;

        let (hostname, name_len) = NameParser::new(message).parse_name(offset + 2)?;

        Ok((Self { subtype, hostname }, 2 + name_len))
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        2 + self.hostname.wire_len()
    }

    /// Writes the AFSDB record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.subtype.to_be_bytes());
        self.hostname.write_wire(buf);
    }
}

impl fmt::Display for AFSDB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subtype, self.hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_single_name_roundtrip() {
        let name = Name::from_str("ns1.example.com").unwrap();
        let ns = NS::new(name.clone());

        let mut buf = BytesMut::new();
        ns.write_to(&mut buf);

        let (parsed, consumed) = NS::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed.nsdname(), &name);
    }

    #[test]
    fn test_cname_with_compression() {
        // offset 0: example.com.  offset 13: <ptr to 0>
        let message = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, 0xC0, 0x00,
        ];

        let (cname, consumed) = CNAME::parse(&message, 13).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(cname.target().to_string(), "example.com.");
    }

    #[test]
    fn test_mx_roundtrip() {
        let mx = MX::new(10, Name::from_str("mail.example.com").unwrap());

        let mut buf = BytesMut::new();
        mx.write_to(&mut buf);

        let (parsed, consumed) = MX::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, mx);
        assert_eq!(parsed.to_string(), "10 mail.example.com.");
    }

    #[test]
    fn test_minfo_two_names() {
        let minfo = MINFO::new(
            Name::from_str("owner.example.com").unwrap(),
            Name::from_str("errors.example.com").unwrap(),
        );

        let mut buf = BytesMut::new();
        minfo.write_to(&mut buf);

        let (parsed, consumed) = MINFO::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, minfo);
    }

    #[test]
    fn test_afsdb_roundtrip() {
        let afsdb = AFSDB::new(1, Name::from_str("afs.example.com").unwrap());

        let mut buf = BytesMut::new();
        afsdb.write_to(&mut buf);

        let (parsed, consumed) = AFSDB::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed.subtype(), 1);
    }

    #[test]
    fn test_rp_display() {
        let rp = RP::new(
            Name::from_str("admin.example.com").unwrap(),
            Name::from_str("info.example.com").unwrap(),
        );
        assert_eq!(rp.to_string(), "admin.example.com. info.example.com.");
    }
}
