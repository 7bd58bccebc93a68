//! DNS message assembly and parsing.
//!
//! A message is the 12-byte header, the question section, and the
//! answer/authority/additional record sections. The OPT pseudo-record
//! is lifted out of the additional section into a typed [`Edns`] view
//! during parse; bytes past the last declared record are counted and
//! otherwise ignored.

use crate::edns::Edns;
use crate::error::{Error, Result};
use crate::header::{HEADER_SIZE, Header};
use crate::name::Name;
use crate::opcode::OpCode;
use crate::question::{Question, QuestionParser};
use crate::rcode::ResponseCode;
use crate::record::{ParseMode, RecordParser, ResourceRecord};
use crate::rtype::RecordType;
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A complete DNS message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The message header.
    header: Header,
    /// The question section.
    questions: Vec<Question>,
    /// The answer section.
    answers: Vec<ResourceRecord>,
    /// The authority section.
    authority: Vec<ResourceRecord>,
    /// The additional section, OPT excluded.
    additional: Vec<ResourceRecord>,
    /// EDNS(0) information lifted from the OPT pseudo-record.
    edns: Option<Edns>,
    /// Bytes present after the last declared record.
    trailing_bytes: usize,
}

impl Message {
    /// Creates an empty message with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            edns: None,
            trailing_bytes: 0,
        }
    }

    /// Creates an outbound query for a single question.
    ///
    /// The header gets a random ID and requests recursion; no EDNS is
    /// attached, so the message is exactly header plus question on the
    /// wire.
    pub fn query(question: Question) -> Self {
        let mut msg = Self::new(Header::query());
        msg.questions.push(question);
        msg.header.qd_count = 1;
        msg
    }

    /// Creates an outbound query carrying an OPT record with default
    /// EDNS settings.
    pub fn query_with_edns(question: Question) -> Self {
        let mut msg = Self::query(question);
        msg.set_edns(Some(Edns::new()));
        msg
    }

    /// Creates an outbound query requesting DNSSEC records (DO set).
    pub fn query_dnssec(question: Question) -> Self {
        let mut msg = Self::query(question);
        msg.set_edns(Some(Edns::with_dnssec()));
        msg
    }

    // =========================================================================
    // Header accessors
    // =========================================================================

    /// Returns the message header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    #[inline]
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the transaction ID.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Sets the transaction ID.
    #[inline]
    pub fn set_id(&mut self, id: u16) {
        self.header.id = id;
    }

    /// Returns the opcode.
    #[inline]
    pub fn opcode(&self) -> OpCode {
        self.header.opcode
    }

    /// Returns the response code.
    #[inline]
    pub fn rcode(&self) -> ResponseCode {
        self.header.rcode
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        self.header.is_query()
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.header.is_response()
    }

    /// Returns true if the message was truncated in transit.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.header.is_truncated()
    }

    // =========================================================================
    // Section accessors
    // =========================================================================

    /// Returns the question section.
    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question if present.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    #[inline]
    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    /// Returns the authority section.
    #[inline]
    pub fn authority(&self) -> &[ResourceRecord] {
        &self.authority
    }

    /// Returns the additional section (OPT excluded).
    #[inline]
    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    /// Returns the EDNS information if an OPT record was present.
    #[inline]
    pub fn edns(&self) -> Option<&Edns> {
        self.edns.as_ref()
    }

    /// Sets or clears the EDNS information.
    #[inline]
    pub fn set_edns(&mut self, edns: Option<Edns>) {
        self.edns = edns;
        self.update_ar_count();
    }

    /// Returns the number of ignored bytes after the last record.
    ///
    /// Nonzero only for parsed messages with junk past the declared
    /// sections.
    #[inline]
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    /// Returns true if EDNS is present with the DNSSEC OK flag.
    pub fn wants_dnssec(&self) -> bool {
        self.edns.as_ref().map(|e| e.dnssec_ok()).unwrap_or(false)
    }

    // =========================================================================
    // Section mutators
    // =========================================================================

    /// Adds a question.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qd_count = self.questions.len() as u16;
    }

    /// Adds an answer record.
    pub fn add_answer(&mut self, record: ResourceRecord) {
        self.answers.push(record);
        self.header.an_count = self.answers.len() as u16;
    }

    /// Adds an authority record.
    pub fn add_authority(&mut self, record: ResourceRecord) {
        self.authority.push(record);
        self.header.ns_count = self.authority.len() as u16;
    }

    /// Adds an additional record.
    pub fn add_additional(&mut self, record: ResourceRecord) {
        self.additional.push(record);
        self.update_ar_count();
    }

    fn update_ar_count(&mut self) {
        let edns_count = usize::from(self.edns.is_some());
        self.header.ar_count = (self.additional.len() + edns_count) as u16;
    }

    // =========================================================================
    // Response classification
    // =========================================================================

    /// Returns true if the response carries answers with NOERROR.
    pub fn is_success(&self) -> bool {
        self.rcode().is_success() && !self.answers.is_empty()
    }

    /// Returns true if this is an NXDOMAIN response.
    pub fn is_nxdomain(&self) -> bool {
        self.rcode().is_nxdomain()
    }

    /// Returns true if this is a NOERROR response without answers.
    pub fn is_nodata(&self) -> bool {
        self.rcode().is_success() && self.answers.is_empty()
    }

    /// Returns answer records of a specific type.
    pub fn answers_of_type(&self, rtype: RecordType) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .filter(move |r| r.record_type() == Some(rtype))
    }

    /// Returns the first CNAME target among the answers.
    pub fn cname_target(&self) -> Option<&Name> {
        self.answers.iter().find_map(|r| r.rdata().as_cname())
    }

    /// Returns A record addresses from the answers.
    pub fn a_records(&self) -> impl Iterator<Item = std::net::Ipv4Addr> + '_ {
        self.answers.iter().filter_map(|r| r.rdata().as_a())
    }

    /// Returns AAAA record addresses from the answers.
    pub fn aaaa_records(&self) -> impl Iterator<Item = std::net::Ipv6Addr> + '_ {
        self.answers.iter().filter_map(|r| r.rdata().as_aaaa())
    }

    // =========================================================================
    // Wire format
    // =========================================================================

    /// Parses a DNS message, rejecting any malformed record.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with_mode(data, ParseMode::Strict)
    }

    /// Parses a DNS message, downgrading malformed records to opaque
    /// RDATA where the record frame allows it.
    pub fn parse_lenient(data: &[u8]) -> Result<Self> {
        Self::parse_with_mode(data, ParseMode::Lenient)
    }

    fn parse_with_mode(data: &[u8], mode: ParseMode) -> Result<Self> {
        let header = Header::parse(data)?;

        let mut questions = Vec::with_capacity(header.qd_count as usize);
        let mut answers = Vec::with_capacity(header.an_count as usize);
        let mut authority = Vec::with_capacity(header.ns_count as usize);
        let mut additional = Vec::new();
        let mut edns = None;

        let mut q_parser = QuestionParser::new(data, HEADER_SIZE, header.qd_count);
        while let Some(q) = q_parser.next()? {
            questions.push(q);
        }

        let mut an_parser = RecordParser::with_mode(data, q_parser.offset(), header.an_count, mode);
        while let Some(r) = an_parser.next()? {
            if r.record_type() == Some(RecordType::OPT) {
                return Err(Error::OptInWrongSection { section: "answer" });
            }
            answers.push(r);
        }

        let mut ns_parser = RecordParser::with_mode(data, an_parser.offset(), header.ns_count, mode);
        while let Some(r) = ns_parser.next()? {
            if r.record_type() == Some(RecordType::OPT) {
                return Err(Error::OptInWrongSection {
                    section: "authority",
                });
            }
            authority.push(r);
        }

        let mut ar_parser = RecordParser::with_mode(data, ns_parser.offset(), header.ar_count, mode);
        while let Some(r) = ar_parser.next()? {
            if r.record_type() == Some(RecordType::OPT) {
                if edns.is_some() {
                    return Err(Error::MultipleOptRecords);
                }
                let mut rdata_wire = BytesMut::new();
                r.rdata().write_to(&mut rdata_wire);
                edns = Some(Edns::parse(r.rclass().to_u16(), r.ttl(), &rdata_wire)?);
            } else {
                additional.push(r);
            }
        }

        let trailing_bytes = data.len() - ar_parser.offset();
        if trailing_bytes > 0 {
            debug!(trailing_bytes, "ignoring bytes past the last record");
        }

        // Fold the EDNS extended bits back into the response code.
        let mut header = header;
        if let Some(ref e) = edns {
            if let Some(full_rcode) =
                ResponseCode::from_parts(header.rcode.header_rcode(), e.extended_rcode())
            {
                header.rcode = full_rcode;
            }
        }

        Ok(Self {
            header,
            questions,
            answers,
            authority,
            additional,
            edns,
            trailing_bytes,
        })
    }

    /// Returns the wire format length of this message.
    pub fn wire_len(&self) -> usize {
        let mut len = HEADER_SIZE;

        for q in &self.questions {
            len += q.wire_len();
        }
        for r in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            len += r.wire_len();
        }
        if let Some(edns) = &self.edns {
            len += edns.wire_len();
        }

        len
    }

    /// Writes the message to wire format.
    ///
    /// The header counts are derived from the actual section contents,
    /// keeping the count invariant on everything this codec emits.
    pub fn write_to(&self, buf: &mut BytesMut) {
        let mut header = self.header.clone();
        header.qd_count = self.questions.len() as u16;
        header.an_count = self.answers.len() as u16;
        header.ns_count = self.authority.len() as u16;
        header.ar_count = (self.additional.len() + usize::from(self.edns.is_some())) as u16;

        header.write_to(buf);

        for q in &self.questions {
            q.write_to(buf);
        }
        for r in &self.answers {
            r.write_to(buf);
        }
        for r in &self.authority {
            r.write_to(buf);
        }
        for r in &self.additional {
            r.write_to(buf);
        }
        if let Some(edns) = &self.edns {
            edns.write_to(buf);
        }
    }

    /// Converts the message to wire format bytes.
    pub fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.freeze()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new(Header::default())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;

        if let Some(edns) = &self.edns {
            writeln!(f, ";; OPT: {edns}")?;
        }

        writeln!(f, "\n;; QUESTION SECTION:")?;
        for q in &self.questions {
            writeln!(f, ";{q}")?;
        }

        if !self.answers.is_empty() {
            writeln!(f, "\n;; ANSWER SECTION:")?;
            for r in &self.answers {
                writeln!(f, "{r}")?;
            }
        }

        if !self.authority.is_empty() {
            writeln!(f, "\n;; AUTHORITY SECTION:")?;
            for r in &self.authority {
                writeln!(f, "{r}")?;
            }
        }

        if !self.additional.is_empty() {
            writeln!(f, "\n;; ADDITIONAL SECTION:")?;
            for r in &self.additional {
                writeln!(f, "{r}")?;
            }
        }

        Ok(())
    }
}
