//! DNS question section.

use crate::class::{Class, RecordClass};
use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS question: the name, type, and class being asked about.
///
/// A query normally carries exactly one question, though the wire
/// format permits several.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The domain name being queried.
    pub qname: Name,

    /// The type of record being requested.
    pub qtype: Type,

    /// The class of the query (usually IN).
    pub qclass: Class,
}

impl Question {
    /// Creates a new question.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
            qclass: Class::Known(qclass),
        }
    }

    /// Creates a question for an A record lookup.
    #[inline]
    pub fn a(name: Name) -> Self {
        Self::new(name, RecordType::A, RecordClass::IN)
    }

    /// Creates a question for an AAAA record lookup.
    #[inline]
    pub fn aaaa(name: Name) -> Self {
        Self::new(name, RecordType::AAAA, RecordClass::IN)
    }

    /// Creates a question for an MX record lookup.
    #[inline]
    pub fn mx(name: Name) -> Self {
        Self::new(name, RecordType::MX, RecordClass::IN)
    }

    /// Creates a question for a TXT record lookup.
    #[inline]
    pub fn txt(name: Name) -> Self {
        Self::new(name, RecordType::TXT, RecordClass::IN)
    }

    /// Creates a question for a PTR (reverse) lookup.
    #[inline]
    pub fn ptr(name: Name) -> Self {
        Self::new(name, RecordType::PTR, RecordClass::IN)
    }

    /// Returns the record type if known.
    #[inline]
    pub fn record_type(&self) -> Option<RecordType> {
        self.qtype.as_known()
    }

    /// Returns the record class if known.
    #[inline]
    pub fn record_class(&self) -> Option<RecordClass> {
        self.qclass.as_known()
    }

    /// Parses a question from a message at the given offset.
    ///
    /// Returns the question and the number of bytes consumed.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(data);
        let (qname, name_len) = parser.parse_name(offset)?;

        let mut reader = WireReader::new(data);
        reader.set_position(offset + name_len);
        let qtype = Type::from_u16(reader.read_u16()?);
        let qclass = Class::from_u16(reader.read_u16()?);

        Ok((
            Self {
                qname,
                qtype,
                qclass,
            },
            name_len + 4,
        ))
    }

    /// Returns the wire format length of this question.
    pub fn wire_len(&self) -> usize {
        self.qname.wire_len() + 4
    }

    /// Writes the question to wire format (name uncompressed).
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.qname.write_wire(buf);
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
    }

    /// Returns true if `other` asks the same question.
    ///
    /// Name comparison is case-insensitive, type and class exact.
    pub fn matches(&self, other: &Question) -> bool {
        self.qname == other.qname && self.qtype == other.qtype && self.qclass == other.qclass
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qclass, self.qtype)
    }
}

/// Sequential parser for the question section.
#[derive(Debug)]
pub struct QuestionParser<'a> {
    /// The message data.
    data: &'a [u8],
    /// Current offset in the message.
    offset: usize,
    /// Number of questions remaining.
    remaining: u16,
}

impl<'a> QuestionParser<'a> {
    /// Creates a new question parser.
    #[inline]
    pub const fn new(data: &'a [u8], offset: usize, count: u16) -> Self {
        Self {
            data,
            offset,
            remaining: count,
        }
    }

    /// Returns the current offset.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Parses the next question, or `None` when the section is done.
    pub fn next(&mut self) -> Result<Option<Question>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let (question, consumed) = Question::parse(self.data, self.offset)?;
        self.offset += consumed;
        self.remaining -= 1;

        Ok(Some(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_question_creation() {
        let name = Name::from_str("example.com").unwrap();
        let q = Question::a(name.clone());

        assert_eq!(q.qname, name);
        assert_eq!(q.record_type(), Some(RecordType::A));
        assert_eq!(q.record_class(), Some(RecordClass::IN));
    }

    #[test]
    fn test_question_roundtrip() {
        let name = Name::from_str("www.example.com").unwrap();
        let original = Question::aaaa(name);

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        let (parsed, consumed) = Question::parse(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_question_matching() {
        let q1 = Question::a(Name::from_str("example.com").unwrap());
        let q2 = Question::a(Name::from_str("EXAMPLE.COM").unwrap());
        let q3 = Question::aaaa(Name::from_str("example.com").unwrap());

        assert!(q1.matches(&q2));
        assert!(!q1.matches(&q3));
    }

    #[test]
    fn test_question_display() {
        let q = Question::mx(Name::from_str("example.com").unwrap());
        let display = q.to_string();

        assert!(display.contains("example.com."));
        assert!(display.contains("MX"));
        assert!(display.contains("IN"));
    }
}
