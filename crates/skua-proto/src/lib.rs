//! # skua-proto
//!
//! DNS wire-format codec: parsing of inbound response datagrams and
//! encoding of outbound queries, following RFC 1035 and its
//! extensions.
//!
//! ## Features
//!
//! - **Full RFC 1035 record catalog** plus SRV, NAPTR, CAA, URI, CERT,
//!   TLSA, SSHFP and the DNSSEC family (DS, RRSIG, NSEC, NSEC3,
//!   NSEC3PARAM, DNSKEY)
//! - **EDNS(0) support** (RFC 6891) with NSID and Extended DNS Error
//!   sub-options; unrecognized option codes are skipped
//! - **Name compression** on decode (RFC 1035 Section 4.1.4) with
//!   cycle-safe pointer following; outbound names are written
//!   uncompressed
//! - **Strict bounds checking** everywhere, including RDLENGTH
//!   conservation on every record
//! - **Unknown-type tolerance**: unrecognized record types decode to
//!   opaque RDATA and round-trip unchanged
//!
//! The codec is purely synchronous and does no I/O: it maps byte
//! buffers to structured messages and back. Socket handling, retry
//! policy, caching, and DNSSEC validation belong to its callers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use skua_proto::{Message, Name, Question};
//! use std::str::FromStr;
//!
//! // Build and serialize a query
//! let query = Message::query(Question::a(Name::from_str("example.com.")?));
//! let wire = query.to_wire();
//!
//! // Parse a response datagram
//! let response = Message::parse(&datagram)?;
//! for answer in response.answers() {
//!     println!("{answer}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod edns;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod rtype;
pub mod wire;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use edns::{Edns, EdnsOption};
pub use error::{Error, Result};
pub use header::Header;
pub use message::Message;
pub use name::Name;
pub use opcode::OpCode;
pub use question::Question;
pub use rcode::ResponseCode;
pub use rdata::RData;
pub use record::{ParseMode, RecordParser, ResourceRecord};
pub use rtype::{RecordType, Type};

/// Maximum length of a DNS label (RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum encoded length of a domain name, length bytes and terminal
/// zero included (RFC 1035).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS0 (RFC 1035).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// Default EDNS0 UDP payload size advertised in queries.
pub const DEFAULT_EDNS_UDP_SIZE: u16 = 4096;

/// The DNS port.
pub const DNS_PORT: u16 = 53;
