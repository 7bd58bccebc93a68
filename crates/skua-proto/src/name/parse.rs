//! Domain name decoding from wire format.
//!
//! Handles both plain label sequences and RFC 1035 Section 4.1.4
//! compression pointers. Pointer chains must move strictly backward
//! through the message and are additionally capped at 128 hops, so a
//! hostile datagram cannot loop the decoder.

use super::Name;
use crate::MAX_NAME_LENGTH;
use crate::error::{Error, Result};
use smallvec::SmallVec;

/// Maximum number of compression pointer jumps.
const MAX_COMPRESSION_JUMPS: usize = 128;

/// Parser for reading domain names out of a DNS message.
///
/// The parser holds the complete message buffer so compression
/// pointers can be resolved against earlier offsets.
#[derive(Debug, Clone)]
pub struct NameParser<'a> {
    /// The complete message buffer.
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a new name parser over a message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Parses a domain name starting at `offset`.
    ///
    /// Returns the decoded name and the number of bytes consumed at
    /// the starting position. Once a pointer is followed, consumption
    /// stops growing: the pointer contributes its own two bytes and
    /// the pointed-to remainder contributes nothing.
    pub fn parse_name(&self, offset: usize) -> Result<(Name, usize)> {
        let mut wire = SmallVec::<[u8; 64]>::new();
        let mut consumed = 0;
        let mut pos = offset;
        let mut jumps = 0;
        let mut followed_pointer = false;
        let mut label_count = 0u8;

        loop {
            if pos >= self.message.len() {
                return Err(Error::UnexpectedEof { offset: pos });
            }

            let len_byte = self.message[pos];

            // Compression pointer: top two bits set.
            if len_byte & 0xC0 == 0xC0 {
                if pos + 1 >= self.message.len() {
                    return Err(Error::UnexpectedEof { offset: pos + 1 });
                }

                let target =
                    usize::from(u16::from_be_bytes([len_byte & 0x3F, self.message[pos + 1]]));

                // Forward or self-referencing targets can only form loops.
                if target >= pos {
                    return Err(Error::InvalidCompressionPointer {
                        offset: pos,
                        target,
                    });
                }

                if !followed_pointer {
                    consumed = pos - offset + 2;
                    followed_pointer = true;
                }

                jumps += 1;
                if jumps > MAX_COMPRESSION_JUMPS {
                    return Err(Error::TooManyCompressionJumps {
                        max_jumps: MAX_COMPRESSION_JUMPS,
                    });
                }

                pos = target;
                continue;
            }

            // 0b01/0b10 prefixes are reserved label types.
            if len_byte & 0xC0 != 0 {
                return Err(Error::invalid_data(
                    pos,
                    format!("reserved label type 0x{:02X}", len_byte),
                ));
            }

            let len = len_byte as usize;

            // Root label ends the name.
            if len == 0 {
                wire.push(0);
                label_count += 1;

                if !followed_pointer {
                    consumed = pos - offset + 1;
                }
                break;
            }

            if pos + 1 + len > self.message.len() {
                return Err(Error::UnexpectedEof {
                    offset: pos + 1 + len,
                });
            }

            if wire.len() + 1 + len + 1 > MAX_NAME_LENGTH {
                return Err(Error::NameTooLong {
                    length: wire.len() + 1 + len + 1,
                });
            }

            wire.push(len as u8);
            wire.extend_from_slice(&self.message[pos + 1..pos + 1 + len]);
            label_count += 1;

            pos += 1 + len;
        }

        Ok((Name::from_parsed(wire, label_count), consumed))
    }

    /// Parses a name, discarding the consumed-byte count.
    #[inline]
    pub fn parse(&self, offset: usize) -> Result<Name> {
        self.parse_name(offset).map(|(name, _)| name)
    }

    /// Skips over a name, returning the number of bytes consumed.
    ///
    /// Cheaper than [`parse_name`](Self::parse_name) when the name
    /// itself is not needed.
    pub fn skip_name(&self, offset: usize) -> Result<usize> {
        let mut pos = offset;

        loop {
            if pos >= self.message.len() {
                return Err(Error::UnexpectedEof { offset: pos });
            }

            let len_byte = self.message[pos];

            // A pointer is always two bytes and terminates the name.
            if len_byte & 0xC0 == 0xC0 {
                if pos + 1 >= self.message.len() {
                    return Err(Error::UnexpectedEof { offset: pos + 1 });
                }
                return Ok(pos - offset + 2);
            }

            if len_byte & 0xC0 != 0 {
                return Err(Error::invalid_data(
                    pos,
                    format!("reserved label type 0x{:02X}", len_byte),
                ));
            }

            let len = len_byte as usize;

            if len == 0 {
                return Ok(pos - offset + 1);
            }

            pos += 1 + len;
        }
    }
}
