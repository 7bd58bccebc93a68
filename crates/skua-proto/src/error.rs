//! Codec error types.
//!
//! Every failure mode of the wire codec is a variant of [`Error`], with
//! enough structure (offsets, lengths, type names) for a caller to log
//! a useful diagnostic. Errors fall into two families: truncation (a
//! read ran past the end of the datagram) and malformation (a
//! structural rule of the wire format was violated).

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DNS wire codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Truncation
    // =========================================================================
    /// Buffer is too short to contain the expected data.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Expected minimum size.
        expected: usize,
        /// Actual buffer size.
        actual: usize,
    },

    /// A read ran past the end of the datagram.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof {
        /// Byte offset where the read would have ended.
        offset: usize,
    },

    /// Serialization would exceed the writer's size limit.
    #[error("buffer overflow: cannot write {needed} bytes with {available} available")]
    BufferOverflow {
        /// Bytes needed to write.
        needed: usize,
        /// Available space in the buffer.
        available: usize,
    },

    // =========================================================================
    // Malformation
    // =========================================================================
    /// A structural rule of the wire format was violated.
    #[error("invalid data at offset {offset}: {message}")]
    InvalidData {
        /// Byte offset of the invalid data.
        offset: usize,
        /// Description of the violation.
        message: String,
    },

    /// Label exceeds the 63-byte maximum.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// Domain name exceeds the 255-byte encoded maximum.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Actual encoded name length.
        length: usize,
    },

    /// A character not permitted in a label presentation form.
    #[error("invalid character '{character}' in label at position {position}")]
    InvalidLabelChar {
        /// The offending character.
        character: char,
        /// Position within the label.
        position: usize,
    },

    /// A compression pointer that does not point strictly backward.
    #[error("invalid compression pointer at offset {offset}: points to {target}")]
    InvalidCompressionPointer {
        /// Offset of the pointer.
        offset: usize,
        /// Target offset the pointer references.
        target: usize,
    },

    /// Pointer chain exceeded the hop budget (a cycle, in practice).
    #[error("too many compression pointer jumps (>{max_jumps})")]
    TooManyCompressionJumps {
        /// Maximum allowed jumps.
        max_jumps: usize,
    },

    /// A record's RDATA decoder did not consume exactly RDLENGTH bytes.
    #[error("RDLENGTH mismatch for {rtype}: declared {declared}, decoder consumed {consumed}")]
    RDataLengthMismatch {
        /// Record type name.
        rtype: String,
        /// RDLENGTH claimed by the record.
        declared: usize,
        /// Bytes actually consumed by the decoder.
        consumed: usize,
    },

    /// RDATA content violates the record type's internal layout.
    #[error("invalid RDATA for {rtype}: {message}")]
    InvalidRData {
        /// Record type name.
        rtype: String,
        /// Description of the violation.
        message: String,
    },

    /// Unassigned or reserved opcode value in the header.
    #[error("invalid opcode: {value}")]
    InvalidOpCode {
        /// The offending opcode value.
        value: u8,
    },

    /// Unassigned response code value.
    #[error("invalid response code: {value}")]
    InvalidResponseCode {
        /// The offending rcode value.
        value: u16,
    },

    /// A malformed EDNS option.
    #[error("invalid EDNS option {code}: {message}")]
    InvalidEdnsOption {
        /// Option code.
        code: u16,
        /// Description of the violation.
        message: String,
    },

    /// More than one OPT pseudo-record in a message.
    #[error("multiple OPT records in message (only one allowed)")]
    MultipleOptRecords,

    /// An OPT pseudo-record outside the additional section.
    #[error("OPT record found in {section} section (must be in additional)")]
    OptInWrongSection {
        /// Section where the OPT was found.
        section: &'static str,
    },

    // =========================================================================
    // Text
    // =========================================================================
    /// A field documented as UTF-8 failed strict decoding.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the field.
        offset: usize,
    },
}

impl Error {
    /// Creates a new `BufferTooShort` error.
    #[inline]
    pub fn buffer_too_short(expected: usize, actual: usize) -> Self {
        Self::BufferTooShort { expected, actual }
    }

    /// Creates a new `UnexpectedEof` error.
    #[inline]
    pub fn unexpected_eof(offset: usize) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Creates a new `BufferOverflow` error.
    #[inline]
    pub fn buffer_overflow(needed: usize, available: usize) -> Self {
        Self::BufferOverflow { needed, available }
    }

    /// Creates a new `InvalidData` error.
    #[inline]
    pub fn invalid_data(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidData {
            offset,
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRData` error.
    #[inline]
    pub fn invalid_rdata(rtype: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRData {
            rtype: rtype.into(),
            message: message.into(),
        }
    }

    /// Creates a new `RDataLengthMismatch` error.
    #[inline]
    pub fn rdata_length_mismatch(rtype: impl Into<String>, declared: usize, consumed: usize) -> Self {
        Self::RDataLengthMismatch {
            rtype: rtype.into(),
            declared,
            consumed,
        }
    }

    /// Creates a new `InvalidEdnsOption` error.
    #[inline]
    pub fn invalid_edns_option(code: u16, message: impl Into<String>) -> Self {
        Self::InvalidEdnsOption {
            code,
            message: message.into(),
        }
    }

    /// Returns true if this error reports a truncated datagram.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            Self::BufferTooShort { .. } | Self::UnexpectedEof { .. }
        )
    }

    /// Returns true if this error reports a structural violation.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidData { .. }
                | Self::LabelTooLong { .. }
                | Self::NameTooLong { .. }
                | Self::InvalidCompressionPointer { .. }
                | Self::TooManyCompressionJumps { .. }
                | Self::RDataLengthMismatch { .. }
                | Self::InvalidRData { .. }
                | Self::InvalidOpCode { .. }
                | Self::InvalidResponseCode { .. }
                | Self::InvalidEdnsOption { .. }
                | Self::MultipleOptRecords
                | Self::OptInWrongSection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::buffer_too_short(12, 8);
        assert_eq!(
            err.to_string(),
            "buffer too short: expected at least 12 bytes, got 8"
        );

        let err = Error::rdata_length_mismatch("A", 8, 4);
        assert_eq!(
            err.to_string(),
            "RDLENGTH mismatch for A: declared 8, decoder consumed 4"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::unexpected_eof(3).is_truncated());
        assert!(!Error::unexpected_eof(3).is_malformed());

        assert!(Error::LabelTooLong { length: 64 }.is_malformed());
        assert!(Error::rdata_length_mismatch("TXT", 10, 7).is_malformed());
        assert!(!Error::MultipleOptRecords.is_truncated());
    }
}
