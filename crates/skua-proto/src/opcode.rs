//! DNS operation codes.
//!
//! The OPCODE field in the header specifies the kind of query.
//! See RFC 1035 Section 4.1.1 and RFC 6895.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS operation code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum OpCode {
    /// Standard query (QUERY) - RFC 1035.
    Query = 0,

    /// Inverse query (IQUERY) - RFC 1035, obsoleted by RFC 3425.
    IQuery = 1,

    /// Server status request (STATUS) - RFC 1035.
    Status = 2,

    /// Zone change notification (NOTIFY) - RFC 1996.
    Notify = 4,

    /// Dynamic update (UPDATE) - RFC 2136.
    Update = 5,

    /// DNS Stateful Operations (DSO) - RFC 8490.
    Dso = 6,
}

impl OpCode {
    /// Returns the numeric value of the opcode.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Creates an opcode from its numeric value.
    ///
    /// Returns `None` for reserved or unassigned values.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns the conventional name of the opcode.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::IQuery => "IQUERY",
            Self::Status => "STATUS",
            Self::Notify => "NOTIFY",
            Self::Update => "UPDATE",
            Self::Dso => "DSO",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for OpCode {
    fn default() -> Self {
        Self::Query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(OpCode::Query.to_u8(), 0);
        assert_eq!(OpCode::Update.to_u8(), 5);
    }

    #[test]
    fn test_opcode_from_u8() {
        assert_eq!(OpCode::from_u8(0), Some(OpCode::Query));
        assert_eq!(OpCode::from_u8(2), Some(OpCode::Status));
        // 3 is unassigned.
        assert_eq!(OpCode::from_u8(3), None);
        assert_eq!(OpCode::from_u8(15), None);
    }

    #[test]
    fn test_opcode_display() {
        assert_eq!(OpCode::Query.to_string(), "QUERY");
        assert_eq!(OpCode::Notify.to_string(), "NOTIFY");
    }
}
