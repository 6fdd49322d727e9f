// 🔌 Port Entity - numeric network port bound to one protocol
//
// Keyed by the RAW cell text ("80", "080" and "abc" are three ports),
// while `value` holds the parsed number written to SQL.

use super::Protocol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,

    /// Foreign key → protocols.id
    pub protocol_id: String,

    /// Parsed port number (0 when the cell text is not an integer)
    pub value: i64,
}

impl Port {
    pub fn new(value: i64, protocol: &Protocol) -> Self {
        Port {
            id: super::new_id(),
            protocol_id: protocol.id.clone(),
            value,
        }
    }
}

/// Parse port cell text as a decimal integer (optional sign, no whitespace)
///
/// Returns `None` for anything else; callers fall back to 0.
pub fn parse_port_value(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}
