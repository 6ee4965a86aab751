//! Core type definitions for wordl.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a persisted record.
///
/// Record IDs are assigned by the primary store on insert and are:
/// - Unique within a record type
/// - Immutable once assigned
/// - Never reused, even after the record is deleted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Creates a new record ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A reference from one record to another record's id.
///
/// Serialized as `{ "id": n }`, the shape the admin client sends for
/// many-to-one relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    /// Id of the referenced record.
    pub id: RecordId,
}

impl RecordRef {
    /// Creates a reference to the given id.
    #[must_use]
    pub const fn new(id: RecordId) -> Self {
        Self { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
    }

    #[test]
    fn record_id_parse_and_display() {
        let id: RecordId = "42".parse().unwrap();
        assert_eq!(id, RecordId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_id_serializes_as_number() {
        let json = serde_json::to_string(&RecordId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn record_ref_shape() {
        let json = serde_json::to_string(&RecordRef::new(RecordId::new(3))).unwrap();
        assert_eq!(json, r#"{"id":3}"#);
    }
}
