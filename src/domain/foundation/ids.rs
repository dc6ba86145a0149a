//! Strongly-typed identifier value objects.

use std::fmt;

/// Store-assigned identifier of a registered user.
///
/// Ids increase with insertion order, which is the order `list_all` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw id as issued by a store.
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
