use serde::{Deserialize, Serialize};

/// Identifier of a biodegradation sample row.
///
/// Wraps the store-assigned integer primary key so sample IDs can't be
/// mixed up with other integer values such as elapsed days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(i32);

impl SampleId {
    /// Creates a sample ID from a raw key.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying key.
    pub fn as_i32(&self) -> i32 {
        self.0
    }

    /// Returns the ID that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SampleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for SampleId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<SampleId> for i32 {
    fn from(id: SampleId) -> Self {
        id.0
    }
}
