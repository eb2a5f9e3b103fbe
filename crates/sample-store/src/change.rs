use serde::{Deserialize, Serialize};

use crate::{SAMPLE_TABLE, Sample};

/// Kind of row-level mutation observed on the sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    /// All change kinds, in declaration order.
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Insert, ChangeKind::Update, ChangeKind::Delete];

    /// Returns the upper-case wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Insert => "INSERT",
            ChangeKind::Update => "UPDATE",
            ChangeKind::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed mutation of the sample table.
///
/// `new` carries the row after an insert or update, `old` the row before an
/// update or delete. The JSON shape matches the notification payload emitted
/// by the database trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default)]
    pub new: Option<Sample>,
    #[serde(default)]
    pub old: Option<Sample>,
}

impl ChangeEvent {
    /// Creates an insert event for a freshly inserted row.
    pub fn inserted(row: Sample) -> Self {
        Self {
            kind: ChangeKind::Insert,
            new: Some(row),
            old: None,
        }
    }

    /// Creates an update event.
    pub fn updated(old: Sample, new: Sample) -> Self {
        Self {
            kind: ChangeKind::Update,
            new: Some(new),
            old: Some(old),
        }
    }

    /// Creates a delete event for a removed row.
    pub fn deleted(row: Sample) -> Self {
        Self {
            kind: ChangeKind::Delete,
            new: None,
            old: Some(row),
        }
    }

    /// Returns the row this event is about: the new row for inserts and
    /// updates, the prior row for deletes.
    pub fn affected_row(&self) -> Option<&Sample> {
        match self.kind {
            ChangeKind::Insert | ChangeKind::Update => self.new.as_ref(),
            ChangeKind::Delete => self.old.as_ref(),
        }
    }
}

/// Selects which changes a feed subscription receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeFilter {
    pub table: String,
    pub kinds: Vec<ChangeKind>,
}

impl ChangeFilter {
    /// Subscribes to every change kind on `table`.
    pub fn all(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            kinds: ChangeKind::ALL.to_vec(),
        }
    }

    /// Subscribes to every change kind on the sample table.
    pub fn samples() -> Self {
        Self::all(SAMPLE_TABLE)
    }

    /// Restricts the filter to the given kinds.
    pub fn only(mut self, kinds: &[ChangeKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Returns true if the event's kind is covered by this filter.
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        self.kinds.contains(&event.kind)
    }
}
