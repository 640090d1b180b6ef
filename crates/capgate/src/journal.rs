//! Operation journal for gated instances.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a gated instance.
///
/// Assigned once by the factory; every view of the instance reports the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An operation performed on an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Bounded adjustment through a safe view.
    Safely { amount: i64 },
    /// Unchecked overwrite through an unsafe view.
    Unsafely { raw: i64 },
}

impl Op {
    pub fn is_unsafe(&self) -> bool {
        matches!(self, Op::Unsafely { .. })
    }
}

/// A journaled operation together with the value it left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub seq: u64,
    pub op: Op,
    pub value: i64,
}

/// Append-only, ordered record of operations.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    entries: Vec<Entry>,
}

impl Journal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `op`, returning the sequence number it was assigned.
    pub(crate) fn record(&mut self, op: Op, value: i64) -> u64 {
        let seq = self.entries.len() as u64;
        self.entries.push(Entry { seq, op, value });
        seq
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
