//! In-memory table: one append-ordered sheet per entry kind.

use crate::types::{EntryKind, Record};
use std::collections::BTreeMap;

/// All logged records, grouped by kind
#[derive(Clone, Debug, Default)]
pub struct Table {
    sheets: BTreeMap<EntryKind, Vec<Record>>,
}

/// A kind with no sheet and a kind with an empty sheet compare equal
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        EntryKind::ALL
            .iter()
            .all(|&kind| self.sheet(kind) == other.sheet(kind))
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of its kind's sheet
    pub fn push(&mut self, record: impl Into<Record>) {
        let record = record.into();
        self.sheets.entry(record.kind()).or_default().push(record);
    }

    /// Records of one kind, in append order
    pub fn sheet(&self, kind: EntryKind) -> &[Record] {
        self.sheets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace a whole sheet. Records of another kind are dropped.
    pub(crate) fn set_sheet(&mut self, kind: EntryKind, records: Vec<Record>) {
        let records: Vec<Record> = records.into_iter().filter(|r| r.kind() == kind).collect();
        self.sheets.insert(kind, records);
    }

    pub fn len(&self) -> usize {
        self.sheets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
