//! Recent history lookup.
//!
//! Shown before a new entry is logged so the user can see what they last
//! recorded. Purely a display aid; nothing here guards against duplicates.

use crate::table::Table;
use crate::types::{EntryKind, Record};

/// Number of records shown when no limit is configured
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Return up to `limit` records of `kind`, newest first
///
/// Records are ordered by their logged date; records sharing a date keep the
/// order they were appended in. An empty sheet yields an empty list.
pub fn recent_entries(table: &Table, kind: EntryKind, limit: usize) -> Vec<&Record> {
    let mut records: Vec<&Record> = table.sheet(kind).iter().collect();

    // Stable sort keeps append order within a day
    records.sort_by_key(|r| r.date());

    records.into_iter().rev().take(limit).collect()
}
