use std::cmp::Reverse;
use crate::pipeline::row::AlertRow;

/// Unsuppressed first, then newest first, then by NUL-joined field text.
pub fn sort_rows(rows: &mut [AlertRow]) {
    rows.sort_by_cached_key(|row| (row.suppressed, Reverse(row.clock), row.values().join("\0")));
}
