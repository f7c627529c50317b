//! Value lists with duplicate rows removed.
//!
//! When a child record is reachable from several parents, a naive walk
//! writes its row once per parent. [`RowDeduper`] keeps the first
//! occurrence of every distinct row and rolls the buffer back for repeats,
//! so the list stays in first-occurrence order.

use std::collections::HashSet;

use relwalk_core::{FieldDescriptor, RelationPath, Result, Slot};

use crate::config::FragmentConfig;
use crate::fragment::append_row;
use crate::walk::walk;

/// Separator written after every row while a list is being built.
pub const ROW_SEPARATOR: &[u8] = b", ";

/// Tracks the rows already written to a buffer.
///
/// A row is identified by its exact serialized bytes, trailing separator
/// included. Membership is only meaningful within one list.
#[derive(Debug, Default)]
pub struct RowDeduper {
    seen: HashSet<Vec<u8>>,
    enabled: bool,
    kept: usize,
    duplicates: usize,
}

impl RowDeduper {
    /// A deduper; with `enabled == false` every row is kept.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Decide on the row occupying `buf[start..]`.
    ///
    /// Returns `true` if the row is kept. A repeated row is removed from
    /// `buf` and `false` is returned.
    pub fn admit(&mut self, buf: &mut Vec<u8>, start: usize) -> bool {
        if self.enabled {
            let row = &buf[start..];
            if self.seen.contains(row) {
                tracing::trace!(bytes = row.len(), "dropping duplicate row");
                buf.truncate(start);
                self.duplicates += 1;
                return false;
            }
            self.seen.insert(row.to_vec());
        }
        self.kept += 1;
        true
    }

    /// Remove the separator following the last kept row.
    pub fn finish(&self, buf: &mut Vec<u8>) {
        if self.kept > 0 && buf.ends_with(ROW_SEPARATOR) {
            buf.truncate(buf.len() - ROW_SEPARATOR.len());
        }
    }

    pub fn kept(&self) -> usize {
        self.kept
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

/// Append one `(...)` row per record reachable from `root` along `path`,
/// separated by `, `.
///
/// With `config.dedup` set, byte-identical rows are written once. An empty
/// set of records appends nothing. On error `buf` is restored to its
/// original length.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path, columns = fields.len()))]
pub fn append_child_values(
    buf: &mut Vec<u8>,
    root: &dyn Slot,
    path: &RelationPath,
    fields: &[FieldDescriptor],
    config: &FragmentConfig,
) -> Result<()> {
    let base = buf.len();
    let mut dedup = RowDeduper::new(config.dedup);

    let result = walk(root, path, |record| {
        let start = buf.len();
        append_row(buf, record, fields)?;
        buf.extend_from_slice(ROW_SEPARATOR);
        dedup.admit(buf, start);
        Ok(())
    });
    if let Err(e) = result {
        buf.truncate(base);
        return Err(e);
    }

    dedup.finish(buf);
    tracing::debug!(
        rows = dedup.kept(),
        duplicates = dedup.duplicates(),
        "built value list"
    );
    Ok(())
}
