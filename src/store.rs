//! In-memory snapshot store

use crate::types::CurrencyRecord;
use std::sync::{Arc, PoisonError, RwLock};

/// Type alias for a complete, read-only catalog snapshot
pub type Snapshot = Arc<[CurrencyRecord]>;

/// Holds the current catalog snapshot
///
/// The snapshot is only ever swapped whole. Readers clone the `Arc` under a
/// short read lock, so they see either the previous snapshot or the new one,
/// never a mix.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Snapshot>>,
}

impl SnapshotStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `records`
    pub fn with_snapshot(records: Snapshot) -> Self {
        Self {
            current: RwLock::new(Some(records)),
        }
    }

    /// Replaces the snapshot in a single assignment
    ///
    /// # Returns
    /// Number of records in the new snapshot
    pub fn replace(&self, records: Snapshot) -> usize {
        let count = records.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(records);
        count
    }

    /// Returns the current snapshot, if any
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True once any snapshot has been stored
    pub fn has_snapshot(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Finds the first record whose symbol matches, case-insensitively
///
/// # Arguments
/// * `records` - Snapshot to scan
/// * `symbol` - Ticker symbol in any case
/// * `from_last` - Scan from the end, preferring the most recently added entry
pub fn find_by_symbol<'a>(
    records: &'a [CurrencyRecord],
    symbol: &str,
    from_last: bool,
) -> Option<&'a CurrencyRecord> {
    let needle = symbol.to_uppercase();
    if from_last {
        records.iter().rev().find(|c| c.matches_symbol(&needle))
    } else {
        records.iter().find(|c| c.matches_symbol(&needle))
    }
}
