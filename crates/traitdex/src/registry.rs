//! The canonical merged view of every delivered fragment

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::fragment::Fragment;
use crate::record::{ImplementorRecord, RecordKey};

/// The process-wide merge target for implementor fragments.
///
/// Fragments arrive in arbitrary order, possibly more than once; the
/// registry converges on the same merged content regardless. Arrival
/// order is preserved per trait for display purposes only — the merged
/// *set* of records is order-independent.
///
/// Merging never fails: a record missing its identity fields is dropped
/// and counted without disturbing its siblings, and a record whose
/// identity was already merged is silently absorbed.
///
/// # Example
///
/// ```
/// use traitdex::{Fragment, ImplementorRecord, Registry};
///
/// let mut registry = Registry::new();
/// let fragment = Fragment::from_records(vec![
///     ImplementorRecord::new("Display", "Foo", "crate_x"),
/// ]);
///
/// registry.merge(&fragment);
/// registry.merge(&fragment); // redelivery is idempotent
///
/// assert_eq!(registry.implementors("Display").count(), 1);
/// assert_eq!(registry.implementors("NoSuchTrait").count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Per-trait records in first-successful-merge order
    by_subject: IndexMap<String, Vec<ImplementorRecord>>,

    /// Identity keys of every merged record, for duplicate suppression
    seen: HashSet<RecordKey>,

    /// Count of malformed records dropped at merge time
    dropped: usize,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Merging
    // ═══════════════════════════════════════════════════════════════════

    /// Merge every record of a fragment into the index.
    ///
    /// Records without an identity (missing trait or implementing type)
    /// are dropped and counted; records already present are ignored.
    /// A malformed record never blocks its siblings.
    pub fn merge(&mut self, fragment: &Fragment) {
        for record in fragment.records() {
            let Some(key) = record.identity() else {
                self.dropped += 1;
                debug!(
                    owner = record.owning_crate(),
                    "dropping record with missing identity fields"
                );
                continue;
            };
            if self.seen.contains(&key) {
                trace!(
                    subject = record.trait_name(),
                    implementor = record.implementing_type(),
                    "absorbing redelivered record"
                );
                continue;
            }
            self.by_subject
                .entry(record.trait_name().to_string())
                .or_default()
                .push(record.clone());
            self.seen.insert(key);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    /// Iterate over the implementors recorded for a trait, in
    /// first-merge order.
    ///
    /// Unknown traits yield an empty iterator, never an error. The
    /// iterator is finite and restartable (call again to re-iterate).
    pub fn implementors(&self, trait_name: &str) -> impl Iterator<Item = &ImplementorRecord> {
        self.by_subject
            .get(trait_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
    }

    /// Iterate over every trait with at least one recorded implementor,
    /// in first-merge order.
    pub fn traits(&self) -> impl Iterator<Item = &str> {
        self.by_subject.keys().map(String::as_str)
    }

    /// Number of distinct traits recorded.
    pub fn trait_count(&self) -> usize {
        self.by_subject.len()
    }

    /// Total number of merged records across all traits.
    pub fn record_count(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been merged yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Number of malformed records dropped so far.
    pub fn dropped_records(&self) -> usize {
        self.dropped
    }
}
