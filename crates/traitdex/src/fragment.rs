//! Fragments: immutable, independently delivered batches of records

use indexmap::IndexMap;

use crate::error::{Result, WireError};
use crate::record::ImplementorRecord;

/// One self-contained unit of implementor data.
///
/// A fragment is produced once upstream and delivered at a time the
/// registry does not control: before it exists, after, or more than
/// once. It is never mutated after construction; at-least-once delivery
/// is absorbed downstream by record identity.
///
/// On the wire a fragment is a JSON object keyed by owning crate:
///
/// ```
/// use traitdex::Fragment;
///
/// let fragment = Fragment::from_json(
///     r#"{"crate_x": [{"trait": "Display", "type": "Foo"}]}"#,
/// ).unwrap();
/// assert_eq!(fragment.len(), 1);
/// assert_eq!(fragment.records().next().unwrap().owning_crate(), "crate_x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Records in wire order, each carrying its owning crate
    records: Vec<ImplementorRecord>,
}

impl Fragment {
    /// Build a fragment from a finished set of records.
    pub fn from_records(records: Vec<ImplementorRecord>) -> Self {
        Self { records }
    }

    /// Parse the structured wire format: a JSON object mapping each
    /// owning crate to its list of implementor descriptors.
    ///
    /// A descriptor without an explicit `"crate"` field inherits the
    /// owning crate from its map key. Wire order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Json`] when the payload is not valid JSON
    /// of the expected shape.
    pub fn from_json(payload: &str) -> Result<Self> {
        let entries: IndexMap<String, Vec<ImplementorRecord>> = serde_json::from_str(payload)?;
        let mut records = Vec::new();
        for (owner, batch) in entries {
            for mut record in batch {
                record.default_owning_crate(&owner);
                records.push(record);
            }
        }
        Ok(Self { records })
    }

    /// Serialize back to the structured wire format, grouped by owning
    /// crate in first-appearance order.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Json`] when serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut entries: IndexMap<&str, Vec<&ImplementorRecord>> = IndexMap::new();
        for record in &self.records {
            entries.entry(record.owning_crate()).or_default().push(record);
        }
        serde_json::to_string(&entries).map_err(WireError::from)
    }

    /// Iterate over the fragment's records in wire order.
    pub fn records(&self) -> impl Iterator<Item = &ImplementorRecord> {
        self.records.iter()
    }

    /// Number of records carried, malformed ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the fragment carries no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ImplementorRecord> for Fragment {
    fn from_iter<I: IntoIterator<Item = ImplementorRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
