//! Implementor records and their identity keys

use serde::{Deserialize, Serialize};

/// A single implementor fact: one type, from one crate, implementing
/// one trait.
///
/// Records are immutable once constructed. `constraint_text`,
/// `module_path`, and `rendering` are carried verbatim and never
/// interpreted; generic
/// parameters inside `implementing_type` are opaque string tokens.
///
/// # Example
///
/// ```
/// use traitdex::ImplementorRecord;
///
/// let record = ImplementorRecord::new("Display", "Foo", "crate_x");
/// assert_eq!(record.trait_name(), "Display");
/// assert!(record.identity().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementorRecord {
    /// Identifier of the trait being implemented
    #[serde(rename = "trait", default)]
    trait_name: String,

    /// Fully-qualified implementing type, possibly parameterized
    #[serde(rename = "type", default)]
    implementing_type: String,

    /// Name of the package that defines the implementing type
    #[serde(rename = "crate", default)]
    owning_crate: String,

    /// Originating module path of the implementing type, carried verbatim
    #[serde(rename = "module", default, skip_serializing_if = "String::is_empty")]
    module_path: String,

    /// `where`-style constraint text, carried verbatim
    #[serde(rename = "where", default, skip_serializing_if = "String::is_empty")]
    constraint_text: String,

    /// True when the implementation is compiler-synthesized
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    synthetic: bool,

    /// Human-readable rendering of the implementation, carried verbatim
    #[serde(rename = "text", default, skip_serializing_if = "String::is_empty")]
    rendering: String,
}

impl ImplementorRecord {
    /// Create a record with the three required identity fields.
    pub fn new(
        trait_name: impl Into<String>,
        implementing_type: impl Into<String>,
        owning_crate: impl Into<String>,
    ) -> Self {
        Self {
            trait_name: trait_name.into(),
            implementing_type: implementing_type.into(),
            owning_crate: owning_crate.into(),
            module_path: String::new(),
            constraint_text: String::new(),
            synthetic: false,
            rendering: String::new(),
        }
    }

    /// Attach an originating module path (builder style).
    #[must_use]
    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Attach constraint text to the record (builder style).
    #[must_use]
    pub fn with_constraint(mut self, constraint_text: impl Into<String>) -> Self {
        self.constraint_text = constraint_text.into();
        self
    }

    /// Mark the record as compiler-synthesized (builder style).
    #[must_use]
    pub fn with_synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Attach a human-readable rendering (builder style).
    #[must_use]
    pub fn with_rendering(mut self, rendering: impl Into<String>) -> Self {
        self.rendering = rendering.into();
        self
    }

    /// The trait this record documents an implementation of.
    pub fn trait_name(&self) -> &str {
        &self.trait_name
    }

    /// The fully-qualified implementing type.
    pub fn implementing_type(&self) -> &str {
        &self.implementing_type
    }

    /// The crate that defines the implementing type.
    pub fn owning_crate(&self) -> &str {
        &self.owning_crate
    }

    /// The originating module path, empty when none was provided.
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// The verbatim constraint text, empty when unconstrained.
    pub fn constraint_text(&self) -> &str {
        &self.constraint_text
    }

    /// Whether the implementation is compiler-synthesized.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// The verbatim rendering string, empty when none was provided.
    pub fn rendering(&self) -> &str {
        &self.rendering
    }

    /// Fill in the owning crate when the wire descriptor left it to the
    /// enclosing fragment entry to supply.
    pub(crate) fn default_owning_crate(&mut self, owner: &str) {
        if self.owning_crate.is_empty() {
            self.owning_crate = owner.to_string();
        }
    }

    /// Compute the record's identity key.
    ///
    /// Returns `None` when `trait_name` or `implementing_type` is
    /// missing; such records are malformed and dropped at merge time.
    /// `synthetic`, `rendering`, and `module_path` do not participate
    /// in identity.
    pub fn identity(&self) -> Option<RecordKey> {
        if self.trait_name.is_empty() || self.implementing_type.is_empty() {
            return None;
        }
        Some(RecordKey {
            trait_name: self.trait_name.clone(),
            owning_crate: self.owning_crate.clone(),
            implementing_type: self.implementing_type.clone(),
            constraint_text: self.constraint_text.clone(),
        })
    }
}

/// Identity key for duplicate suppression.
///
/// Two records with equal keys describe the same implementation;
/// re-delivery of an equal key is absorbed, not duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    trait_name: String,
    owning_crate: String,
    implementing_type: String,
    constraint_text: String,
}

impl RecordKey {
    /// The trait name component of the key.
    pub fn trait_name(&self) -> &str {
        &self.trait_name
    }
}
