//! Per-crate sidebar symbol catalogs
//!
//! Unlike implementor fragments, each crate's sidebar catalog is
//! self-contained: catalogs are never combined across crates, so no
//! merge coordination exists here. This is the read-only interface the
//! navigation layer consumes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of a documented symbol, as emitted in sidebar catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A module
    Mod,
    /// A struct
    Struct,
    /// An enum
    Enum,
    /// A trait
    Trait,
    /// A free function
    Fn,
    /// A macro
    Macro,
    /// A constant
    Constant,
    /// A static
    Static,
    /// A type alias
    Type,
    /// A union
    Union,
    /// A primitive type
    Primitive,
    /// An `extern crate` re-export
    ExternCrate,
}

impl ItemKind {
    /// Parse the wire spelling of a kind. `None` for spellings this
    /// catalog does not track.
    pub fn from_wire(kind: &str) -> Option<Self> {
        Some(match kind {
            "mod" => Self::Mod,
            "struct" => Self::Struct,
            "enum" => Self::Enum,
            "trait" => Self::Trait,
            "fn" => Self::Fn,
            "macro" => Self::Macro,
            "constant" => Self::Constant,
            "static" => Self::Static,
            "type" => Self::Type,
            "union" => Self::Union,
            "primitive" => Self::Primitive,
            "externcrate" => Self::ExternCrate,
            _ => return None,
        })
    }

    /// The wire spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mod => "mod",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Trait => "trait",
            Self::Fn => "fn",
            Self::Macro => "macro",
            Self::Constant => "constant",
            Self::Static => "static",
            Self::Type => "type",
            Self::Union => "union",
            Self::Primitive => "primitive",
            Self::ExternCrate => "externcrate",
        }
    }
}

/// One catalog entry: a symbol name plus its short description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarEntry {
    /// The symbol's name within its crate
    pub symbol_name: String,

    /// Short description, empty when the symbol is undocumented
    pub description: String,
}

impl SidebarEntry {
    /// Create an entry.
    pub fn new(symbol_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            symbol_name: symbol_name.into(),
            description: description.into(),
        }
    }
}

/// The symbol catalog of a single crate, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateCatalog {
    by_kind: IndexMap<ItemKind, Vec<SidebarEntry>>,
}

impl CrateCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under a kind, preserving catalog order.
    pub fn push(&mut self, kind: ItemKind, entry: SidebarEntry) {
        self.by_kind.entry(kind).or_default().push(entry);
    }

    /// The entries of one kind, in catalog order; empty when the crate
    /// has no symbols of that kind.
    pub fn entries(&self, kind: ItemKind) -> impl Iterator<Item = &SidebarEntry> {
        self.by_kind
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
    }

    /// The kinds present in this catalog.
    pub fn kinds(&self) -> impl Iterator<Item = ItemKind> + '_ {
        self.by_kind.keys().copied()
    }

    /// Total number of entries across all kinds.
    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.by_kind.values().all(Vec::is_empty)
    }
}

/// Sidebar catalogs for any number of crates.
#[derive(Debug, Clone, Default)]
pub struct SidebarIndex {
    by_crate: IndexMap<String, CrateCatalog>,
}

impl SidebarIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one crate's catalog, replacing any previous catalog for
    /// that crate.
    pub fn insert(&mut self, crate_name: impl Into<String>, catalog: CrateCatalog) {
        self.by_crate.insert(crate_name.into(), catalog);
    }

    /// Look up the symbols of one kind in one crate, in catalog order;
    /// empty when the crate or kind is unknown.
    pub fn lookup(&self, crate_name: &str, kind: ItemKind) -> impl Iterator<Item = &SidebarEntry> {
        self.by_crate
            .get(crate_name)
            .into_iter()
            .flat_map(move |catalog| catalog.entries(kind))
    }

    /// One crate's whole catalog, if registered.
    pub fn catalog(&self, crate_name: &str) -> Option<&CrateCatalog> {
        self.by_crate.get(crate_name)
    }

    /// The registered crate names, in registration order.
    pub fn crates(&self) -> impl Iterator<Item = &str> {
        self.by_crate.keys().map(String::as_str)
    }
}
