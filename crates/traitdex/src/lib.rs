//! # Traitdex
//!
//! An order-independent merge registry for trait-implementor fragments.
//!
//! Documentation generators emit one implementor fragment per documented
//! trait, each produced and delivered independently, with no guaranteed
//! order and no shared initialization barrier. Traitdex combines those
//! fragments into a single queryable index: fragments delivered before
//! the registry exists are buffered and drained at installation time,
//! redelivered fragments are absorbed, and malformed records are dropped
//! without disturbing their siblings.
//!
//! ## Architecture
//!
//! - **Record / Fragment**: the immutable data model, with a structured
//!   JSON wire format and a parser for the legacy rustdoc payloads
//! - **Delivery Channel**: the two-phase slot that buffers fragments
//!   until a registry is installed, then merges live
//! - **Registry**: the canonical merged view, queryable per trait
//! - **Sidebar Index**: self-contained per-crate symbol catalogs for
//!   the navigation layer
//!
//! ## Example
//!
//! ```
//! use traitdex::{DeliveryChannel, Fragment};
//!
//! let mut channel = DeliveryChannel::new();
//!
//! // Arrives before the registry exists: buffered.
//! channel.deliver(
//!     Fragment::from_json(r#"{"crate_x": [{"trait": "Display", "type": "Foo"}]}"#).unwrap(),
//! );
//!
//! channel.initialize();
//!
//! // Arrives after: merged live. Both end up in the same index.
//! channel.deliver(
//!     Fragment::from_json(r#"{"crate_y": [{"trait": "Display", "type": "Bar"}]}"#).unwrap(),
//! );
//!
//! let registry = channel.registry().unwrap();
//! let types: Vec<&str> = registry
//!     .implementors("Display")
//!     .map(|r| r.implementing_type())
//!     .collect();
//! assert_eq!(types, ["Foo", "Bar"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod error;
pub mod fragment;
pub mod record;
pub mod registry;
pub mod sidebar;
pub mod wire;

// Re-export main types
pub use channel::DeliveryChannel;
pub use error::{Result, WireError};
pub use fragment::Fragment;
pub use record::{ImplementorRecord, RecordKey};
pub use registry::Registry;
pub use sidebar::{CrateCatalog, ItemKind, SidebarEntry, SidebarIndex};

/// Traitdex version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
