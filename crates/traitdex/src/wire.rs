//! Recovery of fragments from legacy rustdoc payloads
//!
//! The legacy emitter ships each fragment as a self-executing script:
//!
//! ```text
//! (function() {var implementors = {};
//! implementors["crate_a"] = [{"text":"impl ...","synthetic":false,"types":["crate_a::Foo"]}];
//! if (window.register_implementors) {window.register_implementors(implementors);}
//! else {window.pending_implementors = implementors;}})()
//! ```
//!
//! Only the `implementors["..."] = [...]` assignments carry data; the
//! wrapper is the delivery convention this crate replaces with
//! [`DeliveryChannel`](crate::DeliveryChannel). Sidebar catalogs arrive
//! as `initSidebarItems({...})` calls.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, WireError};
use crate::fragment::Fragment;
use crate::record::ImplementorRecord;
use crate::sidebar::{CrateCatalog, ItemKind, SidebarEntry};

/// One entry of a legacy implementor list.
#[derive(Debug, Deserialize)]
struct LegacyDescriptor {
    /// HTML rendering of the impl header
    #[serde(default)]
    text: String,

    /// Compiler-synthesized impl marker
    #[serde(default)]
    synthetic: bool,

    /// Canonical paths of the implementing types
    #[serde(default)]
    types: Vec<String>,
}

/// Parse a legacy implementors script into a [`Fragment`].
///
/// Each `implementors["crate"] = [...]` assignment contributes records
/// owned by that crate: the trait name comes from the trait link
/// immediately before the implementing type in the rendering, the
/// implementing type from the first canonical path of `types`. Entries the rendering or
/// type tokens cannot identify stay in the fragment as malformed
/// records for the registry to drop and count.
///
/// # Errors
///
/// Returns [`WireError::MalformedPayload`] when no implementor
/// assignment is present, or [`WireError::Json`] when an assignment's
/// list fails to decode.
pub fn parse_implementors_js(source: &str) -> Result<Fragment> {
    let mut records = Vec::new();
    let mut saw_assignment = false;

    for line in source.lines() {
        let Some((owner, list)) = split_assignment(line) else {
            continue;
        };
        saw_assignment = true;
        let descriptors: Vec<LegacyDescriptor> = serde_json::from_str(list)?;
        for descriptor in descriptors {
            records.push(descriptor_to_record(descriptor, owner));
        }
    }

    if !saw_assignment {
        return Err(WireError::MalformedPayload(
            "no implementors assignment found".to_string(),
        ));
    }
    Ok(Fragment::from_records(records))
}

/// Split an `implementors["owner"] = [...];` line into owner and list.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix("implementors[\"")?;
    let (owner, rest) = rest.split_once("\"]")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let list = rest.trim_end().trim_end_matches(';');
    if !list.starts_with('[') {
        return None;
    }
    Some((owner, list))
}

/// Map one legacy descriptor onto a record owned by `owner`.
fn descriptor_to_record(descriptor: LegacyDescriptor, owner: &str) -> ImplementorRecord {
    let trait_name = extract_trait_name(&descriptor.text).unwrap_or_default();
    let implementing_type = descriptor.types.first().cloned().unwrap_or_default();
    // The canonical path's prefix is the originating module
    let module_path = implementing_type
        .rsplit_once("::")
        .map(|(head, _)| head.to_string())
        .unwrap_or_default();
    let constraint = extract_constraint(&descriptor.text).unwrap_or_default();

    ImplementorRecord::new(trait_name, implementing_type, owner)
        .with_module_path(module_path)
        .with_constraint(constraint)
        .with_synthetic(descriptor.synthetic)
        .with_rendering(descriptor.text)
}

/// Pull the implemented trait's name out of a rendering, dropping the
/// module path.
///
/// A rendering lists generic-parameter bounds before the implemented
/// trait (`impl<A: Array> PartialOrd<SmallVec<A>> for SmallVec<A>`),
/// and every bound is itself a `title="trait ..."` link. The
/// implemented trait is the last trait link before the ` for `
/// separator; trait links in the `where` clause after the separator do
/// not count.
fn extract_trait_name(text: &str) -> Option<String> {
    let head = match text.split_once(" for ") {
        Some((head, _)) => head,
        None => text,
    };
    let mut name = None;
    let mut rest = head;
    while let Some((_, tail)) = rest.split_once("title=\"trait ") {
        if let Some((path, _)) = tail.split_once('"') {
            if let Some(segment) = path.rsplit("::").next().filter(|s| !s.is_empty()) {
                name = Some(segment.to_string());
            }
        }
        rest = tail;
    }
    name
}

/// Pull the `where`-clause text out of a rendering, if one is present,
/// with markup stripped.
fn extract_constraint(text: &str) -> Option<String> {
    let (_, rest) = text.split_once("<span class=\"where")?;
    let (_, body) = rest.split_once('>')?;
    let stripped = strip_tags(body);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Remove HTML tags, keeping text content only.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Parse a legacy `initSidebarItems({...})` payload into one crate's
/// catalog.
///
/// Kind keys the catalog does not track are skipped with a diagnostic;
/// the known kinds still parse, matching the partial-resilience posture
/// of the implementors path.
///
/// # Errors
///
/// Returns [`WireError::MalformedPayload`] when the `initSidebarItems`
/// framing is missing, or [`WireError::Json`] when the inner object
/// fails to decode.
pub fn parse_sidebar_js(source: &str) -> Result<CrateCatalog> {
    let trimmed = source.trim();
    let inner = trimmed
        .strip_prefix("initSidebarItems(")
        .and_then(|rest| rest.strip_suffix(");").or_else(|| rest.strip_suffix(')')))
        .ok_or_else(|| {
            WireError::MalformedPayload("missing initSidebarItems framing".to_string())
        })?;

    let items: indexmap::IndexMap<String, Vec<(String, String)>> = serde_json::from_str(inner)?;

    let mut catalog = CrateCatalog::new();
    for (key, entries) in items {
        let Some(kind) = ItemKind::from_wire(&key) else {
            debug!(kind = %key, "skipping unrecognized sidebar kind");
            continue;
        };
        for (symbol_name, description) in entries {
            catalog.push(kind, SidebarEntry::new(symbol_name, description));
        }
    }
    Ok(catalog)
}
