//! Wire-format tests: structured JSON and legacy rustdoc payloads

use pretty_assertions::assert_eq;
use traitdex::{wire, Fragment, ItemKind, Registry};

// ═══════════════════════════════════════════════════════════════════════
// Structured JSON Format
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_structured_fragment_minimal_fields() {
    let fragment =
        Fragment::from_json(r#"{"crate_x": [{"trait": "Display", "type": "Foo"}]}"#).unwrap();

    let record = fragment.records().next().unwrap();
    assert_eq!(record.trait_name(), "Display");
    assert_eq!(record.implementing_type(), "Foo");
    assert_eq!(record.owning_crate(), "crate_x");
    assert_eq!(record.constraint_text(), "");
    assert!(!record.is_synthetic());
}

#[test]
fn test_structured_fragment_full_fields() {
    let fragment = Fragment::from_json(
        r#"{"crate_x": [{
            "trait": "Display",
            "type": "Wrapper<T>",
            "module": "crate_x::wrap",
            "where": "T: Display",
            "synthetic": false,
            "text": "impl<T> Display for Wrapper<T> where T: Display"
        }]}"#,
    )
    .unwrap();

    let record = fragment.records().next().unwrap();
    assert_eq!(record.module_path(), "crate_x::wrap");
    assert_eq!(record.constraint_text(), "T: Display");
    assert_eq!(
        record.rendering(),
        "impl<T> Display for Wrapper<T> where T: Display"
    );
}

#[test]
fn test_module_path_survives_round_trip() {
    let fragment = Fragment::from_json(
        r#"{"crate_x": [{"trait": "Display", "type": "Foo", "module": "crate_x::fmt"}]}"#,
    )
    .unwrap();
    assert_eq!(
        fragment.records().next().unwrap().module_path(),
        "crate_x::fmt"
    );

    let reparsed = Fragment::from_json(&fragment.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, fragment);
}

#[test]
fn test_structured_fragment_to_json_groups_by_owner() {
    let fragment = Fragment::from_json(
        r#"{"crate_x": [{"trait": "Display", "type": "Foo"},
                        {"trait": "Debug", "type": "Foo"}]}"#,
    )
    .unwrap();

    let reparsed = Fragment::from_json(&fragment.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, fragment);
}

// ═══════════════════════════════════════════════════════════════════════
// Legacy Implementors Payload
// ═══════════════════════════════════════════════════════════════════════

/// A payload with the exact framing the legacy emitter produces.
const LEGACY_DISPLAY: &str = concat!(
    "(function() {var implementors = {};\n",
    "implementors[\"ab_glyph\"] = [{\"text\":\"impl <a class=\\\"trait\\\" ",
    "href=\\\"trait.Display.html\\\" title=\\\"trait core::fmt::Display\\\">Display</a> ",
    "for <a class=\\\"struct\\\" href=\\\"struct.InvalidFont.html\\\" ",
    "title=\\\"struct ab_glyph::InvalidFont\\\">InvalidFont</a>\",",
    "\"synthetic\":false,\"types\":[\"ab_glyph::err::InvalidFont\"]}];\n",
    "implementors[\"ansi_term\"] = [{\"text\":\"impl <a class=\\\"trait\\\" ",
    "title=\\\"trait core::fmt::Display\\\">Display</a> for Prefix\",",
    "\"synthetic\":false,\"types\":[\"ansi_term::ansi::Prefix\"]}];\n",
    "if (window.register_implementors) {window.register_implementors(implementors);} ",
    "else {window.pending_implementors = implementors;}})()",
);

#[test]
fn test_legacy_payload_yields_one_record_per_descriptor() {
    let fragment = wire::parse_implementors_js(LEGACY_DISPLAY).unwrap();
    assert_eq!(fragment.len(), 2);

    let record = fragment.records().next().unwrap();
    assert_eq!(record.trait_name(), "Display");
    assert_eq!(record.implementing_type(), "ab_glyph::err::InvalidFont");
    assert_eq!(record.owning_crate(), "ab_glyph");
    assert_eq!(record.module_path(), "ab_glyph::err");
    assert!(record.rendering().contains("InvalidFont"));
}

/// Bounded renderings as emitted for `PartialOrd`: generic-parameter
/// bounds render as trait links before the implemented trait, and the
/// `where` clause renders more after the self type.
const LEGACY_PARTIAL_ORD: &str = concat!(
    "(function() {var implementors = {};\n",
    "implementors[\"smallvec\"] = [{\"text\":\"impl&lt;A:&nbsp;<a class=\\\"trait\\\" ",
    "href=\\\"smallvec/trait.Array.html\\\" title=\\\"trait smallvec::Array\\\">Array</a>&gt; ",
    "<a class=\\\"trait\\\" title=\\\"trait core::cmp::PartialOrd\\\">PartialOrd</a>&lt;",
    "<a class=\\\"struct\\\" title=\\\"struct smallvec::SmallVec\\\">SmallVec</a>&lt;A&gt;&gt; ",
    "for <a class=\\\"struct\\\" title=\\\"struct smallvec::SmallVec\\\">SmallVec</a>&lt;A&gt; ",
    "<span class=\\\"where fmt-newline\\\">where<br>&nbsp;&nbsp;A::Item: ",
    "<a class=\\\"trait\\\" title=\\\"trait core::cmp::PartialOrd\\\">PartialOrd</a>,&nbsp;</span>\",",
    "\"synthetic\":false,\"types\":[\"smallvec::SmallVec\"]}];\n",
    "implementors[\"atomic_refcell\"] = [{\"text\":\"impl&lt;T:&nbsp;?<a class=\\\"trait\\\" ",
    "title=\\\"trait core::marker::Sized\\\">Sized</a> + <a class=\\\"trait\\\" ",
    "title=\\\"trait core::cmp::PartialOrd\\\">PartialOrd</a>&gt; <a class=\\\"trait\\\" ",
    "title=\\\"trait core::cmp::PartialOrd\\\">PartialOrd</a>&lt;AtomicRefCell&lt;T&gt;&gt; ",
    "for <a class=\\\"struct\\\" title=\\\"struct atomic_refcell::AtomicRefCell\\\">",
    "AtomicRefCell</a>&lt;T&gt;\",",
    "\"synthetic\":false,\"types\":[\"atomic_refcell::AtomicRefCell\"]}];\n",
    "if (window.register_implementors) {window.register_implementors(implementors);} ",
    "else {window.pending_implementors = implementors;}})()",
);

#[test]
fn test_bounded_renderings_file_under_implemented_trait() {
    let fragment = wire::parse_implementors_js(LEGACY_PARTIAL_ORD).unwrap();

    let mut registry = Registry::new();
    registry.merge(&fragment);

    // Bound links (Array, Sized) must not become subjects of their own
    let traits: Vec<&str> = registry.traits().collect();
    assert_eq!(traits, ["PartialOrd"]);
    assert_eq!(registry.implementors("PartialOrd").count(), 2);
    assert_eq!(registry.dropped_records(), 0);

    let record = registry.implementors("PartialOrd").next().unwrap();
    assert_eq!(record.implementing_type(), "smallvec::SmallVec");
    assert!(record.constraint_text().starts_with("where"));
}

#[test]
fn test_legacy_payload_merges_like_any_fragment() {
    let fragment = wire::parse_implementors_js(LEGACY_DISPLAY).unwrap();

    let mut registry = Registry::new();
    registry.merge(&fragment);
    registry.merge(&fragment);

    assert_eq!(registry.implementors("Display").count(), 2);
    assert_eq!(registry.dropped_records(), 0);
}

#[test]
fn test_legacy_descriptor_without_identity_becomes_droppable() {
    // No title="trait ..." token and no types: the registry drops it
    let payload = concat!(
        "(function() {var implementors = {};\n",
        "implementors[\"broken\"] = [{\"text\":\"impl Mystery for Foo\",",
        "\"synthetic\":false,\"types\":[]}];\n",
        "})()",
    );
    let fragment = wire::parse_implementors_js(payload).unwrap();
    assert_eq!(fragment.len(), 1);

    let mut registry = Registry::new();
    registry.merge(&fragment);
    assert!(registry.is_empty());
    assert_eq!(registry.dropped_records(), 1);
}

#[test]
fn test_legacy_payload_without_assignments_is_malformed() {
    let err = wire::parse_implementors_js("(function() {})()").unwrap_err();
    assert!(err.to_string().contains("Malformed payload"));
}

// ═══════════════════════════════════════════════════════════════════════
// Legacy Sidebar Payload
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_sidebar_payload_parses_kinds_and_entries() {
    let catalog = wire::parse_sidebar_js(concat!(
        "initSidebarItems({",
        "\"enum\":[[\"Error\",\"\"]],",
        "\"fn\":[[\"init\",\"Initializes the SDL library.\"],[\"get_error\",\"\"]],",
        "\"mod\":[[\"audio\",\"Audio Functions\"]]",
        "});",
    ))
    .unwrap();

    let fns: Vec<&str> = catalog
        .entries(ItemKind::Fn)
        .map(|e| e.symbol_name.as_str())
        .collect();
    assert_eq!(fns, ["init", "get_error"]);
    assert_eq!(
        catalog.entries(ItemKind::Mod).next().unwrap().description,
        "Audio Functions"
    );
    assert_eq!(catalog.entries(ItemKind::Struct).count(), 0);
}

#[test]
fn test_sidebar_payload_skips_unknown_kinds() {
    let catalog = wire::parse_sidebar_js(concat!(
        "initSidebarItems({",
        "\"keyword\":[[\"match\",\"\"]],",
        "\"fn\":[[\"init\",\"\"]],",
        "\"attr\":[[\"rustfmt\",\"\"]]",
        "});",
    ))
    .unwrap();

    // Unrecognized kinds are skipped, known kinds still parse
    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog.entries(ItemKind::Fn).next().unwrap().symbol_name,
        "init"
    );
}

#[test]
fn test_sidebar_payload_requires_framing() {
    assert!(wire::parse_sidebar_js("{\"fn\":[]}").is_err());
}
