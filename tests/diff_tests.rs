//! Tests for the attribute diff engine.
//!
//! Each test feeds change trees straight into `render_attributes` with a
//! plain (colorless) sink and checks the rendered lines. The engine is
//! called with indent 0, so attribute content sits at four spaces.

use std::collections::HashSet;
use tfshow_rs::{render_attributes, Action, AnsiWriter, Value};

fn tree(json: &str) -> Value {
    serde_json::from_str(json).expect("valid JSON")
}

fn render(
    before: Option<&str>,
    after: Option<&str>,
    unknown: Option<&str>,
    sensitive: Option<&str>,
    replace: &[&str],
    action: Action,
) -> String {
    let before = before.map(tree);
    let after = after.map(tree);
    let unknown = unknown.map(tree);
    let sensitive = sensitive.map(tree);
    let replace: HashSet<String> = replace.iter().map(|s| s.to_string()).collect();
    let mut w = AnsiWriter::new(false);
    render_attributes(
        &mut w,
        before.as_ref(),
        after.as_ref(),
        unknown.as_ref(),
        sensitive.as_ref(),
        &replace,
        action,
        0,
    );
    w.into_string()
}

#[test]
fn test_updated_scalar_renders_arrow_line() {
    let out = render(
        Some(r#"{"name": "old"}"#),
        Some(r#"{"name": "new"}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(out, "    ~ name = \"old\" -> \"new\"\n");
}

#[test]
fn test_unknown_attribute_on_create() {
    let out = render(
        None,
        Some(r#"{"id": null}"#),
        Some(r#"{"id": true}"#),
        None,
        &[],
        Action::Create,
    );
    assert_eq!(out, "    + id = (known after apply)\n");
}

#[test]
fn test_unknown_only_key_is_appended() {
    let out = render(
        None,
        Some(r#"{"name": "x"}"#),
        Some(r#"{"arn": true}"#),
        None,
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        "    + name = \"x\"\n    + arn  = (known after apply)\n"
    );
}

#[test]
fn test_sensitive_update_hides_both_values() {
    let out = render(
        Some(r#"{"secret": "x"}"#),
        Some(r#"{"secret": "y"}"#),
        None,
        Some(r#"{"secret": true}"#),
        &[],
        Action::Update,
    );
    assert_eq!(out, "    ~ secret = (sensitive value)\n");
    assert!(!out.contains("\"x\""));
    assert!(!out.contains("\"y\""));
}

#[test]
fn test_removed_array_element_keeps_trailing_comma() {
    let out = render(
        Some(r#"{"tags": ["a", "b"]}"#),
        Some(r#"{"tags": ["a"]}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(out, "    ~ tags = [\n        - \"b\",\n      ]\n");
}

#[test]
fn test_positional_pairing_of_scalar_arrays() {
    let out = render(
        Some(r#"{"ports": [80, 443]}"#),
        Some(r#"{"ports": [80, 8443, 9000]}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        "    ~ ports = [\n        ~ 443 -> 8443\n        + 9000,\n      ]\n"
    );
}

#[test]
fn test_deleted_scalar_appends_null() {
    let out = render(
        Some(r#"{"name": "x"}"#),
        None,
        None,
        None,
        &[],
        Action::Delete,
    );
    assert_eq!(out, "    - name = \"x\" -> null\n");
}

#[test]
fn test_deleted_array_appends_null_after_bracket() {
    let out = render(
        Some(r#"{"ports": [80, 443]}"#),
        None,
        None,
        None,
        &[],
        Action::Delete,
    );
    assert_eq!(
        out,
        "    - ports = [\n        - 80,\n        - 443,\n      ] -> null\n"
    );
}

#[test]
fn test_created_object_array_renders_named_blocks() {
    let out = render(
        None,
        Some(r#"{"rule": [{"port": 80, "proto": "tcp"}]}"#),
        None,
        None,
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        "    + rule {\n        + port  = 80\n        + proto = \"tcp\"\n      }\n"
    );
}

#[test]
fn test_updated_object_array_removes_then_adds() {
    let out = render(
        Some(r#"{"rule": [{"port": 80}]}"#),
        Some(r#"{"rule": [{"port": 8080}]}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        concat!(
            "    - rule {\n",
            "        - port = 80 -> null\n",
            "      }\n",
            "    + rule {\n",
            "        + port = 8080\n",
            "      }\n",
        )
    );
}

#[test]
fn test_object_array_becoming_scalar_array_pairs_positionally() {
    let out = render(
        Some(r#"{"rule": [{"port": 80}]}"#),
        Some(r#"{"rule": [80, 443]}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    // The new scalar elements must survive the type change.
    assert_eq!(
        out,
        concat!(
            "    ~ rule = [\n",
            "        ~ {\"port\":80} -> 80\n",
            "        + 443,\n",
            "      ]\n",
        )
    );
}

#[test]
fn test_object_array_emptied_removes_every_block() {
    let out = render(
        Some(r#"{"rule": [{"port": 80}]}"#),
        Some(r#"{"rule": []}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        concat!(
            "    - rule {\n",
            "        - port = 80 -> null\n",
            "      }\n",
        )
    );
}

#[test]
fn test_removed_block_counts_suppressed_null_attributes() {
    let out = render(
        Some(r#"{"rule": [{"port": 80, "description": null}]}"#),
        None,
        None,
        None,
        &[],
        Action::Delete,
    );
    assert_eq!(
        out,
        concat!(
            "    - rule {\n",
            "        - port = 80 -> null\n",
            "          # (1 unchanged attribute hidden)\n",
            "      }\n",
        )
    );
}

#[test]
fn test_multibyte_names_align_by_character() {
    let out = render(
        None,
        Some(r#"{"größe": "1", "id": "x"}"#),
        None,
        None,
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        concat!(
            "    + größe = \"1\"\n",
            "    + id    = \"x\"\n",
        )
    );
}

#[test]
fn test_replace_path_annotation() {
    let out = render(
        Some(r#"{"zone": "a"}"#),
        Some(r#"{"zone": "b"}"#),
        None,
        None,
        &["zone"],
        Action::Replace,
    );
    assert_eq!(out, "    ~ zone = \"a\" -> \"b\" # forces replacement\n");
}

#[test]
fn test_empty_values_render_nothing() {
    let out = render(
        None,
        Some(r#"{"a": "", "b": null, "c": {}, "d": []}"#),
        None,
        None,
        &[],
        Action::Create,
    );
    assert_eq!(out, "");
}

#[test]
fn test_sensitive_block_placeholder() {
    let out = render(
        None,
        Some(r#"{"cred": [{"user": "u"}]}"#),
        None,
        Some(r#"{"cred": true}"#),
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        concat!(
            "    + cred {\n",
            "        # At least one attribute in this block is (or was) sensitive,\n",
            "        # so its contents will not be displayed.\n",
            "      }\n",
        )
    );
    assert!(!out.contains("user"));
}

#[test]
fn test_read_uses_cyan_marker_text() {
    let out = render(
        None,
        Some(r#"{"name": "db"}"#),
        None,
        None,
        &[],
        Action::Read,
    );
    assert_eq!(out, "    <= name = \"db\"\n");
}

#[test]
fn test_unchanged_attributes_hidden_comment() {
    let out = render(
        Some(r#"{"a": "1", "b": "2", "c": "3"}"#),
        Some(r#"{"a": "1", "b": "9", "c": "3"}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        "    ~ b = \"2\" -> \"9\"\n      # (2 unchanged attributes hidden)\n"
    );
}

#[test]
fn test_removed_attribute_in_update() {
    let out = render(
        Some(r#"{"a": "1", "old": "x"}"#),
        Some(r#"{"a": "1"}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        "    - old = \"x\" -> null\n      # (1 unchanged attribute hidden)\n"
    );
}

#[test]
fn test_added_attribute_in_update_uses_plus() {
    let out = render(
        Some(r#"{"a": "1"}"#),
        Some(r#"{"a": "1", "b": "2"}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        "    + b = \"2\"\n      # (1 unchanged attribute hidden)\n"
    );
}

#[test]
fn test_updated_unknown_scalar() {
    let out = render(
        Some(r#"{"id": "abc"}"#),
        Some(r#"{"id": null}"#),
        Some(r#"{"id": true}"#),
        None,
        &[],
        Action::Update,
    );
    assert_eq!(out, "    ~ id = (known after apply)\n");
}

#[test]
fn test_blank_line_before_nested_block() {
    let out = render(
        None,
        Some(r#"{"name": "x", "tags": {"a": "b"}}"#),
        None,
        None,
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        concat!(
            "    + name = \"x\"\n",
            "\n",
            "    + tags = {\n",
            "        + \"a\" = \"b\"\n",
            "      }\n",
        )
    );
}

#[test]
fn test_nested_map_counts_unchanged_elements() {
    let out = render(
        Some(r#"{"tags": {"a": "1", "b": "2"}}"#),
        Some(r#"{"tags": {"a": "9", "b": "2"}}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(
        out,
        concat!(
            "    ~ tags = {\n",
            "        ~ \"a\" = \"1\" -> \"9\"\n",
            "          # (1 unchanged element hidden)\n",
            "      }\n",
        )
    );
}

#[test]
fn test_scalars_render_before_blocks_on_create() {
    let out = render(
        None,
        Some(r#"{"rule": [{"port": 80}], "name": "web"}"#),
        None,
        None,
        &[],
        Action::Create,
    );
    // The block comes last even though it appears first in the source.
    assert_eq!(
        out,
        concat!(
            "    + name = \"web\"\n",
            "\n",
            "    + rule {\n",
            "        + port = 80\n",
            "      }\n",
        )
    );
}

#[test]
fn test_number_equality_is_numeric() {
    let out = render(
        Some(r#"{"weight": 1}"#),
        Some(r#"{"weight": 1.0}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(out, "      # (1 unchanged attribute hidden)\n");
}

#[test]
fn test_name_column_alignment() {
    let out = render(
        None,
        Some(r#"{"ami": "a", "instance_type": "t3.small"}"#),
        None,
        None,
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        concat!(
            "    + ami           = \"a\"\n",
            "    + instance_type = \"t3.small\"\n",
        )
    );
}

#[test]
fn test_sensitive_array_element_placeholder() {
    let out = render(
        None,
        Some(r#"{"keys": ["k1", "k2"]}"#),
        None,
        Some(r#"{"keys": [false, true]}"#),
        &[],
        Action::Create,
    );
    assert_eq!(
        out,
        concat!(
            "    + keys = [\n",
            "        + \"k1\",\n",
            "        # At least one attribute in this block is (or was) sensitive,\n",
            "        # so its contents will not be displayed.\n",
            "      ]\n",
        )
    );
}

#[test]
fn test_type_change_between_containers_uses_inline_arrow() {
    let out = render(
        Some(r#"{"value": "plain"}"#),
        Some(r#"{"value": {"kind": "map"}}"#),
        None,
        None,
        &[],
        Action::Update,
    );
    assert_eq!(out, "    ~ value = \"plain\" -> {\"kind\":\"map\"}\n");
}
