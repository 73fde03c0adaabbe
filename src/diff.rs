//! Attribute diff rendering.
//!
//! The engine walks a resource change's `before` and `after` trees together
//! with the `after_unknown` and `after_sensitive` shadow trees and emits the
//! attribute lines of a `terraform show` resource block. Values that are
//! equal, empty, unknown or sensitive each get their own treatment; the
//! recursion applies the same rules at every depth.

use std::collections::HashSet;

use crate::array::{
    render_added_array_item, render_added_object_block, render_removed_array_item,
    render_removed_object_block, render_updated_array_item,
};
use crate::line::{
    compute_name_width, needs_block_separator, write_arrow_line, write_closing_brace,
    write_closing_bracket, write_container_opening, write_removed_array_close, write_scalar_line,
    write_sensitive_block, write_sensitive_value_line, write_unchanged_comment,
};
use crate::path;
use crate::tree::Value;
use crate::value::{render_inline, render_scalar};
use crate::writer::{AnsiWriter, Style};

static NULL: Value = Value::Null;

/// Resource-level change action derived from a plan's `actions` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Replace,
    NoOp,
    Unknown,
}

/// Maps a plan's `actions` array onto an [`Action`]. The delete+create
/// pairs (in either order) mean the resource is replaced.
pub fn map_actions(actions: &[String]) -> Action {
    let names: Vec<&str> = actions.iter().map(String::as_str).collect();
    match names.as_slice() {
        ["create"] => Action::Create,
        ["read"] => Action::Read,
        ["update"] => Action::Update,
        ["delete"] => Action::Delete,
        ["no-op"] => Action::NoOp,
        ["delete", "create"] | ["create", "delete"] => Action::Replace,
        _ => Action::Unknown,
    }
}

/// Everything that stays constant while one resource change renders.
pub(crate) struct Ctx<'a> {
    pub unknown: Option<&'a Value>,
    pub sensitive: Option<&'a Value>,
    pub replace_paths: &'a HashSet<String>,
}

/// Per-node state, resolved once when the recursion enters a node.
pub(crate) struct Flags {
    pub unknown: bool,
    pub sensitive: bool,
    pub forces_replacement: bool,
}

impl Ctx<'_> {
    pub(crate) fn flags(&self, node_path: &[String]) -> Flags {
        Flags {
            unknown: path::is_unknown(self.unknown, node_path),
            sensitive: path::is_sensitive(self.sensitive, node_path),
            forces_replacement: self
                .replace_paths
                .contains(&path::format_path(node_path)),
        }
    }
}

/// Empty values render nothing unless flagged unknown or sensitive.
pub(crate) fn should_render(value: &Value, unknown: bool, sensitive: bool) -> bool {
    unknown || sensitive || !value.is_empty()
}

/// Renders the attribute lines of one resource change.
///
/// `indent` is the nesting level of the surrounding resource block in
/// 2-space units; attribute content renders two levels deeper.
#[allow(clippy::too_many_arguments)]
pub fn render_attributes(
    w: &mut AnsiWriter,
    before: Option<&Value>,
    after: Option<&Value>,
    unknown: Option<&Value>,
    sensitive: Option<&Value>,
    replace_paths: &HashSet<String>,
    action: Action,
    indent: usize,
) {
    let ctx = Ctx {
        unknown,
        sensitive,
        replace_paths,
    };
    let depth = indent + 2;
    match action {
        Action::Create => render_add(w, after, &ctx, depth, "+", Style::Green),
        Action::Read => render_add(w, after, &ctx, depth, "<=", Style::Cyan),
        Action::Delete => render_remove(w, before, &ctx, depth),
        Action::Update | Action::Replace => render_update(w, before, after, &ctx, depth),
        Action::NoOp | Action::Unknown => {}
    }
}

fn collect_entries(props: &[(String, Value)]) -> Vec<(&str, &Value)> {
    props
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .collect()
}

/// Keys present only in the unknown shadow, paired with a null stand-in.
fn unknown_only<'a>(
    props: &'a [(String, Value)],
    unknown: Option<&'a Value>,
) -> Vec<(&'a str, &'a Value)> {
    let Some(Value::Object(shadow)) = unknown else {
        return Vec::new();
    };
    shadow
        .iter()
        .filter(|(name, _)| !props.iter().any(|(key, _)| key == name))
        .map(|(name, _)| (name.as_str(), &NULL))
        .collect()
}

/// Scalar attributes first in source order, then block attributes in source
/// order.
fn sort_properties<'a>(props: &[(&'a str, &'a Value)]) -> Vec<(&'a str, &'a Value)> {
    let mut ordered: Vec<(&str, &Value)> = props
        .iter()
        .copied()
        .filter(|(_, value)| !value.is_block())
        .collect();
    ordered.extend(props.iter().copied().filter(|(_, value)| value.is_block()));
    ordered
}

/// Tracks when a blank line must separate a block from what came before it.
struct Separator<'a> {
    rendered_any: bool,
    prev_was_block: bool,
    prev_block_name: Option<&'a str>,
}

impl<'a> Separator<'a> {
    fn new() -> Self {
        Self {
            rendered_any: false,
            prev_was_block: false,
            prev_block_name: None,
        }
    }

    fn before(&mut self, w: &mut AnsiWriter, is_block: bool, name: &'a str) {
        if self.rendered_any
            && needs_block_separator(is_block, self.prev_was_block, self.prev_block_name, name)
        {
            w.blank_line_if_needed();
        }
        self.rendered_any = true;
        self.prev_was_block = is_block;
        self.prev_block_name = is_block.then_some(name);
    }
}

fn render_add(
    w: &mut AnsiWriter,
    after: Option<&Value>,
    ctx: &Ctx,
    depth: usize,
    marker: &str,
    style: Style,
) {
    let Some(Value::Object(props)) = after else {
        return;
    };
    let known = collect_entries(props);
    let mut ordered = sort_properties(&known);
    ordered.extend(unknown_only(props, ctx.unknown));
    let width = compute_name_width(&ordered, ctx.unknown);

    let mut separator = Separator::new();
    for (name, value) in &ordered {
        let node_path = vec![name.to_string()];
        let flags = ctx.flags(&node_path);
        if !should_render(value, flags.unknown, flags.sensitive) {
            continue;
        }
        separator.before(w, value.is_block() && !flags.unknown, name);
        render_added_value(w, value, name, ctx, depth, marker, style, &node_path, width);
    }
}

/// Renders one attribute of an added (or read) object.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_added_value(
    w: &mut AnsiWriter,
    value: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    marker: &str,
    style: Style,
    node_path: &[String],
    width: usize,
) {
    let flags = ctx.flags(node_path);
    if !should_render(value, flags.unknown, flags.sensitive) {
        return;
    }
    if flags.sensitive {
        render_sensitive(w, value, name, depth, marker, style, width);
        return;
    }
    if flags.unknown {
        write_scalar_line(
            w,
            depth,
            marker,
            style,
            name,
            "(known after apply)",
            false,
            false,
            width,
        );
        return;
    }
    if value.is_object_array() {
        if let Value::Array(items) = value {
            for (i, element) in items.iter().enumerate() {
                render_added_object_block(
                    w,
                    element,
                    name,
                    ctx,
                    depth,
                    marker,
                    style,
                    &path::child_path(node_path, i),
                );
            }
        }
        return;
    }
    match value {
        Value::Object(props) => {
            let child_unknown = path::child_value(ctx.unknown, node_path);
            let known = collect_entries(props);
            let mut ordered = sort_properties(&known);
            ordered.extend(unknown_only(props, child_unknown));
            let quoted = value.is_map();
            let mut child_width = compute_name_width(&ordered, child_unknown);
            if quoted {
                child_width += 2;
            }
            write_container_opening(w, depth, marker, style, name, "{", false, 0);
            for (child_name, child_value) in &ordered {
                let display = display_name(child_name, quoted);
                render_added_value(
                    w,
                    child_value,
                    &display,
                    ctx,
                    depth + 2,
                    marker,
                    style,
                    &path::child_path(node_path, child_name),
                    child_width,
                );
            }
            write_closing_brace(w, depth + 1);
        }
        Value::Array(items) => {
            write_container_opening(w, depth, marker, style, name, "[", false, width);
            for (i, item) in items.iter().enumerate() {
                render_added_array_item(
                    w,
                    item,
                    ctx,
                    depth + 2,
                    marker,
                    style,
                    &path::child_path(node_path, i),
                );
            }
            write_closing_bracket(w, depth + 1);
        }
        scalar => write_scalar_line(
            w,
            depth,
            marker,
            style,
            name,
            &render_scalar(scalar),
            false,
            false,
            width,
        ),
    }
}

fn render_remove(w: &mut AnsiWriter, before: Option<&Value>, ctx: &Ctx, depth: usize) {
    let Some(Value::Object(props)) = before else {
        return;
    };
    let known = collect_entries(props);
    let ordered = sort_properties(&known);
    let width = compute_name_width(&ordered, None);

    let mut separator = Separator::new();
    for (name, value) in &ordered {
        let node_path = vec![name.to_string()];
        let sensitive = path::is_sensitive(ctx.sensitive, &node_path);
        if !should_render(value, false, sensitive) {
            continue;
        }
        separator.before(w, value.is_block(), name);
        render_removed_value(w, value, name, ctx, depth, &node_path, width);
    }
}

/// Renders one attribute of a destroyed object. Scalars carry a dim
/// ` -> null` suffix; a scalar array carries it after the closing bracket.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_removed_value(
    w: &mut AnsiWriter,
    value: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
    width: usize,
) {
    let sensitive = path::is_sensitive(ctx.sensitive, node_path);
    if !should_render(value, false, sensitive) {
        return;
    }
    if sensitive {
        render_sensitive(w, value, name, depth, "-", Style::Red, width);
        return;
    }
    if value.is_object_array() {
        if let Value::Array(items) = value {
            for (i, element) in items.iter().enumerate() {
                render_removed_object_block(
                    w,
                    element,
                    name,
                    ctx,
                    depth,
                    &path::child_path(node_path, i),
                );
            }
        }
        return;
    }
    match value {
        Value::Object(props) => {
            let known = collect_entries(props);
            let ordered = sort_properties(&known);
            let quoted = value.is_map();
            let mut child_width = compute_name_width(&ordered, None);
            if quoted {
                child_width += 2;
            }
            write_container_opening(w, depth, "-", Style::Red, name, "{", false, 0);
            for (child_name, child_value) in &ordered {
                let display = display_name(child_name, quoted);
                render_removed_value(
                    w,
                    child_value,
                    &display,
                    ctx,
                    depth + 2,
                    &path::child_path(node_path, child_name),
                    child_width,
                );
            }
            write_closing_brace(w, depth + 1);
        }
        Value::Array(items) => {
            write_container_opening(w, depth, "-", Style::Red, name, "[", false, width);
            for (i, item) in items.iter().enumerate() {
                render_removed_array_item(w, item, ctx, depth + 2, &path::child_path(node_path, i));
            }
            write_removed_array_close(w, depth + 1);
        }
        scalar => write_scalar_line(
            w,
            depth,
            "-",
            Style::Red,
            name,
            &render_scalar(scalar),
            true,
            false,
            width,
        ),
    }
}

fn render_update(
    w: &mut AnsiWriter,
    before: Option<&Value>,
    after: Option<&Value>,
    ctx: &Ctx,
    depth: usize,
) {
    let (Some(before_root @ Value::Object(before_props)), Some(Value::Object(after_props))) =
        (before, after)
    else {
        return;
    };
    let after_entries = collect_entries(after_props);
    let removed: Vec<(&str, &Value)> = before_props
        .iter()
        .filter(|(name, _)| !after_props.iter().any(|(key, _)| key == name))
        .map(|(name, value)| (name.as_str(), value))
        .collect();
    let mut width_entries = after_entries.clone();
    width_entries.extend(removed.iter().copied());
    let width = compute_name_width(&width_entries, ctx.unknown);

    let mut unchanged_attrs = 0;
    let mut unchanged_blocks = 0;
    let mut separator = Separator::new();

    // The after tree drives the order; attributes only present in before
    // follow as removals.
    for (name, after_value) in &after_entries {
        let node_path = vec![name.to_string()];
        let flags = ctx.flags(&node_path);
        match before_root.get(name) {
            Some(before_value) => {
                if before_value.semantic_equals(after_value) {
                    if !after_value.is_empty() {
                        if after_value.is_block() {
                            unchanged_blocks += 1;
                        } else {
                            unchanged_attrs += 1;
                        }
                    }
                    continue;
                }
                if !should_render(after_value, flags.unknown, flags.sensitive)
                    && !should_render(before_value, false, flags.sensitive)
                {
                    continue;
                }
                separator.before(w, after_value.is_block() && !flags.unknown, name);
                render_updated_value(
                    w,
                    before_value,
                    after_value,
                    name,
                    ctx,
                    depth,
                    &node_path,
                    width,
                );
            }
            None => {
                if !should_render(after_value, flags.unknown, flags.sensitive) {
                    continue;
                }
                separator.before(w, after_value.is_block() && !flags.unknown, name);
                render_added_value(
                    w,
                    after_value,
                    name,
                    ctx,
                    depth,
                    "+",
                    Style::Green,
                    &node_path,
                    width,
                );
            }
        }
    }
    for (name, before_value) in &removed {
        let node_path = vec![name.to_string()];
        let sensitive = path::is_sensitive(ctx.sensitive, &node_path);
        if !should_render(before_value, false, sensitive) {
            continue;
        }
        separator.before(w, before_value.is_block(), name);
        render_removed_value(w, before_value, name, ctx, depth, &node_path, width);
    }

    if unchanged_attrs > 0 {
        write_unchanged_comment(w, depth + 1, unchanged_attrs, "attribute");
    }
    if unchanged_blocks > 0 {
        write_unchanged_comment(w, depth + 1, unchanged_blocks, "block");
    }
}

/// Renders one attribute whose before and after values differ.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_updated_value(
    w: &mut AnsiWriter,
    before: &Value,
    after: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
    width: usize,
) {
    let flags = ctx.flags(node_path);
    if !should_render(after, flags.unknown, flags.sensitive)
        && !should_render(before, false, flags.sensitive)
    {
        return;
    }
    if flags.sensitive {
        let shape = if matches!(after, Value::Null) { before } else { after };
        render_sensitive(w, shape, name, depth, "~", Style::Yellow, width);
        return;
    }
    if flags.unknown {
        write_scalar_line(
            w,
            depth,
            "~",
            Style::Yellow,
            name,
            "(known after apply)",
            false,
            flags.forces_replacement,
            width,
        );
        return;
    }

    // The wholesale remove-then-add treatment only applies when the after
    // side is an object array (an empty one covers whole removal). A type
    // change to scalar elements pairs positionally instead, so the new
    // values still render.
    let after_objects = matches!(after, Value::Array(_)) && after.is_object_array();
    let before_objects = matches!(before, Value::Array(_)) && before.is_object_array();
    if after_objects && (before_objects || matches!(before, Value::Null)) {
        render_updated_object_array(w, before, after, name, ctx, depth, node_path);
        return;
    }

    match (before, after) {
        (Value::Object(_), Value::Object(_)) => {
            render_updated_object(w, before, after, name, ctx, depth, node_path, &flags);
        }
        (Value::Array(before_items), Value::Array(after_items)) => {
            write_container_opening(
                w,
                depth,
                "~",
                Style::Yellow,
                name,
                "[",
                flags.forces_replacement,
                width,
            );
            let len = before_items.len().max(after_items.len());
            for i in 0..len {
                let element_path = path::child_path(node_path, i);
                match (before_items.get(i), after_items.get(i)) {
                    (Some(b), Some(a)) => {
                        if !b.semantic_equals(a) {
                            render_updated_array_item(w, b, a, ctx, depth + 2, &element_path);
                        }
                    }
                    (None, Some(a)) => render_added_array_item(
                        w,
                        a,
                        ctx,
                        depth + 2,
                        "+",
                        Style::Green,
                        &element_path,
                    ),
                    (Some(b), None) => {
                        render_removed_array_item(w, b, ctx, depth + 2, &element_path)
                    }
                    (None, None) => {}
                }
            }
            write_closing_bracket(w, depth + 1);
        }
        _ => write_arrow_line(
            w,
            depth,
            name,
            &render_inline(before),
            &render_inline(after),
            flags.forces_replacement,
            width,
        ),
    }
}

/// Merged rendering of an object attribute that changed in place.
#[allow(clippy::too_many_arguments)]
fn render_updated_object(
    w: &mut AnsiWriter,
    before: &Value,
    after: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
    flags: &Flags,
) {
    let (Value::Object(before_props), Value::Object(after_props)) = (before, after) else {
        return;
    };
    let quoted = after.is_map() && before.is_map();
    let child_unknown = path::child_value(ctx.unknown, node_path);
    let after_entries = collect_entries(after_props);
    let removed: Vec<(&str, &Value)> = before_props
        .iter()
        .filter(|(key, _)| !after_props.iter().any(|(other, _)| other == key))
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    let mut width_entries = after_entries.clone();
    width_entries.extend(removed.iter().copied());
    let mut child_width = compute_name_width(&width_entries, child_unknown);
    if quoted {
        child_width += 2;
    }

    write_container_opening(
        w,
        depth,
        "~",
        Style::Yellow,
        name,
        "{",
        flags.forces_replacement,
        0,
    );
    let mut unchanged = 0;
    for (child_name, after_child) in &after_entries {
        let child = path::child_path(node_path, child_name);
        let display = display_name(child_name, quoted);
        match before.get(child_name) {
            Some(before_child) => {
                if before_child.semantic_equals(after_child) {
                    if !after_child.is_empty() {
                        unchanged += 1;
                    }
                } else {
                    render_updated_value(
                        w,
                        before_child,
                        after_child,
                        &display,
                        ctx,
                        depth + 2,
                        &child,
                        child_width,
                    );
                }
            }
            None => render_added_value(
                w,
                after_child,
                &display,
                ctx,
                depth + 2,
                "+",
                Style::Green,
                &child,
                child_width,
            ),
        }
    }
    for (child_name, before_child) in &removed {
        let child = path::child_path(node_path, child_name);
        let display = display_name(child_name, quoted);
        render_removed_value(w, before_child, &display, ctx, depth + 2, &child, child_width);
    }
    if unchanged > 0 {
        let noun = if quoted { "element" } else { "attribute" };
        write_unchanged_comment(w, depth + 3, unchanged, noun);
    }
    write_closing_brace(w, depth + 1);
}

/// Object arrays are never paired element by element: every before element
/// renders as a removed block, then every after element as an added one.
fn render_updated_object_array(
    w: &mut AnsiWriter,
    before: &Value,
    after: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
) {
    if let Value::Array(items) = before {
        for (i, element) in items.iter().enumerate() {
            render_removed_object_block(w, element, name, ctx, depth, &path::child_path(node_path, i));
        }
    }
    if let Value::Array(items) = after {
        for (i, element) in items.iter().enumerate() {
            render_added_object_block(
                w,
                element,
                name,
                ctx,
                depth,
                "+",
                Style::Green,
                &path::child_path(node_path, i),
            );
        }
    }
}

/// Sensitive values collapse to a single line for scalars and to a
/// placeholder block per object (or object-array element).
fn render_sensitive(
    w: &mut AnsiWriter,
    value: &Value,
    name: &str,
    depth: usize,
    marker: &str,
    style: Style,
    width: usize,
) {
    if value.is_object_array() {
        if let Value::Array(items) = value {
            for _ in items {
                write_sensitive_block(w, depth, marker, style, name);
            }
        }
    } else if matches!(value, Value::Object(_)) {
        write_sensitive_block(w, depth, marker, style, name);
    } else {
        write_sensitive_value_line(w, depth, marker, style, name, width);
    }
}

fn display_name(name: &str, quoted: bool) -> String {
    if quoted {
        format!("\"{name}\"")
    } else {
        name.to_string()
    }
}
