//! Array element rendering.
//!
//! Elements of a bracketed list render with a marker and a trailing comma;
//! elements that are objects open an anonymous `{` block. Object arrays get
//! a different treatment entirely: each element becomes a repeated named
//! block, handled by the object-block writers at the bottom of this file.

use crate::diff::{
    render_added_value, render_removed_value, render_updated_value, should_render, Ctx,
};
use crate::line::{
    compute_name_width, pad, write_block_opening, write_closing_brace, write_closing_bracket,
    write_scalar_line, write_sensitive_block, write_sensitive_placeholder,
    write_unchanged_comment,
};
use crate::path;
use crate::tree::Value;
use crate::value::{render_inline, render_scalar};
use crate::writer::{AnsiWriter, Style};

/// `+ {`, `- [` and friends for anonymous container elements.
fn write_element_opening(
    w: &mut AnsiWriter,
    depth: usize,
    marker: &str,
    style: Style,
    symbol: &str,
) {
    w.write(&pad(depth));
    w.write_styled(marker, &[style]);
    w.write_reset();
    w.write(" ");
    w.write_line(symbol);
}

pub(crate) fn render_added_array_item(
    w: &mut AnsiWriter,
    item: &Value,
    ctx: &Ctx,
    depth: usize,
    marker: &str,
    style: Style,
    node_path: &[String],
) {
    let flags = ctx.flags(node_path);
    if flags.sensitive {
        write_sensitive_placeholder(w, depth);
        return;
    }
    if flags.unknown {
        write_scalar_line(
            w,
            depth,
            marker,
            style,
            "",
            "(known after apply),",
            false,
            false,
            0,
        );
        return;
    }
    match item {
        Value::Object(props) => {
            write_element_opening(w, depth, marker, style, "{");
            for (child_name, child_value) in props {
                render_added_value(
                    w,
                    child_value,
                    child_name,
                    ctx,
                    depth + 2,
                    marker,
                    style,
                    &path::child_path(node_path, child_name),
                    0,
                );
            }
            write_closing_brace(w, depth + 1);
        }
        Value::Array(items) => {
            write_element_opening(w, depth, marker, style, "[");
            for (i, sub) in items.iter().enumerate() {
                render_added_array_item(
                    w,
                    sub,
                    ctx,
                    depth + 1,
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
            "",
            &format!("{},", render_scalar(scalar)),
            false,
            false,
            0,
        ),
    }
}

pub(crate) fn render_removed_array_item(
    w: &mut AnsiWriter,
    item: &Value,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
) {
    if path::is_sensitive(ctx.sensitive, node_path) {
        write_sensitive_placeholder(w, depth);
        return;
    }
    match item {
        Value::Object(props) => {
            write_element_opening(w, depth, "-", Style::Red, "{");
            for (child_name, child_value) in props {
                render_removed_value(
                    w,
                    child_value,
                    child_name,
                    ctx,
                    depth + 2,
                    &path::child_path(node_path, child_name),
                    0,
                );
            }
            write_closing_brace(w, depth + 1);
        }
        Value::Array(items) => {
            write_element_opening(w, depth, "-", Style::Red, "[");
            for (i, sub) in items.iter().enumerate() {
                render_removed_array_item(w, sub, ctx, depth + 1, &path::child_path(node_path, i));
            }
            write_closing_bracket(w, depth + 1);
        }
        scalar => write_scalar_line(
            w,
            depth,
            "-",
            Style::Red,
            "",
            &format!("{},", render_scalar(scalar)),
            false,
            false,
            0,
        ),
    }
}

/// One positionally paired element whose value changed. Object pairs merge
/// into a `~ {` block; anything else becomes an arrow line.
pub(crate) fn render_updated_array_item(
    w: &mut AnsiWriter,
    before: &Value,
    after: &Value,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
) {
    let flags = ctx.flags(node_path);
    if flags.sensitive {
        write_sensitive_placeholder(w, depth);
        return;
    }
    if flags.unknown {
        write_scalar_line(
            w,
            depth,
            "~",
            Style::Yellow,
            "",
            "(known after apply)",
            false,
            flags.forces_replacement,
            0,
        );
        return;
    }
    match (before, after) {
        (Value::Object(before_props), Value::Object(after_props)) => {
            let child_unknown = path::child_value(ctx.unknown, node_path);
            let mut width_entries: Vec<(&str, &Value)> = after_props
                .iter()
                .map(|(name, value)| (name.as_str(), value))
                .collect();
            let removed: Vec<(&str, &Value)> = before_props
                .iter()
                .filter(|(name, _)| !after_props.iter().any(|(key, _)| key == name))
                .map(|(name, value)| (name.as_str(), value))
                .collect();
            width_entries.extend(removed.iter().copied());
            let child_width = compute_name_width(&width_entries, child_unknown);

            write_element_opening(w, depth, "~", Style::Yellow, "{");
            for (child_name, after_child) in after_props {
                let child = path::child_path(node_path, child_name);
                match before.get(child_name) {
                    Some(before_child) => {
                        if !before_child.semantic_equals(after_child) {
                            render_updated_value(
                                w,
                                before_child,
                                after_child,
                                child_name,
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
                        child_name,
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
                render_removed_value(
                    w,
                    before_child,
                    child_name,
                    ctx,
                    depth + 2,
                    &child,
                    child_width,
                );
            }
            write_closing_brace(w, depth + 1);
        }
        _ => {
            w.write(&pad(depth));
            w.write_styled("~", &[Style::Yellow]);
            w.write(" ");
            w.write(&render_inline(before));
            w.write(" ");
            w.write_styled("->", &[Style::Yellow]);
            w.write(" ");
            w.write(&render_inline(after));
            if flags.forces_replacement {
                w.write(" ");
                w.write_styled("# forces replacement", &[Style::Red]);
            }
            w.newline();
        }
    }
}

/// One element of an added object array, rendered as a repeated named block.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_added_object_block(
    w: &mut AnsiWriter,
    element: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    marker: &str,
    style: Style,
    node_path: &[String],
) {
    if path::is_sensitive(ctx.sensitive, node_path) {
        write_sensitive_block(w, depth, marker, style, name);
        return;
    }
    let Value::Object(props) = element else {
        return;
    };
    let unknown = path::is_unknown(ctx.unknown, node_path);
    if !should_render(element, unknown, false) {
        return;
    }
    let child_unknown = path::child_value(ctx.unknown, node_path);
    let entries: Vec<(&str, &Value)> = props
        .iter()
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    let mut ordered: Vec<(&str, &Value)> = entries
        .iter()
        .copied()
        .filter(|(_, value)| !value.is_block())
        .collect();
    ordered.extend(entries.iter().copied().filter(|(_, value)| value.is_block()));
    let child_width = compute_name_width(&ordered, child_unknown);

    write_block_opening(w, depth, marker, style, name);
    for (child_name, child_value) in &ordered {
        render_added_value(
            w,
            child_value,
            child_name,
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

/// One element of a removed object array.
pub(crate) fn render_removed_object_block(
    w: &mut AnsiWriter,
    element: &Value,
    name: &str,
    ctx: &Ctx,
    depth: usize,
    node_path: &[String],
) {
    if path::is_sensitive(ctx.sensitive, node_path) {
        write_sensitive_block(w, depth, "-", Style::Red, name);
        return;
    }
    let Value::Object(props) = element else {
        return;
    };
    if element.is_empty() {
        return;
    }
    let entries: Vec<(&str, &Value)> = props
        .iter()
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    let mut ordered: Vec<(&str, &Value)> = entries
        .iter()
        .copied()
        .filter(|(_, value)| !value.is_block())
        .collect();
    ordered.extend(entries.iter().copied().filter(|(_, value)| value.is_block()));
    let child_width = compute_name_width(&ordered, None);

    write_block_opening(w, depth, "-", Style::Red, name);
    let mut hidden = 0;
    for (child_name, child_value) in &ordered {
        let child = path::child_path(node_path, child_name);
        if !should_render(
            child_value,
            false,
            path::is_sensitive(ctx.sensitive, &child),
        ) {
            hidden += 1;
            continue;
        }
        render_removed_value(w, child_value, child_name, ctx, depth + 2, &child, child_width);
    }
    if hidden > 0 {
        write_unchanged_comment(w, depth + 3, hidden, "attribute");
    }
    write_closing_brace(w, depth + 1);
}
