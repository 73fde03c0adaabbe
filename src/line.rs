//! Shared line writers for the diff engine.
//!
//! All indentation is counted in 2-space units; a change marker plus its
//! trailing space occupies exactly one unit, which is what keeps markerless
//! lines (comments, closing braces) aligned with attribute text.

use crate::tree::Value;
use crate::writer::{AnsiWriter, Style};

const INDENT: &str = "  ";

pub(crate) fn pad(depth: usize) -> String {
    INDENT.repeat(depth)
}

fn pad_name(name: &str, width: usize) -> String {
    // Column widths count characters, not bytes, so multibyte keys align.
    let len = name.chars().count();
    if len >= width {
        name.to_string()
    } else {
        format!("{name}{}", " ".repeat(width - len))
    }
}

/// Writes a styled change marker followed by the double reset and a space.
fn write_marker(w: &mut AnsiWriter, marker: &str, style: Style) {
    w.write_styled(marker, &[style]);
    w.write_reset();
    w.write(" ");
}

/// `  + name = value`, optionally with ` -> null` and the forces-replacement
/// note. Empty marker or name drops that part of the line.
#[allow(clippy::too_many_arguments)]
pub(crate) fn write_scalar_line(
    w: &mut AnsiWriter,
    depth: usize,
    marker: &str,
    style: Style,
    name: &str,
    value: &str,
    append_null: bool,
    replacement: bool,
    width: usize,
) {
    w.write(&pad(depth));
    if !marker.is_empty() {
        write_marker(w, marker, style);
    }
    if !name.is_empty() {
        w.write(&pad_name(name, width));
        w.write(" = ");
    }
    w.write(value);
    if append_null {
        w.write(" ");
        w.write_styled("-> null", &[Style::Dim]);
    }
    if replacement {
        write_replacement_note(w);
    }
    w.newline();
}

/// `  ~ name = old -> new`.
pub(crate) fn write_arrow_line(
    w: &mut AnsiWriter,
    depth: usize,
    name: &str,
    before: &str,
    after: &str,
    replacement: bool,
    width: usize,
) {
    w.write(&pad(depth));
    w.write_styled("~", &[Style::Yellow]);
    w.write(" ");
    if !name.is_empty() {
        w.write(&pad_name(name, width));
        w.write(" = ");
    }
    w.write(before);
    w.write(" ");
    w.write_styled("->", &[Style::Yellow]);
    w.write(" ");
    w.write(after);
    if replacement {
        write_replacement_note(w);
    }
    w.newline();
}

/// `  + name = {` or `  ~ name = [`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn write_container_opening(
    w: &mut AnsiWriter,
    depth: usize,
    marker: &str,
    style: Style,
    name: &str,
    symbol: &str,
    replacement: bool,
    width: usize,
) {
    w.write(&pad(depth));
    write_marker(w, marker, style);
    w.write(&pad_name(name, width));
    w.write(" = ");
    w.write(symbol);
    if replacement {
        write_replacement_note(w);
    }
    w.newline();
}

/// `  + name {` for repeated blocks.
pub(crate) fn write_block_opening(
    w: &mut AnsiWriter,
    depth: usize,
    marker: &str,
    style: Style,
    name: &str,
) {
    w.write(&pad(depth));
    write_marker(w, marker, style);
    w.write(name);
    w.write_line(" {");
}

pub(crate) fn write_closing_brace(w: &mut AnsiWriter, depth: usize) {
    w.write(&pad(depth));
    w.write_line("}");
}

pub(crate) fn write_closing_bracket(w: &mut AnsiWriter, depth: usize) {
    w.write(&pad(depth));
    w.write_line("]");
}

/// `  ] -> null` closing a wholly removed scalar array.
pub(crate) fn write_removed_array_close(w: &mut AnsiWriter, depth: usize) {
    w.write(&pad(depth));
    w.write("] ");
    w.write_styled("-> null", &[Style::Dim]);
    w.write_reset();
    w.newline();
}

fn write_replacement_note(w: &mut AnsiWriter) {
    w.write(" ");
    w.write_styled("# forces replacement", &[Style::Red]);
}

/// `  # (2 unchanged attributes hidden)`. The noun is singular; an `s` is
/// appended when the count calls for it.
pub(crate) fn write_unchanged_comment(
    w: &mut AnsiWriter,
    depth: usize,
    count: usize,
    noun: &str,
) {
    w.write(&pad(depth));
    w.write_styled("#", &[Style::Dim]);
    let plural = if count == 1 { "" } else { "s" };
    w.write(&format!(" ({count} unchanged {noun}{plural} hidden)"));
    w.newline();
}

/// Single-line form for sensitive scalars.
pub(crate) fn write_sensitive_value_line(
    w: &mut AnsiWriter,
    depth: usize,
    marker: &str,
    style: Style,
    name: &str,
    width: usize,
) {
    w.write(&pad(depth));
    write_marker(w, marker, style);
    w.write(&pad_name(name, width));
    w.write_line(" = (sensitive value)");
}

/// The two-line comment standing in for hidden block contents.
pub(crate) fn write_sensitive_placeholder(w: &mut AnsiWriter, depth: usize) {
    w.write(&pad(depth));
    w.write_line_styled(
        "# At least one attribute in this block is (or was) sensitive,",
        &[Style::Dim],
    );
    w.write(&pad(depth));
    w.write_line_styled("# so its contents will not be displayed.", &[Style::Dim]);
}

/// A named block whose contents are sensitive: opening, placeholder, close.
pub(crate) fn write_sensitive_block(
    w: &mut AnsiWriter,
    depth: usize,
    marker: &str,
    style: Style,
    name: &str,
) {
    w.write(&pad(depth));
    write_marker(w, marker, style);
    w.write(name);
    w.write_line(" {");
    write_sensitive_placeholder(w, depth + 2);
    write_closing_brace(w, depth + 1);
}

/// Width of the name column: the longest name among attributes that render
/// on a `name = ...` line. Nulls only count when unknown (they render as
/// known-after-apply); blocks never count.
pub(crate) fn compute_name_width(props: &[(&str, &Value)], unknown: Option<&Value>) -> usize {
    let mut width = 0;
    for (name, value) in props {
        if matches!(value, Value::Null) && !crate::path::is_unknown(unknown, &[name.to_string()])
        {
            continue;
        }
        let inline = match value {
            Value::Object(_) => false,
            Value::Array(_) => value.is_primitive_array(),
            _ => true,
        };
        let len = name.chars().count();
        if inline && len > width {
            width = len;
        }
    }
    width
}

/// A blank line goes before a block unless the previous attribute was a
/// block with the same name (repeated blocks stay contiguous).
pub(crate) fn needs_block_separator(
    is_block: bool,
    prev_was_block: bool,
    prev_block_name: Option<&str>,
    name: &str,
) -> bool {
    is_block && !(prev_was_block && prev_block_name == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_line_plain() {
        let mut w = AnsiWriter::new(false);
        write_scalar_line(&mut w, 2, "+", Style::Green, "name", "\"x\"", false, false, 6);
        assert_eq!(w.as_str(), "    + name   = \"x\"\n");
    }

    #[test]
    fn test_scalar_line_with_null_and_replacement() {
        let mut w = AnsiWriter::new(false);
        write_scalar_line(&mut w, 0, "-", Style::Red, "ami", "\"a\"", true, true, 3);
        assert_eq!(w.as_str(), "- ami = \"a\" -> null # forces replacement\n");
    }

    #[test]
    fn test_arrow_line_without_name() {
        let mut w = AnsiWriter::new(false);
        write_arrow_line(&mut w, 1, "", "\"a\"", "\"b\"", false, 0);
        assert_eq!(w.as_str(), "  ~ \"a\" -> \"b\"\n");
    }

    #[test]
    fn test_unchanged_comment_pluralization() {
        let mut w = AnsiWriter::new(false);
        write_unchanged_comment(&mut w, 0, 1, "attribute");
        write_unchanged_comment(&mut w, 0, 3, "block");
        assert_eq!(
            w.as_str(),
            "# (1 unchanged attribute hidden)\n# (3 unchanged blocks hidden)\n"
        );
    }

    #[test]
    fn test_sensitive_block() {
        let mut w = AnsiWriter::new(false);
        write_sensitive_block(&mut w, 0, "+", Style::Green, "cred");
        assert_eq!(
            w.as_str(),
            "+ cred {\n    # At least one attribute in this block is (or was) sensitive,\n    # so its contents will not be displayed.\n  }\n"
        );
    }

    #[test]
    fn test_name_width_skips_blocks_and_plain_nulls() {
        let tags = Value::Object(vec![]);
        let null = Value::Null;
        let ports = Value::Array(vec![Value::Number("80".to_string())]);
        let name = Value::String("x".to_string());
        let props: Vec<(&str, &Value)> = vec![
            ("extremely_long_block_name", &tags),
            ("absent", &null),
            ("ports", &ports),
            ("name", &name),
        ];
        assert_eq!(compute_name_width(&props, None), 5);

        let unknown: Value = serde_json::from_str(r#"{"absent": true}"#).expect("valid JSON");
        assert_eq!(compute_name_width(&props, Some(&unknown)), 6);
    }

    #[test]
    fn test_name_width_counts_characters_not_bytes() {
        let value = Value::String("x".to_string());
        let props: Vec<(&str, &Value)> = vec![("münze", &value)];
        assert_eq!(compute_name_width(&props, None), 5);

        let mut w = AnsiWriter::new(false);
        write_scalar_line(&mut w, 0, "+", Style::Green, "\"größe\"", "\"1\"", false, false, 9);
        assert_eq!(w.as_str(), "+ \"größe\"  = \"1\"\n");
    }

    #[test]
    fn test_block_separator_rule() {
        assert!(needs_block_separator(true, false, None, "rule"));
        assert!(!needs_block_separator(true, true, Some("rule"), "rule"));
        assert!(needs_block_separator(true, true, Some("other"), "rule"));
        assert!(!needs_block_separator(false, false, None, "ami"));
    }
}
