//! ANSI-styled text sink.
//!
//! Terraform's renderer interleaves plain text with SGR escape sequences in
//! a specific pattern, including a double reset after each styled change
//! marker. The sink reproduces that pattern exactly when color is enabled
//! and degrades to bare text when it is not.

/// Terminal styles used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Green,
    Yellow,
    Red,
    Cyan,
    Dim,
    Reset,
}

impl Style {
    pub fn escape(self) -> &'static str {
        match self {
            Style::Bold => "\x1b[1m",
            Style::Green => "\x1b[32m",
            Style::Yellow => "\x1b[33m",
            Style::Red => "\x1b[31m",
            Style::Cyan => "\x1b[36m",
            Style::Dim => "\x1b[90m",
            Style::Reset => "\x1b[0m",
        }
    }
}

/// String sink with a color switch and blank-line tracking.
#[derive(Debug)]
pub struct AnsiWriter {
    out: String,
    use_color: bool,
    last_line_was_empty: bool,
    current_line_has_content: bool,
}

impl AnsiWriter {
    pub fn new(use_color: bool) -> Self {
        Self {
            out: String::new(),
            use_color,
            last_line_was_empty: false,
            current_line_has_content: false,
        }
    }

    pub fn write(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.current_line_has_content = true;
        }
        self.out.push_str(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.out.push('\n');
        self.last_line_was_empty = !self.current_line_has_content;
        self.current_line_has_content = false;
    }

    /// Emits a blank line unless the previous line was already blank.
    pub fn blank_line_if_needed(&mut self) {
        if !self.last_line_was_empty {
            self.newline();
        }
    }

    pub fn write_reset(&mut self) {
        if self.use_color {
            self.out.push_str(Style::Reset.escape());
        }
    }

    /// Writes text wrapped in the given styles followed by a reset. Without
    /// color the text is written bare.
    pub fn write_styled(&mut self, text: &str, styles: &[Style]) {
        if self.use_color && !styles.is_empty() {
            for style in styles {
                self.out.push_str(style.escape());
            }
            self.write(text);
            self.out.push_str(Style::Reset.escape());
        } else {
            self.write(text);
        }
    }

    pub fn write_line_styled(&mut self, text: &str, styles: &[Style]) {
        self.write_styled(text, styles);
        self.newline();
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_has_no_escapes() {
        let mut w = AnsiWriter::new(false);
        w.write_styled("+", &[Style::Green]);
        w.write_reset();
        w.write_line(" ok");
        assert_eq!(w.as_str(), "+ ok\n");
    }

    #[test]
    fn test_styled_marker_double_reset() {
        let mut w = AnsiWriter::new(true);
        w.write_styled("+", &[Style::Green]);
        w.write_reset();
        w.write(" ok");
        assert_eq!(w.as_str(), "\x1b[32m+\x1b[0m\x1b[0m ok");
    }

    #[test]
    fn test_multiple_styles_stack() {
        let mut w = AnsiWriter::new(true);
        w.write_styled("destroyed", &[Style::Bold, Style::Red]);
        assert_eq!(w.as_str(), "\x1b[1m\x1b[31mdestroyed\x1b[0m");
    }

    #[test]
    fn test_blank_line_suppression() {
        let mut w = AnsiWriter::new(false);
        w.write_line("a");
        w.blank_line_if_needed();
        w.blank_line_if_needed();
        w.write_line("b");
        assert_eq!(w.as_str(), "a\n\nb\n");
    }

    #[test]
    fn test_indentation_does_not_count_as_content() {
        let mut w = AnsiWriter::new(false);
        w.write("    ");
        w.newline();
        w.blank_line_if_needed();
        assert_eq!(w.as_str(), "    \n");
    }
}
