//! Incremental HTML assembly: span open/close, escaped text, and an
//! optional line-numbered table wrap.
//!
//! Grounded on `examples/original_source/src/ach/detail/html_builder.cpp`
//! (`open_table`, `add_span`) — small, literal translations, plus a
//! pygments-style line-number gutter for the table wrap (the original
//! leaves per-line numbering as a thin wrapper over the same primitives).

use super::escape::{append_escaped_text, normalize_class_name};

pub struct HtmlBuilder {
    code: String,
    gutter: String,
    line_count: usize,
    table_wrap_css_class: Option<String>,
    escape_whitespace: bool,
    replace_underscores: bool,
}

impl HtmlBuilder {
    pub fn new(table_wrap_css_class: Option<String>, escape_whitespace: bool, replace_underscores: bool) -> Self {
        Self {
            code: String::new(),
            gutter: String::new(),
            line_count: 0,
            table_wrap_css_class,
            escape_whitespace,
            replace_underscores,
        }
    }

    /// Begin the gutter numbering; call once before any text is appended.
    pub fn open_table(&mut self) {
        if self.table_wrap_css_class.is_some() {
            self.line_count = 1;
            self.gutter.push_str("1");
        }
    }

    pub fn open_span(&mut self, classes: &[&str]) {
        self.code.push_str("<span class=\"");
        for (i, class) in classes.iter().enumerate() {
            if i > 0 {
                self.code.push(' ');
            }
            self.code.push_str(&normalize_class_name(class, self.replace_underscores));
        }
        self.code.push_str("\">");
    }

    pub fn close_span(&mut self) {
        self.code.push_str("</span>");
    }

    pub fn append_text(&mut self, text: &str) {
        if self.table_wrap_css_class.is_some() {
            for line in text.split_inclusive('\n') {
                if line.ends_with('\n') {
                    self.line_count += 1;
                    self.gutter.push('\n');
                    self.gutter.push_str(&self.line_count.to_string());
                }
            }
        }
        append_escaped_text(&mut self.code, text, self.escape_whitespace);
    }

    /// Append a quoted literal, wrapping each escape sequence (`escape_char`
    /// plus the character it protects) in its own `escape_class` span nested
    /// inside the span the caller already opened around the whole literal.
    ///
    /// `text` must be a complete quoted string (matching open/close
    /// delimiter, no trailing unterminated escape).
    pub fn append_quoted(&mut self, text: &str, escape_char: u8, escape_class: &str) {
        let escape_char = escape_char as char;
        let mut inside_escape = false;
        let mut escape_opened = false;
        let mut segment = String::new();

        for c in text.chars() {
            if inside_escape {
                segment.push(c);
                inside_escape = false;
                continue;
            }
            if c == escape_char {
                if !escape_opened {
                    if !segment.is_empty() {
                        self.append_text(&segment);
                        segment.clear();
                    }
                    self.open_span(&[escape_class]);
                    escape_opened = true;
                }
                segment.push(c);
                inside_escape = true;
                continue;
            }
            if escape_opened {
                if !segment.is_empty() {
                    self.append_text(&segment);
                    segment.clear();
                }
                self.close_span();
                escape_opened = false;
            }
            segment.push(c);
        }

        if !segment.is_empty() {
            self.append_text(&segment);
        }
        if escape_opened {
            self.close_span();
        }
    }

    pub fn finish(self) -> String {
        match self.table_wrap_css_class {
            None => self.code,
            Some(class) => format!(
                "<table class=\"{}\">\n<tr><td class=\"linenos\"><pre>{}</pre></td><td class=\"code\"><pre>{}</pre></td></tr>\n</table>\n",
                normalize_class_name(&class, self.replace_underscores),
                self.gutter,
                self.code,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_plain_spans_without_wrap() {
        let mut b = HtmlBuilder::new(None, false, false);
        b.open_span(&["keyword"]);
        b.append_text("int");
        b.close_span();
        assert_eq!(b.finish(), "<span class=\"keyword\">int</span>");
    }

    #[test]
    fn wraps_in_table_with_line_numbers() {
        let mut b = HtmlBuilder::new(Some("codeglow".to_string()), false, false);
        b.open_table();
        b.append_text("line one\nline two\n");
        let out = b.finish();
        assert!(out.contains("<table class=\"codeglow\">"));
        assert!(out.contains("<pre>1\n2\n3</pre>"));
    }

    #[test]
    fn append_quoted_wraps_escape_sequences() {
        let mut b = HtmlBuilder::new(None, false, false);
        b.open_span(&["lit-str"]);
        b.append_quoted(r#""a\"b""#, b'\\', "esc-seq");
        b.close_span();
        assert_eq!(b.finish(), "<span class=\"lit-str\">\"a<span class=\"esc-seq\">\\\"</span>b\"</span>");
    }

    #[test]
    fn two_class_span_is_space_separated() {
        let mut b = HtmlBuilder::new(None, false, false);
        b.open_span(&["pp-macro", "disabled-code"]);
        b.close_span();
        assert_eq!(b.finish(), "<span class=\"pp-macro disabled-code\"></span>");
    }
}
