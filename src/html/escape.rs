//! HTML text escaping.
//!
//! Grounded on `examples/original_source/src/ach/detail/html_builder.cpp`
//! (`to_escaped_html`, mirror's extra space/tab escaping).

/// Append `text` to `out`, escaping `&`, `<`, `>`. If `escape_whitespace` is
/// set (mirror mode), also escapes space as `&nbsp;` and tab as `&#9;`.
pub fn append_escaped_text(out: &mut String, text: &str, escape_whitespace: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            ' ' if escape_whitespace => out.push_str("&nbsp;"),
            '\t' if escape_whitespace => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

/// Replace `_` with `-` in a CSS class name (the `--replace` CLI flag).
pub fn normalize_class_name(class: &str, replace_underscores: bool) -> String {
    if replace_underscores {
        class.replace('_', "-")
    } else {
        class.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_ampersand_and_angle_brackets() {
        let mut out = String::new();
        append_escaped_text(&mut out, "a < b & c > d", false);
        assert_eq!(out, "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn mirror_mode_escapes_space_and_tab() {
        let mut out = String::new();
        append_escaped_text(&mut out, "a\tb c", true);
        assert_eq!(out, "a&#9;b&nbsp;c");
    }

    #[test]
    fn normalize_class_name_replaces_underscores() {
        assert_eq!(normalize_class_name("foo_bar", true), "foo-bar");
        assert_eq!(normalize_class_name("foo_bar", false), "foo_bar");
    }
}
