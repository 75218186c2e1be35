/// Turns a catalog key such as `Van_Gogh` into prose (`Van Gogh`).
pub fn humanize_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Trims a user-supplied prompt, treating blank input as absent.
pub fn normalize_prompt(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Treats empty and whitespace-only form values as absent.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Escapes text for interpolation into HTML element content or quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_underscores() {
        assert_eq!(humanize_label("Van_Gogh"), "Van Gogh");
        assert_eq!(humanize_label("Red_Blue_Ink"), "Red Blue Ink");
        assert_eq!(humanize_label("Monet"), "Monet");
    }

    #[test]
    fn normalizes_prompts() {
        assert_eq!(normalize_prompt(Some("  hello  ")), Some("hello".to_owned()));
        assert_eq!(normalize_prompt(Some(" \n\t ")), None);
        assert_eq!(normalize_prompt(None), None);
    }

    #[test]
    fn blank_form_values_are_absent() {
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("  ".to_owned())), None);
        assert_eq!(non_blank(Some("Cats".to_owned())), Some("Cats".to_owned()));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
