//! HTML escaping applied to free-text fields before they are stored.

/// Escape `& < > " ' /` so the value is inert when embedded in HTML.
///
/// Existing entities are escaped again rather than preserved.
///
/// # Examples
/// ```
/// use backend::domain::sanitize_text;
///
/// assert_eq!(sanitize_text("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;&#x2F;b&gt;");
/// ```
pub fn sanitize_text(input: &str) -> String {
    html_escape::encode_safe(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Alex Lee", "Alex Lee")]
    #[case("<script>", "&lt;script&gt;")]
    #[case("O'Brien", "O&#x27;Brien")]
    #[case("a/b", "a&#x2F;b")]
    #[case("\"quoted\"", "&quot;quoted&quot;")]
    #[case("&amp;", "&amp;amp;")]
    fn escapes_markup_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_text(input), expected);
    }

    #[rstest]
    fn leaves_unicode_untouched() {
        assert_eq!(sanitize_text("Zoë 🥂"), "Zoë 🥂");
    }
}
