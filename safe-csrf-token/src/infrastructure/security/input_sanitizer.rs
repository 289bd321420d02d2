use regex_lite::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// regex-lite only folds ASCII case, so the non-ASCII letters that fold to
// `s` (U+017F) and `i` (U+0130, U+0131) are listed explicitly.
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<[sſ]cr[iıİ]pt[^>]*>.*?</[sſ]cr[iıİ]pt>").expect("script pattern compiles")
});

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<[sſ]tyle[^>]*>.*?</[sſ]tyle>").expect("style pattern compiles")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern compiles"));

pub struct InputSanitizer;

impl InputSanitizer {
    /// Strips markup, escapes what is left and trims the result.
    ///
    /// Runs a single pass: text that only becomes markup after unescaping
    /// is not sanitized again, and an unterminated `<` is escaped rather
    /// than removed.
    pub fn sanitize(text: &str) -> String {
        let stripped = Self::strip_tags(text);
        let sanitized = Self::escape_html(&stripped)
            .trim_matches(is_strippable)
            .to_string();

        tracing::debug!(
            input_len = text.len(),
            output_len = sanitized.len(),
            "Sanitized input"
        );

        sanitized
    }

    /// Removes `<script>` and `<style>` blocks with their content, then every
    /// other tag, keeping the text between tags.
    pub fn strip_tags(text: &str) -> String {
        let without_scripts = SCRIPT_BLOCK.replace_all(text, "");
        if let Cow::Owned(_) = without_scripts {
            tracing::warn!("Removed script block from input");
        }

        let without_styles = STYLE_BLOCK.replace_all(&without_scripts, "");
        if let Cow::Owned(_) = without_styles {
            tracing::warn!("Removed style block from input");
        }

        ANY_TAG.replace_all(&without_styles, "").into_owned()
    }

    pub fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());

        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                _ => escaped.push(c),
            }
        }

        escaped
    }
}

/// Whitespace plus the ASCII file/group/record/unit separators.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
