//! Anchor slugs for headings.

use std::sync::LazyLock;

use regex::Regex;

/// Lowercase `text` and collapse every run of non-word characters
/// (anything outside `[A-Za-z0-9_]`) into a single `-`.
///
/// Leading and trailing runs are kept, so `"Hello, World!"` becomes
/// `hello-world-`. Two headings with the same text get the same slug.
#[must_use]
pub fn slugify(text: &str) -> String {
    static RE_NON_WORD: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

    RE_NON_WORD
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slug_table() {
        let cases = [
            ("Hello World", "hello-world"),
            ("C++ Tips", "c-tips"),
            ("Hello, World!", "hello-world-"),
            ("snake_case stays", "snake_case-stays"),
            ("  Leading space", "-leading-space"),
            ("Version 2.0", "version-2-0"),
            ("Café au lait", "caf-au-lait"),
            ("already-slugged", "already-slugged"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(slugify(input), expected, "slug of {input:?}");
        }
    }

    #[test]
    fn identical_text_collides() {
        assert_eq!(slugify("Setup"), slugify("setup"));
    }

    proptest! {
        #[test]
        fn slugs_are_lowercase_word_chars_without_double_hyphens(text in "\\PC{0,60}") {
            let slug = slugify(&text);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
