//! Skill tag normalization.

/// Canonical storage form of a free-text skill tag.
///
/// Lowercases the input, then replaces every space with `-`. Total and
/// idempotent: `clean_tag(&clean_tag(x)) == clean_tag(x)`.
pub fn clean_tag(tag: &str) -> String {
    tag.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::clean_tag;

    #[test]
    fn clean_tag_lowercases_and_hyphenates() {
        assert_eq!(clean_tag("Go Lang"), "go-lang");
        assert_eq!(clean_tag("  C Sharp"), "--c-sharp");
        assert_eq!(clean_tag(""), "");
    }

    #[test]
    fn clean_tag_is_idempotent() {
        for input in ["Go Lang", "RUST", "machine  learning", "node.js", "Ünïcode Tag"] {
            let once = clean_tag(input);
            assert_eq!(clean_tag(&once), once, "not idempotent for `{input}`");
        }
    }

    #[test]
    fn clean_tag_leaves_other_whitespace_untouched() {
        assert_eq!(clean_tag("a\tb"), "a\tb");
    }
}
