//! Tokenization shared by every text-matching extractor.
//!
//! Rule: lowercase, replace every non-alphanumeric character with a space,
//! split on whitespace. A keyword matches a text when all of the keyword's
//! tokens are present in the text's token set.

use std::collections::BTreeSet;

pub(crate) type TokenSet = BTreeSet<String>;

pub(crate) fn tokenize(value: &str) -> Vec<String> {
    let cleaned: String = value
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();
    cleaned
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub(crate) fn token_set<'a, I>(texts: I) -> TokenSet
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().flat_map(tokenize).collect()
}

/// Canonical form of a catalog keyword, e.g. `"Climate-Change "` -> `"climate change"`.
pub(crate) fn normalize_keyword(value: &str) -> String {
    tokenize(value).join(" ")
}

pub(crate) fn keyword_matches(keyword: &str, tokens: &TokenSet) -> bool {
    let parts = tokenize(keyword);
    !parts.is_empty() && parts.iter().all(|part| tokens.contains(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_punctuation_and_case() {
        assert_eq!(
            tokenize("Climate-Change, (Fiji)/Vanuatu!"),
            vec!["climate", "change", "fiji", "vanuatu"]
        );
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn keyword_matching_requires_every_token() {
        let tokens = token_set(["Technical assistance for climate adaptation"]);
        assert!(keyword_matches("climate adaptation", &tokens));
        assert!(keyword_matches("Adaptation", &tokens));
        assert!(!keyword_matches("climate change", &tokens));
        assert!(!keyword_matches("", &tokens));
    }

    #[test]
    fn normalize_keyword_collapses_separators() {
        assert_eq!(normalize_keyword("  Papua-New   Guinea "), "papua new guinea");
    }
}
