// Contraction expansion
// Always applied, independent of feature toggles. Idempotent: expanded
// forms contain no apostrophe, so a second pass finds nothing to rewrite.

use regex::Regex;
use std::collections::HashMap;

/// Rebuild the expansion with the surface capitalization of the original
/// token ("Can't" -> "Cannot", "CAN'T" -> "CANNOT").
pub(crate) fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().map(|c| c.is_uppercase()).unwrap_or(false);
    let all_upper = original.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())
        && original.chars().filter(|c| c.is_alphabetic()).count() > 1;

    if all_upper {
        return replacement.to_uppercase();
    }
    if first_upper {
        let mut out = String::with_capacity(replacement.len());
        let mut rest = replacement.chars();
        if let Some(c) = rest.next() {
            out.extend(c.to_uppercase());
        }
        out.extend(rest);
        return out;
    }
    replacement.to_string()
}

/// Expand every known contraction in `text`. Unknown apostrophe words
/// (possessives, names) are left untouched.
pub fn expand(text: &str, contractions: &HashMap<String, String>) -> String {
    if text.is_empty() || !text.contains('\'') && !text.contains('\u{2019}') {
        return text.to_string();
    }

    // Curly apostrophes are looked up as plain ones
    let re = Regex::new(r"[A-Za-z]+(?:['\u{2019}][A-Za-z]+)+").unwrap();
    re.replace_all(text, |caps: &regex::Captures| {
        let token = caps.get(0).map(|m| m.as_str()).unwrap_or("");
        let key = token.to_lowercase().replace('\u{2019}', "'");
        match contractions.get(&key) {
            Some(expansion) => match_case(token, expansion),
            None => token.to_string(),
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lexicon::Lexicon;

    fn table() -> HashMap<String, String> {
        Lexicon::builtin().contractions
    }

    #[test]
    fn test_expand_basic() {
        let out = expand("I can't believe it's working.", &table());
        assert_eq!(out, "I cannot believe it is working.");
    }

    #[test]
    fn test_expand_preserves_capitalization() {
        assert_eq!(expand("Don't stop.", &table()), "Do not stop.");
        assert_eq!(expand("DON'T STOP.", &table()), "DO NOT STOP.");
    }

    #[test]
    fn test_expand_is_idempotent() {
        let once = expand("They won't say it isn't done.", &table());
        let twice = expand(&once, &table());
        assert_eq!(once, twice);
        assert_eq!(once, "They will not say it is not done.");
    }

    #[test]
    fn test_expand_leaves_possessives_alone() {
        let out = expand("Newton's laws weren't disputed.", &table());
        assert_eq!(out, "Newton's laws were not disputed.");
    }

    #[test]
    fn test_expand_handles_curly_apostrophe() {
        let out = expand("It\u{2019}s fine.", &table());
        assert_eq!(out, "It is fine.");
    }

    #[test]
    fn test_expand_double_contraction() {
        let out = expand("We shouldn't've left.", &table());
        assert_eq!(out, "We should not have left.");
    }
}
