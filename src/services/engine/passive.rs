// Active to passive voice conversion
// Conservative subject-verb-object rewriting. Only sentences matching a
// simple SVO shape with a known past-tense transitive verb are converted;
// everything else passes through unchanged.

use super::transitions::decapitalize_first;
use std::collections::HashMap;

const MAX_TOKENS: usize = 14;
const MAX_SUBJECT_TOKENS: usize = 5;
const MAX_OBJECT_TOKENS: usize = 8;

/// Auxiliaries and markers whose presence means the sentence is already
/// passive, negated, or too complex to rewrite safely.
const BLOCKING_WORDS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "by", "not", "and", "or", "but",
];

const PREPOSITIONS: &[&str] = &[
    "to", "in", "on", "at", "with", "for", "of", "from", "into", "over", "under", "about",
];

const TEMPORAL_ADVERBS: &[&str] = &["yesterday", "today", "tomorrow", "recently", "earlier"];

fn is_plural_head(word: &str) -> bool {
    let w = word.to_lowercase();
    match w.as_str() {
        "them" | "us" | "people" | "children" | "men" | "women" | "data" | "criteria"
        | "phenomena" => true,
        "it" | "him" | "her" | "me" => false,
        _ => w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") && !w.ends_with("is"),
    }
}

fn capitalize_first(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(c) if c.is_lowercase() => {
            let mut out = String::with_capacity(phrase.len());
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => phrase.to_string(),
    }
}

/// Rewrite `sentence` into passive voice, or `None` when the syntactic
/// preconditions are not met.
pub fn to_passive(
    sentence: &str,
    verbs: &HashMap<String, String>,
    capitalize: bool,
) -> Option<String> {
    let trimmed = sentence.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Clause punctuation means more than one clause; skip.
    if trimmed
        .chars()
        .any(|c| matches!(c, ',' | ';' | ':' | '"' | '(' | ')'))
    {
        return None;
    }

    let (body, punct) = match trimmed.chars().last() {
        Some(c @ ('.' | '!' | '?')) => (&trimmed[..trimmed.len() - c.len_utf8()], c.to_string()),
        _ => (trimmed, String::new()),
    };

    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() < 3 || tokens.len() > MAX_TOKENS {
        return None;
    }
    if tokens
        .iter()
        .any(|t| BLOCKING_WORDS.contains(&t.to_lowercase().as_str()))
    {
        return None;
    }

    // First known past-tense transitive verb with material on both sides
    let verb_idx = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, t)| *i < tokens.len() - 1 && verbs.contains_key(&t.to_lowercase()))
        .map(|(i, _)| i)?;

    let subject = &tokens[..verb_idx];
    let object = &tokens[verb_idx + 1..];
    if subject.len() > MAX_SUBJECT_TOKENS || object.len() > MAX_OBJECT_TOKENS {
        return None;
    }

    let object_first = object[0].to_lowercase();
    if PREPOSITIONS.contains(&object_first.as_str()) {
        return None;
    }

    // A trailing adverb would end up inside the new subject phrase.
    let object_last = object.last()?.to_lowercase();
    if object_last.ends_with("ly") || TEMPORAL_ADVERBS.contains(&object_last.as_str()) {
        return None;
    }

    let participle = verbs.get(&tokens[verb_idx].to_lowercase())?;
    let aux = if is_plural_head(&object_last) { "were" } else { "was" };

    let subject_phrase = decapitalize_first(&subject.join(" "));
    let mut object_phrase = object.join(" ");
    if capitalize {
        object_phrase = capitalize_first(&object_phrase);
    }

    Some(format!(
        "{} {} {} by {}{}",
        object_phrase, aux, participle, subject_phrase, punct
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lexicon::Lexicon;

    fn verbs() -> HashMap<String, String> {
        Lexicon::builtin().transitive_verbs
    }

    #[test]
    fn test_simple_svo() {
        let out = to_passive("The researcher wrote the report.", &verbs(), true);
        assert_eq!(out.unwrap(), "The report was written by the researcher.");
    }

    #[test]
    fn test_plural_object_takes_were() {
        let out = to_passive("The committee reviewed the proposals.", &verbs(), true);
        assert_eq!(out.unwrap(), "The proposals were reviewed by the committee.");
    }

    #[test]
    fn test_irregular_participle() {
        let out = to_passive("The student took the exam.", &verbs(), true);
        assert_eq!(out.unwrap(), "The exam was taken by the student.");
    }

    #[test]
    fn test_proper_noun_subject_keeps_capital() {
        let out = to_passive("Newton wrote the paper.", &verbs(), true);
        assert_eq!(out.unwrap(), "The paper was written by Newton.");
    }

    #[test]
    fn test_no_capitalize_after_transition() {
        let out = to_passive("the team designed the study.", &verbs(), false);
        assert_eq!(out.unwrap(), "the study was designed by the team.");
    }

    #[test]
    fn test_rejects_unknown_verb() {
        assert!(to_passive("The cat chased the mouse.", &verbs(), true).is_none());
    }

    #[test]
    fn test_rejects_already_passive() {
        assert!(to_passive("The report was written by them.", &verbs(), true).is_none());
    }

    #[test]
    fn test_rejects_multi_clause() {
        assert!(to_passive("The team reviewed it, then left.", &verbs(), true).is_none());
    }

    #[test]
    fn test_rejects_prepositional_object() {
        assert!(to_passive("The author wrote in the margin.", &verbs(), true).is_none());
    }

    #[test]
    fn test_rejects_trailing_adverb() {
        assert!(to_passive("The lab tested the sample yesterday.", &verbs(), true).is_none());
    }
}
