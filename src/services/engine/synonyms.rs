// Synonym replacement
// Probability-gated substitution of content words with same-part-of-speech
// candidates from the lexicon. Inflection is preserved by construction:
// the synonym table maps each surface form to candidates of the same form.

use super::contractions::match_case;
use crate::services::lexicon::Lexicon;
use rand::rngs::SmallRng;
use rand::Rng;
use regex::Regex;

/// Replace content words in `sentence` with synonyms, each with the given
/// probability. Words outside the lexicon are never touched.
pub fn replace(sentence: &str, lexicon: &Lexicon, probability: f64, rng: &mut SmallRng) -> String {
    if sentence.is_empty() || probability <= 0.0 {
        return sentence.to_string();
    }

    let re = Regex::new(r"[A-Za-z]+").unwrap();
    re.replace_all(sentence, |caps: &regex::Captures| {
        let word = caps.get(0).map(|m| m.as_str()).unwrap_or("");
        let entry = match lexicon.synonyms.get(&word.to_lowercase()) {
            Some(entry) if !entry.synonyms.is_empty() => entry,
            _ => return word.to_string(),
        };
        if rng.gen::<f64>() >= probability {
            return word.to_string();
        }
        let pick = &entry.synonyms[rng.gen_range(0..entry.synonyms.len())];
        match_case(word, pick)
    })
    .to_string()
}
