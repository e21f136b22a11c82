// Text Processing Service
// Normalization, tokenization, and sentence/paragraph segmentation

use crate::models::TextStats;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Normalize punctuation in text before transformation
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text.to_string();

    // Replace smart quotes (curly apostrophes would break contraction lookup)
    s = s.replace('\u{201c}', "\"")
         .replace('\u{201d}', "\"")
         .replace('\u{2018}', "'")
         .replace('\u{2019}', "'");

    // Replace em dash
    s = s.replace('\u{2014}', "-");

    // Replace non-breaking space
    s = s.replace('\u{00A0}', " ");

    // Normalize line endings
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    // Collapse horizontal whitespace
    let ws_re = Regex::new(r"[ \t\x0C\x0B]+").unwrap();
    s = ws_re.replace_all(&s, " ").to_string();

    // Strip each line
    s = s.lines()
         .map(|ln| ln.trim())
         .collect::<Vec<_>>()
         .join("\n");

    s.trim().to_string()
}

/// Count words (alphanumeric runs, apostrophes kept inside a word)
pub fn count_words(text: &str) -> i32 {
    if text.is_empty() {
        return 0;
    }

    let re = Regex::new(r"[A-Za-z0-9_]+(?:'[A-Za-z]+)*").unwrap();
    re.find_iter(text).count() as i32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceOffset {
    pub text: String,
    pub start: i32,
    pub end: i32,
}

/// Dot-ending abbreviations that do not terminate a sentence
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "mr.", "mrs.", "ms.", "dr.", "prof.", "fig.", "eq.",
    "no.", "inc.", "ltd.",
];

fn ends_with_abbreviation(buffer: &str) -> bool {
    let lower_tail = buffer.trim_end().to_ascii_lowercase();
    ABBREVIATIONS.iter().any(|abbr| lower_tail.ends_with(abbr))
}

/// Sentence splitting with offset tracking
/// Quote-aware, skips decimal points, initials, and common abbreviations.
pub fn split_sentences_advanced(text: &str) -> Vec<SentenceOffset> {
    if text.is_empty() {
        return vec![];
    }

    let mut sentences = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let quote_chars: HashSet<char> = ['"', '\u{201c}', '\u{201d}'].iter().cloned().collect();

    let mut current_start: usize = 0;
    let mut buffer = String::new();
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        buffer.push(ch);

        // Track quote state
        if quote_chars.contains(&ch) {
            in_quote = !in_quote;
        }

        // Check for sentence ending
        let mut is_sentence_end = false;
        if ['.', '!', '?'].contains(&ch) {
            // Don't split inside quotes, unless the quotation closes right here
            if in_quote {
                let closes_quote =
                    i < chars.len() - 1 && quote_chars.contains(&chars[i + 1]);
                if !closes_quote {
                    i += 1;
                    continue;
                }
            }

            if ch == '.' {
                // Check for decimal numbers
                if i > 0 && i < chars.len() - 1
                    && chars[i - 1].is_ascii_digit()
                    && chars[i + 1].is_ascii_digit()
                {
                    i += 1;
                    continue;
                }

                // Check for single-letter tokens: initials ("J. Smith")
                // and dotted abbreviations ("e.g.", "i.e.")
                if i >= 1 && chars[i - 1].is_ascii_alphabetic()
                    && (i < 2 || !chars[i - 2].is_ascii_alphabetic())
                {
                    i += 1;
                    continue;
                }

                if ends_with_abbreviation(&buffer) {
                    i += 1;
                    continue;
                }
            }

            is_sentence_end = true;
        }

        if is_sentence_end {
            // Consume trailing closing quote
            if i < chars.len() - 1 && quote_chars.contains(&chars[i + 1]) {
                i += 1;
                buffer.push(chars[i]);
                in_quote = false;
            }
            // Consume trailing whitespace
            while i < chars.len() - 1 && [' ', '\t'].contains(&chars[i + 1]) {
                i += 1;
                buffer.push(chars[i]);
            }

            let sentence_text = buffer.trim().to_string();
            if !sentence_text.is_empty() {
                sentences.push(SentenceOffset {
                    text: sentence_text,
                    start: current_start as i32,
                    end: (current_start + buffer.len()) as i32,
                });
            }
            current_start += buffer.len();
            buffer.clear();
        }

        i += 1;
    }

    // Handle remaining buffer (content without terminal punctuation)
    let remaining = buffer.trim().to_string();
    if !remaining.is_empty() {
        sentences.push(SentenceOffset {
            text: remaining,
            start: current_start as i32,
            end: text.len() as i32,
        });
    }

    sentences
}

/// Split text into paragraphs on blank lines, preserving order
pub fn split_paragraphs(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![];
    }

    let para_re = Regex::new(r"\n\s*\n").unwrap();
    let paragraphs: Vec<String> = para_re
        .split(text)
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect();

    // Ensure at least one paragraph for non-blank input
    if paragraphs.is_empty() {
        return vec![text.trim().to_string()];
    }

    paragraphs
}

/// Count sentences across all paragraphs
pub fn count_sentences(text: &str) -> i32 {
    split_paragraphs(text)
        .iter()
        .map(|p| split_sentences_advanced(p).len() as i32)
        .sum()
}

/// Word and sentence counts for a text, as shown to the user
pub fn text_stats(text: &str) -> TextStats {
    TextStats {
        word_count: count_words(text),
        sentence_count: count_sentences(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "It\u{2019}s \u{201c}quoted\u{201d} text";
        let output = normalize_punctuation(input);
        assert_eq!(output, "It's \"quoted\" text");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Hello World"), 2);
        assert_eq!(count_words("I can't believe it"), 4);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_split_sentences_basic() {
        let text = "This is the first sentence. This is the second! Is this the third?";
        let sentences = split_sentences_advanced(text);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "This is the first sentence.");
        assert_eq!(sentences[2].text, "Is this the third?");
    }

    #[test]
    fn test_split_sentences_skips_decimals_and_abbreviations() {
        let text = "The rate was 3.14 percent, e.g. in trials. A second sentence follows.";
        let sentences = split_sentences_advanced(text);
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_split_sentences_keeps_unterminated_tail() {
        let text = "A complete sentence. a trailing fragment";
        let sentences = split_sentences_advanced(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text, "a trailing fragment");
    }

    #[test]
    fn test_split_sentences_quote_aware() {
        let text = "He said \"Stop. Wait.\" Then he left.";
        let sentences = split_sentences_advanced(text);
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_split_paragraphs() {
        let text = "First paragraph.\n\nSecond paragraph.";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1], "Second paragraph.");
    }

    #[test]
    fn test_text_stats() {
        let stats = text_stats("One sentence here. And another one.");
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.sentence_count, 2);
    }
}
