// Transformation Engine
// Orchestrates the academic-style rewriting steps:
// - contractions: unconditional contraction expansion
// - transitions: probability-gated academic transition insertion
// - passive: optional active-to-passive conversion
// - synonyms: optional synonym substitution

pub mod contractions;
pub mod passive;
pub mod synonyms;
pub mod transitions;

use crate::services::lexicon::{Lexicon, LexiconError};
use crate::services::text_processor::{split_paragraphs, split_sentences_advanced};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use transitions::TransitionInserter;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid probability {name}={value}, must be within [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("linguistic resource unavailable: {0}")]
    ResourceUnavailable(#[from] LexiconError),
}

/// Per-feature application rates. Validated at engine construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationConfig {
    #[serde(default = "default_p_passive")]
    pub p_passive: f64,
    #[serde(default = "default_p_synonym")]
    pub p_synonym_replacement: f64,
    #[serde(default = "default_p_transition")]
    pub p_academic_transition: f64,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            p_passive: default_p_passive(),
            p_synonym_replacement: default_p_synonym(),
            p_academic_transition: default_p_transition(),
        }
    }
}

impl TransformationConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        let probabilities = [
            ("pPassive", self.p_passive),
            ("pSynonymReplacement", self.p_synonym_replacement),
            ("pAcademicTransition", self.p_academic_transition),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(EngineError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

fn default_p_passive() -> f64 { 0.3 }
fn default_p_synonym() -> f64 { 0.3 }
fn default_p_transition() -> f64 { 0.4 }

/// Academic text transformation engine.
///
/// Holds an explicitly-owned, read-only lexicon handle; no ambient global
/// state. Randomness is drawn from a per-call generator so invocations stay
/// independent; a seeded engine produces deterministic output.
#[derive(Debug)]
pub struct TextScribeEngine {
    config: TransformationConfig,
    lexicon: Arc<Lexicon>,
    seed: Option<u64>,
}

impl TextScribeEngine {
    pub fn new(config: TransformationConfig, lexicon: Arc<Lexicon>) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, lexicon, seed: None })
    }

    /// Fix the random seed for deterministic output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    fn per_call_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// Transform `text` into academic style.
    ///
    /// Contraction expansion always runs; transitions run at the configured
    /// rate; passive conversion and synonym replacement run only when their
    /// toggle is set, at their configured rates. Paragraph and sentence
    /// ordering is preserved and no step deletes content. Callers must guard
    /// empty input before invoking.
    pub fn transform(
        &self,
        text: &str,
        use_passive: bool,
        use_synonyms: bool,
    ) -> Result<String, EngineError> {
        self.lexicon.require_complete()?;

        let mut rng = self.per_call_rng();
        let mut inserter = TransitionInserter::new(&self.lexicon.transitions);
        let mut paragraphs_out = Vec::new();

        for paragraph in split_paragraphs(text) {
            let sentences = split_sentences_advanced(&paragraph);
            let mut out = Vec::with_capacity(sentences.len());

            for sentence in &sentences {
                let mut s = contractions::expand(&sentence.text, &self.lexicon.contractions);

                if rng.gen::<f64>() < self.config.p_academic_transition {
                    s = inserter.apply(&s, &mut rng);
                }

                if use_passive && rng.gen::<f64>() < self.config.p_passive {
                    if let Some(rewritten) = self.passivize(&s) {
                        s = rewritten;
                    }
                }

                if use_synonyms {
                    s = synonyms::replace(&s, &self.lexicon, self.config.p_synonym_replacement, &mut rng);
                }

                out.push(s);
            }

            paragraphs_out.push(out.join(" "));
        }

        let result = paragraphs_out.join("\n\n");
        debug!(
            input_len = text.len(),
            output_len = result.len(),
            use_passive,
            use_synonyms,
            "engine.transform"
        );
        Ok(result)
    }

    /// Passive rewriting that tolerates a previously inserted transition:
    /// the phrase is split off, the remainder converted, and the phrase put
    /// back without recapitalizing the new subject.
    fn passivize(&self, sentence: &str) -> Option<String> {
        for phrase in &self.lexicon.transitions {
            if let Some(rest) = sentence.strip_prefix(phrase.as_str()) {
                let rest = rest.trim_start();
                let rewritten = passive::to_passive(rest, &self.lexicon.transitive_verbs, false)?;
                return Some(format!("{} {}", phrase, rewritten));
            }
        }
        passive::to_passive(sentence, &self.lexicon.transitive_verbs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: TransformationConfig) -> TextScribeEngine {
        TextScribeEngine::new(config, Arc::new(Lexicon::builtin()))
            .unwrap()
            .with_seed(42)
    }

    fn quiet_config() -> TransformationConfig {
        TransformationConfig {
            p_passive: 0.0,
            p_synonym_replacement: 0.0,
            p_academic_transition: 0.0,
        }
    }

    #[test]
    fn test_invalid_probability_fails_fast() {
        let config = TransformationConfig {
            p_passive: 1.5,
            ..TransformationConfig::default()
        };
        let err = TextScribeEngine::new(config, Arc::new(Lexicon::builtin())).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProbability { name: "pPassive", .. }));
    }

    #[test]
    fn test_contraction_expansion_only() {
        let engine = engine(quiet_config());
        let out = engine
            .transform("I can't believe it's working.", false, false)
            .unwrap();
        assert_eq!(out, "I cannot believe it is working.");
    }

    #[test]
    fn test_all_features_off_is_expansion_only() {
        let engine = engine(quiet_config());
        let input = "They don't agree. The committee reviewed the proposals.";
        let out = engine.transform(input, true, true).unwrap();
        assert_eq!(out, "They do not agree. The committee reviewed the proposals.");
    }

    #[test]
    fn test_nonempty_output_for_nonempty_input() {
        let configs = [
            quiet_config(),
            TransformationConfig::default(),
            TransformationConfig {
                p_passive: 1.0,
                p_synonym_replacement: 1.0,
                p_academic_transition: 1.0,
            },
        ];
        for config in configs {
            let engine = engine(config);
            let out = engine
                .transform("The results show a clear trend. We used a new way.", true, true)
                .unwrap();
            assert!(!out.is_empty());
        }
    }

    #[test]
    fn test_transition_rate_one_hits_every_sentence() {
        let config = TransformationConfig {
            p_academic_transition: 1.0,
            ..quiet_config()
        };
        let engine = engine(config);
        let input = "The data was collected. The model fit well. The errors stayed small.";
        let out = engine.transform(input, false, false).unwrap();

        let lexicon = Lexicon::builtin();
        let sentences = crate::services::text_processor::split_sentences_advanced(&out);
        assert_eq!(sentences.len(), 3);
        for sentence in &sentences {
            let opens_with_transition = lexicon
                .transitions
                .iter()
                .any(|t| sentence.text.starts_with(t.as_str()));
            assert!(opens_with_transition, "missing transition: {}", sentence.text);
            // Exactly one: the remainder must not open with another phrase
            let rest = lexicon
                .transitions
                .iter()
                .find_map(|t| sentence.text.strip_prefix(t.as_str()))
                .unwrap()
                .trim_start();
            assert!(lexicon.transitions.iter().all(|t| !rest.starts_with(t.as_str())));
        }
    }

    #[test]
    fn test_passive_applies_to_eligible_sentence() {
        let config = TransformationConfig {
            p_passive: 1.0,
            ..quiet_config()
        };
        let engine = engine(config);
        let out = engine
            .transform("The researcher wrote the report.", true, false)
            .unwrap();
        assert_eq!(out, "The report was written by the researcher.");
    }

    #[test]
    fn test_passive_leaves_ineligible_sentence_unchanged() {
        let config = TransformationConfig {
            p_passive: 1.0,
            ..quiet_config()
        };
        let engine = engine(config);
        let input = "The sky turned a deep shade of red.";
        let out = engine.transform(input, true, false).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_passive_toggle_off_never_converts() {
        let config = TransformationConfig {
            p_passive: 1.0,
            ..quiet_config()
        };
        let engine = engine(config);
        let input = "The researcher wrote the report.";
        let out = engine.transform(input, false, false).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_synonym_rate_zero_with_toggle_on() {
        let config = TransformationConfig {
            p_synonym_replacement: 0.0,
            ..quiet_config()
        };
        let engine = engine(config);
        let input = "We can't ignore the important results.";
        let out = engine.transform(input, false, true).unwrap();
        assert_eq!(out, "We cannot ignore the important results.");
    }

    #[test]
    fn test_paragraph_structure_preserved() {
        let engine = engine(quiet_config());
        let input = "First paragraph here.\n\nSecond paragraph here.";
        let out = engine.transform(input, false, false).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_seeded_transform_is_deterministic() {
        let input = "The results show an important trend. We used a new way to check the data.";
        let make = || {
            TextScribeEngine::new(TransformationConfig::default(), Arc::new(Lexicon::builtin()))
                .unwrap()
                .with_seed(7)
        };
        let a = make().transform(input, true, true).unwrap();
        let b = make().transform(input, true, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_incomplete_lexicon_is_resource_unavailable() {
        let mut lexicon = Lexicon::builtin();
        lexicon.synonyms.clear();
        let engine =
            TextScribeEngine::new(quiet_config(), Arc::new(lexicon)).unwrap();
        let err = engine.transform("Some text.", false, false).unwrap_err();
        assert!(matches!(err, EngineError::ResourceUnavailable(_)));
    }

    #[test]
    fn test_transition_then_passive_keeps_phrase() {
        let config = TransformationConfig {
            p_passive: 1.0,
            p_synonym_replacement: 0.0,
            p_academic_transition: 1.0,
        };
        let engine = engine(config);
        let out = engine
            .transform("The researcher wrote the report.", true, false)
            .unwrap();
        let lexicon = Lexicon::builtin();
        assert!(lexicon.transitions.iter().any(|t| out.starts_with(t.as_str())));
        assert!(out.contains("the report was written by the researcher."));
    }
}
