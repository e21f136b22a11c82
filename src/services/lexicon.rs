// Lexicon Service
// Shared read-only linguistic resources: contraction table, academic
// transition phrases, synonym table, transitive verb forms.
// Loaded once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("lexicon table '{table}' not found at {path}")]
    MissingTable { table: &'static str, path: PathBuf },
    #[error("failed to read lexicon table '{table}': {source}")]
    Io {
        table: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse lexicon table '{table}': {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("lexicon table '{0}' is empty")]
    EmptyTable(&'static str),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

/// Synonym candidates for one surface form, all sharing its part of speech
/// and inflection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub pos: PartOfSpeech,
    pub synonyms: Vec<String>,
}

/// Read-only linguistic resource handle. Built fresh from the compiled-in
/// tables or loaded from a provisioned directory; shared via `Arc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    /// Lowercase contraction -> expanded form ("can't" -> "cannot")
    pub contractions: HashMap<String, String>,
    /// Academic transition phrases, each ending with a comma
    pub transitions: Vec<String>,
    /// Lowercase surface form -> same-inflection synonym candidates
    pub synonyms: HashMap<String, SynonymEntry>,
    /// Past-tense transitive verb -> past participle ("wrote" -> "written")
    pub transitive_verbs: HashMap<String, String>,
}

const CONTRACTIONS_FILE: &str = "contractions.json";
const TRANSITIONS_FILE: &str = "transitions.json";
const SYNONYMS_FILE: &str = "synonyms.json";
const VERBS_FILE: &str = "verbs.json";

impl Lexicon {
    /// Compiled-in default tables
    pub fn builtin() -> Self {
        Self {
            contractions: builtin_contractions(),
            transitions: builtin_transitions(),
            synonyms: builtin_synonyms(),
            transitive_verbs: builtin_transitive_verbs(),
        }
    }

    /// Default on-disk lexicon directory
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("textscribe").join("lexicon"))
    }

    /// Load all tables from a provisioned directory
    pub fn load_dir(dir: &Path) -> Result<Self, LexiconError> {
        let lexicon = Self {
            contractions: load_table(dir, CONTRACTIONS_FILE, "contractions")?,
            transitions: load_table(dir, TRANSITIONS_FILE, "transitions")?,
            synonyms: load_table(dir, SYNONYMS_FILE, "synonyms")?,
            transitive_verbs: load_table(dir, VERBS_FILE, "verbs")?,
        };
        lexicon.require_complete()?;
        info!(
            dir = %dir.display(),
            contractions = lexicon.contractions.len(),
            transitions = lexicon.transitions.len(),
            synonyms = lexicon.synonyms.len(),
            verbs = lexicon.transitive_verbs.len(),
            "lexicon.loaded"
        );
        Ok(lexicon)
    }

    /// Every transformation step needs its table; an empty one means the
    /// resource is not usable.
    pub fn require_complete(&self) -> Result<(), LexiconError> {
        if self.contractions.is_empty() {
            return Err(LexiconError::EmptyTable("contractions"));
        }
        if self.transitions.is_empty() {
            return Err(LexiconError::EmptyTable("transitions"));
        }
        if self.synonyms.is_empty() {
            return Err(LexiconError::EmptyTable("synonyms"));
        }
        if self.transitive_verbs.is_empty() {
            return Err(LexiconError::EmptyTable("verbs"));
        }
        Ok(())
    }
}

fn load_table<T: for<'de> Deserialize<'de>>(
    dir: &Path,
    file: &str,
    table: &'static str,
) -> Result<T, LexiconError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(LexiconError::MissingTable { table, path });
    }
    let content = fs::read_to_string(&path).map_err(|source| LexiconError::Io { table, source })?;
    serde_json::from_str(&content).map_err(|source| LexiconError::Parse { table, source })
}

/// Materialize the built-in tables under `dir` if absent, so a later
/// `load_dir` succeeds. One-time provisioning step; callers retry once after
/// this, never in a loop.
pub fn ensure_resources(dir: &Path) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create lexicon dir: {}", e))?;

    let builtin = Lexicon::builtin();
    write_if_absent(dir, CONTRACTIONS_FILE, &builtin.contractions)?;
    write_if_absent(dir, TRANSITIONS_FILE, &builtin.transitions)?;
    write_if_absent(dir, SYNONYMS_FILE, &builtin.synonyms)?;
    write_if_absent(dir, VERBS_FILE, &builtin.transitive_verbs)?;
    info!(dir = %dir.display(), "lexicon.provisioned");
    Ok(())
}

fn write_if_absent<T: Serialize>(dir: &Path, file: &str, value: &T) -> Result<(), String> {
    let path = dir.join(file);
    if path.exists() {
        return Ok(());
    }
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize {}: {}", file, e))?;
    fs::write(&path, content).map_err(|e| format!("Failed to write {}: {}", file, e))
}

fn builtin_contractions() -> HashMap<String, String> {
    [
        ("ain't", "is not"),
        ("aren't", "are not"),
        ("can't", "cannot"),
        ("couldn't", "could not"),
        ("didn't", "did not"),
        ("doesn't", "does not"),
        ("don't", "do not"),
        ("hadn't", "had not"),
        ("hasn't", "has not"),
        ("haven't", "have not"),
        ("he'd", "he would"),
        ("he'll", "he will"),
        ("he's", "he is"),
        ("here's", "here is"),
        ("i'd", "i would"),
        ("i'll", "i will"),
        ("i'm", "i am"),
        ("i've", "i have"),
        ("isn't", "is not"),
        ("it'd", "it would"),
        ("it'll", "it will"),
        ("it's", "it is"),
        ("let's", "let us"),
        ("mightn't", "might not"),
        ("mustn't", "must not"),
        ("needn't", "need not"),
        ("shan't", "shall not"),
        ("she'd", "she would"),
        ("she'll", "she will"),
        ("she's", "she is"),
        ("shouldn't", "should not"),
        ("shouldn't've", "should not have"),
        ("that's", "that is"),
        ("there's", "there is"),
        ("they'd", "they would"),
        ("they'll", "they will"),
        ("they're", "they are"),
        ("they've", "they have"),
        ("wasn't", "was not"),
        ("we'd", "we would"),
        ("we'll", "we will"),
        ("we're", "we are"),
        ("we've", "we have"),
        ("weren't", "were not"),
        ("what's", "what is"),
        ("who's", "who is"),
        ("won't", "will not"),
        ("wouldn't", "would not"),
        ("wouldn't've", "would not have"),
        ("you'd", "you would"),
        ("you'll", "you will"),
        ("you're", "you are"),
        ("you've", "you have"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn builtin_transitions() -> Vec<String> {
    [
        "Furthermore,",
        "Moreover,",
        "Consequently,",
        "In addition,",
        "Therefore,",
        "Nevertheless,",
        "Accordingly,",
        "Subsequently,",
        "Hence,",
        "Notably,",
    ]
    .into_iter()
    .map(|s| s.to_string())
    .collect()
}

fn builtin_synonyms() -> HashMap<String, SynonymEntry> {
    use PartOfSpeech::*;

    fn entry(pos: PartOfSpeech, candidates: &[&str]) -> SynonymEntry {
        SynonymEntry {
            pos,
            synonyms: candidates.iter().map(|s| s.to_string()).collect(),
        }
    }

    [
        ("show", entry(Verb, &["demonstrate", "illustrate"])),
        ("shows", entry(Verb, &["demonstrates", "illustrates"])),
        ("showed", entry(Verb, &["demonstrated", "illustrated"])),
        ("use", entry(Verb, &["utilize", "employ"])),
        ("uses", entry(Verb, &["utilizes", "employs"])),
        ("used", entry(Verb, &["utilized", "employed"])),
        ("get", entry(Verb, &["obtain", "acquire"])),
        ("gets", entry(Verb, &["obtains", "acquires"])),
        ("help", entry(Verb, &["assist", "facilitate"])),
        ("helps", entry(Verb, &["assists", "facilitates"])),
        ("helped", entry(Verb, &["assisted", "facilitated"])),
        ("start", entry(Verb, &["commence", "initiate"])),
        ("started", entry(Verb, &["commenced", "initiated"])),
        ("think", entry(Verb, &["consider", "contend"])),
        ("thinks", entry(Verb, &["considers", "contends"])),
        ("need", entry(Verb, &["require", "necessitate"])),
        ("needs", entry(Verb, &["requires", "necessitates"])),
        ("needed", entry(Verb, &["required", "necessitated"])),
        ("ask", entry(Verb, &["inquire", "request"])),
        ("asked", entry(Verb, &["inquired", "requested"])),
        ("check", entry(Verb, &["verify", "examine"])),
        ("checked", entry(Verb, &["verified", "examined"])),
        ("explain", entry(Verb, &["elucidate", "clarify"])),
        ("explains", entry(Verb, &["elucidates", "clarifies"])),
        ("big", entry(Adjective, &["substantial", "considerable"])),
        ("small", entry(Adjective, &["minor", "limited"])),
        ("important", entry(Adjective, &["significant", "crucial"])),
        ("good", entry(Adjective, &["beneficial", "favorable"])),
        ("bad", entry(Adjective, &["detrimental", "adverse"])),
        ("clear", entry(Adjective, &["evident", "apparent"])),
        ("hard", entry(Adjective, &["challenging", "arduous"])),
        ("easy", entry(Adjective, &["straightforward", "uncomplicated"])),
        ("new", entry(Adjective, &["novel", "recent"])),
        ("main", entry(Adjective, &["principal", "primary"])),
        ("enough", entry(Adjective, &["sufficient", "adequate"])),
        ("whole", entry(Adjective, &["entire", "complete"])),
        ("idea", entry(Noun, &["concept", "notion"])),
        ("ideas", entry(Noun, &["concepts", "notions"])),
        ("result", entry(Noun, &["outcome", "finding"])),
        ("results", entry(Noun, &["outcomes", "findings"])),
        ("problem", entry(Noun, &["issue", "difficulty"])),
        ("problems", entry(Noun, &["issues", "difficulties"])),
        ("part", entry(Noun, &["component", "portion"])),
        ("parts", entry(Noun, &["components", "portions"])),
        ("way", entry(Noun, &["approach", "method"])),
        ("ways", entry(Noun, &["approaches", "methods"])),
        ("also", entry(Adverb, &["additionally", "furthermore"])),
        ("very", entry(Adverb, &["considerably", "markedly"])),
        ("often", entry(Adverb, &["frequently", "commonly"])),
        ("mostly", entry(Adverb, &["predominantly", "primarily"])),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn builtin_transitive_verbs() -> HashMap<String, String> {
    [
        ("analyzed", "analyzed"),
        ("approved", "approved"),
        ("bought", "bought"),
        ("broke", "broken"),
        ("built", "built"),
        ("caught", "caught"),
        ("chose", "chosen"),
        ("collected", "collected"),
        ("completed", "completed"),
        ("conducted", "conducted"),
        ("created", "created"),
        ("designed", "designed"),
        ("developed", "developed"),
        ("examined", "examined"),
        ("finished", "finished"),
        ("found", "found"),
        ("gave", "given"),
        ("made", "made"),
        ("measured", "measured"),
        ("observed", "observed"),
        ("performed", "performed"),
        ("prepared", "prepared"),
        ("presented", "presented"),
        ("produced", "produced"),
        ("proposed", "proposed"),
        ("published", "published"),
        ("recorded", "recorded"),
        ("rejected", "rejected"),
        ("reported", "reported"),
        ("reviewed", "reviewed"),
        ("saw", "seen"),
        ("sent", "sent"),
        ("signed", "signed"),
        ("solved", "solved"),
        ("studied", "studied"),
        ("taught", "taught"),
        ("tested", "tested"),
        ("threw", "thrown"),
        ("took", "taken"),
        ("verified", "verified"),
        ("wore", "worn"),
        ("wrote", "written"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
