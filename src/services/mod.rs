// TextScribe Core Services

pub mod config_store;
pub mod engine;
pub mod lexicon;
pub mod text_processor;

pub use config_store::*;
pub use lexicon::{ensure_resources, Lexicon, LexiconError, PartOfSpeech, SynonymEntry};
pub use text_processor::*;

// Re-export engine types
pub use engine::{EngineError, TextScribeEngine, TransformationConfig};
