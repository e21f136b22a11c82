// TextScribe Data Models

use serde::{Deserialize, Serialize};

// ============ Transform Request ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub text: String,
    #[serde(default)]
    pub use_passive: bool,
    #[serde(default)]
    pub use_synonyms: bool,
    /// Fixed random seed; omit for fresh entropy per call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// ============ Statistics ============

/// Word and sentence counts shown alongside the before/after text
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub word_count: i32,
    pub sentence_count: i32,
}

// ============ Transform Response ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub request_id: String,
    pub transformed_text: String,
    pub input_stats: TextStats,
    pub output_stats: TextStats,
    pub version: String,
}
