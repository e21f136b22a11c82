use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use textscribe_lib::init_logging;
use textscribe_lib::models::{TransformRequest, TransformResponse};
use textscribe_lib::services::lexicon::{ensure_resources, Lexicon};
use textscribe_lib::services::text_processor::{normalize_punctuation, text_stats};
use textscribe_lib::services::{AppConfig, ConfigStore, TextScribeEngine, TransformationConfig};
use tracing::{info, warn};
use uuid::Uuid;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn print_usage() {
    eprintln!(
        "Usage:\n  textscribe --text <text> [options]\n  textscribe --file <path.txt> [options]\n  textscribe --request <path.json> [options]\n\nOptions:\n  --passive              Enable passive voice transformation\n  --synonyms             Enable synonym replacement\n  --seed <n>             Fix the random seed for reproducible output\n  --p-passive <f>        Passive application rate (default 0.3)\n  --p-synonyms <f>       Synonym replacement rate (default 0.3)\n  --p-transitions <f>    Academic transition rate (default 0.4)\n  --lexicon-dir <dir>    Load lexicon tables from a provisioned directory\n  --save-config          Persist the effective configuration\n  --json                 Emit the full response as JSON\n  --out <path>           Write the JSON response to a file"
    );
}

/// Build the transform request from the command line. A `--request` JSON
/// file carries the whole request; otherwise file input wins over inline
/// text, matching the upload-over-textarea behavior of the original tool.
fn build_request(args: &[String]) -> Result<TransformRequest> {
    if let Some(path) = parse_arg_value(args, "--request") {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read request failed: {}", path))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("parse request failed: {}", path));
    }

    let text = match parse_arg_value(args, "--file") {
        Some(path) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read file failed: {}", path))?;
            String::from_utf8_lossy(&bytes).to_string()
        }
        None => parse_arg_value(args, "--text").unwrap_or_default(),
    };

    let seed = match parse_arg_value(args, "--seed") {
        Some(raw) => Some(
            raw.parse::<u64>()
                .map_err(|_| anyhow!("invalid --seed value: {}", raw))?,
        ),
        None => None,
    };

    Ok(TransformRequest {
        text,
        use_passive: has_flag(args, "--passive"),
        use_synonyms: has_flag(args, "--synonyms"),
        seed,
    })
}

/// Empty or whitespace-only input must short-circuit before the engine.
fn is_blank_input(text: &str) -> bool {
    text.trim().is_empty()
}

fn parse_probability_arg(args: &[String], key: &str) -> Result<Option<f64>> {
    match parse_arg_value(args, key) {
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| anyhow!("invalid {} value: {}", key, raw)),
        None => Ok(None),
    }
}

fn apply_probability_overrides(args: &[String], engine: &mut TransformationConfig) -> Result<()> {
    if let Some(p) = parse_probability_arg(args, "--p-passive")? {
        engine.p_passive = p;
    }
    if let Some(p) = parse_probability_arg(args, "--p-synonyms")? {
        engine.p_synonym_replacement = p;
    }
    if let Some(p) = parse_probability_arg(args, "--p-transitions")? {
        engine.p_academic_transition = p;
    }
    Ok(())
}

fn load_app_config() -> AppConfig {
    let Some(dir) = ConfigStore::default_config_dir() else {
        return AppConfig::default();
    };
    match ConfigStore::new(dir).load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

fn persist_config(config_dir: PathBuf, config: &AppConfig) -> Result<()> {
    ConfigStore::new(config_dir)
        .save(config)
        .map_err(|e| anyhow!(e))?;
    info!("Configuration saved");
    Ok(())
}

/// Load the lexicon, provisioning the directory once and retrying on a
/// missing-resource failure. Never loops.
fn load_lexicon(dir: Option<PathBuf>) -> Result<Lexicon> {
    let Some(dir) = dir else {
        return Ok(Lexicon::builtin());
    };

    match Lexicon::load_dir(&dir) {
        Ok(lexicon) => Ok(lexicon),
        Err(e) => {
            warn!("Lexicon not ready ({}), provisioning {}", e, dir.display());
            ensure_resources(&dir).map_err(|e| anyhow!(e))?;
            Lexicon::load_dir(&dir)
                .with_context(|| format!("lexicon still unavailable after provisioning {}", dir.display()))
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || has_flag(&args, "--help") {
        print_usage();
        return Ok(());
    }

    init_logging();

    let request = build_request(&args)?;

    // Empty input never reaches the engine
    if is_blank_input(&request.text) {
        eprintln!("Please enter or upload some text to transform.");
        return Ok(());
    }

    let mut app_config = load_app_config();
    apply_probability_overrides(&args, &mut app_config.engine)?;

    let lexicon_dir = parse_arg_value(&args, "--lexicon-dir")
        .map(PathBuf::from)
        .or(app_config.lexicon_dir.clone());
    if lexicon_dir.is_some() {
        app_config.lexicon_dir = lexicon_dir.clone();
    }

    if has_flag(&args, "--save-config") {
        let dir = ConfigStore::default_config_dir()
            .context("no config directory available on this platform")?;
        persist_config(dir, &app_config)?;
    }

    let lexicon = load_lexicon(lexicon_dir)?;

    let mut engine = TextScribeEngine::new(app_config.engine, Arc::new(lexicon))?;
    if let Some(seed) = request.seed {
        engine = engine.with_seed(seed);
    }

    let text = normalize_punctuation(&request.text);
    let input_stats = text_stats(&text);
    info!(
        words = input_stats.word_count,
        sentences = input_stats.sentence_count,
        use_passive = request.use_passive,
        use_synonyms = request.use_synonyms,
        "transform.start"
    );

    let transformed = engine.transform(&text, request.use_passive, request.use_synonyms)?;
    let output_stats = text_stats(&transformed);

    let response = TransformResponse {
        request_id: Uuid::new_v4().to_string(),
        transformed_text: transformed,
        input_stats,
        output_stats,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if let Some(out_path) = parse_arg_value(&args, "--out") {
        let json = serde_json::to_string_pretty(&response)?;
        std::fs::write(&out_path, json).with_context(|| format!("write failed: {}", out_path))?;
        info!("Response written to {}", out_path);
    }

    if has_flag(&args, "--json") {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Transformed Text:\n");
        println!("{}", response.transformed_text);
        println!();
        println!(
            "Input Word Count: {} | Sentence Count: {} | Output Word Count: {} | Sentence Count: {}",
            response.input_stats.word_count,
            response.input_stats.sentence_count,
            response.output_stats.word_count,
            response.output_stats.sentence_count
        );
    }

    Ok(())
}
