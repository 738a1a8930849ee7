use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::review::Aspect;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    #[default]
    Lexicon,
    Model,
}

/// Everything the analyzer needs, loaded once at start-up and never mutated.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub scorer: ScorerKind,
    pub splitter: SplitterConfig,
    pub aspects: Vec<AspectKeywords>,
    pub lexicon: LexiconConfig,
    pub sarcasm: SarcasmConfig,
    pub model: ModelConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SplitterConfig {
    pub markers: Vec<String>,
    pub separators: String,
    pub sentence_boundaries: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AspectKeywords {
    pub aspect: Aspect,
    pub keywords: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LexiconConfig {
    pub negation_window: usize,
    pub threshold: f32,
    pub normalization_alpha: f32,
    /// Added to (or overriding) the built-in valence table.
    pub valence: BTreeMap<String, f32>,
    pub negators: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SarcasmConfig {
    pub praise_words: Vec<String>,
    pub negative_outcomes: Vec<String>,
    /// Most words allowed between a praise word and a negative outcome.
    pub window: usize,
    pub min_exclamations: usize,
    /// None follows the scorer: on for the model scorer, off for the lexicon.
    pub entailment: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    pub sentiment_model: String,
    pub nli_model: String,
    pub token_env: String,
    pub timeout_secs: u64,
    pub contradiction_threshold: f32,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scorer: ScorerKind::default(),
            splitter: SplitterConfig::default(),
            aspects: default_aspects(),
            lexicon: LexiconConfig::default(),
            sarcasm: SarcasmConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            markers: strings(&[
                "but", "however", "although", "yet", "though", "even though", "nevertheless", "nonetheless",
            ]),
            separators: ",;".to_string(),
            sentence_boundaries: true,
        }
    }
}

fn default_aspects() -> Vec<AspectKeywords> {
    let table: [(Aspect, &[&str]); 6] = [
        (Aspect::Camera, &["camera", "photo", "image", "picture", "lens"]),
        (Aspect::Battery, &["battery", "charge", "charging", "power", "life"]),
        (Aspect::Performance, &["performance", "speed", "lag", "slow", "fast"]),
        (Aspect::Display, &["display", "screen", "brightness", "resolution"]),
        (Aspect::Software, &["software", "update", "app", "ui", "os"]),
        (Aspect::Price, &["price", "cost", "value", "expensive", "cheap"]),
    ];
    table
        .iter()
        .map(|(aspect, keywords)| AspectKeywords { aspect: *aspect, keywords: strings(keywords) })
        .collect()
}

impl Default for LexiconConfig {
    fn default() -> Self {
        LexiconConfig {
            negation_window: 3,
            threshold: 0.05,
            normalization_alpha: 15.0,
            valence: BTreeMap::new(),
            negators: Vec::new(),
        }
    }
}

impl Default for SarcasmConfig {
    fn default() -> Self {
        SarcasmConfig {
            praise_words: strings(&[
                "great", "amazing", "awesome", "fantastic", "love", "perfect", "wonderful", "excellent",
            ]),
            negative_outcomes: strings(&[
                "breaks", "crashes", "ruins", "ruined", "fails", "bugs", "freezes", "lags", "drains",
                "overheats", "worst",
            ]),
            window: 6,
            min_exclamations: 2,
            entailment: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            sentiment_model: "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            nli_model: "roberta-large-mnli".to_string(),
            token_env: "HF_API_TOKEN".to_string(),
            timeout_secs: 30,
            contradiction_threshold: 0.6,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str::<Config>(contents)
    }

    /// Whether the sarcasm detector should consult the entailment model.
    pub fn entailment_enabled(&self) -> bool {
        self.sarcasm.entailment.unwrap_or(self.scorer == ScorerKind::Model)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.splitter.markers.iter().all(|m| m.trim().is_empty())
            && self.splitter.separators.is_empty()
            && !self.splitter.sentence_boundaries
        {
            return Err(ConfigError::Invalid(
                "splitter needs a marker, a separator or sentence boundaries".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.lexicon.threshold) {
            return Err(ConfigError::Invalid(format!(
                "lexicon.threshold must be in [0, 1), got {}",
                self.lexicon.threshold
            )));
        }
        if self.lexicon.normalization_alpha <= 0.0 {
            return Err(ConfigError::Invalid("lexicon.normalization_alpha must be positive".to_string()));
        }
        if self.sarcasm.window == 0 {
            return Err(ConfigError::Invalid("sarcasm.window must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.model.contradiction_threshold) {
            return Err(ConfigError::Invalid(format!(
                "model.contradiction_threshold must be in [0, 1], got {}",
                self.model.contradiction_threshold
            )));
        }
        for entry in &self.aspects {
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("empty keyword for aspect '{}'", entry.aspect)));
            }
        }
        Ok(())
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|source| ConfigError::Read { path: file_path.to_path_buf(), source })?;
    let config = Config::from_toml_str(&contents)
        .map_err(|source| ConfigError::Parse { path: file_path.to_path_buf(), source })?;
    config.validate()?;
    Ok(config)
}

/// Like `load_config_from_file`, but a missing file means built-in defaults.
pub fn load_config_or_default(file_path: &Path) -> Result<Config, ConfigError> {
    if !file_path.exists() {
        tracing::info!("no config at {}, using built-in tables", file_path.display());
        return Ok(Config::default());
    }
    load_config_from_file(file_path)
}
