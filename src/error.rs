use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}. Please ensure it exists", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("invalid clause marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure of an external classifier or entailment capability. These never
/// abort an analysis; the pipeline logs them and degrades to Neutral.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("capability unavailable: {0}")]
    Unavailable(String),
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("inference endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected model response: {0}")]
    Response(String),
    #[error("nothing to classify")]
    EmptyInput,
}
