use thiserror::Error;

/// A free-text registry date that could not be interpreted as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable date: {value:?}")]
pub struct DateParseError {
    pub value: String,
}

impl DateParseError {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Debug, Error)]
pub enum TrialyxError {
    #[error("Normalisation failed at row {row}, column '{column}': {source}")]
    Normalise {
        row: usize,
        column: &'static str,
        #[source]
        source: DateParseError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TrialyxError>;
