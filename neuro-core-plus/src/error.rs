use neuro_core::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlusError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config `{field}`: {reason}")]
    Config { field: String, reason: String },
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("not supported: {0}")]
    NotSupported(&'static str),
}

impl PlusError {
    pub(crate) fn config(field: &str, reason: impl Into<String>) -> Self {
        PlusError::Config { field: field.to_string(), reason: reason.into() }
    }
}

pub type PlusResult<T, E = PlusError> = core::result::Result<T, E>;
