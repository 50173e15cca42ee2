use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Data file not found: {path}")]
    DataFile { path: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ForecastResult<T> = Result<T, ForecastError>;
