use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Filter error: {0}")]
    Filter(String),

    #[error("Config format error: {0}")]
    ConfigFormat(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
