use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Endpoint {0} is not active")]
    EndpointInactive(String),

    #[error("Storage error for '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn storage(key: &str, source: std::io::Error) -> Self {
        AppError::Storage {
            key: key.to_string(),
            source,
        }
    }
}
