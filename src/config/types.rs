use crate::state::types::EndpointDescriptor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the app serving `/api/default-endpoint`.
    pub app_url: String,
    /// Where persisted playground state lives. Defaults to the config directory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:3000".to_string(),
            storage_dir: None,
            log_level: default_log_level(),
            endpoints: Vec::new(),
        }
    }
}
