use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Editor session configuration
///
/// ```yaml
/// hysteresis: true
/// select_moved_block: true
/// log_filter: "blockdrop=debug,info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Run the drag hysteresis gate before each move
    pub hysteresis: bool,
    /// Select the dragged block after it moved
    pub select_moved_block: bool,
    /// Default tracing filter (RUST_LOG wins when set)
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hysteresis: true,
            select_moved_block: true,
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e)
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config YAML {}: {}", path.display(), e)
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
