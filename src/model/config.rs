use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration, usually read from a `packlist.toml`.
/// Every section is optional; missing values fall back to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Reserved key the snapshot is stored under
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Reserved query parameter carrying a share token
    #[serde(default = "default_share_param")]
    pub param: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        ShareConfig {
            param: default_share_param(),
        }
    }
}

/// Placeholder names substituted when an edit leaves a name empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_untitled_category")]
    pub untitled_category: String,
    #[serde(default = "default_untitled_item")]
    pub untitled_item: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            untitled_category: default_untitled_category(),
            untitled_item: default_untitled_item(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Recovery log location. Relative paths resolve against the config
    /// file's directory. Absent = no recovery log.
    #[serde(default)]
    pub log: Option<PathBuf>,
}

fn default_storage_key() -> String {
    "campingChecklistData".to_string()
}

fn default_share_param() -> String {
    "data".to_string()
}

fn default_untitled_category() -> String {
    "Untitled Category".to_string()
}

fn default_untitled_item() -> String {
    "Untitled Item".to_string()
}
