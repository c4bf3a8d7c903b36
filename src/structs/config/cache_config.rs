use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "ConfigHelper::default_cache_enabled")]
    pub enabled: bool,

    #[serde(default = "ConfigHelper::default_cache_dir")]
    pub dir: PathBuf,

    #[serde(default = "ConfigHelper::default_cache_ttl")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: ConfigHelper::default_cache_enabled(),
            dir: ConfigHelper::default_cache_dir(),
            ttl_seconds: ConfigHelper::default_cache_ttl(),
        }
    }
}
