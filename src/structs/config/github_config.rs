use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GithubConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default = "ConfigHelper::default_github_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub default_repo: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: ConfigHelper::default_github_api_url(),
            default_repo: None,
        }
    }
}
