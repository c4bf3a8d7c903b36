use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default = "ConfigHelper::default_max_issues")]
    pub max_issues: usize,

    #[serde(default = "ConfigHelper::default_max_body_chars")]
    pub max_body_chars: usize,

    #[serde(default = "ConfigHelper::default_max_comments")]
    pub max_comments: usize,

    #[serde(default = "ConfigHelper::default_max_comment_chars")]
    pub max_comment_chars: usize,

    /// Skip issues whose provider call fails instead of aborting the batch.
    #[serde(default)]
    pub skip_failed: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_issues: ConfigHelper::default_max_issues(),
            max_body_chars: ConfigHelper::default_max_body_chars(),
            max_comments: ConfigHelper::default_max_comments(),
            max_comment_chars: ConfigHelper::default_max_comment_chars(),
            skip_failed: false,
        }
    }
}
