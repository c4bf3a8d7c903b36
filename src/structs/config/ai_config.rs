use serde::{Deserialize, Serialize};
use crate::config::constants::{DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENROUTER_MODEL};
use crate::enums::provider_kind::ProviderKind;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub anthropic_api_key: String,

    #[serde(default)]
    pub openrouter_api_key: String,

    /// Overrides the provider's API root.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "ConfigHelper::default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    #[serde(default = "ConfigHelper::default_recommendation_max_tokens")]
    pub recommendation_max_tokens: u32,
}

impl AiConfig {
    pub fn active_api_key(&self) -> &str {
        match self.provider {
            ProviderKind::Anthropic => &self.anthropic_api_key,
            ProviderKind::OpenRouter => &self.openrouter_api_key,
        }
    }

    pub fn active_api_key_env(&self) -> &'static str {
        match self.provider {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn effective_model(&self) -> String {
        match (&self.model, self.provider) {
            (Some(model), _) if !model.trim().is_empty() => model.clone(),
            (_, ProviderKind::Anthropic) => DEFAULT_ANTHROPIC_MODEL.to_string(),
            (_, ProviderKind::OpenRouter) => DEFAULT_OPENROUTER_MODEL.to_string(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            anthropic_api_key: String::new(),
            openrouter_api_key: String::new(),
            base_url: None,
            analysis_max_tokens: ConfigHelper::default_analysis_max_tokens(),
            recommendation_max_tokens: ConfigHelper::default_recommendation_max_tokens(),
        }
    }
}
