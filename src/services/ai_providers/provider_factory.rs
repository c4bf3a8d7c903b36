use std::sync::Arc;
use crate::enums::provider_kind::ProviderKind;
use crate::errors::{SmartIssuesError, SmartIssuesResult};
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::ai_providers::openai::OpenAiCompatibleProvider;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::ai_provider::AiProvider;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Builds the configured backend. The choice is made once here.
    pub fn create(config: &AiConfig) -> SmartIssuesResult<Arc<dyn AiProvider>> {
        let api_key = config.active_api_key().to_string();
        if api_key.is_empty() {
            return Err(SmartIssuesError::config_error(
                &format!("{} is required", config.active_api_key_env()),
                Some("ai"),
                Some(&format!("export {}=...", config.active_api_key_env())),
            ));
        }

        let model = config.effective_model();
        log::debug!("🤖 Using {} with model {}", config.provider.display_name(), model);

        let provider: Arc<dyn AiProvider> = match config.provider {
            ProviderKind::Anthropic => {
                let provider = AnthropicProvider::new(api_key, model);
                Arc::new(match &config.base_url {
                    Some(url) => provider.with_base_url(url.clone()),
                    None => provider,
                })
            }
            ProviderKind::OpenRouter => {
                let provider = OpenAiCompatibleProvider::new(api_key, model);
                Arc::new(match &config.base_url {
                    Some(url) => provider.with_base_url(url.clone()),
                    None => provider,
                })
            }
        };

        Ok(provider)
    }
}
