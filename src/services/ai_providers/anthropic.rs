use async_trait::async_trait;
use reqwest::Client;
use crate::config::constants::{ANTHROPIC_API_URL, ANTHROPIC_API_VERSION, PING_MAX_TOKENS};
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::provider_kind::ProviderKind;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;
use crate::structs::ai::anthropic::anthropic_message_request::AnthropicMessageRequest;
use crate::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use crate::traits::ai_provider::AiProvider;

/// Native Messages API.
#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            base_url: ANTHROPIC_API_URL.to_string(),
            client: Client::new(),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn get_request(&self, system_prompt: &str, user_prompt: &str, max_tokens: u32) -> AnthropicMessageRequest {
        AnthropicMessageRequest {
            model: self.model.clone(),
            max_tokens,
            system: if system_prompt.is_empty() { None } else { Some(system_prompt.to_string()) },
            messages: vec![AnthropicMessage {
                role: String::from("user"),
                content: user_prompt.to_string(),
            }],
        }
    }

    async fn make_request(&self, request_body: &AnthropicMessageRequest) -> Result<AnthropicMessageResponse, AiProviderError> {
        let url = format!("{}/messages", self.base_url);
        log::debug!("📦 Request model: {} ({} max tokens)", request_body.model, request_body.max_tokens);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::debug!("❌ Anthropic API Error Response: {}", error_text);
            return Err(AiProviderError::from_status(status.as_u16(), error_text));
        }

        response
            .json::<AnthropicMessageResponse>()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn complete(&self, system_prompt: &str, user_prompt: &str, max_tokens: u32) -> Result<String, AiProviderError> {
        let request_body = self.get_request(system_prompt, user_prompt, max_tokens);
        let response = self.make_request(&request_body).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| AiProviderError::SerializationError("No text content in response".to_string()))
    }

    async fn ping(&self) -> bool {
        let request_body = self.get_request("", "Hello", PING_MAX_TOKENS);
        match self.make_request(&request_body).await {
            Ok(response) => !response.content.is_empty(),
            Err(e) => {
                log::debug!("Anthropic ping failed: {}", e);
                false
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}
