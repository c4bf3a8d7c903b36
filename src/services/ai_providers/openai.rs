use async_trait::async_trait;
use reqwest::Client;
use crate::config::constants::{OPENROUTER_API_URL, PING_MAX_TOKENS};
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::provider_kind::ProviderKind;
use crate::structs::ai::openai::openai_message::OpenAIMessage;
use crate::structs::ai::openai::openai_request::OpenAIRequest;
use crate::structs::ai::openai::openai_response::OpenAIResponse;
use crate::traits::ai_provider::AiProvider;

/// Chat-completions compatible proxy (OpenRouter by default).
#[derive(Clone)]
pub struct OpenAiCompatibleProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    kind: ProviderKind,
}

impl OpenAiCompatibleProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            base_url: OPENROUTER_API_URL.to_string(),
            client: Client::new(),
            model,
            kind: ProviderKind::OpenRouter,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn get_openai_messages(&self, system_prompt: &str, user_prompt: &str) -> Vec<OpenAIMessage> {
        let mut messages = Vec::new();

        if !system_prompt.is_empty() {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(system_prompt.to_string()),
            });
        }

        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: Some(user_prompt.to_string()),
        });

        messages
    }

    fn get_request(&self, system_prompt: &str, user_prompt: &str, max_tokens: u32) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: self.get_openai_messages(system_prompt, user_prompt),
            max_tokens,
        }
    }

    async fn make_request(&self, request_body: &OpenAIRequest) -> Result<OpenAIResponse, AiProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        log::debug!("📦 Request model: {} ({} max tokens)", request_body.model, request_body.max_tokens);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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

            log::debug!("❌ {} API Error Response: {}", self.kind.display_name(), error_text);
            return Err(AiProviderError::from_status(status.as_u16(), error_text));
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatibleProvider {
    async fn complete(&self, system_prompt: &str, user_prompt: &str, max_tokens: u32) -> Result<String, AiProviderError> {
        let request_body = self.get_request(system_prompt, user_prompt, max_tokens);
        let response = self.make_request(&request_body).await?;

        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| AiProviderError::SerializationError("No content in response".to_string()))
    }

    async fn ping(&self) -> bool {
        let request_body = self.get_request("", "Hello", PING_MAX_TOKENS);
        match self.make_request(&request_body).await {
            Ok(response) => !response.choices.is_empty(),
            Err(e) => {
                log::debug!("{} ping failed: {}", self.kind.display_name(), e);
                false
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_leads_messages() {
        let provider = OpenAiCompatibleProvider::new("key".to_string(), "m".to_string());
        let messages = provider.get_openai_messages("be terse", "hi");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content.as_deref(), Some("hi"));
        assert_eq!(provider.get_openai_messages("", "hi").len(), 1);
    }
}
