use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::provider_kind::ProviderKind;

/// A text-generation backend. The concrete backend is fixed when the value is
/// built; callers never branch on which one they hold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends one request and returns the primary text of the reply. Backend
    /// failures are returned as-is, without retries.
    async fn complete(&self, system_prompt: &str, user_prompt: &str, max_tokens: u32) -> Result<String, AiProviderError>;

    /// Cheap round trip confirming credentials and model. Never errors.
    async fn ping(&self) -> bool;

    fn kind(&self) -> ProviderKind;

    fn model(&self) -> String;
}
