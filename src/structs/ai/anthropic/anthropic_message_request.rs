use serde::Serialize;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;

#[derive(Serialize, Debug)]
pub struct AnthropicMessageRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
}
