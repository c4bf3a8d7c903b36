use serde::Serialize;
use crate::structs::ai::openai::openai_message::OpenAIMessage;

#[derive(Serialize, Debug)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub max_tokens: u32,
}
