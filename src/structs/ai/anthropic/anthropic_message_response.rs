use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct AnthropicContentBlock {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AnthropicMessageResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl AnthropicMessageResponse {
    /// Text of the first content block that carries any.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|block| block.content_type == "text")
            .find_map(|block| block.text.as_deref())
    }
}
