pub mod anthropic;
pub mod openai;
pub mod provider_factory;
