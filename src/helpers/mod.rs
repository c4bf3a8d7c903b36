pub mod cache_key;
pub mod config_helper;
pub mod prompt_generator;
pub mod repo_name;
pub mod text;
