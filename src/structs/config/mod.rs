pub mod ai_config;
pub mod analysis_config;
pub mod cache_config;
pub mod config;
pub mod github_config;
pub mod output_config;
