pub mod ai_providers;
pub mod cache_manager;
pub mod github_client;
pub mod issue_processor;
pub mod report_formatter;
pub mod response_parser;
