pub mod ai;
pub mod analysis_result;
pub mod analyze_request;
pub mod batch_analysis_summary;
pub mod cache_entry;
pub mod cache_stats;
pub mod cached_analysis;
pub mod cli;
pub mod config;
pub mod fetch_options;
pub mod github;
pub mod issue;
pub mod issue_comment;
pub mod rate_limit_info;
pub mod repository_info;
