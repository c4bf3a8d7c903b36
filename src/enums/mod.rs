pub mod ai_provider_error;
pub mod category;
pub mod commands;
pub mod effort;
pub mod issue_sort;
pub mod issue_state;
pub mod output_format;
pub mod priority;
pub mod provider_kind;
pub mod sort_direction;
pub mod state_filter;
