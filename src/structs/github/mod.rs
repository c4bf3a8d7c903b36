pub mod github_comment;
pub mod github_issue;
pub mod github_label;
pub mod github_milestone;
pub mod github_rate_limit;
pub mod github_user;
