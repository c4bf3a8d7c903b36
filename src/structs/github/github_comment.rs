use chrono::{DateTime, Utc};
use serde::Deserialize;
use crate::structs::github::github_user::GithubUser;
use crate::structs::issue_comment::IssueComment;

#[derive(Deserialize, Debug, Clone)]
pub struct GithubComment {
    #[serde(default)]
    pub user: Option<GithubUser>,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<GithubComment> for IssueComment {
    fn from(comment: GithubComment) -> Self {
        Self {
            author: comment.user.map_or_else(|| "unknown".to_string(), |user| user.login),
            body: comment.body.unwrap_or_default(),
            created_at: comment.created_at,
        }
    }
}
