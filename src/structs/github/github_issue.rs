use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use crate::enums::issue_state::IssueState;
use crate::structs::github::github_label::GithubLabel;
use crate::structs::github::github_milestone::GithubMilestone;
use crate::structs::github::github_user::GithubUser;
use crate::structs::issue::Issue;

/// Issue as returned by the REST issues endpoint. Pull requests share the
/// endpoint and carry a `pull_request` object.
#[derive(Deserialize, Debug, Clone)]
pub struct GithubIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<GithubUser>,
    #[serde(default)]
    pub labels: Vec<GithubLabel>,
    #[serde(default)]
    pub assignees: Vec<GithubUser>,
    #[serde(default)]
    pub milestone: Option<GithubMilestone>,
    #[serde(default)]
    pub comments: u32,
    pub html_url: String,
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl GithubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn into_issue(self) -> Issue {
        Issue {
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author: self.user.map_or_else(|| "unknown".to_string(), |user| user.login),
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            assignees: self.assignees.into_iter().map(|user| user.login).collect(),
            milestone: self.milestone.map(|milestone| milestone.title),
            comments_count: self.comments,
            recent_comments: vec![],
            url: self.html_url,
        }
    }
}
