use std::collections::BTreeSet;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::config::constants::STALE_AFTER_DAYS;
use crate::enums::issue_state::IssueState;
use crate::structs::issue_comment::IssueComment;

/// Snapshot of a tracked work item as fetched from the issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub recent_comments: Vec<IssueComment>,
    pub url: String,
}

impl Issue {
    /// Whole days between creation and `now`, never negative.
    pub fn age_days_at(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.created_at).num_days().max(0)
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.updated_at) > Duration::days(STALE_AFTER_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_updated(days_ago: i64, now: DateTime<Utc>) -> Issue {
        Issue {
            number: 1,
            title: "Crash on start".to_string(),
            body: String::new(),
            state: IssueState::Open,
            created_at: now - Duration::days(90),
            updated_at: now - Duration::days(days_ago),
            author: "octocat".to_string(),
            labels: BTreeSet::new(),
            assignees: vec![],
            milestone: None,
            comments_count: 0,
            recent_comments: vec![],
            url: "https://github.com/o/r/issues/1".to_string(),
        }
    }

    #[test]
    fn test_staleness_boundary() {
        let now = Utc::now();
        assert!(issue_updated(31, now).is_stale_at(now));
        assert!(!issue_updated(29, now).is_stale_at(now));
        assert!(!issue_updated(30, now).is_stale_at(now));
    }

    #[test]
    fn test_age_is_floored() {
        let now = Utc::now();
        let mut issue = issue_updated(0, now);
        issue.created_at = now - Duration::hours(47);
        assert_eq!(issue.age_days_at(now), 1);

        issue.created_at = now + Duration::hours(3);
        assert_eq!(issue.age_days_at(now), 0);
    }

    #[test]
    fn test_labels_are_unique() {
        let json = r#"{
            "number": 7, "title": "t", "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z", "author": "a",
            "labels": ["bug", "bug", "ui"], "url": "u"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.labels.len(), 2);
        assert_eq!(issue.state, IssueState::Open);
    }
}
