use std::fmt;
use serde::{Deserialize, Serialize};

/// Lifecycle state reported by the issue tracker.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    #[serde(other)]
    Other,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => f.write_str("open"),
            IssueState::Closed => f.write_str("closed"),
            IssueState::Other => f.write_str("other"),
        }
    }
}
