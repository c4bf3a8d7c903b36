use crate::config::constants::{DEFAULT_MAX_ISSUES, MAX_RECENT_COMMENTS};
use crate::enums::issue_sort::IssueSort;
use crate::enums::sort_direction::SortDirection;
use crate::enums::state_filter::StateFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub state: StateFilter,
    pub labels: Vec<String>,
    pub max_count: usize,
    pub sort: IssueSort,
    pub direction: SortDirection,
    /// Newest comments attached to each issue.
    pub max_comments: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            state: StateFilter::Open,
            labels: vec![],
            max_count: DEFAULT_MAX_ISSUES,
            sort: IssueSort::Created,
            direction: SortDirection::Desc,
            max_comments: MAX_RECENT_COMMENTS,
        }
    }
}
