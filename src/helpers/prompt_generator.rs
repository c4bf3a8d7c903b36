use chrono::{DateTime, Utc};
use crate::helpers::text::truncate_text;
use crate::prompts::issue_analysis_prompt::ISSUE_ANALYSIS_RESPONSE_FORMAT;
use crate::structs::batch_analysis_summary::BatchAnalysisSummary;
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::structs::issue::Issue;

fn join_or(items: impl IntoIterator<Item = impl AsRef<str>>, empty: &str) -> String {
    let joined = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() { empty.to_string() } else { joined }
}

pub fn generate_issue_prompt(issue: &Issue, limits: &AnalysisConfig, now: DateTime<Utc>) -> String {
    let body = if issue.body.trim().is_empty() {
        "No description provided".to_string()
    } else {
        truncate_text(&issue.body, limits.max_body_chars)
    };

    let mut prompt = String::from("Analyze the following GitHub issue and provide a structured analysis.\n\n");
    prompt.push_str(&format!("Issue #{}: {}\n\n", issue.number, issue.title));
    prompt.push_str(&format!("Content:\n{}\n\n", body));
    prompt.push_str(&format!("Current Labels: {}\n", join_or(&issue.labels, "None")));
    prompt.push_str(&format!("Author: {}\n", issue.author));
    prompt.push_str(&format!("Created: {}\n", issue.created_at.format("%Y-%m-%d")));
    prompt.push_str(&format!("Age: {} days\n", issue.age_days_at(now)));
    prompt.push_str(&format!("Comments: {}\n", issue.comments_count));
    prompt.push_str(&format!("Assignees: {}\n", join_or(&issue.assignees, "None")));
    prompt.push_str(&format!("Milestone: {}\n", issue.milestone.as_deref().unwrap_or("None")));

    let skip = issue.recent_comments.len().saturating_sub(limits.max_comments);
    let recent: Vec<_> = issue.recent_comments.iter().skip(skip).collect();
    if !recent.is_empty() {
        prompt.push_str("\nRecent Comments:\n");
        for comment in recent {
            prompt.push_str(&format!(
                "- {} ({}): {}\n",
                comment.author,
                comment.created_at.format("%Y-%m-%d"),
                truncate_text(&comment.body, limits.max_comment_chars)
            ));
        }
    }

    prompt.push('\n');
    prompt.push_str(ISSUE_ANALYSIS_RESPONSE_FORMAT);
    prompt
}

pub fn generate_recommendation_prompt(summary: &BatchAnalysisSummary) -> String {
    format!(
        "Batch of {} analyzed issues.\n\
         By category: {}\n\
         By priority: {}\n\
         By effort: {}\n\
         High priority issues (critical/high): {}\n\
         Stale issues (no update in over 30 days): {}\n\
         Quick wins (high priority, small effort): {}\n\n\
         Write a short strategic recommendation for the maintainers.",
        summary.total,
        BatchAnalysisSummary::histogram_line(&summary.by_category),
        BatchAnalysisSummary::histogram_line(&summary.by_priority),
        BatchAnalysisSummary::histogram_line(&summary.by_effort),
        summary.high_priority_issues.len(),
        summary.stale_issues.len(),
        summary.quick_wins.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use chrono::Duration;
    use crate::enums::issue_state::IssueState;
    use crate::structs::issue_comment::IssueComment;

    fn issue_with_comments(count: usize, now: DateTime<Utc>) -> Issue {
        Issue {
            number: 9,
            title: "Panic when config missing".to_string(),
            body: "x".repeat(10_000),
            state: IssueState::Open,
            created_at: now - Duration::days(12),
            updated_at: now,
            author: "reporter".to_string(),
            labels: BTreeSet::from(["bug".to_string(), "cli".to_string()]),
            assignees: vec!["maintainer".to_string()],
            milestone: Some("v1.0".to_string()),
            comments_count: count as u32,
            recent_comments: (0..count)
                .map(|i| IssueComment {
                    author: format!("user{}", i),
                    body: format!("comment body {}", i),
                    created_at: now - Duration::hours((count - i) as i64),
                })
                .collect(),
            url: "https://github.com/o/r/issues/9".to_string(),
        }
    }

    #[test]
    fn test_issue_prompt_contents() {
        let now = Utc::now();
        let prompt = generate_issue_prompt(&issue_with_comments(2, now), &AnalysisConfig::default(), now);

        assert!(prompt.contains("Issue #9: Panic when config missing"));
        assert!(prompt.contains("Current Labels: bug, cli"));
        assert!(prompt.contains("Age: 12 days"));
        assert!(prompt.contains("Assignees: maintainer"));
        assert!(prompt.contains("Milestone: v1.0"));
        assert!(prompt.contains("user1"));
        assert!(prompt.contains("\"estimated_effort\""));
        assert!(!prompt.contains(&"x".repeat(4001)));
    }

    #[test]
    fn test_comment_budget_keeps_most_recent() {
        let now = Utc::now();
        let limits = AnalysisConfig { max_comments: 2, ..AnalysisConfig::default() };
        let prompt = generate_issue_prompt(&issue_with_comments(4, now), &limits, now);

        assert!(!prompt.contains("user0"));
        assert!(!prompt.contains("user1"));
        assert!(prompt.contains("user2"));
        assert!(prompt.contains("user3"));
    }

    #[test]
    fn test_empty_body_placeholder() {
        let now = Utc::now();
        let mut issue = issue_with_comments(0, now);
        issue.body = "   ".to_string();
        issue.labels.clear();
        let prompt = generate_issue_prompt(&issue, &AnalysisConfig::default(), now);

        assert!(prompt.contains("No description provided"));
        assert!(prompt.contains("Current Labels: None"));
        assert!(!prompt.contains("Recent Comments"));
    }
}
