use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::config::constants::{
    ANALYSIS_MAX_TOKENS, EMPTY_BATCH_RECOMMENDATION, RECOMMENDATION_MAX_TOKENS, RECOMMENDATION_UNAVAILABLE,
};
use crate::enums::ai_provider_error::AiProviderError;
use crate::errors::{SmartIssuesError, SmartIssuesResult};
use crate::helpers::prompt_generator::{generate_issue_prompt, generate_recommendation_prompt};
use crate::prompts::issue_analysis_prompt::ISSUE_ANALYSIS_SYSTEM_PROMPT;
use crate::prompts::recommendation_prompt::RECOMMENDATION_SYSTEM_PROMPT;
use crate::services::response_parser::ResponseParser;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::batch_analysis_summary::BatchAnalysisSummary;
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::structs::issue::Issue;
use crate::traits::ai_provider::AiProvider;

/// Invoked after each issue finishes with `(finished_index_1_based, total)`.
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

/// Drives per-issue analysis and batch aggregation. Issues are processed one
/// at a time, in order.
pub struct IssueProcessor {
    provider: Arc<dyn AiProvider>,
    limits: AnalysisConfig,
    analysis_max_tokens: u32,
    recommendation_max_tokens: u32,
}

impl IssueProcessor {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            provider,
            limits: AnalysisConfig::default(),
            analysis_max_tokens: ANALYSIS_MAX_TOKENS,
            recommendation_max_tokens: RECOMMENDATION_MAX_TOKENS,
        }
    }

    pub fn with_limits(mut self, limits: AnalysisConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_token_budgets(mut self, analysis_max_tokens: u32, recommendation_max_tokens: u32) -> Self {
        self.analysis_max_tokens = analysis_max_tokens;
        self.recommendation_max_tokens = recommendation_max_tokens;
        self
    }

    pub async fn analyze_issue(&self, issue: &Issue) -> Result<AnalysisResult, AiProviderError> {
        let prompt = generate_issue_prompt(issue, &self.limits, Utc::now());

        let response_text = self
            .provider
            .complete(ISSUE_ANALYSIS_SYSTEM_PROMPT, &prompt, self.analysis_max_tokens)
            .await?;

        let data = ResponseParser::parse(&response_text);
        Ok(AnalysisResult::from_decoded(issue, &data))
    }

    /// Analyzes every issue in order. A provider failure aborts the batch
    /// unless `skip_failed` is set, in which case the issue is left out.
    pub async fn analyze_issues(
        &self,
        issues: &[Issue],
        mut on_progress: Option<ProgressCallback<'_>>,
    ) -> SmartIssuesResult<Vec<AnalysisResult>> {
        let total = issues.len();
        let mut results = Vec::with_capacity(total);

        for (index, issue) in issues.iter().enumerate() {
            match self.analyze_issue(issue).await {
                Ok(result) => results.push(result),
                Err(e) if self.limits.skip_failed => {
                    log::warn!("⚠️ Skipping issue #{}: {}", issue.number, e);
                }
                Err(e) => {
                    log::error!("❌ Analysis of issue #{} failed: {}", issue.number, e);
                    return Err(SmartIssuesError::analysis_error(
                        Some(issue.number),
                        "provider call",
                        &e.to_string(),
                    ));
                }
            }

            if let Some(callback) = on_progress.as_mut() {
                callback(index + 1, total);
            }
        }

        Ok(results)
    }

    /// Batch statistics without the recommendation. Staleness is judged on
    /// the source issues against `now`.
    pub fn aggregate(results: &[AnalysisResult], issues: &[Issue], now: DateTime<Utc>) -> BatchAnalysisSummary {
        let mut summary = BatchAnalysisSummary {
            total: results.len(),
            ..BatchAnalysisSummary::default()
        };

        for result in results {
            *summary.by_category.entry(result.category).or_insert(0) += 1;
            *summary.by_priority.entry(result.priority).or_insert(0) += 1;
            *summary.by_effort.entry(result.estimated_effort).or_insert(0) += 1;

            if result.priority.is_high() {
                summary.high_priority_issues.push(result.issue_number);
            }
            if result.is_quick_win() {
                summary.quick_wins.push(result.issue_number);
            }
        }

        summary.stale_issues = issues
            .iter()
            .filter(|issue| issue.is_stale_at(now))
            .map(|issue| issue.number)
            .collect();

        summary
    }

    /// Aggregates the batch and asks the provider for one free-text
    /// recommendation. A failed synthesis call degrades to a placeholder.
    pub async fn generate_batch_summary(&self, results: &[AnalysisResult], issues: &[Issue]) -> BatchAnalysisSummary {
        let summary = Self::aggregate(results, issues, Utc::now());

        if results.is_empty() {
            return summary.with_recommendation(EMPTY_BATCH_RECOMMENDATION.to_string());
        }

        let prompt = generate_recommendation_prompt(&summary);
        let recommendation = match self
            .provider
            .complete(RECOMMENDATION_SYSTEM_PROMPT, &prompt, self.recommendation_max_tokens)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                log::warn!("⚠️ Recommendation came back empty");
                RECOMMENDATION_UNAVAILABLE.to_string()
            }
            Err(e) => {
                log::warn!("⚠️ Could not generate recommendation: {}", e);
                RECOMMENDATION_UNAVAILABLE.to_string()
            }
        };

        summary.with_recommendation(recommendation)
    }

    pub async fn test_connection(&self) -> bool {
        self.provider.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use chrono::Duration;
    use mockall::predicate::*;
    use mockall::Sequence;
    use crate::enums::category::Category;
    use crate::enums::effort::Effort;
    use crate::enums::issue_state::IssueState;
    use crate::enums::priority::Priority;
    use crate::traits::ai_provider::MockAiProvider;

    fn issue(number: u64, updated_days_ago: i64) -> Issue {
        let now = Utc::now();
        Issue {
            number,
            title: format!("Issue {}", number),
            body: "Steps to reproduce...".to_string(),
            state: IssueState::Open,
            created_at: now - Duration::days(60),
            updated_at: now - Duration::days(updated_days_ago),
            author: "octocat".to_string(),
            labels: BTreeSet::new(),
            assignees: vec![],
            milestone: None,
            comments_count: 0,
            recent_comments: vec![],
            url: format!("https://github.com/o/r/issues/{}", number),
        }
    }

    fn result(number: u64, category: Category, priority: Priority, effort: Effort) -> AnalysisResult {
        AnalysisResult {
            issue_number: number,
            title: format!("Issue {}", number),
            url: String::new(),
            category,
            priority,
            summary: String::new(),
            suggested_labels: vec![],
            estimated_effort: effort,
            key_points: vec![],
            related_topics: vec![],
            action_items: vec![],
            blockers: vec![],
        }
    }

    #[tokio::test]
    async fn test_analyze_issue_decodes_reply() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_complete()
            .withf(|system, user, max_tokens| {
                system.contains("expert software development analyst") && user.contains("Issue #7") && *max_tokens == 1024
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(r#"{"category": "bug", "priority": "high", "summary": "Test",
                       "suggested_labels": ["bug"], "estimated_effort": "small",
                       "key_points": ["fix it"], "related_topics": ["testing"],
                       "action_items": ["add a regression test"], "blockers": []}"#
                    .to_string())
            });

        let processor = IssueProcessor::new(Arc::new(provider));
        let analysis = processor.analyze_issue(&issue(7, 1)).await.unwrap();

        assert_eq!(analysis.issue_number, 7);
        assert_eq!(analysis.category, Category::Bug);
        assert_eq!(analysis.priority, Priority::High);
        assert_eq!(analysis.estimated_effort, Effort::Small);
        assert_eq!(analysis.action_items, vec!["add a regression test".to_string()]);
        assert!(analysis.is_quick_win());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_complete()
            .returning(|_, _, _| Err(AiProviderError::AuthenticationError("invalid x-api-key".to_string())));

        let processor = IssueProcessor::new(Arc::new(provider));
        let error = processor.analyze_issue(&issue(1, 1)).await.unwrap_err();
        assert!(matches!(error, AiProviderError::AuthenticationError(_)));

        let batch_error = processor.analyze_issues(&[issue(1, 1)], None).await.unwrap_err();
        assert!(matches!(batch_error, SmartIssuesError::AnalysisError { issue_number: Some(1), .. }));
    }

    #[tokio::test]
    async fn test_skip_failed_keeps_going() {
        let mut provider = MockAiProvider::new();
        let mut seq = Sequence::new();
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(AiProviderError::NetworkError("connection reset".to_string())));
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(r#"{"category": "feature", "priority": "low"}"#.to_string()));

        let limits = AnalysisConfig { skip_failed: true, ..AnalysisConfig::default() };
        let processor = IssueProcessor::new(Arc::new(provider)).with_limits(limits);

        let mut calls = Vec::new();
        let mut record = |current: usize, total: usize| calls.push((current, total));
        let results = processor
            .analyze_issues(&[issue(1, 1), issue(2, 1)], Some(&mut record))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].issue_number, 2);
        assert_eq!(calls, vec![(1, 2), (2, 2)]);
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_complete()
            .returning(|_, _, _| Ok("I think this is a bug, probably.".to_string()));

        let processor = IssueProcessor::new(Arc::new(provider));
        let analysis = processor.analyze_issue(&issue(3, 1)).await.unwrap();

        assert_eq!(analysis.category, Category::Other);
        assert_eq!(analysis.priority, Priority::Medium);
        assert_eq!(analysis.summary, "Unable to parse AI response");
    }

    #[test]
    fn test_aggregate_histograms_and_subsets() {
        let results = vec![
            result(1, Category::Bug, Priority::High, Effort::Small),
            result(2, Category::Bug, Priority::Critical, Effort::Large),
            result(3, Category::Feature, Priority::Low, Effort::Trivial),
        ];
        let issues = vec![issue(1, 31), issue(2, 29), issue(3, 1)];

        let summary = IssueProcessor::aggregate(&results, &issues, Utc::now());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.category_count(Category::Bug), 2);
        assert_eq!(summary.category_count(Category::Feature), 1);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.priority_count(Priority::High), 1);
        assert_eq!(summary.priority_count(Priority::Critical), 1);
        assert_eq!(summary.priority_count(Priority::Low), 1);
        assert_eq!(summary.by_effort.get(&Effort::Small), Some(&1));
        assert_eq!(summary.high_priority_issues, vec![1, 2]);
        assert_eq!(summary.quick_wins, vec![1]);
        assert_eq!(summary.stale_issues, vec![1]);
        assert!(summary.recommendation.is_empty());
    }

    #[tokio::test]
    async fn test_recommendation_failure_uses_placeholder() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_complete()
            .with(eq(RECOMMENDATION_SYSTEM_PROMPT), always(), eq(512u32))
            .times(1)
            .returning(|_, _, _| Err(AiProviderError::RateLimited("quota".to_string())));

        let processor = IssueProcessor::new(Arc::new(provider));
        let results = vec![result(1, Category::Bug, Priority::High, Effort::Small)];
        let summary = processor.generate_batch_summary(&results, &[issue(1, 1)]).await;

        assert_eq!(summary.total, 1);
        assert_eq!(summary.recommendation, RECOMMENDATION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_recommendation_prompt_carries_counts() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_complete()
            .withf(|_, user, _| {
                user.contains("bug: 1") && user.contains("High priority issues (critical/high): 1")
                    && user.contains("Stale issues (no update in over 30 days): 1")
            })
            .times(1)
            .returning(|_, _, _| Ok("  Fix the crash first.  ".to_string()));

        let processor = IssueProcessor::new(Arc::new(provider));
        let results = vec![result(1, Category::Bug, Priority::Critical, Effort::Medium)];
        let summary = processor.generate_batch_summary(&results, &[issue(1, 40)]).await;

        assert_eq!(summary.recommendation, "Fix the crash first.");
    }

    #[tokio::test]
    async fn test_empty_batch_skips_synthesis() {
        let mut provider = MockAiProvider::new();
        provider.expect_complete().never();

        let processor = IssueProcessor::new(Arc::new(provider));
        let summary = processor.generate_batch_summary(&[], &[]).await;

        assert_eq!(summary.total, 0);
        assert_eq!(summary.recommendation, EMPTY_BATCH_RECOMMENDATION);
    }
}
