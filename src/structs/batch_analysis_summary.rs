use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::enums::category::Category;
use crate::enums::effort::Effort;
use crate::enums::priority::Priority;

/// Aggregate view over one analyzed batch. Always present; an empty batch
/// yields the `Default` value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BatchAnalysisSummary {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_effort: BTreeMap<Effort, usize>,
    pub high_priority_issues: Vec<u64>,
    pub stale_issues: Vec<u64>,
    pub quick_wins: Vec<u64>,
    pub recommendation: String,
}

impl BatchAnalysisSummary {
    pub fn with_recommendation(mut self, recommendation: String) -> Self {
        self.recommendation = recommendation;
        self
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn priority_count(&self, priority: Priority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }

    /// Renders a histogram as `key: count` pairs, for prompts and console output.
    pub fn histogram_line<K: std::fmt::Display>(histogram: &BTreeMap<K, usize>) -> String {
        if histogram.is_empty() {
            return "none".to_string();
        }

        histogram
            .iter()
            .map(|(key, count)| format!("{}: {}", key, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
