use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::enums::category::Category;
use crate::enums::effort::Effort;
use crate::enums::priority::Priority;
use crate::structs::issue::Issue;

/// Structured analysis of a single issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub issue_number: u64,
    pub title: String,
    pub url: String,
    pub category: Category,
    pub priority: Priority,
    pub summary: String,
    #[serde(default)]
    pub suggested_labels: Vec<String>,
    pub estimated_effort: Effort,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub blockers: Vec<String>,
}

impl AnalysisResult {
    /// Builds a result from a decoded reply, defaulting anything missing and
    /// coercing enumeration fields onto their closed vocabularies.
    pub fn from_decoded(issue: &Issue, data: &Map<String, Value>) -> Self {
        let category_label = string_field(data, "category").unwrap_or_else(|| "other".to_string());
        let priority_label = string_field(data, "priority").unwrap_or_else(|| "medium".to_string());
        let effort_label = string_field(data, "estimated_effort").unwrap_or_else(|| "medium".to_string());

        let category = Category::from_label(&category_label);
        if category == Category::Other && !category_label.trim().eq_ignore_ascii_case("other") {
            log::warn!("⚠️ Issue #{}: unknown category '{}', using 'other'", issue.number, category_label);
        }

        let priority = Priority::from_label(&priority_label);
        if priority == Priority::Medium && !priority_label.trim().eq_ignore_ascii_case("medium") {
            log::warn!("⚠️ Issue #{}: unknown priority '{}', using 'medium'", issue.number, priority_label);
        }

        let estimated_effort = Effort::from_label(&effort_label);
        if estimated_effort == Effort::Medium && !effort_label.trim().eq_ignore_ascii_case("medium") {
            log::warn!("⚠️ Issue #{}: unknown effort '{}', using 'medium'", issue.number, effort_label);
        }

        Self {
            issue_number: issue.number,
            title: issue.title.clone(),
            url: issue.url.clone(),
            category,
            priority,
            summary: string_field(data, "summary").unwrap_or_default(),
            suggested_labels: list_field(data, "suggested_labels"),
            estimated_effort,
            key_points: list_field(data, "key_points"),
            related_topics: list_field(data, "related_topics"),
            action_items: list_field(data, "action_items"),
            blockers: list_field(data, "blockers"),
        }
    }

    pub fn is_quick_win(&self) -> bool {
        self.priority.is_high() && self.estimated_effort.is_low()
    }
}

fn string_field(data: &Map<String, Value>, field: &str) -> Option<String> {
    data.get(field).and_then(Value::as_str).map(str::to_string)
}

fn list_field(data: &Map<String, Value>, field: &str) -> Vec<String> {
    data.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
