use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use chrono::{Local, Utc};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use crate::config::constants::TIMESTAMP_DISPLAY_FORMAT;
use crate::errors::{SmartIssuesError, SmartIssuesResult};
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::batch_analysis_summary::BatchAnalysisSummary;
use crate::structs::issue::Issue;

const REPORT_TEMPLATE: &str = "report";
const TODO_TEMPLATE: &str = "todo";

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);

    let sources = [
        (REPORT_TEMPLATE, include_str!("../templates/report.md.hbs")),
        (TODO_TEMPLATE, include_str!("../templates/todo.md.hbs")),
    ];
    for (name, source) in sources {
        if let Err(e) = registry.register_template_string(name, source) {
            log::error!("❌ Failed to register {} template: {}", name, e);
        }
    }

    registry
});

/// Renders analysis output. Results whose issue is not in the issue list
/// are left out of every format.
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_report(
        repo_name: &str,
        issues: &[Issue],
        results: &[AnalysisResult],
        summary: &BatchAnalysisSummary,
    ) -> SmartIssuesResult<String> {
        let now = Utc::now();
        let items: Vec<Value> = Self::pair(results, issues)
            .into_iter()
            .map(|(issue, result)| {
                json!({
                    "number": issue.number,
                    "title": issue.title,
                    "url": issue.url,
                    "author": issue.author,
                    "age_days": issue.age_days_at(now),
                    "comments_count": issue.comments_count,
                    "labels": join(&issue.labels),
                    "marker": result.priority.marker(),
                    "category": result.category.as_str(),
                    "priority": result.priority.as_str(),
                    "effort": result.estimated_effort.as_str(),
                    "summary": result.summary,
                    "suggested_labels": join(&result.suggested_labels),
                    "key_points": result.key_points,
                    "action_items": result.action_items,
                    "blockers": result.blockers,
                    "related_topics": join(&result.related_topics),
                })
            })
            .collect();

        let data = json!({
            "repo_name": repo_name,
            "generated_at": Self::generated_at(),
            "summary": summary,
            "by_priority": histogram_rows(&summary.by_priority),
            "by_category": histogram_rows(&summary.by_category),
            "by_effort": histogram_rows(&summary.by_effort),
            "high_priority_count": summary.high_priority_issues.len(),
            "high_priority": issue_refs(&summary.high_priority_issues),
            "quick_win_count": summary.quick_wins.len(),
            "quick_wins": issue_refs(&summary.quick_wins),
            "stale_count": summary.stale_issues.len(),
            "stale": issue_refs(&summary.stale_issues),
            "items": items,
        });

        Ok(TEMPLATES.render(REPORT_TEMPLATE, &data)?)
    }

    /// Markdown checklist ordered critical first. Equal priorities keep
    /// their original order.
    pub fn format_todo_list(results: &[AnalysisResult], issues: &[Issue]) -> SmartIssuesResult<String> {
        let mut pairs = Self::pair(results, issues);
        pairs.sort_by_key(|(_, result)| result.priority.rank());

        let items: Vec<Value> = pairs
            .into_iter()
            .map(|(issue, result)| {
                json!({
                    "number": issue.number,
                    "title": issue.title,
                    "marker": result.priority.marker(),
                    "category": result.category.as_str(),
                    "priority": result.priority.as_str(),
                    "effort": result.estimated_effort.as_str(),
                    "action_items": result.action_items,
                    "blockers": !result.blockers.is_empty(),
                    "blockers_line": result.blockers.join("; "),
                })
            })
            .collect();

        let data = json!({
            "generated_at": Self::generated_at(),
            "items": items,
        });

        Ok(TEMPLATES.render(TODO_TEMPLATE, &data)?)
    }

    pub fn format_console_output(results: &[AnalysisResult], issues: &[Issue]) -> String {
        let mut lines = Vec::new();

        for (issue, result) in Self::pair(results, issues) {
            lines.push(format!(
                "{} #{} [{}] {}",
                result.priority.marker(),
                issue.number,
                result.category,
                issue.title
            ));
            lines.push(format!("    Summary: {}", result.summary));
            lines.push(format!("    Effort: {}", result.estimated_effort));
            lines.push(String::new());
        }

        lines.join("\n")
    }

    pub fn to_json(
        repo_name: &str,
        issues: &[Issue],
        results: &[AnalysisResult],
        summary: &BatchAnalysisSummary,
    ) -> SmartIssuesResult<Value> {
        let items = Self::pair(results, issues)
            .into_iter()
            .map(|(issue, result)| Ok(json!({ "issue": serde_json::to_value(issue)?, "analysis": serde_json::to_value(result)? })))
            .collect::<SmartIssuesResult<Vec<Value>>>()?;

        Ok(json!({
            "repository": repo_name,
            "generated_at": Utc::now().to_rfc3339(),
            "summary": serde_json::to_value(summary)?,
            "issues": items,
        }))
    }

    pub fn save(content: &str, output_path: &Path) -> SmartIssuesResult<PathBuf> {
        if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SmartIssuesError::file_error(&parent.to_string_lossy(), "create output directory", &e.to_string())
            })?;
        }

        fs::write(output_path, content).map_err(|e| {
            SmartIssuesError::file_error(&output_path.to_string_lossy(), "write report", &e.to_string())
        })?;

        log::info!("💾 Saved output to {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    fn pair<'a>(results: &'a [AnalysisResult], issues: &'a [Issue]) -> Vec<(&'a Issue, &'a AnalysisResult)> {
        let by_number: HashMap<u64, &Issue> = issues.iter().map(|issue| (issue.number, issue)).collect();

        results
            .iter()
            .filter_map(|result| by_number.get(&result.issue_number).map(|issue| (*issue, result)))
            .collect()
    }

    fn generated_at() -> String {
        Local::now().format(TIMESTAMP_DISPLAY_FORMAT).to_string()
    }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn issue_refs(numbers: &[u64]) -> String {
    numbers.iter().map(|n| format!("#{}", n)).collect::<Vec<_>>().join(", ")
}

fn histogram_rows<K: Display>(histogram: &BTreeMap<K, usize>) -> Vec<Value> {
    histogram
        .iter()
        .map(|(name, count)| json!({ "name": name.to_string(), "count": count }))
        .collect()
}
