use std::fs;
use tempfile::TempDir;
use smartissues::enums::category::Category;
use smartissues::enums::effort::Effort;
use smartissues::enums::priority::Priority;
use smartissues::services::issue_processor::IssueProcessor;
use smartissues::services::report_formatter::ReportFormatter;
use smartissues::structs::analysis_result::AnalysisResult;
use crate::common::issue;

fn result(number: u64, category: Category, priority: Priority) -> AnalysisResult {
    AnalysisResult {
        issue_number: number,
        title: format!("Issue number {}", number),
        url: format!("https://github.com/octo/repo/issues/{}", number),
        category,
        priority,
        summary: format!("Summary {}", number),
        suggested_labels: vec![],
        estimated_effort: Effort::Medium,
        key_points: vec![],
        related_topics: vec!["parsing".to_string()],
        action_items: vec![format!("Investigate {}", number)],
        blockers: vec!["Waiting on upstream".to_string()],
    }
}

#[test]
fn report_contains_summary_and_every_issue() {
    let issues = vec![issue(1, 40), issue(2, 1)];
    let results = vec![result(1, Category::Bug, Priority::Critical), result(2, Category::Feature, Priority::Low)];
    let summary = IssueProcessor::aggregate(&results, &issues, chrono::Utc::now())
        .with_recommendation("Start with #1.".to_string());

    let report = ReportFormatter::format_report("octo/repo", &issues, &results, &summary).unwrap();

    assert!(report.contains("**Issues analyzed:** 2"));
    assert!(report.contains("**High priority:** 1 (#1)"));
    assert!(report.contains("**Stale (no update in 30+ days):** 1 (#1)"));
    assert!(report.contains("| critical | 1 |"));
    assert!(report.contains("| feature | 1 |"));
    assert!(report.contains("[!!!] [#1](https://github.com/octo/repo/issues/1) Issue number 1"));
    assert!(report.contains("[-] [#2](https://github.com/octo/repo/issues/2) Issue number 2"));
    assert!(report.contains("- Waiting on upstream"));
    assert!(report.contains("_Related: parsing_"));
    assert!(report.contains("Start with #1."));
}

#[test]
fn todo_orders_critical_to_low() {
    let issues = vec![issue(1, 1), issue(2, 1), issue(3, 1), issue(4, 1)];
    let results = vec![
        result(1, Category::Bug, Priority::Medium),
        result(2, Category::Bug, Priority::Low),
        result(3, Category::Bug, Priority::Critical),
        result(4, Category::Bug, Priority::High),
    ];

    let todo = ReportFormatter::format_todo_list(&results, &issues).unwrap();
    let position = |number: u64| todo.find(&format!("**#{}**", number)).unwrap();

    assert!(position(3) < position(4));
    assert!(position(4) < position(1));
    assert!(position(1) < position(2));
    assert!(todo.contains("Blocked by: Waiting on upstream"));
}

#[test]
fn empty_batch_renders_placeholders() {
    let summary = IssueProcessor::aggregate(&[], &[], chrono::Utc::now());

    let report = ReportFormatter::format_report("octo/repo", &[], &[], &summary).unwrap();
    let todo = ReportFormatter::format_todo_list(&[], &[]).unwrap();

    assert!(report.contains("_No issues were analyzed._"));
    assert!(todo.contains("_Nothing to do._"));
    assert!(ReportFormatter::format_console_output(&[], &[]).is_empty());
}

#[test]
fn save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deep").join("nested").join("report.md");

    let saved = ReportFormatter::save("# hello", &path).unwrap();

    assert_eq!(saved, path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# hello");
}
