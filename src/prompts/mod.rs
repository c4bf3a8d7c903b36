pub mod issue_analysis_prompt;
pub mod recommendation_prompt;
