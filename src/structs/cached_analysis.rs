use serde::{Deserialize, Serialize};
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::batch_analysis_summary::BatchAnalysisSummary;
use crate::structs::issue::Issue;

/// Payload written through the cache for one `analyze` query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachedAnalysis {
    pub issues: Vec<Issue>,
    pub results: Vec<AnalysisResult>,
    #[serde(default)]
    pub summary: BatchAnalysisSummary,
}
