use std::path::PathBuf;
use crate::enums::output_format::OutputFormat;
use crate::structs::fetch_options::FetchOptions;

/// Everything the `analyze` command needs beyond the loaded configuration.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub repo: Option<String>,
    pub fetch: FetchOptions,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub use_cache: bool,
}
