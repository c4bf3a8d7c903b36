use std::path::PathBuf;
use clap::Subcommand;
use crate::enums::issue_sort::IssueSort;
use crate::enums::output_format::OutputFormat;
use crate::enums::sort_direction::SortDirection;
use crate::enums::state_filter::StateFilter;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Analyze issues from a GitHub repository ('owner/repo' or URL)
    Analyze {
        /// Falls back to DEFAULT_REPO when omitted
        repo: Option<String>,
        #[clap(long, value_enum, default_value_t = StateFilter::Open)]
        state: StateFilter,
        /// Defaults to analysis.max_issues (MAX_ISSUES)
        #[clap(short = 'n', long)]
        max_issues: Option<usize>,
        #[clap(short, long)]
        labels: Vec<String>,
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
        #[clap(long, value_enum, default_value_t = IssueSort::Created)]
        sort: IssueSort,
        #[clap(long, value_enum, default_value_t = SortDirection::Desc)]
        direction: SortDirection,
        #[clap(long)]
        no_cache: bool,
    },
    /// Check API connections and configuration
    Check,
    /// Manage the local cache
    Cache {
        #[clap(long, conflicts_with = "cleanup")]
        clear: bool,
        #[clap(long)]
        cleanup: bool,
    },
    /// Show information about a repository
    Info {
        repo: Option<String>,
    },
}
