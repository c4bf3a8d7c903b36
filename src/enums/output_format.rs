use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Console,
    Report,
    Todo,
    Json,
}

impl OutputFormat {
    /// File name prefix and extension used when no explicit output path is given.
    pub fn file_stem_and_extension(&self) -> Option<(&'static str, &'static str)> {
        match self {
            OutputFormat::Console => None,
            OutputFormat::Report => Some(("report", "md")),
            OutputFormat::Todo => Some(("todo", "md")),
            OutputFormat::Json => Some(("analysis", "json")),
        }
    }
}
