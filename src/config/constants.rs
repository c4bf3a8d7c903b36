pub const DEFAULT_MAX_ISSUES: usize = 30;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const APP_DIR_NAME: &str = ".smartissues";
pub const CACHE_DIR_NAME: &str = "cache";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CACHE_FILE_EXTENSION: &str = "json";

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_MAX_PER_PAGE: usize = 100;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_OPENROUTER_MODEL: &str = "anthropic/claude-sonnet-4";

pub const ANALYSIS_MAX_TOKENS: u32 = 1024;
pub const RECOMMENDATION_MAX_TOKENS: u32 = 512;
pub const PING_MAX_TOKENS: u32 = 10;

pub const MAX_BODY_CHARS: usize = 4000;
pub const MAX_RECENT_COMMENTS: usize = 5;
pub const MAX_COMMENT_CHARS: usize = 500;
pub const STALE_AFTER_DAYS: i64 = 30;
pub const CACHE_KEY_HEX_LEN: usize = 16;

pub const PARSE_FAILURE_SUMMARY: &str = "Unable to parse AI response";
pub const RECOMMENDATION_UNAVAILABLE: &str =
    "Recommendation unavailable: the AI provider did not return a summary.";
pub const EMPTY_BATCH_RECOMMENDATION: &str = "No issues were analyzed.";

pub const TIMESTAMP_FILE_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
