use std::path::{Path, PathBuf};
use crate::config::constants::{
    ANALYSIS_MAX_TOKENS, APP_DIR_NAME, CACHE_DIR_NAME, DEFAULT_CACHE_TTL_SECS, DEFAULT_MAX_ISSUES,
    DEFAULT_OUTPUT_DIR, GITHUB_API_URL, MAX_BODY_CHARS, MAX_COMMENT_CHARS, MAX_RECENT_COMMENTS,
    RECOMMENDATION_MAX_TOKENS,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn app_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    /// Expands a leading `~` to the home directory. Other paths pass through.
    pub fn expand_home(path: &Path) -> PathBuf {
        Self::expand_home_in(path, dirs::home_dir().as_deref())
    }

    fn expand_home_in(path: &Path, home: Option<&Path>) -> PathBuf {
        match (path.strip_prefix("~"), home) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => path.to_path_buf(),
        }
    }

    pub fn default_cache_dir() -> PathBuf {
        Self::app_dir().join(CACHE_DIR_NAME)
    }

    pub fn default_cache_enabled() -> bool {
        true
    }

    pub fn default_cache_ttl() -> u64 {
        DEFAULT_CACHE_TTL_SECS
    }

    pub fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    pub fn default_github_api_url() -> String {
        GITHUB_API_URL.to_string()
    }

    pub fn default_max_issues() -> usize {
        DEFAULT_MAX_ISSUES
    }

    pub fn default_max_body_chars() -> usize {
        MAX_BODY_CHARS
    }

    pub fn default_max_comments() -> usize {
        MAX_RECENT_COMMENTS
    }

    pub fn default_max_comment_chars() -> usize {
        MAX_COMMENT_CHARS
    }

    pub fn default_analysis_max_tokens() -> u32 {
        ANALYSIS_MAX_TOKENS
    }

    pub fn default_recommendation_max_tokens() -> u32 {
        RECOMMENDATION_MAX_TOKENS
    }
}
