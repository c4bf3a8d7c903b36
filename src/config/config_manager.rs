use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use crate::config::constants::CONFIG_FILE_NAME;
use crate::enums::provider_kind::ProviderKind;
use crate::errors::{SmartIssuesError, SmartIssuesResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::structs::config::config::Config;

const SAMPLE_CONFIG: &str = r#"# SmartIssues configuration
#
# Every value here can be overridden by an environment variable (shown in
# brackets). Secrets are best kept in the environment or a .env file.

debug = false                          # [DEBUG]

[github]
# token = "ghp_..."                    # [GITHUB_TOKEN]
api_url = "https://api.github.com"
# default_repo = "owner/repo"          # [DEFAULT_REPO]

[ai]
provider = "anthropic"                 # "anthropic" or "openrouter" [API_PROVIDER]
# model = "claude-sonnet-4-20250514"   # [CLAUDE_MODEL]
# anthropic_api_key = "sk-ant-..."     # [ANTHROPIC_API_KEY]
# openrouter_api_key = "sk-or-..."     # [OPENROUTER_API_KEY]
analysis_max_tokens = 1024
recommendation_max_tokens = 512

[analysis]
max_issues = 30                        # [MAX_ISSUES]
max_body_chars = 4000
max_comments = 5                       # newest comments fetched per issue
max_comment_chars = 500
# Leave failed issues out of the batch instead of aborting it
skip_failed = false

[cache]
enabled = true
# dir = "~/.smartissues/cache"         # [CACHE_DIR]
ttl_seconds = 3600                     # [CACHE_TTL]

[output]
output_dir = "./output"                # [OUTPUT_DIR]
"#;

pub struct ConfigManager;

impl ConfigManager {
    pub fn default_config_path() -> PathBuf {
        ConfigHelper::app_dir().join(CONFIG_FILE_NAME)
    }

    /// Builds the effective configuration: `.env`, then the TOML file, then
    /// process environment variables on top.
    pub fn load(path: Option<&Path>) -> SmartIssuesResult<Config> {
        match dotenvy::dotenv() {
            Ok(env_path) => log::debug!("📋 Loaded environment from {}", env_path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("⚠️ Could not read .env file: {}", e),
        }

        let config_path = path.map_or_else(Self::default_config_path, Path::to_path_buf);
        let mut config = if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            Self::load_from_file(&config_path)?
        } else if path.is_some() {
            return Err(SmartIssuesError::config_error(
                &format!("Config file not found: {}", config_path.display()),
                None,
                Some("Run 'smartissues init' to create one"),
            ));
        } else {
            Config::default()
        };

        Self::apply_overrides(&mut config, |name| std::env::var(name).ok())?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> SmartIssuesResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| SmartIssuesError::file_error(&path.to_string_lossy(), "read config", &e.to_string()))?;
        let mut config: Config = toml::from_str(&content)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    fn expand_paths(config: &mut Config) {
        config.cache.dir = ConfigHelper::expand_home(&config.cache.dir);
        config.output.output_dir = ConfigHelper::expand_home(&config.output.output_dir);
    }

    /// Overlays environment-style values. Empty values are ignored.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> SmartIssuesResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        if let Some(token) = get("GITHUB_TOKEN") {
            config.github.token = token;
        }
        if let Some(key) = get("ANTHROPIC_API_KEY") {
            config.ai.anthropic_api_key = key;
        }
        if let Some(key) = get("OPENROUTER_API_KEY") {
            config.ai.openrouter_api_key = key;
        }
        if let Some(provider) = get("API_PROVIDER") {
            config.ai.provider = ProviderKind::from_label(&provider).ok_or_else(|| {
                SmartIssuesError::config_error(
                    &format!("Unknown API provider '{}'", provider),
                    Some("API_PROVIDER"),
                    Some("Use 'anthropic' or 'openrouter'"),
                )
            })?;
        }
        if let Some(model) = get("CLAUDE_MODEL") {
            config.ai.model = Some(model);
        }
        if let Some(repo) = get("DEFAULT_REPO") {
            config.github.default_repo = Some(repo);
        }
        if let Some(value) = get("MAX_ISSUES") {
            config.analysis.max_issues = parse_number("MAX_ISSUES", &value)?;
        }
        if let Some(value) = get("CACHE_TTL") {
            config.cache.ttl_seconds = parse_number("CACHE_TTL", &value)?;
        }
        if let Some(dir) = get("CACHE_DIR") {
            config.cache.dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("OUTPUT_DIR") {
            config.output.output_dir = PathBuf::from(dir);
        }
        if let Some(value) = get("DEBUG") {
            config.debug = matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes");
        }

        Ok(())
    }

    /// Writes the commented sample file. Never overwrites an existing one.
    pub fn create_sample_config(path: Option<&Path>) -> SmartIssuesResult<PathBuf> {
        let config_path = path.map_or_else(Self::default_config_path, Path::to_path_buf);

        if config_path.exists() {
            return Err(SmartIssuesError::config_error(
                &format!("Config file already exists: {}", config_path.display()),
                None,
                Some("Edit the existing file or remove it first"),
            ));
        }

        if let Some(parent) = config_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SmartIssuesError::file_error(&parent.to_string_lossy(), "create config directory", &e.to_string())
            })?;
        }
        fs::write(&config_path, SAMPLE_CONFIG).map_err(|e| {
            SmartIssuesError::file_error(&config_path.to_string_lossy(), "write sample config", &e.to_string())
        })?;

        log::info!("✅ Created sample config at: {}", config_path.display());
        Ok(config_path)
    }

    pub fn validate(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.github.token.is_empty() {
            errors.push("GITHUB_TOKEN is required".to_string());
        }

        if config.ai.active_api_key().is_empty() {
            errors.push(format!(
                "{} is required for the {} provider",
                config.ai.active_api_key_env(),
                config.ai.provider.display_name()
            ));
        }

        if config.analysis.max_issues == 0 {
            errors.push("analysis.max_issues must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> SmartIssuesResult<T> {
    value.parse::<T>().map_err(|_| {
        SmartIssuesError::config_error(
            &format!("{} must be a whole number, got '{}'", name, value),
            Some(name),
            None,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_sample_config_parses_to_defaults() {
        let config: Config = toml::from_str(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.analysis.max_issues, 30);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.ai.provider, ProviderKind::Anthropic);
        assert!(!config.analysis.skip_failed);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("OPENROUTER_API_KEY", "sk-or"),
            ("API_PROVIDER", "OpenRouter"),
            ("MAX_ISSUES", "12"),
            ("CACHE_TTL", "60"),
            ("DEBUG", "TRUE"),
            ("DEFAULT_REPO", ""),
        ]);
        let mut config = Config::default();

        ConfigManager::apply_overrides(&mut config, |name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.github.token, "ghp_test");
        assert_eq!(config.ai.provider, ProviderKind::OpenRouter);
        assert_eq!(config.ai.active_api_key(), "sk-or");
        assert_eq!(config.analysis.max_issues, 12);
        assert_eq!(config.cache.ttl_seconds, 60);
        assert!(config.debug);
        assert_eq!(config.github.default_repo, None);
        assert!(ConfigManager::validate(&config).is_ok());
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let vars = env(&[("MAX_ISSUES", "lots")]);
        let mut config = Config::default();

        let error = ConfigManager::apply_overrides(&mut config, |name| vars.get(name).cloned()).unwrap_err();
        assert!(matches!(error, SmartIssuesError::ConfigurationError { .. }));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = Config::default();
        config.analysis.max_issues = 0;

        let errors = ConfigManager::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[1].contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_tilde_paths_are_expanded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[cache]\ndir = \"~/.smartissues/cache\"\n").unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();

        assert!(!config.cache.dir.starts_with("~"));
        assert!(config.cache.dir.ends_with(".smartissues/cache"));
    }

    #[test]
    fn test_create_sample_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = ConfigManager::create_sample_config(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert!(ConfigManager::load_from_file(&path).is_ok());
        assert!(ConfigManager::create_sample_config(Some(&path)).is_err());
    }
}
