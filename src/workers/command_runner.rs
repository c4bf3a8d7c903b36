use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use chrono::Local;
use serde_json::json;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::{DEFAULT_MAX_ISSUES, MAX_RECENT_COMMENTS, TIMESTAMP_FILE_FORMAT};
use crate::enums::commands::Commands;
use crate::enums::output_format::OutputFormat;
use crate::errors::{SmartIssuesError, SmartIssuesResult};
use crate::helpers::cache_key::generate_cache_key;
use crate::helpers::repo_name::full_repo_name;
use crate::logger::progress_logger::ProgressLogger;
use crate::services::ai_providers::provider_factory::ProviderFactory;
use crate::services::cache_manager::CacheManager;
use crate::services::github_client::GithubClient;
use crate::services::issue_processor::IssueProcessor;
use crate::services::report_formatter::ReportFormatter;
use crate::structs::analyze_request::AnalyzeRequest;
use crate::structs::batch_analysis_summary::BatchAnalysisSummary;
use crate::structs::cached_analysis::CachedAnalysis;
use crate::structs::config::config::Config;
use crate::structs::fetch_options::FetchOptions;

pub struct CommandRunner {
    config_path: Option<PathBuf>,
    config: SmartIssuesResult<Config>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    /// `config` is the outcome of loading `config_path`; a load failure only
    /// surfaces once a command needs the configuration.
    pub fn new(config_path: Option<PathBuf>, config: SmartIssuesResult<Config>) -> Self {
        Self {
            config_path,
            config,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> SmartIssuesResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Analyze { repo, state, max_issues, labels, output, format, sort, direction, no_cache } => {
                let max_count = match max_issues {
                    Some(count) => count,
                    None => self.config.as_ref().map_or(DEFAULT_MAX_ISSUES, |config| config.analysis.max_issues),
                };
                let max_comments = self
                    .config
                    .as_ref()
                    .map_or(MAX_RECENT_COMMENTS, |config| config.analysis.max_comments);
                let request = AnalyzeRequest {
                    repo,
                    fetch: FetchOptions { state, labels, max_count, sort, direction, max_comments },
                    output,
                    format,
                    use_cache: !no_cache,
                };
                self.analyze_command(request).await
            }
            Commands::Check => self.check_command().await,
            Commands::Cache { clear, cleanup } => self.cache_command(clear, cleanup),
            Commands::Info { repo } => self.info_command(repo).await,
        };

        if let Some(start) = self.start_time {
            log::debug!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn load_config(&self) -> SmartIssuesResult<Config> {
        self.config.clone()
    }

    fn load_valid_config(&self) -> SmartIssuesResult<Config> {
        let config = self.load_config()?;

        if let Err(errors) = ConfigManager::validate(&config) {
            for error in &errors {
                log::error!("❌ {}", error);
            }
            return Err(SmartIssuesError::config_error(
                &format!("{} configuration problem(s) found", errors.len()),
                None,
                Some("Set the missing values in the environment, a .env file, or run 'smartissues init'"),
            ));
        }

        Ok(config)
    }

    fn resolve_repo(repo: Option<String>, config: &Config) -> SmartIssuesResult<String> {
        let repo = repo.or_else(|| config.github.default_repo.clone()).ok_or_else(|| {
            SmartIssuesError::config_error(
                "No repository given",
                Some("DEFAULT_REPO"),
                Some("Pass 'owner/repo' or set DEFAULT_REPO"),
            )
        })?;

        full_repo_name(&repo)
    }

    /// Key for one analyze query. Labels are treated as a set.
    pub fn analysis_cache_key(repo: &str, fetch: &FetchOptions, model: &str) -> String {
        let labels: BTreeSet<&str> = fetch.labels.iter().map(|label| label.trim()).collect();

        generate_cache_key(
            repo,
            [
                ("state", json!(fetch.state.as_str())),
                ("labels", json!(labels)),
                ("max_issues", json!(fetch.max_count)),
                ("sort", json!(fetch.sort.as_str())),
                ("direction", json!(fetch.direction.as_str())),
                ("max_comments", json!(fetch.max_comments)),
                ("model", json!(model)),
            ],
        )
    }

    fn init_command(&self) -> SmartIssuesResult<()> {
        log::info!("🚀 Initializing smartissues configuration...");

        let path = ConfigManager::create_sample_config(self.config_path.as_deref())?;
        println!("✅ Configuration file created: {}", path.display());
        println!("📝 Add your GITHUB_TOKEN and an AI provider key, then run 'smartissues check'.");
        Ok(())
    }

    async fn analyze_command(&self, request: AnalyzeRequest) -> SmartIssuesResult<()> {
        let config = self.load_valid_config()?;
        let repo = Self::resolve_repo(request.repo.clone(), &config)?;

        let cache = if request.use_cache && config.cache.enabled {
            Some(CacheManager::new(config.cache.dir.clone(), config.cache.ttl_seconds)?)
        } else {
            None
        };
        let cache_key = Self::analysis_cache_key(&repo, &request.fetch, &config.ai.effective_model());

        let cached = cache.as_ref().and_then(|cache| cache.get_as::<CachedAnalysis>(&cache_key));
        let analysis = match cached {
            Some(cached) => {
                log::info!("📋 Using cached results ({} issues)", cached.issues.len());
                cached
            }
            None => match self.run_analysis(&config, &repo, &request.fetch).await? {
                Some(analysis) => {
                    if let Some(cache) = &cache {
                        if let Err(e) = cache.set_as(&cache_key, &analysis, None) {
                            log::warn!("⚠️ Could not cache results: {}", e);
                        }
                    }
                    analysis
                }
                None => {
                    println!("No issues found matching the criteria.");
                    return Ok(());
                }
            },
        };

        Self::emit_output(&config, &repo, &request, &analysis)
    }

    /// Fetches and analyzes one batch. `None` when nothing matched.
    async fn run_analysis(&self, config: &Config, repo: &str, fetch: &FetchOptions) -> SmartIssuesResult<Option<CachedAnalysis>> {
        let client = GithubClient::new(config.github.token.clone(), config.github.api_url.clone());
        let provider = ProviderFactory::create(&config.ai)?;
        log::debug!("🤖 Provider: {} ({})", provider.kind().display_name(), provider.model());
        let processor = IssueProcessor::new(provider)
            .with_limits(config.analysis.clone())
            .with_token_budgets(config.ai.analysis_max_tokens, config.ai.recommendation_max_tokens);

        let mut progress = ProgressLogger::new(format!("Fetching issues from {}...", repo));
        progress.start();
        let issues = match client.fetch_issues(repo, fetch).await {
            Ok(issues) => issues,
            Err(e) => {
                progress.fail(&format!("Error fetching issues: {}", e)).await;
                return Err(e.into());
            }
        };

        if issues.is_empty() {
            progress.finish("No matching issues").await;
            return Ok(None);
        }

        progress.set_message(format!("Found {} issues. Analyzing with {}...", issues.len(), config.ai.provider.display_name()));
        let mut on_progress = progress.progress_callback();
        let results = match processor.analyze_issues(&issues, Some(&mut on_progress)).await {
            Ok(results) => results,
            Err(e) => {
                progress.fail(&format!("Error analyzing issues: {}", e)).await;
                return Err(e);
            }
        };

        progress.set_message("Generating recommendation...".to_string());
        let summary = processor.generate_batch_summary(&results, &issues).await;
        progress.finish(&format!("Analyzed {} of {} issues", results.len(), issues.len())).await;

        Ok(Some(CachedAnalysis { issues, results, summary }))
    }

    fn emit_output(config: &Config, repo: &str, request: &AnalyzeRequest, analysis: &CachedAnalysis) -> SmartIssuesResult<()> {
        let CachedAnalysis { issues, results, summary } = analysis;

        let content = match request.format {
            OutputFormat::Console => {
                let mut text = ReportFormatter::format_console_output(results, issues);
                text.push('\n');
                text.push_str(&Self::console_summary(summary));
                text
            }
            OutputFormat::Report => ReportFormatter::format_report(repo, issues, results, summary)?,
            OutputFormat::Todo => ReportFormatter::format_todo_list(results, issues)?,
            OutputFormat::Json => {
                let value = ReportFormatter::to_json(repo, issues, results, summary)?;
                serde_json::to_string_pretty(&value)?
            }
        };

        let output_path = request.output.clone().or_else(|| {
            request.format.file_stem_and_extension().map(|(stem, extension)| {
                Self::timestamped_path(&config.output.output_dir, stem, extension)
            })
        });

        match output_path {
            Some(path) => {
                let saved = ReportFormatter::save(&content, &path)?;
                println!("📄 Output saved to: {}", saved.display());
            }
            None => println!("\n{}", content),
        }

        Ok(())
    }

    fn timestamped_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
        dir.join(format!("{}_{}.{}", stem, Local::now().format(TIMESTAMP_FILE_FORMAT), extension))
    }

    fn console_summary(summary: &BatchAnalysisSummary) -> String {
        let refs = |numbers: &[u64]| {
            if numbers.is_empty() {
                "none".to_string()
            } else {
                numbers.iter().map(|n| format!("#{}", n)).collect::<Vec<_>>().join(", ")
            }
        };

        format!(
            "--- Summary ---\n\
             Total issues: {}\n\
             By priority: {}\n\
             By category: {}\n\
             By effort: {}\n\
             High priority: {}\n\
             Quick wins: {}\n\
             Stale: {}\n\n\
             Recommendation:\n{}\n",
            summary.total,
            BatchAnalysisSummary::histogram_line(&summary.by_priority),
            BatchAnalysisSummary::histogram_line(&summary.by_category),
            BatchAnalysisSummary::histogram_line(&summary.by_effort),
            refs(&summary.high_priority_issues),
            refs(&summary.quick_wins),
            refs(&summary.stale_issues),
            summary.recommendation,
        )
    }

    async fn check_command(&self) -> SmartIssuesResult<()> {
        let config = self.load_config()?;

        println!("Checking configuration...");
        match ConfigManager::validate(&config) {
            Ok(()) => println!("  [OK] Configuration valid"),
            Err(errors) => {
                for error in errors {
                    println!("  [FAIL] {}", error);
                }
            }
        }

        if !config.github.token.is_empty() {
            println!("Checking GitHub connection...");
            let client = GithubClient::new(config.github.token.clone(), config.github.api_url.clone());
            if client.test_connection().await {
                println!("  [OK] GitHub API connected");
                match client.get_rate_limit_info().await {
                    Ok(rate_limit) => println!(
                        "       Rate limit: {}/{} (resets {})",
                        rate_limit.remaining,
                        rate_limit.limit,
                        rate_limit.reset_at.with_timezone(&Local).format("%H:%M:%S")
                    ),
                    Err(e) => log::warn!("⚠️ Could not read rate limit: {}", e),
                }
            } else {
                println!("  [FAIL] GitHub API connection failed");
            }
        }

        if !config.ai.active_api_key().is_empty() {
            let provider_name = config.ai.provider.display_name();
            println!("Checking {} API connection...", provider_name);
            println!("       Provider: {}", config.ai.provider);
            println!("       Model: {}", config.ai.effective_model());

            match ProviderFactory::create(&config.ai) {
                Ok(provider) => {
                    let processor = IssueProcessor::new(provider);
                    if processor.test_connection().await {
                        println!("  [OK] {} API connected", provider_name);
                    } else {
                        println!("  [FAIL] {} API connection failed", provider_name);
                    }
                }
                Err(e) => println!("  [FAIL] {} error: {}", provider_name, e),
            }
        }

        Ok(())
    }

    fn cache_command(&self, clear: bool, cleanup: bool) -> SmartIssuesResult<()> {
        let config = self.load_config()?;
        let cache = CacheManager::new(config.cache.dir, config.cache.ttl_seconds)?;

        if clear {
            let count = cache.clear()?;
            println!("Cleared {} cache entries.", count);
        } else if cleanup {
            let count = cache.cleanup_expired()?;
            println!("Removed {} expired entries.", count);
        } else {
            let stats = cache.stats()?;
            println!("Cache Statistics:");
            println!("  Location: {}", stats.location.display());
            println!("  Total entries: {}", stats.total_entries);
            println!("  Valid entries: {}", stats.valid_entries);
            println!("  Expired entries: {}", stats.expired_entries);
            println!("  Total size: {} bytes", stats.total_size_bytes);
        }

        Ok(())
    }

    async fn info_command(&self, repo: Option<String>) -> SmartIssuesResult<()> {
        let config = self.load_config()?;
        if config.github.token.is_empty() {
            return Err(SmartIssuesError::config_error(
                "GITHUB_TOKEN is required",
                Some("github.token"),
                Some("export GITHUB_TOKEN=..."),
            ));
        }

        let repo = Self::resolve_repo(repo, &config)?;
        let client = GithubClient::new(config.github.token.clone(), config.github.api_url.clone());
        let repository = client.get_repository(&repo).await?;

        println!("Repository: {}", repository.full_name);
        println!("Description: {}", repository.description.as_deref().unwrap_or("No description"));
        println!("Stars: {}", repository.stars);
        println!("Open Issues: {}", repository.open_issues_count);
        println!("Language: {}", repository.language.as_deref().unwrap_or("Not specified"));
        println!("URL: {}", repository.html_url);
        Ok(())
    }
}
