use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use crate::config::constants::{GITHUB_MAX_PER_PAGE, MAX_RECENT_COMMENTS};
use crate::structs::fetch_options::FetchOptions;
use crate::structs::github::github_comment::GithubComment;
use crate::structs::github::github_issue::GithubIssue;
use crate::structs::github::github_rate_limit::GithubRateLimit;
use crate::structs::issue::Issue;
use crate::structs::issue_comment::IssueComment;
use crate::structs::rate_limit_info::RateLimitInfo;
use crate::structs::repository_info::RepositoryInfo;

const USER_AGENT: &str = concat!("smartissues/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GithubError {
    #[error("Bad credentials: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl GithubError {
    /// A 403 is only a rate limit when GitHub says the quota is spent.
    pub fn from_status(status: StatusCode, quota_exhausted: bool, body: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimited(body),
            403 if quota_exhausted => Self::RateLimited(body),
            code => Self::Api { status: code, message: body },
        }
    }
}

/// Thin REST client over the issues API.
#[derive(Clone)]
pub struct GithubClient {
    token: String,
    api_url: String,
    client: Client,
}

impl GithubClient {
    pub fn new(token: String, api_url: String) -> Self {
        Self {
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request(&self, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", "2022-11-28");

        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GithubError> {
        let response = builder
            .send()
            .await
            .map_err(|e| GithubError::Network(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let quota_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
            == Some("0");
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        log::debug!("❌ GitHub API Error Response ({}): {}", status, body);
        Err(GithubError::from_status(status, quota_exhausted, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, GithubError> {
        let response = self.send(self.request(path).query(query)).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| GithubError::Decode(e.to_string()))
    }

    /// Collects up to `max_count` issues, pull requests excluded, each with
    /// its most recent comments attached.
    pub async fn fetch_issues(&self, repo: &str, options: &FetchOptions) -> Result<Vec<Issue>, GithubError> {
        let mut issues = Vec::new();
        if options.max_count == 0 {
            return Ok(issues);
        }

        let per_page = options.max_count.min(GITHUB_MAX_PER_PAGE);
        let path = format!("/repos/{}/issues", repo);
        let mut page = 1;

        'pages: loop {
            let mut query = vec![
                ("state", options.state.as_str().to_string()),
                ("sort", options.sort.as_str().to_string()),
                ("direction", options.direction.as_str().to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ];
            if !options.labels.is_empty() {
                query.push(("labels", options.labels.join(",")));
            }

            let batch: Vec<GithubIssue> = self.get_json(&path, &query).await?;
            let batch_len = batch.len();
            log::debug!("📥 Page {} of {}: {} entries", page, repo, batch_len);

            for raw in batch {
                if raw.is_pull_request() {
                    continue;
                }

                let mut issue = raw.into_issue();
                if issue.comments_count > 0 && options.max_comments > 0 {
                    issue.recent_comments = self
                        .fetch_recent_comments(repo, issue.number, issue.comments_count, options.max_comments)
                        .await?;
                }
                issues.push(issue);

                if issues.len() >= options.max_count {
                    break 'pages;
                }
            }

            if batch_len < per_page {
                break;
            }
            page += 1;
        }

        log::info!("📋 Fetched {} issues from {}", issues.len(), repo);
        Ok(issues)
    }

    pub async fn fetch_issue(&self, repo: &str, number: u64) -> Result<Issue, GithubError> {
        let raw: GithubIssue = self.get_json(&format!("/repos/{}/issues/{}", repo, number), &[]).await?;
        if raw.is_pull_request() {
            return Err(GithubError::NotFound(format!("#{} is a pull request", number)));
        }

        let mut issue = raw.into_issue();
        if issue.comments_count > 0 {
            issue.recent_comments = self
                .fetch_recent_comments(repo, number, issue.comments_count, MAX_RECENT_COMMENTS)
                .await?;
        }
        Ok(issue)
    }

    /// Comments come back oldest first, so the newest ones live on the last page.
    async fn fetch_recent_comments(
        &self,
        repo: &str,
        number: u64,
        count: u32,
        limit: usize,
    ) -> Result<Vec<IssueComment>, GithubError> {
        let path = format!("/repos/{}/issues/{}/comments", repo, number);
        let per_page = GITHUB_MAX_PER_PAGE;
        let mut page = (count as usize).saturating_sub(1) / per_page + 1;
        let mut comments: Vec<GithubComment> = Vec::new();

        loop {
            let mut batch: Vec<GithubComment> = self
                .get_json(&path, &[("per_page", per_page.to_string()), ("page", page.to_string())])
                .await?;
            batch.append(&mut comments);
            comments = batch;

            if comments.len() >= limit || page == 1 {
                break;
            }
            page -= 1;
        }

        let skip = comments.len().saturating_sub(limit);
        Ok(comments.into_iter().skip(skip).map(IssueComment::from).collect())
    }

    pub async fn get_repository(&self, repo: &str) -> Result<RepositoryInfo, GithubError> {
        self.get_json(&format!("/repos/{}", repo), &[]).await
    }

    pub async fn test_connection(&self) -> bool {
        match self.send(self.request("/user")).await {
            Ok(_) => true,
            Err(e) => {
                log::debug!("GitHub connection test failed: {}", e);
                false
            }
        }
    }

    pub async fn get_rate_limit_info(&self) -> Result<RateLimitInfo, GithubError> {
        let rate_limit: GithubRateLimit = self.get_json("/rate_limit", &[]).await?;
        let core = rate_limit.resources.core;

        Ok(RateLimitInfo {
            limit: core.limit,
            remaining: core.remaining,
            reset_at: DateTime::from_timestamp(core.reset, 0).unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GithubError::from_status(StatusCode::UNAUTHORIZED, false, "bad".to_string()),
            GithubError::Unauthorized("bad".to_string())
        );
        assert!(matches!(
            GithubError::from_status(StatusCode::NOT_FOUND, false, String::new()),
            GithubError::NotFound(_)
        ));
        assert!(matches!(
            GithubError::from_status(StatusCode::FORBIDDEN, true, String::new()),
            GithubError::RateLimited(_)
        ));
        assert!(matches!(
            GithubError::from_status(StatusCode::FORBIDDEN, false, String::new()),
            GithubError::Api { status: 403, .. }
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = GithubClient::new(String::new(), "https://api.github.com/".to_string());
        assert_eq!(client.api_url, "https://api.github.com");
    }
}
