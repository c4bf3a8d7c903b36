use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct GithubRateLimitCore {
    pub limit: u64,
    pub remaining: u64,
    /// Epoch seconds.
    pub reset: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GithubRateLimitResources {
    pub core: GithubRateLimitCore,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GithubRateLimit {
    pub resources: GithubRateLimitResources,
}
