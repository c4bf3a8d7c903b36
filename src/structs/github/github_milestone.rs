use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct GithubMilestone {
    pub title: String,
}
