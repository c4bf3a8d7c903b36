use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct GithubLabel {
    pub name: String,
}
