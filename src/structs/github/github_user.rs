use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct GithubUser {
    pub login: String,
}
