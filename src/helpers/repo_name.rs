use crate::errors::{SmartIssuesError, SmartIssuesResult};

/// Splits `owner/repo` or a github.com URL into `(owner, repo)`.
pub fn parse_repo_name(input: &str) -> SmartIssuesResult<(String, String)> {
    let trimmed = input.trim().trim_end_matches('/');

    if trimmed.contains("github.com") {
        let mut parts = trimmed.rsplit('/');
        if let (Some(repo), Some(owner)) = (parts.next(), parts.next()) {
            let repo = repo.trim_end_matches(".git");
            if !owner.is_empty() && !repo.is_empty() && !owner.contains("github.com") {
                return Ok((owner.to_string(), repo.to_string()));
            }
        }
    } else if let Some((owner, repo)) = trimmed.split_once('/') {
        if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') {
            return Ok((owner.to_string(), repo.to_string()));
        }
    }

    Err(SmartIssuesError::UserInputError {
        input: input.to_string(),
        expected: "a repository in 'owner/repo' form or a GitHub URL".to_string(),
        suggestion: "Try something like 'rust-lang/rust'".to_string(),
    })
}

/// Normalised `owner/repo` form.
pub fn full_repo_name(input: &str) -> SmartIssuesResult<String> {
    let (owner, repo) = parse_repo_name(input)?;
    Ok(format!("{}/{}", owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_repo_form() {
        assert_eq!(parse_repo_name("rust-lang/rust").unwrap(), ("rust-lang".to_string(), "rust".to_string()));
    }

    #[test]
    fn test_url_form() {
        assert_eq!(
            parse_repo_name("https://github.com/tokio-rs/tokio.git/").unwrap(),
            ("tokio-rs".to_string(), "tokio".to_string())
        );
        assert_eq!(full_repo_name("https://github.com/serde-rs/serde").unwrap(), "serde-rs/serde");
    }

    #[test]
    fn test_invalid_forms() {
        assert!(parse_repo_name("justarepo").is_err());
        assert!(parse_repo_name("a/b/c").is_err());
        assert!(parse_repo_name("/repo").is_err());
        assert!(parse_repo_name("https://github.com/").is_err());
    }
}
