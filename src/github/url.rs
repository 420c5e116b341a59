//! Repository URL parsing

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ReadmeError, Result};

/// `github.com/<owner>/<repo>` anywhere in the input; stops at `/`, `?` or `#`
static REPOSITORY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[/.@])github\.com/([^/?#\s]+)/([^/?#\s]+)")
        .expect("repository pattern is valid")
});

/// Extract `(owner, repo)` from a GitHub repository URL.
///
/// Accepts URLs with or without a scheme, a single trailing slash, a `.git`
/// suffix and extra path segments (`/tree/main`), query or fragment.
pub fn parse_repository_url(url: &str) -> Result<(String, String)> {
    let trimmed = url.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let invalid = || ReadmeError::InvalidUrl {
        url: url.trim().to_string(),
    };

    let caps = REPOSITORY_PATH.captures(trimmed).ok_or_else(invalid)?;

    let owner = caps[1].to_string();
    let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]).to_string();

    if repo.is_empty() {
        return Err(invalid());
    }

    Ok((owner, repo))
}
