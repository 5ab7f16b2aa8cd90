//! Repository URL normalization and VCS tool inference.

use pkgnorm_core::VcsTool;
use url::Url;

const SHORTCUTS: &[(&str, &str)] = &[
    ("github:", "https://github.com/"),
    ("gitlab:", "https://gitlab.com/"),
    ("bitbucket:", "https://bitbucket.org/"),
    ("gist:", "https://gist.github.com/"),
];

/// Normalize a declared repository URL.
///
/// Expands hosting shortcuts (`github:user/repo`, bare `user/repo`), drops a
/// `git+` prefix and rewrites scp-style `git@host:path` to https.
pub fn normalize_repo_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = trimmed.strip_prefix("git+").unwrap_or(trimmed);

    for (prefix, base) in SHORTCUTS {
        if let Some(rest) = stripped.strip_prefix(prefix) {
            return Some(format!("{}{}", base, rest.trim_start_matches('/')));
        }
    }

    if !stripped.contains("://") {
        // scp-style user@host:path
        if let Some((user_host, path)) = stripped.split_once(':') {
            if let Some((_, host)) = user_host.split_once('@') {
                return Some(format!("https://{}/{}", host, path.trim_start_matches('/')));
            }
        }
        // npm's bare user/repo shorthand
        if is_github_shorthand(stripped) {
            return Some(format!("https://github.com/{}", stripped));
        }
    }

    match Url::parse(stripped) {
        Ok(url) => Some(url.to_string()),
        Err(_) => Some(stripped.to_string()),
    }
}

fn is_github_shorthand(value: &str) -> bool {
    let mut parts = value.split('/');
    let (Some(user), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let valid = |s: &str| {
        !s.is_empty()
            && !s.starts_with('.')
            && s.chars().all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c))
    };
    valid(user) && valid(repo)
}

/// Guess the VCS tool of a Composer `vcs` repository from its URL
pub fn infer_vcs_tool(url: &str) -> VcsTool {
    let url = url.trim().to_ascii_lowercase();
    if url.starts_with("svn") || url.contains("subversion.apache.org") {
        VcsTool::Svn
    } else if url.starts_with("hg") || url.contains("mercurial.selenic.com") {
        VcsTool::Hg
    } else if url.starts_with("fossil") || url.contains("fossil-scm.org") {
        VcsTool::Fossil
    } else {
        VcsTool::Git
    }
}
