use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Source of the repository's `origin` remote URL.
pub trait RemoteSource {
    /// `None` when there is no remote, no repository, or no git binary.
    fn origin_url(&self, repo_dir: &Path) -> Option<String>;
}

/// Asks the `git` binary via `git remote get-url origin`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitRemote;

impl RemoteSource for GitRemote {
    fn origin_url(&self, repo_dir: &Path) -> Option<String> {
        let output = match Command::new("git")
            .args(["remote", "get-url", "origin"])
            .current_dir(repo_dir)
            .output()
        {
            Ok(out) => out,
            Err(e) => {
                debug!("git not runnable in {:?}: {}", repo_dir, e);
                return None;
            }
        };
        if !output.status.success() {
            return None;
        }
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!url.is_empty()).then_some(url)
    }
}

impl<F> RemoteSource for F
where
    F: Fn(&Path) -> Option<String>,
{
    fn origin_url(&self, repo_dir: &Path) -> Option<String> {
        self(repo_dir)
    }
}

/// Code host type for a remote URL: `gitlab`, `github` or `unknown`.
/// GitLab wins when both substrings appear.
pub fn detect_code_host(remote_url: Option<&str>) -> &'static str {
    let Some(url) = remote_url else {
        return "unknown";
    };
    let url = url.to_lowercase();
    if url.contains("gitlab") {
        "gitlab"
    } else if url.contains("github") {
        "github"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_hosts() {
        assert_eq!(detect_code_host(Some("https://github.com/user/repo.git")), "github");
        assert_eq!(detect_code_host(Some("git@gitlab.com:user/repo.git")), "gitlab");
        assert_eq!(detect_code_host(Some("https://GitLab.example.org/x.git")), "gitlab");
    }

    #[test]
    fn unknown_hosts_and_missing_remote() {
        assert_eq!(detect_code_host(Some("https://bitbucket.org/a/b.git")), "unknown");
        assert_eq!(detect_code_host(None), "unknown");
    }

    #[test]
    fn gitlab_checked_before_github() {
        assert_eq!(
            detect_code_host(Some("https://gitlab.internal/mirror-of-github.git")),
            "gitlab"
        );
    }

    #[test]
    fn git_remote_outside_repository_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GitRemote.origin_url(dir.path()), None);
    }

    #[test]
    fn closures_act_as_remote_sources() {
        let source = |_: &Path| Some("https://github.com/a/b".to_string());
        assert_eq!(
            source.origin_url(Path::new(".")).as_deref(),
            Some("https://github.com/a/b")
        );
    }
}
