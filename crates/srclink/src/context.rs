use std::path::PathBuf;

use libsrclink_core::{load_repo_config, RepoConfig, SrclinkError};
use libsrclink_git::{GitError, GitRepo};
use tracing::debug;

use crate::cli::Cli;

/// Resolved repository and configuration for a srclink command
pub struct SrclinkContext {
    pub repo: GitRepo,
    pub config: RepoConfig,
}

impl SrclinkContext {
    /// Discover the repository from `--repo` or the current directory and
    /// load `.git/srclink/config.toml` if present
    pub fn resolve(cli: &Cli) -> Result<Self, SrclinkError> {
        let start = match &cli.repo {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        let repo = GitRepo::discover(&start).map_err(git_error)?;
        let config = load_repo_config(repo.git_dir())?.unwrap_or_default();
        debug!(git_dir = %repo.git_dir().display(), "Resolved context");
        Ok(Self { repo, config })
    }

    pub fn git_dir(&self) -> PathBuf {
        self.repo.git_dir().to_path_buf()
    }
}

/// Map a repository error onto the CLI error taxonomy
pub fn git_error(err: GitError) -> SrclinkError {
    match err {
        GitError::Io(e) => SrclinkError::Io(e),
        GitError::RemoteNotFound(name) => SrclinkError::NotFound(format!("remote '{}'", name)),
        GitError::OutsideWorkdir(path) => SrclinkError::InvalidArgs(format!(
            "'{}' is outside the repository working tree",
            path
        )),
        GitError::BranchExists(name) => {
            SrclinkError::InvalidArgs(format!("branch '{}' already exists", name))
        }
        other => SrclinkError::Git(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_error_mapping() {
        assert!(matches!(
            git_error(GitError::RemoteNotFound("origin".into())),
            SrclinkError::NotFound(_)
        ));
        assert!(matches!(git_error(GitError::NotARepo), SrclinkError::Git(_)));
        assert!(git_error(GitError::UnbornHead).to_string().contains("unborn"));
        assert_eq!(
            git_error(GitError::BranchExists("x".into())).exit_code(),
            2
        );
    }
}
