//! Read-mostly view of a git repository
//!
//! Uses git2 for discovery and lookups so no `git` binary is required.

use std::path::{Component, Path};

use git2::{BranchType, ErrorCode, Repository};
use tracing::{debug, info};

use crate::GitError;

/// An opened repository with a working tree
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Walk up from `start` to the enclosing repository.
    ///
    /// Works from inside worktrees as well as the main checkout.
    pub fn discover(start: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(start).map_err(|_| GitError::NotARepo)?;
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }
        debug!(git_dir = %repo.path().display(), "Discovered repository");
        Ok(Self { repo })
    }

    /// Shared git directory (the main repo's `.git` for worktrees)
    pub fn git_dir(&self) -> &Path {
        self.repo.commondir()
    }

    pub fn workdir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    /// Workdir-relative, `/`-separated path of `file`.
    ///
    /// Relative inputs are resolved against the current directory. The file
    /// must exist.
    pub fn relative_path(&self, file: &Path) -> Result<String, GitError> {
        let workdir = self.workdir()?.canonicalize()?;
        let absolute = if file.is_absolute() {
            file.to_path_buf()
        } else {
            std::env::current_dir()?.join(file)
        };
        let absolute = absolute.canonicalize()?;

        let relative = absolute
            .strip_prefix(&workdir)
            .map_err(|_| GitError::OutsideWorkdir(absolute.display().to_string()))?;

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return Err(GitError::OutsideWorkdir(absolute.display().to_string()));
        }
        Ok(parts.join("/"))
    }

    /// Full hex id of the commit HEAD points at
    pub fn head_commit(&self) -> Result<String, GitError> {
        let head = self.head()?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Short name of the checked-out branch, or None when HEAD is detached
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        if self.repo.head_detached()? {
            return Ok(None);
        }
        let head = self.head()?;
        Ok(head.shorthand().map(str::to_string))
    }

    /// URL configured for remote `name`
    pub fn remote_url(&self, name: &str) -> Result<String, GitError> {
        let remote = self.repo.find_remote(name).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec => GitError::RemoteNotFound(name.to_string()),
            _ => GitError::Git(e),
        })?;
        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| GitError::RemoteWithoutUrl(name.to_string()))
    }

    /// Whether the workdir copy of `relative_path` differs from HEAD
    pub fn is_dirty(&self, relative_path: &str) -> Result<bool, GitError> {
        let status = self.repo.status_file(Path::new(relative_path))?;
        Ok(!status.is_empty())
    }

    /// Create a local branch at HEAD, optionally switching to it.
    ///
    /// The new branch points at the current commit, so switching only moves
    /// HEAD and leaves the index and working tree alone.
    pub fn create_branch(&self, name: &str, checkout: bool) -> Result<(), GitError> {
        if self.repo.find_branch(name, BranchType::Local).is_ok() {
            return Err(GitError::BranchExists(name.to_string()));
        }

        let commit = self.head()?.peel_to_commit()?;
        self.repo.branch(name, &commit, false)?;
        info!(branch = name, commit = %commit.id(), "Created branch");

        if checkout {
            self.repo.set_head(&format!("refs/heads/{}", name))?;
            info!(branch = name, "Switched HEAD");
        }
        Ok(())
    }

    fn head(&self) -> Result<git2::Reference<'_>, GitError> {
        self.repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => GitError::UnbornHead,
            _ => GitError::Git(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(output.status.success(), "git {:?} failed: {:?}", args, output);
    }

    fn setup_test_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        git(temp.path(), &["init", "-q"]);
        git(temp.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        temp
    }

    fn commit_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        git(dir, &["add", name]);
        git(dir, &["commit", "-q", "-m", "add file"]);
    }

    #[test]
    fn test_discover_outside_repo_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(GitRepo::discover(temp.path()), Err(GitError::NotARepo)));
    }

    #[test]
    fn test_unborn_head() {
        let temp = setup_test_repo();
        let repo = GitRepo::discover(temp.path()).unwrap();
        assert!(matches!(repo.head_commit(), Err(GitError::UnbornHead)));
    }

    #[test]
    fn test_head_commit_and_branch() {
        let temp = setup_test_repo();
        commit_file(temp.path(), "src/lib.rs", "fn main() {}\n");

        let repo = GitRepo::discover(&temp.path().join("src")).unwrap();
        let sha = repo.head_commit().unwrap();
        assert_eq!(sha.len(), 40);
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("main"));
    }

    #[test]
    fn test_relative_path() {
        let temp = setup_test_repo();
        commit_file(temp.path(), "src/nested/file.rs", "x\n");

        let repo = GitRepo::discover(temp.path()).unwrap();
        let rel = repo
            .relative_path(&temp.path().join("src").join("nested").join("file.rs"))
            .unwrap();
        assert_eq!(rel, "src/nested/file.rs");
    }

    #[test]
    fn test_relative_path_outside_workdir() {
        let temp = setup_test_repo();
        let other = TempDir::new().unwrap();
        let outside = other.path().join("elsewhere.txt");
        std::fs::write(&outside, "x").unwrap();

        let repo = GitRepo::discover(temp.path()).unwrap();
        assert!(matches!(
            repo.relative_path(&outside),
            Err(GitError::OutsideWorkdir(_))
        ));
    }

    #[test]
    fn test_remote_url() {
        let temp = setup_test_repo();
        git(temp.path(), &["remote", "add", "origin", "git@github.com:owner/repo.git"]);

        let repo = GitRepo::discover(temp.path()).unwrap();
        assert_eq!(repo.remote_url("origin").unwrap(), "git@github.com:owner/repo.git");
        assert!(matches!(
            repo.remote_url("upstream"),
            Err(GitError::RemoteNotFound(_))
        ));
    }

    #[test]
    fn test_is_dirty() {
        let temp = setup_test_repo();
        commit_file(temp.path(), "a.txt", "one\n");

        let repo = GitRepo::discover(temp.path()).unwrap();
        assert!(!repo.is_dirty("a.txt").unwrap());

        std::fs::write(temp.path().join("a.txt"), "two\n").unwrap();
        assert!(repo.is_dirty("a.txt").unwrap());
    }

    #[test]
    fn test_create_branch_and_checkout() {
        let temp = setup_test_repo();
        commit_file(temp.path(), "a.txt", "one\n");

        let repo = GitRepo::discover(temp.path()).unwrap();
        repo.create_branch("PROJ-1-fix", false).unwrap();
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("main"));

        assert!(matches!(
            repo.create_branch("PROJ-1-fix", true),
            Err(GitError::BranchExists(_))
        ));

        repo.create_branch("PROJ-2-feature", true).unwrap();
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("PROJ-2-feature"));
        assert!(!repo.is_dirty("a.txt").unwrap());
    }
}
