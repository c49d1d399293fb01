use thiserror::Error;

/// Errors that can occur during Git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a git repository (or any parent)")]
    NotARepo,

    #[error("Bare repository has no working tree")]
    BareRepo,

    #[error("HEAD is unborn (no commits yet)")]
    UnbornHead,

    #[error("Path is outside the repository working tree: {0}")]
    OutsideWorkdir(String),

    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    #[error("Remote has no URL: {0}")]
    RemoteWithoutUrl(String),

    #[error("Branch already exists: {0}")]
    BranchExists(String),
}
