use thiserror::Error;

/// Main error type for srclink operations
#[derive(Debug, Error)]
pub enum SrclinkError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("git error: {0}")]
    Git(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("failed to open URL: {0}")]
    Open(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SrclinkError {
    /// Get the error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            SrclinkError::InvalidArgs(_) => "invalid_args",
            SrclinkError::NotFound(_) => "not_found",
            SrclinkError::Git(_) => "git_error",
            SrclinkError::Io(_) => "io_error",
            SrclinkError::Json(_) => "internal_error",
            SrclinkError::TomlParse(_) => "invalid_config",
            SrclinkError::TomlSerialize(_) => "internal_error",
            SrclinkError::Open(_) => "open_failed",
            SrclinkError::Internal(_) => "internal_error",
        }
    }

    /// Get the exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            SrclinkError::InvalidArgs(_) => 2,
            SrclinkError::TomlParse(_) => 2,
            SrclinkError::NotFound(_) => 3,
            SrclinkError::Git(_) => 4,
            SrclinkError::Io(_) => 5,
            SrclinkError::Open(_) => 6,
            _ => 1,
        }
    }

    /// Get actionable suggestions for fixing the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            SrclinkError::NotFound(msg) => {
                if msg.contains("selection") {
                    vec![
                        "Check that the selection matches the file on disk, including indentation",
                        "Pass --line to point the search near the intended occurrence",
                    ]
                } else if msg.contains("remote") {
                    vec![
                        "Run 'git remote -v' to list configured remotes",
                        "Use --remote <name> or 'srclink config set remote <name>'",
                    ]
                } else {
                    vec![]
                }
            }
            SrclinkError::Git(msg) => {
                if msg.contains("unborn") {
                    vec!["Create an initial commit before building permalinks"]
                } else if msg.contains("repository") {
                    vec!["Run srclink inside a git working tree, or pass --repo <path>"]
                } else {
                    vec![]
                }
            }
            SrclinkError::TomlParse(_) => vec![
                "Fix or remove .git/srclink/config.toml",
            ],
            SrclinkError::Open(_) => vec![
                "Copy the printed URL into a browser instead",
            ],
            _ => vec![],
        }
    }

    /// Create a NotFound error for a selection that could not be located
    pub fn selection_not_found(path: &str) -> Self {
        SrclinkError::NotFound(format!("selection not found in '{}'", path))
    }
}
