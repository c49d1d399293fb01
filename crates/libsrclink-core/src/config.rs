use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SrclinkError;
use crate::types::forge::Forge;

/// Remote used when neither the flag nor the config names one
pub const DEFAULT_REMOTE: &str = "origin";

/// Default upper bound on generated branch name length
pub const DEFAULT_BRANCH_MAX_LEN: usize = 60;

/// Which ref a permalink should pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRef {
    #[default]
    Commit,
    Branch,
}

impl fmt::Display for LinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRef::Commit => f.write_str("commit"),
            LinkRef::Branch => f.write_str("branch"),
        }
    }
}

impl FromStr for LinkRef {
    type Err = SrclinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => Ok(LinkRef::Commit),
            "branch" => Ok(LinkRef::Branch),
            other => Err(SrclinkError::InvalidArgs(format!(
                "link_ref must be 'commit' or 'branch', got '{}'",
                other
            ))),
        }
    }
}

/// Branch naming policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Prepended verbatim, e.g. `feature/`
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "default_branch_max_len")]
    pub max_len: usize,
}

fn default_branch_max_len() -> usize {
    DEFAULT_BRANCH_MAX_LEN
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            max_len: DEFAULT_BRANCH_MAX_LEN,
        }
    }
}

/// Repo-level configuration stored in .git/srclink/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Remote to build links against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Pin links to the HEAD commit or the current branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_ref: Option<LinkRef>,
    /// Host name to forge overrides for self-hosted instances
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub forges: BTreeMap<String, Forge>,
    #[serde(default)]
    pub branch: BranchConfig,
}

impl RepoConfig {
    pub fn remote(&self) -> &str {
        self.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    pub fn link_ref(&self) -> LinkRef {
        self.link_ref.unwrap_or_default()
    }

    /// Configured forge for `host`, falling back to detection
    pub fn forge_for(&self, host: &str) -> Forge {
        self.forges
            .get(&host.to_ascii_lowercase())
            .copied()
            .unwrap_or_else(|| Forge::detect(host))
    }

    /// Update one setting by its dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SrclinkError> {
        match key {
            "remote" => self.remote = Some(value.to_string()),
            "link_ref" => self.link_ref = Some(value.parse()?),
            "branch.prefix" => self.branch.prefix = value.to_string(),
            "branch.max_len" => {
                self.branch.max_len = value.parse().map_err(|_| {
                    SrclinkError::InvalidArgs(format!(
                        "branch.max_len must be a positive integer, got '{}'",
                        value
                    ))
                })?;
            }
            _ => match key.strip_prefix("forges.") {
                Some(host) if !host.is_empty() => {
                    self.forges.insert(host.to_ascii_lowercase(), value.parse()?);
                }
                _ => {
                    return Err(SrclinkError::InvalidArgs(format!(
                        "unknown config key '{}' (expected remote, link_ref, branch.prefix, branch.max_len or forges.<host>)",
                        key
                    )))
                }
            },
        }
        Ok(())
    }
}

/// Path of the repo config inside the git directory
pub fn repo_config_path(git_dir: &Path) -> PathBuf {
    git_dir.join("srclink").join("config.toml")
}

/// Load repo config from .git/srclink/config.toml
pub fn load_repo_config(git_dir: &Path) -> Result<Option<RepoConfig>, SrclinkError> {
    let config_path = repo_config_path(git_dir);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&config_path)?;
    let config: RepoConfig = toml::from_str(&content)?;
    Ok(Some(config))
}

/// Save repo config to .git/srclink/config.toml
pub fn save_repo_config(git_dir: &Path, config: &RepoConfig) -> Result<(), SrclinkError> {
    let config_path = repo_config_path(git_dir);
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&config_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_repo_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_repo_config_roundtrip() {
        let dir = tempdir().unwrap();
        let git_dir = dir.path();

        let mut config = RepoConfig::default();
        config.set("remote", "upstream").unwrap();
        config.set("link_ref", "branch").unwrap();
        config.set("branch.prefix", "feature/").unwrap();
        config.set("branch.max_len", "40").unwrap();
        config.set("forges.Git.Example.com", "gitlab").unwrap();

        save_repo_config(git_dir, &config).unwrap();
        let loaded = load_repo_config(git_dir).unwrap().unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.remote(), "upstream");
        assert_eq!(loaded.link_ref(), LinkRef::Branch);
        assert_eq!(loaded.forge_for("git.example.com"), Forge::GitLab);
    }

    #[test]
    fn test_defaults() {
        let config: RepoConfig = toml::from_str("").unwrap();
        assert_eq!(config.remote(), DEFAULT_REMOTE);
        assert_eq!(config.link_ref(), LinkRef::Commit);
        assert_eq!(config.branch.max_len, DEFAULT_BRANCH_MAX_LEN);
        assert_eq!(config.forge_for("gitlab.com"), Forge::GitLab);
    }

    #[test]
    fn test_partial_branch_section() {
        let config: RepoConfig = toml::from_str("[branch]\nprefix = \"fix/\"\n").unwrap();
        assert_eq!(config.branch.prefix, "fix/");
        assert_eq!(config.branch.max_len, DEFAULT_BRANCH_MAX_LEN);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = RepoConfig::default();
        assert!(config.set("link_ref", "tag").is_err());
        assert!(config.set("branch.max_len", "lots").is_err());
        assert!(config.set("forges.example.com", "sourcehut").is_err());
        assert!(config.set("colour", "red").is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = repo_config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "link_ref = [").unwrap();
        assert!(matches!(
            load_repo_config(dir.path()),
            Err(SrclinkError::TomlParse(_))
        ));
    }
}
