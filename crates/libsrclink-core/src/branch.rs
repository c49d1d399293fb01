//! Branch names derived from issue tracker entries

use serde::{Deserialize, Serialize};

use crate::config::BranchConfig;
use crate::error::SrclinkError;

/// The slice of an issue tracker entry needed to name a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub key: String,
    pub title: String,
}

/// `{prefix}{key}-{slug}` where the slug is the lowercased ASCII words of the
/// title, cut on a word boundary to keep the whole name within `max_len`.
pub fn branch_name(issue: &IssueRef, config: &BranchConfig) -> Result<String, SrclinkError> {
    let key = issue.key.trim();
    if key.is_empty() {
        return Err(SrclinkError::InvalidArgs("issue key is empty".to_string()));
    }

    let base = format!("{}{}", config.prefix, key);
    let slug = slugify(&issue.title);
    let budget = config.max_len.saturating_sub(base.len() + 1);
    let slug = truncate_slug(&slug, budget);

    let name = if slug.is_empty() {
        base
    } else {
        format!("{}-{}", base, slug)
    };
    validate_branch_name(&name)?;
    Ok(name)
}

/// Lowercase ASCII alphanumeric words joined by single dashes
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn truncate_slug(slug: &str, budget: usize) -> &str {
    if slug.len() <= budget {
        return slug;
    }
    let cut = &slug[..budget];
    if slug.as_bytes()[budget] == b'-' {
        return cut;
    }
    match cut.rfind('-') {
        Some(pos) => &cut[..pos],
        None => cut,
    }
}

/// Reject names git would refuse as a branch
pub fn validate_branch_name(name: &str) -> Result<(), SrclinkError> {
    let invalid = |reason: &str| -> Result<(), SrclinkError> {
        Err(SrclinkError::InvalidArgs(format!(
            "invalid branch name '{}': {}",
            name, reason
        )))
    };

    if name.is_empty() {
        return invalid("empty");
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return invalid("contains whitespace");
    }
    if let Some(c) = name.chars().find(|c| "~^:?*[\\".contains(*c)) {
        return invalid(&format!("contains '{}'", c));
    }
    if name.contains("..") || name.contains("@{") || name.contains("//") {
        return invalid("contains a forbidden sequence");
    }
    if name.starts_with('-') || name.starts_with('/') || name.ends_with('/') {
        return invalid("bad leading or trailing character");
    }
    if name.ends_with('.') || name.ends_with(".lock") {
        return invalid("bad suffix");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(key: &str, title: &str) -> IssueRef {
        IssueRef {
            key: key.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Fix the login  crash!"), "fix-the-login-crash");
        assert_eq!(slugify("  --Über parser-- "), "ber-parser");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_branch_name_default_config() {
        let name = branch_name(&issue("PROJ-123", "Fix the login crash"), &BranchConfig::default()).unwrap();
        assert_eq!(name, "PROJ-123-fix-the-login-crash");
    }

    #[test]
    fn test_branch_name_with_prefix() {
        let config = BranchConfig {
            prefix: "feature/".to_string(),
            ..BranchConfig::default()
        };
        let name = branch_name(&issue("ABC-7", "Add dark mode"), &config).unwrap();
        assert_eq!(name, "feature/ABC-7-add-dark-mode");
    }

    #[test]
    fn test_branch_name_truncates_on_word_boundary() {
        let config = BranchConfig {
            max_len: 20,
            ..BranchConfig::default()
        };
        let name = branch_name(
            &issue("PROJ-1", "Refactor parser for better error messages"),
            &config,
        )
        .unwrap();
        assert_eq!(name, "PROJ-1-refactor");
        assert!(name.len() <= 20);
    }

    #[test]
    fn test_branch_name_empty_slug_or_no_budget() {
        assert_eq!(branch_name(&issue("PROJ-9", "!!!"), &BranchConfig::default()).unwrap(), "PROJ-9");

        let tight = BranchConfig {
            max_len: 4,
            ..BranchConfig::default()
        };
        assert_eq!(branch_name(&issue("PROJ-9", "title"), &tight).unwrap(), "PROJ-9");
    }

    #[test]
    fn test_branch_name_rejects_bad_keys() {
        assert!(branch_name(&issue("  ", "title"), &BranchConfig::default()).is_err());
        assert!(branch_name(&issue("bad key", "title"), &BranchConfig::default()).is_err());
        assert!(branch_name(&issue("a..b", "title"), &BranchConfig::default()).is_err());
    }
}
