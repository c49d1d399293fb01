//! Permalink construction for each supported forge

use serde::Serialize;

use crate::types::forge::{Forge, RemoteUrl};
use crate::types::span::LineRange;

/// What the link points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum RefKind {
    Commit(String),
    Branch(String),
}

impl RefKind {
    pub fn name(&self) -> &str {
        match self {
            RefKind::Commit(name) | RefKind::Branch(name) => name,
        }
    }
}

/// A link to a file (and optionally a line range) on a forge
#[derive(Debug, Clone, Serialize)]
pub struct Permalink {
    pub forge: Forge,
    pub web_base: String,
    pub git_ref: RefKind,
    /// Repository-relative path, `/`-separated
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineRange>,
}

impl Permalink {
    pub fn new(forge: Forge, remote: &RemoteUrl, git_ref: RefKind, path: &str) -> Self {
        Self {
            forge,
            web_base: remote.web_base(),
            git_ref,
            path: path.replace('\\', "/").trim_start_matches('/').to_string(),
            lines: None,
        }
    }

    pub fn with_lines(mut self, lines: Option<LineRange>) -> Self {
        self.lines = lines;
        self
    }

    pub fn to_url(&self) -> String {
        let git_ref = encode_path(self.git_ref.name());
        let path = encode_path(&self.path);
        let mut url = match (self.forge, &self.git_ref) {
            (Forge::GitHub, _) => format!("{}/blob/{}/{}", self.web_base, git_ref, path),
            (Forge::GitLab, _) => format!("{}/-/blob/{}/{}", self.web_base, git_ref, path),
            (Forge::Bitbucket, _) => format!("{}/src/{}/{}", self.web_base, git_ref, path),
            (Forge::Gitea, RefKind::Commit(_)) => {
                format!("{}/src/commit/{}/{}", self.web_base, git_ref, path)
            }
            (Forge::Gitea, RefKind::Branch(_)) => {
                format!("{}/src/branch/{}/{}", self.web_base, git_ref, path)
            }
        };
        if let Some(lines) = self.lines {
            url.push_str(&line_fragment(self.forge, lines));
        }
        url
    }
}

/// `#L<start>-L<end>` and the per-forge variants of it
pub fn line_fragment(forge: Forge, lines: LineRange) -> String {
    let (start, end) = (lines.start, lines.end);
    match forge {
        Forge::GitHub | Forge::Gitea if lines.is_single() => format!("#L{}", start),
        Forge::GitHub | Forge::Gitea => format!("#L{}-L{}", start, end),
        Forge::GitLab if lines.is_single() => format!("#L{}", start),
        Forge::GitLab => format!("#L{}-{}", start, end),
        Forge::Bitbucket if lines.is_single() => format!("#lines-{}", start),
        Forge::Bitbucket => format!("#lines-{}:{}", start, end),
    }
}

/// Percent-encode everything except unreserved characters and `/`
fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    fn link(forge: Forge, remote: &str, git_ref: RefKind, lines: Option<LineRange>) -> String {
        let remote = RemoteUrl::parse(remote).unwrap();
        Permalink::new(forge, &remote, git_ref, "src/main.rs")
            .with_lines(lines)
            .to_url()
    }

    #[test]
    fn test_github_range() {
        let url = link(
            Forge::GitHub,
            "git@github.com:owner/repo.git",
            RefKind::Commit(SHA.to_string()),
            Some(LineRange::new(10, 12).unwrap()),
        );
        assert_eq!(
            url,
            format!("https://github.com/owner/repo/blob/{}/src/main.rs#L10-L12", SHA)
        );
    }

    #[test]
    fn test_gitlab_single_line_and_range() {
        let single = link(
            Forge::GitLab,
            "https://gitlab.com/group/project.git",
            RefKind::Branch("main".to_string()),
            Some(LineRange::single(5).unwrap()),
        );
        assert_eq!(single, "https://gitlab.com/group/project/-/blob/main/src/main.rs#L5");

        let range = line_fragment(Forge::GitLab, LineRange::new(5, 9).unwrap());
        assert_eq!(range, "#L5-9");
    }

    #[test]
    fn test_bitbucket_fragment() {
        let url = link(
            Forge::Bitbucket,
            "git@bitbucket.org:team/repo.git",
            RefKind::Commit(SHA.to_string()),
            Some(LineRange::new(3, 4).unwrap()),
        );
        assert_eq!(
            url,
            format!("https://bitbucket.org/team/repo/src/{}/src/main.rs#lines-3:4", SHA)
        );
    }

    #[test]
    fn test_gitea_ref_kinds() {
        let branch = link(
            Forge::Gitea,
            "https://codeberg.org/owner/repo",
            RefKind::Branch("feature/x".to_string()),
            None,
        );
        assert_eq!(branch, "https://codeberg.org/owner/repo/src/branch/feature/x/src/main.rs");

        let commit = link(
            Forge::Gitea,
            "https://codeberg.org/owner/repo",
            RefKind::Commit(SHA.to_string()),
            None,
        );
        assert!(commit.contains("/src/commit/"));
    }

    #[test]
    fn test_path_is_encoded() {
        let remote = RemoteUrl::parse("https://github.com/o/r").unwrap();
        let url = Permalink::new(
            Forge::GitHub,
            &remote,
            RefKind::Branch("main".to_string()),
            "docs\\my notes#1.md",
        )
        .to_url();
        assert_eq!(url, "https://github.com/o/r/blob/main/docs/my%20notes%231.md");
    }
}
