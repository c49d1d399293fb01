//! Permalink command

use libsrclink_core::{
    Forge, LineRange, LinkRef, Permalink, RefKind, RemoteUrl, SrclinkError,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::{Cli, UrlArgs};
use crate::commands::{find_span, read_selection};
use crate::context::{git_error, SrclinkContext};
use crate::opener;
use crate::output::output_success;

#[derive(Serialize)]
struct UrlOutput {
    url: String,
    forge: Forge,
    remote: String,
    git_ref: RefKind,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<LineRange>,
    dirty: bool,
    opened: bool,
}

pub fn run(cli: &Cli, args: UrlArgs) -> Result<(), SrclinkError> {
    let ctx = SrclinkContext::resolve(cli)?;
    let path = ctx.repo.relative_path(&args.file).map_err(git_error)?;

    let lines = match read_selection(&args.selection)? {
        Some(text) => {
            let content = std::fs::read_to_string(&args.file)?;
            let span = find_span(&args.file, &content, &text, args.line)?;
            debug!(%span, "Selection located");
            Some(LineRange::from(span))
        }
        None => match args.line {
            Some(start) => Some(LineRange::new(start, args.end_line.unwrap_or(start))?),
            None => None,
        },
    };

    let remote_name = args.remote.as_deref().unwrap_or(ctx.config.remote()).to_string();
    let remote = RemoteUrl::parse(&ctx.repo.remote_url(&remote_name).map_err(git_error)?)?;
    let forge = ctx.config.forge_for(&remote.host);

    let link_ref = if args.branch {
        LinkRef::Branch
    } else {
        ctx.config.link_ref()
    };
    let git_ref = match link_ref {
        LinkRef::Commit => RefKind::Commit(ctx.repo.head_commit().map_err(git_error)?),
        LinkRef::Branch => {
            let branch = ctx.repo.current_branch().map_err(git_error)?.ok_or_else(|| {
                SrclinkError::InvalidArgs(
                    "HEAD is detached; link to the commit instead".to_string(),
                )
            })?;
            RefKind::Branch(branch)
        }
    };

    let dirty = ctx.repo.is_dirty(&path).unwrap_or(false);
    if dirty {
        warn!(path = %path, "File has uncommitted changes; line numbers may not match the remote");
    }

    let url = Permalink::new(forge, &remote, git_ref.clone(), &path)
        .with_lines(lines)
        .to_url();

    if args.open {
        opener::open_url(&url)?;
    }

    let human = url.clone();
    output_success(
        cli,
        UrlOutput {
            url,
            forge,
            remote: remote_name,
            git_ref,
            path,
            lines,
            dirty,
            opened: args.open,
        },
        &human,
    )
}
