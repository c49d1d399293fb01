//! Branch naming command

use libsrclink_core::{branch_name, BranchConfig, IssueRef, SrclinkError};
use serde::Serialize;
use tracing::debug;

use crate::cli::Cli;
use crate::context::{git_error, SrclinkContext};
use crate::output::output_success;

#[derive(Serialize)]
struct BranchOutput {
    branch: String,
    created: bool,
    checked_out: bool,
}

pub fn run(
    cli: &Cli,
    key: String,
    title: String,
    create: bool,
    checkout: bool,
) -> Result<(), SrclinkError> {
    let create = create || checkout;
    let issue = IssueRef { key, title };

    // Naming only needs the repo for its config, so it also works outside one.
    let ctx = if create {
        Some(SrclinkContext::resolve(cli)?)
    } else {
        match SrclinkContext::resolve(cli) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                debug!(error = %e, "No repository context, using default branch config");
                None
            }
        }
    };

    let default_config = BranchConfig::default();
    let config = ctx.as_ref().map(|c| &c.config.branch).unwrap_or(&default_config);
    let branch = branch_name(&issue, config)?;

    if let Some(ctx) = ctx.as_ref().filter(|_| create) {
        ctx.repo.create_branch(&branch, checkout).map_err(git_error)?;
    }

    let human = branch.clone();
    output_success(
        cli,
        BranchOutput {
            branch,
            created: create,
            checked_out: checkout,
        },
        &human,
    )
}
