//! Repository configuration commands

use libsrclink_core::config::repo_config_path;
use libsrclink_core::{load_repo_config, save_repo_config, RepoConfig, SrclinkError};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, ConfigCommand};
use crate::context::SrclinkContext;
use crate::output::output_success;

#[derive(Serialize)]
struct ConfigOutput {
    path: String,
    config: RepoConfig,
}

pub fn run(cli: &Cli, cmd: ConfigCommand) -> Result<(), SrclinkError> {
    match cmd {
        ConfigCommand::Show => show(cli),
        ConfigCommand::Set { key, value } => set(cli, key, value),
    }
}

fn show(cli: &Cli) -> Result<(), SrclinkError> {
    let ctx = SrclinkContext::resolve(cli)?;
    let path = repo_config_path(&ctx.git_dir()).display().to_string();

    let human = format!(
        "remote = {}\nlink_ref = {}\nbranch.prefix = {:?}\nbranch.max_len = {}{}",
        ctx.config.remote(),
        ctx.config.link_ref(),
        ctx.config.branch.prefix,
        ctx.config.branch.max_len,
        ctx.config
            .forges
            .iter()
            .map(|(host, forge)| format!("\nforges.{} = {}", host, forge))
            .collect::<String>(),
    );
    output_success(cli, ConfigOutput { path, config: ctx.config }, &human)
}

fn set(cli: &Cli, key: String, value: String) -> Result<(), SrclinkError> {
    let git_dir = SrclinkContext::resolve(cli)?.git_dir();
    let mut config = load_repo_config(&git_dir)?.unwrap_or_default();
    config.set(&key, &value)?;
    save_repo_config(&git_dir, &config)?;
    info!(key = %key, value = %value, "Updated config");

    let path = repo_config_path(&git_dir).display().to_string();
    let human = format!("{} = {}", key, value);
    output_success(cli, ConfigOutput { path, config }, &human)
}
