mod cli;
mod commands;
mod context;
mod opener;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use libsrclink_core::SrclinkError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `SRCLINK_LOG=debug`
const LOG_ENV: &str = "SRCLINK_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = run_command(&cli);

    if let Err(e) = result {
        output::output_error(&cli, &e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_command(cli: &Cli) -> Result<(), SrclinkError> {
    match &cli.command {
        Command::Locate { file, selection, line } => {
            commands::locate::run(cli, file.clone(), selection.clone(), *line)
        }
        Command::Url(args) => commands::url::run(cli, args.clone()),
        Command::Branch { key, title, create, checkout } => {
            commands::branch::run(cli, key.clone(), title.clone(), *create, *checkout)
        }
        Command::Config { cmd } => commands::config::run(cli, cmd.clone()),
    }
}
