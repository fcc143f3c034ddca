use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

use academy::settings::BackendOverrides;
use academy::tui::TuiRunOptions;

use crate::Commands;

#[derive(Parser)]
#[command(name = "academy")]
#[command(about = "TechKnots Academy course catalog", long_about = None)]
pub(crate) struct Cli {
    /// Directory for config.json and state.json (default: ~/.academy)
    #[arg(long = "data-dir", value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,

    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BackendArgs {
    /// Hosted service base URL (overrides ACADEMY_BACKEND_URL and config)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Public anon key (overrides ACADEMY_ANON_KEY and config)
    #[arg(long = "anon-key", global = true)]
    anon_key: Option<String>,
    /// Where OAuth logins return to (overrides ACADEMY_REDIRECT_TO and config)
    #[arg(long = "redirect-to", global = true)]
    redirect_to: Option<String>,
}

/// Process-wide options every command handler receives.
pub(crate) struct Invocation {
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) overrides: BackendOverrides,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let inv = Invocation {
        data_dir: cli.data_dir,
        overrides: BackendOverrides {
            url: cli.backend.url,
            anon_key: cli.backend.anon_key,
            redirect_to: cli.backend.redirect_to,
        },
    };

    match cli.command {
        None => {
            academy::tui::run_with_options(TuiRunOptions {
                data_dir: inv.data_dir,
                overrides: inv.overrides,
            })?;
        }
        Some(command) => {
            academy::logging::init_stderr();
            crate::cli_exec::handle_command(&inv, command)?
        }
    }

    Ok(())
}
