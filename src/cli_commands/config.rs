use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the stored configuration
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Store the given --url, --anon-key and --redirect-to, plus timeouts
    Set {
        /// Upper bound for the startup session check
        #[arg(long = "session-timeout-secs")]
        session_timeout_secs: Option<u64>,
        /// Per-request timeout for the hosted service
        #[arg(long = "http-timeout-secs")]
        http_timeout_secs: Option<u64>,
    },
}
