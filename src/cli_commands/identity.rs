use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    /// Read from stdin when omitted
    #[arg(long)]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct SignupArgs {
    #[arg(long)]
    pub(crate) email: String,
    /// Read from stdin when omitted
    #[arg(long)]
    pub(crate) password: Option<String>,
    /// Display name
    #[arg(long)]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct OauthArgs {
    /// google or github
    pub(crate) provider: String,
}

#[derive(Args)]
pub(crate) struct RedirectArgs {
    /// Full address including query and fragment
    pub(crate) url: String,
}

#[derive(Args)]
pub(crate) struct DeleteAccountArgs {
    /// Required; deletion cannot be undone
    #[arg(long)]
    pub(crate) yes: bool,
}
