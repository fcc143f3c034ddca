use std::path::PathBuf;

use anyhow::Result;

use crate::settings::BackendOverrides;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub data_dir: Option<PathBuf>,
    pub overrides: BackendOverrides,
}

pub fn run() -> Result<()> {
    crate::tui_shell::run()
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
