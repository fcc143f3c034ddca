use anyhow::{Context, Result};

use academy::client::{Client, NoticeLevel};
use academy::store::LocalStore;

use crate::cli_runtime::Invocation;
use crate::{Commands, ConfigCommands};

mod catalog;
mod config;
mod dispatch;
mod identity;
mod session;

pub(super) fn handle_command(inv: &Invocation, command: Commands) -> Result<()> {
    dispatch::handle_command(inv, command)
}
