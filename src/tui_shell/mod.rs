use anyhow::Result;

mod app;

mod input;
mod modal;
mod view;
mod views;
mod wizard;

// Make core TUI types/helpers available to submodules via `super::...`.
use app::{App, ConfirmedAction, Modal, ModalKind, TextInputAction, fmt_since, fmt_ts_ui};
use view::{RenderCtx, View, render_view_chrome};

pub fn run() -> Result<()> {
    run_with_options(crate::tui::TuiRunOptions::default())
}

pub fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
