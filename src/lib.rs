pub mod backend;
pub mod catalog;
pub mod client;
pub mod gate;
pub mod logging;
pub mod model;
pub mod observe;
pub mod redirect;
pub mod router;
pub mod session;
pub mod settings;
pub mod store;
pub mod tui;

mod tui_shell;
