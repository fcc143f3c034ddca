pub(super) mod auth;
pub(super) mod contact;
pub(super) mod course;
pub(super) mod explore;
pub(super) mod home;
pub(super) mod profile;
pub(super) mod quiz;
pub(super) mod settings;

pub(in crate::tui_shell) use auth::AuthView;
pub(in crate::tui_shell) use contact::ContactView;
pub(in crate::tui_shell) use course::{CourseItem, CourseView, LessonView};
pub(in crate::tui_shell) use explore::ExploreView;
pub(in crate::tui_shell) use home::HomeView;
pub(in crate::tui_shell) use profile::ProfileView;
pub(in crate::tui_shell) use quiz::QuizView;
pub(in crate::tui_shell) use settings::{SettingsItem, SettingsView};

/// Error text for a view whose data failed to load.
fn load_error(err: &anyhow::Error) -> String {
    format!("could not load: {:#}", err)
}
