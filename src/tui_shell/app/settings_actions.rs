use super::super::views::SettingsItem;
use super::*;

impl App {
    pub(super) fn activate_setting(&mut self) {
        let Some(item) = self.current_view::<SettingsView>().map(|v| v.selected_item()) else {
            return;
        };
        match item {
            SettingsItem::Theme => self.toggle_theme(),
            SettingsItem::Notifications => {
                let mut prefs = self.prefs;
                prefs.notifications = !prefs.notifications;
                let label = if prefs.notifications { "on" } else { "off" };
                self.save_preferences(prefs, format!("notifications {}", label));
            }
            SettingsItem::DeleteAccount => {
                let email = self
                    .client
                    .current_session()
                    .map(|s| s.email.clone())
                    .unwrap_or_default();
                self.open_confirm_modal(
                    "Delete account",
                    ConfirmedAction::DeleteAccount,
                    vec![
                        format!("Permanently delete the account {}?", email),
                        "Progress and quiz history are removed. This cannot be undone."
                            .to_string(),
                    ],
                );
            }
        }
    }

    pub(in crate::tui_shell) fn toggle_theme(&mut self) {
        let mut prefs = self.prefs;
        prefs.theme = prefs.theme.toggle();
        self.save_preferences(prefs, format!("theme: {}", prefs.theme.label()));
    }

    fn save_preferences(&mut self, prefs: Preferences, done: String) {
        if let Err(err) = self.store.set_preferences(prefs) {
            self.push_error(format!("save preferences: {:#}", err));
            return;
        }
        self.prefs = prefs;
        if let Some(v) = self.current_view_mut::<SettingsView>() {
            v.prefs = prefs;
        }
        self.push_output(vec![done]);
    }

    pub(in crate::tui_shell) fn execute_confirmed(&mut self, action: ConfirmedAction) {
        match action {
            ConfirmedAction::DeleteAccount => {
                if let Err(err) = self.client.delete_account() {
                    self.push_error(format!("{:#}", err));
                }
            }
        }
    }
}
