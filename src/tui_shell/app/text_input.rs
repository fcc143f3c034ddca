use crate::catalog::ContactDraft;

use super::*;

impl App {
    pub(in crate::tui_shell) fn submit_text_input(&mut self, action: TextInputAction, value: String) {
        match action {
            TextInputAction::LoginEmail
            | TextInputAction::LoginPassword
            | TextInputAction::SignupName
            | TextInputAction::SignupEmail
            | TextInputAction::SignupPassword
            | TextInputAction::OauthRedirect => self.continue_auth_wizard(action, value),

            TextInputAction::ExploreSearch => {
                if let Some(v) = self.current_view_mut::<ExploreView>() {
                    v.set_query(&value);
                }
            }

            TextInputAction::ContactName => {
                self.edit_contact(|d| d.set_name(&value));
                self.prompt_contact_field(TextInputAction::ContactEmail);
            }
            TextInputAction::ContactEmail => {
                self.edit_contact(|d| d.set_email(&value));
                self.prompt_contact_field(TextInputAction::ContactMessage);
            }
            TextInputAction::ContactMessage => {
                self.edit_contact(|d| d.message = value);
                self.send_contact();
            }
        }
    }

    fn edit_contact(&mut self, f: impl FnOnce(&mut ContactDraft)) {
        if let Some(v) = self.current_view_mut::<ContactView>() {
            f(&mut v.draft);
        }
    }

    pub(super) fn start_contact_form(&mut self) {
        let locked = self
            .current_view::<ContactView>()
            .is_some_and(|v| v.draft.identity_locked());
        if locked {
            self.prompt_contact_field(TextInputAction::ContactMessage);
        } else {
            self.prompt_contact_field(TextInputAction::ContactName);
        }
    }

    fn prompt_contact_field(&mut self, action: TextInputAction) {
        let Some(draft) = self.current_view::<ContactView>().map(|v| v.draft.clone()) else {
            return;
        };
        let (prompt, initial, hint) = match action {
            TextInputAction::ContactName => (
                "name> ",
                draft.name,
                "Your name (empty sends as Anonymous User).",
            ),
            TextInputAction::ContactEmail => (
                "email> ",
                draft.email,
                "Where we can reply (optional).",
            ),
            _ => ("message> ", draft.message, "How can we help?"),
        };
        self.open_text_input_modal(
            "Contact us",
            prompt,
            action,
            Some(initial),
            vec![hint.to_string()],
        );
    }

    fn send_contact(&mut self) {
        let Some(draft) = self.current_view::<ContactView>().map(|v| v.draft.clone()) else {
            return;
        };
        match self.client.submit_contact(&draft) {
            Ok(()) => {
                let fresh = self.client.contact_draft();
                if let Some(v) = self.current_view_mut::<ContactView>() {
                    v.draft = fresh;
                    v.sent = true;
                }
            }
            Err(err) => {
                warn!("contact message not sent: {:#}", err);
                // Empty-message errors have no notice of their own.
                if draft.message.trim().is_empty() {
                    self.push_error(format!("{:#}", err));
                }
            }
        }
    }
}
