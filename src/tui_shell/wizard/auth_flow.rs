use tracing::warn;

use crate::model::{Provider, Screen};
use crate::redirect::{Location, RedirectOutcome};

use super::super::TextInputAction;
use super::super::views::AuthView;
use super::AuthWizard;

impl super::super::App {
    pub(in crate::tui_shell) fn start_login_wizard(&mut self) {
        let email = self.current_view::<AuthView>().and_then(|v| v.email.clone());
        self.auth_wizard = Some(AuthWizard::Login { email: None });
        self.open_text_input_modal(
            "Log in",
            "email> ",
            TextInputAction::LoginEmail,
            email,
            vec!["Email address of your account.".to_string()],
        );
    }

    pub(in crate::tui_shell) fn start_signup_wizard(&mut self) {
        self.auth_wizard = Some(AuthWizard::Signup {
            name: None,
            email: None,
        });
        self.open_text_input_modal(
            "Sign up",
            "name> ",
            TextInputAction::SignupName,
            None,
            vec!["Your full name, shown on your profile.".to_string()],
        );
    }

    pub(in crate::tui_shell) fn start_oauth(&mut self, provider: Provider) {
        let url = match self.client.sign_in_with_provider(provider) {
            Ok(url) => url,
            Err(err) => {
                self.push_error(format!("{:#}", err));
                return;
            }
        };
        self.auth_wizard = Some(AuthWizard::Oauth { provider });
        self.open_text_input_modal(
            format!("Continue with {}", provider.label()),
            "address> ",
            TextInputAction::OauthRedirect,
            None,
            vec![
                "Open this URL in your browser and sign in:".to_string(),
                url,
                "".to_string(),
                "Then paste the address the browser was sent back to.".to_string(),
            ],
        );
    }

    pub(in crate::tui_shell) fn continue_auth_wizard(
        &mut self,
        action: TextInputAction,
        value: String,
    ) {
        let Some(wizard) = self.auth_wizard.take() else {
            self.push_error("no login in progress".to_string());
            return;
        };

        match (wizard, action) {
            (AuthWizard::Login { .. }, TextInputAction::LoginEmail) => {
                self.auth_wizard = Some(AuthWizard::Login {
                    email: Some(value.clone()),
                });
                self.open_text_input_modal(
                    "Log in",
                    "password> ",
                    TextInputAction::LoginPassword,
                    None,
                    vec![format!("Password for {}.", value)],
                );
            }
            (
                AuthWizard::Login {
                    email: Some(email),
                },
                TextInputAction::LoginPassword,
            ) => {
                if self.client.sign_in(&email, &value).is_err() {
                    self.show_auth_error(Some(email));
                }
            }

            (AuthWizard::Signup { .. }, TextInputAction::SignupName) => {
                self.auth_wizard = Some(AuthWizard::Signup {
                    name: Some(value),
                    email: None,
                });
                self.open_text_input_modal(
                    "Sign up",
                    "email> ",
                    TextInputAction::SignupEmail,
                    None,
                    vec!["Email address to sign in with.".to_string()],
                );
            }
            (AuthWizard::Signup { name, .. }, TextInputAction::SignupEmail) => {
                self.auth_wizard = Some(AuthWizard::Signup {
                    name,
                    email: Some(value),
                });
                self.open_text_input_modal(
                    "Sign up",
                    "password> ",
                    TextInputAction::SignupPassword,
                    None,
                    vec!["Choose a password (at least 6 characters).".to_string()],
                );
            }
            (
                AuthWizard::Signup {
                    name: Some(name),
                    email: Some(email),
                },
                TextInputAction::SignupPassword,
            ) => {
                if self.client.sign_up(&email, &value, &name).is_err() {
                    self.show_auth_error(Some(email));
                }
            }

            (AuthWizard::Oauth { provider }, TextInputAction::OauthRedirect) => {
                let mut location = match Location::parse(&value) {
                    Ok(l) => l,
                    Err(err) => {
                        self.push_error(format!("{:#}", err));
                        return;
                    }
                };
                match self.client.complete_redirect(&mut location) {
                    RedirectOutcome::SignedIn(_) => {}
                    RedirectOutcome::NotApplicable => self.push_error(format!(
                        "no {} sign-in data in that address",
                        provider.label()
                    )),
                    RedirectOutcome::Failed(_) => self.show_auth_error(None),
                }
            }

            (wizard, action) => {
                warn!(?wizard, ?action, "auth wizard out of step");
                self.push_error("login flow interrupted; start again".to_string());
            }
        }
    }

    /// A failed attempt keeps the auth screen; redraw it with the error.
    fn show_auth_error(&mut self, email: Option<String>) {
        if !matches!(self.view().screen(), Screen::Login | Screen::Signup) {
            return;
        }
        self.rebuild_view();
        if let Some(v) = self.current_view_mut::<AuthView>() {
            v.email = email;
        }
    }
}
