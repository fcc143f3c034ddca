use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ConfirmedAction {
    DeleteAccount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum TextInputAction {
    LoginEmail,
    LoginPassword,
    SignupName,
    SignupEmail,
    SignupPassword,
    OauthRedirect,
    ExploreSearch,
    ContactName,
    ContactEmail,
    ContactMessage,
}

impl TextInputAction {
    pub(in crate::tui_shell) fn masked(self) -> bool {
        matches!(
            self,
            TextInputAction::LoginPassword | TextInputAction::SignupPassword
        )
    }

    pub(in crate::tui_shell) fn allows_empty(self) -> bool {
        matches!(
            self,
            TextInputAction::ExploreSearch
                | TextInputAction::ContactName
                | TextInputAction::ContactEmail
                | TextInputAction::ContactMessage
        )
    }
}

#[derive(Debug)]
pub(in crate::tui_shell) enum ModalKind {
    /// Shown while a gated navigation waits for a login.
    LoginPrompt,
    ConfirmAction {
        action: ConfirmedAction,
    },
    TextInput {
        action: TextInputAction,
        prompt: String,
    },
}

#[derive(Debug)]
pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) input: Input,
}
