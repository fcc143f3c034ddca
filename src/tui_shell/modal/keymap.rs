use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::AuthScreen;

use super::super::{ConfirmedAction, Modal, ModalKind, TextInputAction};

pub(super) enum ModalAction {
    None,
    Close,
    DismissPrompt,
    ChooseAuth(AuthScreen),
    Confirm(ConfirmedAction),
    SubmitTextInput {
        action: TextInputAction,
        value: String,
    },
}

pub(super) fn map_modal_key(modal: &mut Modal, key: KeyEvent) -> ModalAction {
    match &modal.kind {
        ModalKind::LoginPrompt => match key.code {
            KeyCode::Esc => ModalAction::DismissPrompt,
            KeyCode::Char(c) => ModalAction::from_prompt_key(c),
            _ => ModalAction::None,
        },

        ModalKind::TextInput { action, .. } => {
            let action = *action;
            match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => {
                    // Passwords are taken verbatim.
                    let value = if action.masked() {
                        modal.input.buf.clone()
                    } else {
                        modal.input.buf.trim().to_string()
                    };
                    if value.is_empty() && !action.allows_empty() {
                        append_modal_error(modal, "value required".to_string());
                        return ModalAction::None;
                    }
                    ModalAction::SubmitTextInput { action, value }
                }
                _ => {
                    apply_input_edit_key(modal, key);
                    ModalAction::None
                }
            }
        }

        ModalKind::ConfirmAction { action } => match key.code {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Enter => ModalAction::Confirm(*action),
            _ => handle_scroll_key(modal, key),
        },
    }
}

fn handle_scroll_key(modal: &mut Modal, key: KeyEvent) -> ModalAction {
    match key.code {
        KeyCode::Up => {
            modal.scroll = modal.scroll.saturating_sub(1);
            ModalAction::None
        }
        KeyCode::Down => {
            if modal.scroll < modal.lines.len().saturating_sub(1) {
                modal.scroll += 1;
            }
            ModalAction::None
        }
        _ => ModalAction::None,
    }
}

fn apply_input_edit_key(modal: &mut Modal, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => modal.input.backspace(),
        KeyCode::Delete => modal.input.delete(),
        KeyCode::Left => modal.input.move_left(),
        KeyCode::Right => modal.input.move_right(),
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT)
            {
                modal.input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn append_modal_error(modal: &mut Modal, msg: String) {
    modal.lines.retain(|l| !l.starts_with("error:"));
    modal.lines.push(format!("error: {}", msg));
}

#[cfg(test)]
mod tests {
    use super::super::super::input::Input;
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn text_modal(action: TextInputAction) -> Modal {
        Modal {
            title: "t".to_string(),
            lines: Vec::new(),
            scroll: 0,
            kind: ModalKind::TextInput {
                action,
                prompt: "> ".to_string(),
            },
            input: Input::default(),
        }
    }

    #[test]
    fn login_prompt_keys_map_to_gate_actions() {
        let mut m = Modal {
            title: "Login required".to_string(),
            lines: Vec::new(),
            scroll: 0,
            kind: ModalKind::LoginPrompt,
            input: Input::default(),
        };
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Char('l'))),
            ModalAction::ChooseAuth(AuthScreen::Login)
        ));
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Char('u'))),
            ModalAction::ChooseAuth(AuthScreen::Signup)
        ));
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Esc)),
            ModalAction::DismissPrompt
        ));
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Char('x'))),
            ModalAction::None
        ));
    }

    #[test]
    fn required_field_rejects_empty_submit() {
        let mut m = text_modal(TextInputAction::LoginEmail);
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Enter)),
            ModalAction::None
        ));
        assert_eq!(m.lines, vec!["error: value required".to_string()]);

        for c in " ada@example.com ".chars() {
            map_modal_key(&mut m, key(KeyCode::Char(c)));
        }
        match map_modal_key(&mut m, key(KeyCode::Enter)) {
            ModalAction::SubmitTextInput { action, value } => {
                assert_eq!(action, TextInputAction::LoginEmail);
                assert_eq!(value, "ada@example.com");
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn password_is_submitted_untrimmed() {
        let mut m = text_modal(TextInputAction::LoginPassword);
        for c in " pw ".chars() {
            map_modal_key(&mut m, key(KeyCode::Char(c)));
        }
        match map_modal_key(&mut m, key(KeyCode::Enter)) {
            ModalAction::SubmitTextInput { value, .. } => assert_eq!(value, " pw "),
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn confirm_modal_scrolls_then_confirms() {
        let mut m = Modal {
            title: "Delete account".to_string(),
            lines: vec!["a".to_string(), "b".to_string()],
            scroll: 0,
            kind: ModalKind::ConfirmAction {
                action: ConfirmedAction::DeleteAccount,
            },
            input: Input::default(),
        };
        map_modal_key(&mut m, key(KeyCode::Down));
        map_modal_key(&mut m, key(KeyCode::Down));
        assert_eq!(m.scroll, 1);
        map_modal_key(&mut m, key(KeyCode::Up));
        assert_eq!(m.scroll, 0);
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Enter)),
            ModalAction::Confirm(ConfirmedAction::DeleteAccount)
        ));
        assert!(matches!(
            map_modal_key(&mut m, key(KeyCode::Esc)),
            ModalAction::Close
        ));
    }
}
