use crossterm::event::KeyEvent;

use crate::model::AuthScreen;

use self::keymap::{ModalAction, map_modal_key};

mod draw;
mod keymap;

pub(super) use self::draw::draw_modal;

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    let action = {
        let Some(m) = app.modal_mut() else {
            return;
        };
        map_modal_key(m, key)
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => {
            app.close_modal();
            app.auth_wizard = None;
        }
        ModalAction::DismissPrompt => app.dismiss_prompt(),
        ModalAction::ChooseAuth(which) => app.choose_from_prompt(which),
        ModalAction::Confirm(action) => {
            app.close_modal();
            app.execute_confirmed(action);
        }
        ModalAction::SubmitTextInput { action, value } => {
            app.close_modal();
            app.submit_text_input(action, value);
        }
    }
}

impl ModalAction {
    fn from_prompt_key(c: char) -> Self {
        match c {
            'l' => ModalAction::ChooseAuth(AuthScreen::Login),
            'u' => ModalAction::ChooseAuth(AuthScreen::Signup),
            _ => ModalAction::None,
        }
    }
}
