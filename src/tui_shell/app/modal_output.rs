use super::*;

/// Kept for the session; only the newest entry is drawn.
const LOG_LIMIT: usize = 200;

pub(super) const LOGIN_PROMPT_MESSAGE: &str = "Please log in or sign up to access this course.";

impl App {
    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        let entry = ScrollEntry {
            ts: now_ts(),
            kind,
            lines,
        };
        if self.log.len() >= LOG_LIMIT {
            self.log.remove(0);
        }
        self.log.push(entry.clone());
        self.last_result = Some(entry);
    }

    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, msg: String) {
        self.push_entry(EntryKind::Error, vec![msg]);
    }

    pub(super) fn last_result(&self) -> Option<&ScrollEntry> {
        self.last_result.as_ref()
    }

    pub(super) fn open_login_prompt(&mut self) {
        self.auth_wizard = None;
        self.modal = Some(Modal {
            title: "Login required".to_string(),
            lines: vec![
                LOGIN_PROMPT_MESSAGE.to_string(),
                "".to_string(),
                "l: log in   u: sign up   Esc: not now".to_string(),
            ],
            scroll: 0,
            kind: ModalKind::LoginPrompt,
            input: Input::default(),
        });
    }

    pub(super) fn open_confirm_modal(
        &mut self,
        title: impl Into<String>,
        action: ConfirmedAction,
        mut lines: Vec<String>,
    ) {
        lines.push("".to_string());
        lines.push("Enter to confirm; Esc to cancel.".to_string());
        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::ConfirmAction { action },
            input: Input::default(),
        });
    }

    pub(in crate::tui_shell) fn open_text_input_modal(
        &mut self,
        title: impl Into<String>,
        prompt: impl Into<String>,
        action: TextInputAction,
        initial: Option<String>,
        mut lines: Vec<String>,
    ) {
        lines.push("".to_string());
        lines.push("Enter to continue; Esc to cancel.".to_string());

        let mut input = Input::default();
        if let Some(s) = initial {
            input.set(s);
        }

        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::TextInput {
                action,
                prompt: prompt.into(),
            },
            input,
        });
    }

    pub(in crate::tui_shell) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        self.modal = None;
    }
}
