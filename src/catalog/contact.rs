use anyhow::Result;

use crate::model::{ContactMessage, Session};

pub const EMPTY_MESSAGE_ERROR: &str = "Please enter a message.";

/// Contact form contents. Name and email come from the session when there
/// is one and cannot be edited then.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    locked: bool,
}

impl ContactDraft {
    pub fn prefill(session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self {
                name: s.display_name.clone().unwrap_or_default(),
                email: s.email.clone(),
                message: String::new(),
                locked: true,
            },
            None => Self::default(),
        }
    }

    pub fn identity_locked(&self) -> bool {
        self.locked
    }

    pub fn set_name(&mut self, name: &str) {
        if !self.locked {
            self.name = name.to_string();
        }
    }

    pub fn set_email(&mut self, email: &str) {
        if !self.locked {
            self.email = email.to_string();
        }
    }

    pub fn validate(&self) -> Result<ContactMessage> {
        let message = self.message.trim();
        if message.is_empty() {
            anyhow::bail!(EMPTY_MESSAGE_ERROR);
        }
        let or = |v: &str, fallback: &str| {
            let v = v.trim();
            if v.is_empty() { fallback.to_string() } else { v.to_string() }
        };
        Ok(ContactMessage {
            name: or(&self.name, "Anonymous User"),
            email: or(&self.email, "guest"),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_is_rejected() {
        let draft = ContactDraft {
            message: "  ".to_string(),
            ..ContactDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), EMPTY_MESSAGE_ERROR);
    }

    #[test]
    fn guests_get_placeholder_identity() {
        let mut draft = ContactDraft::prefill(None);
        draft.message = "Hello".to_string();
        let msg = draft.validate().unwrap();
        assert_eq!(msg.name, "Anonymous User");
        assert_eq!(msg.email, "guest");
        assert_eq!(msg.message, "Hello");
    }

    #[test]
    fn session_identity_is_locked() {
        let session = Session {
            subject_id: "u".to_string(),
            email: "ada@example.com".to_string(),
            display_name: Some("Ada".to_string()),
        };
        let mut draft = ContactDraft::prefill(Some(&session));
        draft.set_email("other@example.com");
        draft.set_name("Eve");
        draft.message = "Hi".to_string();

        assert!(draft.identity_locked());
        let msg = draft.validate().unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
    }
}
