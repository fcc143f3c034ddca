use std::any::Any;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::catalog::ContactDraft;
use crate::model::Screen;

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};

#[derive(Debug)]
pub(in crate::tui_shell) struct ContactView {
    updated_at: String,
    pub(in crate::tui_shell) draft: ContactDraft,
    pub(in crate::tui_shell) sent: bool,
}

impl ContactView {
    pub(in crate::tui_shell) fn new(draft: ContactDraft) -> Self {
        Self {
            updated_at: now_ts(),
            draft,
            sent: false,
        }
    }
}

impl View for ContactView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Contact
    }

    fn title(&self) -> &str {
        "Contact us"
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        "Enter write a message"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let field = |label: &str, value: &str, fallback: &str| {
            let (text, style) = if value.trim().is_empty() {
                (fallback.to_string(), Style::default().fg(ctx.muted()))
            } else {
                (value.to_string(), Style::default())
            };
            Line::from(vec![
                Span::styled(format!("{: <9}", label), Style::default().fg(ctx.accent())),
                Span::styled(text, style),
            ])
        };

        let mut lines = vec![
            Line::from("Questions about a course or your account? Send us a note."),
            Line::from(""),
            field("Name", &self.draft.name, "(anonymous)"),
            field("Email", &self.draft.email, "(none)"),
            field("Message", &self.draft.message, "(empty)"),
        ];
        if self.draft.identity_locked() {
            lines.push(Line::from(Span::styled(
                "Name and email come from your account.",
                Style::default().fg(ctx.muted()),
            )));
        }
        if self.sent {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Thanks! We will get back to you soon.",
                Style::default().fg(Color::Green),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
