use std::any::Any;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::{AuthScreen, Screen};

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};

/// Login and sign-up screens; input happens in modals.
#[derive(Debug)]
pub(in crate::tui_shell) struct AuthView {
    updated_at: String,
    which: AuthScreen,
    pub(in crate::tui_shell) email: Option<String>,
    error: Option<String>,
    /// Title of the screen that opens after a successful login.
    resumes: Option<String>,
}

impl AuthView {
    pub(in crate::tui_shell) fn new(
        which: AuthScreen,
        error: Option<String>,
        resumes: Option<String>,
    ) -> Self {
        Self {
            updated_at: now_ts(),
            which,
            email: None,
            error,
            resumes,
        }
    }
}

impl View for AuthView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        self.which.screen()
    }

    fn title(&self) -> &str {
        match self.which {
            AuthScreen::Login => "Log in",
            AuthScreen::Signup => "Sign up",
        }
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        match self.which {
            AuthScreen::Login => "Enter log in  g Google  G GitHub",
            AuthScreen::Signup => "Enter sign up  g Google  G GitHub",
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);

        let (headline, fields, switch) = match self.which {
            AuthScreen::Login => (
                "Welcome back",
                vec!["Email", "Password"],
                "No account yet? Press u to sign up.",
            ),
            AuthScreen::Signup => (
                "Create your account",
                vec!["Full name", "Email", "Password"],
                "Already registered? Press l to log in.",
            ),
        };

        let mut lines = vec![
            Line::from(Span::styled(
                headline,
                Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for f in fields {
            let value = match (f, &self.email) {
                ("Email", Some(e)) => e.clone(),
                ("Password", _) => "********".to_string(),
                _ => "".to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{: <11}", f), Style::default().fg(ctx.muted())),
                Span::raw(value),
            ]));
        }
        lines.push(Line::from(""));
        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(""));
        }
        if let Some(next) = &self.resumes {
            lines.push(Line::from(Span::styled(
                format!("You will continue to {} after logging in.", next),
                Style::default().fg(ctx.muted()),
            )));
        }
        lines.push(Line::from("Or continue with Google (g) or GitHub (G)."));
        lines.push(Line::from(switch));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
