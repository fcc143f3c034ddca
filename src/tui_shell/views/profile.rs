use std::any::Any;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use crate::catalog::ProfileSummary;
use crate::model::Screen;

use super::super::app::now_ts;
use super::super::{RenderCtx, View, fmt_since, render_view_chrome};
use super::load_error;

#[derive(Debug)]
pub(in crate::tui_shell) struct ProfileView {
    updated_at: String,
    summary: Option<ProfileSummary>,
    error: Option<String>,
}

impl ProfileView {
    pub(in crate::tui_shell) fn new(summary: Result<ProfileSummary>) -> Self {
        let (summary, error) = match summary {
            Ok(s) => (Some(s), None),
            Err(err) => (None, Some(load_error(&err))),
        };
        Self {
            updated_at: now_ts(),
            summary,
            error,
        }
    }
}

impl View for ProfileView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Profile
    }

    fn title(&self) -> &str {
        "Profile"
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let Some(s) = &self.summary else {
            let msg = self.error.as_deref().unwrap_or("(no profile)");
            frame.render_widget(Paragraph::new(msg), inner);
            return;
        };

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let (name, email, since) = match &s.profile {
            Some(p) => (
                p.full_name.clone().unwrap_or_else(|| "Learner".to_string()),
                p.email.clone(),
                p.created_at
                    .as_deref()
                    .map(|t| format!("member since {}", fmt_since(t, ctx.now))),
            ),
            None => ("Learner".to_string(), String::new(), None),
        };
        let mut head = vec![
            Line::from(Span::styled(
                name,
                Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(email),
        ];
        if let Some(since) = since {
            head.push(Line::from(Span::styled(since, Style::default().fg(ctx.muted()))));
        }
        head.push(Line::from(format!(
            "courses {}   quizzes {}   completed {}/{}",
            s.stats.courses, s.stats.quizzes, s.stats.completed, s.stats.total
        )));
        frame.render_widget(Paragraph::new(head), parts[0]);

        let (you, avg) = s.stats.you_vs_average();
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(ctx.accent()))
                .percent(you.min(100) as u16)
                .label(format!("You {}%", you))
                .block(Block::default().borders(Borders::BOTTOM)),
            parts[1],
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(ctx.muted()))
                .percent(avg.min(100) as u16)
                .label(format!("Average learner {}%", avg))
                .block(Block::default().borders(Borders::BOTTOM)),
            parts[2],
        );

        let mut lines = vec![Line::from(Span::styled(
            "Recent quizzes",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if s.recent_quizzes.is_empty() {
            lines.push(Line::from("  none yet"));
        }
        for a in &s.recent_quizzes {
            lines.push(Line::from(format!(
                "  {}  {}%  {}",
                a.quiz_title.as_deref().unwrap_or(&a.quiz_id),
                a.score,
                fmt_since(&a.completed_at, ctx.now)
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Recent lessons",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if s.recent_lessons.is_empty() {
            lines.push(Line::from("  none yet"));
        }
        for r in &s.recent_lessons {
            lines.push(Line::from(format!(
                "  {}  {}  {}",
                r.lesson_title.as_deref().unwrap_or(&r.lesson_id),
                r.status.label(),
                fmt_since(&r.updated_at, ctx.now)
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[3]);
    }
}
