use std::any::Any;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::catalog::format_category;
use crate::model::{Course, Screen};

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};
use super::load_error;

const FEATURED: usize = 3;

#[derive(Debug)]
pub(in crate::tui_shell) struct HomeView {
    updated_at: String,
    greeting: Option<String>,
    featured: Vec<Course>,
    error: Option<String>,
    selected: usize,
}

impl HomeView {
    /// Placeholder drawn before the startup session check resolves.
    pub(in crate::tui_shell) fn loading() -> Self {
        Self {
            updated_at: now_ts(),
            greeting: None,
            featured: Vec::new(),
            error: None,
            selected: 0,
        }
    }

    pub(in crate::tui_shell) fn new(greeting: Option<String>, courses: Result<Vec<Course>>) -> Self {
        let (mut featured, error) = match courses {
            Ok(c) => (c, None),
            Err(err) => (Vec::new(), Some(load_error(&err))),
        };
        featured.sort_by(|a, b| b.students_enrolled.cmp(&a.students_enrolled));
        featured.truncate(FEATURED);
        Self {
            greeting,
            featured,
            error,
            ..Self::loading()
        }
    }

    #[cfg(test)]
    pub(in crate::tui_shell) fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub(in crate::tui_shell) fn selected_course_id(&self) -> Option<String> {
        self.featured.get(self.selected).map(|c| c.id.clone())
    }
}

impl View for HomeView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Home
    }

    fn title(&self) -> &str {
        "Home"
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let max = self.featured.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    fn hints(&self) -> &'static str {
        "Enter open course"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(inner);

        let hello = match &self.greeting {
            Some(name) => format!("Welcome back, {}!", name),
            None => "Learn new skills with hands-on courses.".to_string(),
        };
        let intro = vec![
            Line::from(Span::styled(
                hello,
                Style::default()
                    .fg(ctx.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Browse the catalog with e, track your progress under p."),
            Line::from(Span::styled(
                "Course pages need an account; log in with l or sign up with u.",
                Style::default().fg(ctx.muted()),
            )),
        ];
        frame.render_widget(Paragraph::new(intro).wrap(Wrap { trim: false }), parts[0]);

        if let Some(err) = &self.error {
            frame.render_widget(Paragraph::new(err.as_str()), parts[1]);
            return;
        }

        let rows: Vec<ListItem> = self
            .featured
            .iter()
            .map(|c| {
                ListItem::new(format!(
                    "{}  [{} | {}]  {} students",
                    c.title,
                    format_category(&c.category),
                    c.difficulty.label(),
                    c.students_enrolled
                ))
            })
            .collect();
        let mut state = ListState::default();
        if !rows.is_empty() {
            state.select(Some(self.selected.min(rows.len() - 1)));
        }
        let list = List::new(rows)
            .block(ratatui::widgets::Block::default().title("Popular courses"))
            .highlight_style(Style::default().bg(ctx.muted()));
        frame.render_stateful_widget(list, parts[1], &mut state);
    }
}
