use std::any::Any;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::catalog::{ALL_CATEGORIES, CourseFilter, categories, format_category};
use crate::model::{Course, Difficulty, Screen};

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};
use super::load_error;

#[derive(Debug)]
pub(in crate::tui_shell) struct ExploreView {
    updated_at: String,
    courses: Vec<Course>,
    categories: Vec<String>,
    pub(in crate::tui_shell) filter: CourseFilter,
    error: Option<String>,
    selected: usize,
}

impl ExploreView {
    pub(in crate::tui_shell) fn new(courses: Result<Vec<Course>>) -> Self {
        let (courses, error) = match courses {
            Ok(c) => (c, None),
            Err(err) => (Vec::new(), Some(load_error(&err))),
        };
        Self {
            updated_at: now_ts(),
            categories: categories(&courses),
            courses,
            filter: CourseFilter::default(),
            error,
            selected: 0,
        }
    }

    fn visible(&self) -> Vec<&Course> {
        self.filter.apply(&self.courses)
    }

    pub(in crate::tui_shell) fn selected_course_id(&self) -> Option<String> {
        self.visible().get(self.selected).map(|c| c.id.clone())
    }

    pub(in crate::tui_shell) fn cycle_category(&mut self) {
        let current = self.filter.category.as_deref().unwrap_or(ALL_CATEGORIES);
        let idx = self
            .categories
            .iter()
            .position(|c| c == current)
            .unwrap_or(0);
        let next = self
            .categories
            .get((idx + 1) % self.categories.len().max(1))
            .cloned();
        self.filter.category = next.filter(|c| c != ALL_CATEGORIES);
        self.selected = 0;
    }

    /// All, then each level in order, then back to all.
    pub(in crate::tui_shell) fn cycle_difficulty(&mut self) {
        self.filter.difficulty = match self.filter.difficulty {
            None => Some(Difficulty::ALL[0]),
            Some(d) => Difficulty::ALL
                .iter()
                .position(|x| *x == d)
                .and_then(|i| Difficulty::ALL.get(i + 1))
                .copied(),
        };
        self.selected = 0;
    }

    pub(in crate::tui_shell) fn set_query(&mut self, query: &str) {
        let q = query.trim();
        self.filter.query = if q.is_empty() {
            None
        } else {
            Some(q.to_string())
        };
        self.selected = 0;
    }

    fn filter_line(&self, ctx: &RenderCtx) -> Line<'static> {
        let cat = format_category(self.filter.category.as_deref().unwrap_or(ALL_CATEGORIES));
        let diff = self
            .filter
            .difficulty
            .map(|d| d.label())
            .unwrap_or("All Levels");
        let mut spans = vec![
            Span::styled("category ", Style::default().fg(ctx.muted())),
            Span::raw(cat),
            Span::styled("  level ", Style::default().fg(ctx.muted())),
            Span::raw(diff),
        ];
        if let Some(q) = &self.filter.query {
            spans.push(Span::styled("  search ", Style::default().fg(ctx.muted())));
            spans.push(Span::raw(format!("\"{}\"", q)));
        }
        Line::from(spans)
    }
}

impl View for ExploreView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Explore
    }

    fn title(&self) -> &str {
        "Explore"
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    fn hints(&self) -> &'static str {
        "Tab category  d level  / search  Enter open"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Percentage(60),
                Constraint::Min(0),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.filter_line(ctx)).block(Block::default().borders(Borders::BOTTOM)),
            parts[0],
        );

        if let Some(err) = &self.error {
            frame.render_widget(Paragraph::new(err.as_str()), parts[1]);
            return;
        }

        let visible = self.visible();
        let mut rows: Vec<ListItem> = visible
            .iter()
            .map(|c| {
                ListItem::new(format!(
                    "{: <32} {: <18} {}",
                    c.title,
                    format_category(&c.category),
                    c.difficulty.label()
                ))
            })
            .collect();
        let mut state = ListState::default();
        if rows.is_empty() {
            rows.push(ListItem::new("No courses found"));
        } else {
            state.select(Some(self.selected.min(rows.len() - 1)));
        }
        let list = List::new(rows)
            .block(Block::default().borders(Borders::BOTTOM).title(format!(
                "{} of {} courses",
                visible.len(),
                self.courses.len()
            )))
            .highlight_style(Style::default().bg(ctx.muted()));
        frame.render_stateful_widget(list, parts[1], &mut state);

        let details = match visible.get(self.selected) {
            Some(c) => vec![
                Line::from(Span::styled(c.title.clone(), Style::default().fg(ctx.accent()))),
                Line::from(c.description.clone()),
                Line::from(format!("{} students enrolled", c.students_enrolled)),
            ],
            None => vec![Line::from("(no selection)")],
        };
        frame.render_widget(Paragraph::new(details).wrap(Wrap { trim: false }), parts[2]);
    }
}
