use std::any::Any;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};

use crate::catalog::format_category;
use crate::client::CourseDetail;
use crate::model::{Lesson, Screen};

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};
use super::load_error;

/// A row of the course page that Enter can open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum CourseItem {
    Lesson { course_id: String, lesson_id: String },
    Quiz { course_id: String, quiz_id: String },
}

#[derive(Debug)]
pub(in crate::tui_shell) struct CourseView {
    updated_at: String,
    detail: Option<CourseDetail>,
    error: Option<String>,
    selected: usize,
}

impl CourseView {
    pub(in crate::tui_shell) fn new(detail: Result<CourseDetail>) -> Self {
        let (detail, error) = match detail {
            Ok(d) => (Some(d), None),
            Err(err) => (None, Some(load_error(&err))),
        };
        Self {
            updated_at: now_ts(),
            detail,
            error,
            selected: 0,
        }
    }

    fn items(&self) -> Vec<CourseItem> {
        let Some(d) = &self.detail else {
            return Vec::new();
        };
        let course_id = d.course.id.clone();
        let lessons = d.lessons.iter().map(|l| CourseItem::Lesson {
            course_id: course_id.clone(),
            lesson_id: l.id.clone(),
        });
        let quizzes = d.quizzes.iter().map(|q| CourseItem::Quiz {
            course_id: course_id.clone(),
            quiz_id: q.id.clone(),
        });
        lessons.chain(quizzes).collect()
    }

    pub(in crate::tui_shell) fn selected_item(&self) -> Option<CourseItem> {
        self.items().into_iter().nth(self.selected)
    }
}

impl View for CourseView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::CourseDetail
    }

    fn title(&self) -> &str {
        self.detail
            .as_ref()
            .map(|d| d.course.title.as_str())
            .unwrap_or("Course")
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let max = self.items().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    fn hints(&self) -> &'static str {
        "Enter open lesson/quiz  Esc back"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let Some(d) = &self.detail else {
            let msg = self.error.as_deref().unwrap_or("(no course)");
            frame.render_widget(Paragraph::new(msg), inner);
            return;
        };

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let about = vec![
            Line::from(vec![
                Span::styled(
                    format_category(&d.course.category),
                    Style::default().fg(ctx.accent()),
                ),
                Span::raw("  "),
                Span::raw(d.course.difficulty.label()),
                Span::raw("  "),
                Span::styled(
                    format!("{} students", d.course.students_enrolled),
                    Style::default().fg(ctx.muted()),
                ),
            ]),
            Line::from(d.course.description.clone()),
        ];
        frame.render_widget(Paragraph::new(about).wrap(Wrap { trim: true }), parts[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::BOTTOM))
            .gauge_style(Style::default().fg(ctx.accent()))
            .percent(d.progress.percent.min(100) as u16)
            .label(format!(
                "{} ({}%) {}",
                d.progress.label(),
                d.progress.percent,
                d.progress.status.label()
            ));
        frame.render_widget(gauge, parts[1]);

        let mut rows = Vec::new();
        for (i, l) in d.lessons.iter().enumerate() {
            let minutes = l
                .duration_minutes
                .map(|m| format!(" ({} min)", m))
                .unwrap_or_default();
            rows.push(ListItem::new(format!("{}. {}{}", i + 1, l.title, minutes)));
        }
        for q in &d.quizzes {
            rows.push(ListItem::new(Line::from(vec![
                Span::styled("Quiz: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(q.title.clone()),
            ])));
        }
        let mut state = ListState::default();
        if rows.is_empty() {
            rows.push(ListItem::new("No lessons yet"));
        } else {
            state.select(Some(self.selected.min(rows.len() - 1)));
        }
        let list = List::new(rows)
            .block(Block::default().title("Course content"))
            .highlight_style(Style::default().bg(ctx.muted()));
        frame.render_stateful_widget(list, parts[2], &mut state);
    }
}

#[derive(Debug)]
pub(in crate::tui_shell) struct LessonView {
    updated_at: String,
    course_title: String,
    lesson: Option<Lesson>,
    error: Option<String>,
}

impl LessonView {
    pub(in crate::tui_shell) fn new(detail: Result<CourseDetail>, lesson_id: Option<&str>) -> Self {
        let mut view = Self {
            updated_at: now_ts(),
            course_title: String::new(),
            lesson: None,
            error: None,
        };
        match detail {
            Ok(d) => {
                view.course_title = d.course.title;
                view.lesson = d
                    .lessons
                    .into_iter()
                    .find(|l| Some(l.id.as_str()) == lesson_id);
                if view.lesson.is_none() {
                    view.error = Some("lesson not found".to_string());
                }
            }
            Err(err) => view.error = Some(load_error(&err)),
        }
        view
    }
}

impl View for LessonView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Lesson
    }

    fn title(&self) -> &str {
        self.lesson
            .as_ref()
            .map(|l| l.title.as_str())
            .unwrap_or("Lesson")
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        "Esc back to course"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let Some(l) = &self.lesson else {
            let msg = self.error.as_deref().unwrap_or("(no lesson)");
            frame.render_widget(Paragraph::new(msg), inner);
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                self.course_title.clone(),
                Style::default().fg(ctx.muted()),
            )),
            Line::from(""),
            Line::from(l.description.clone()),
            Line::from(""),
        ];
        if let Some(m) = l.duration_minutes {
            lines.push(Line::from(format!("Duration: {} min", m)));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
