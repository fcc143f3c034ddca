use std::any::Any;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::catalog::{AnswerMark, QuizSession};
use crate::model::Screen;

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};
use super::load_error;

#[derive(Debug)]
pub(in crate::tui_shell) struct QuizView {
    updated_at: String,
    /// Taken out while the attempt is recorded.
    pub(in crate::tui_shell) session: Option<QuizSession>,
    current: usize,
    error: Option<String>,
}

impl QuizView {
    pub(in crate::tui_shell) fn new(session: Result<QuizSession>) -> Self {
        let (session, error) = match session {
            Ok(s) => (Some(s), None),
            Err(err) => (None, Some(load_error(&err))),
        };
        Self {
            updated_at: now_ts(),
            session,
            current: 0,
            error,
        }
    }

    /// Picks `option` for the highlighted question and moves on.
    pub(in crate::tui_shell) fn answer_current(&mut self, option: usize) -> Result<()> {
        let Some(s) = self.session.as_mut() else {
            return Ok(());
        };
        s.answer(self.current, option)?;
        if self.current + 1 < s.questions().len() {
            self.current += 1;
        }
        Ok(())
    }
}

impl View for QuizView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Quiz
    }

    fn title(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.quiz().title.as_str())
            .unwrap_or("Quiz")
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn move_up(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let n = self.session.as_ref().map(|s| s.questions().len()).unwrap_or(0);
        self.current = (self.current + 1).min(n.saturating_sub(1));
    }

    fn hints(&self) -> &'static str {
        "1-9 answer  Up/Down question  Enter submit  Esc back"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let Some(s) = &self.session else {
            let msg = self.error.as_deref().unwrap_or("(no quiz)");
            frame.render_widget(Paragraph::new(msg), inner);
            return;
        };

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let status = match s.score() {
            Some(score) => Line::from(Span::styled(
                format!(
                    "Score: {}/{} ({}%)",
                    score.correct, score.total, score.percent
                ),
                Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                format!("{}/{} answered", s.answered(), s.questions().len()),
                Style::default().fg(ctx.muted()),
            )),
        };
        frame.render_widget(
            Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM)),
            parts[0],
        );

        let mut lines = Vec::new();
        for (qi, q) in s.questions().iter().enumerate() {
            let marker = if qi == self.current { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(ctx.accent())),
                Span::styled(
                    format!("{}. {}", qi + 1, q.question),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            for (oi, opt) in q.options.iter().enumerate() {
                let picked = s.answer_for(qi) == Some(oi);
                let style = match s.mark(qi, oi) {
                    AnswerMark::Correct => Style::default().fg(Color::Green),
                    AnswerMark::WrongPick => Style::default().fg(Color::Red),
                    AnswerMark::Neutral if picked => Style::default().fg(ctx.accent()),
                    AnswerMark::Neutral => Style::default(),
                };
                let bullet = if picked { "(x)" } else { "( )" };
                lines.push(Line::from(Span::styled(
                    format!("     {} {}) {}", bullet, oi + 1, opt),
                    style,
                )));
            }
            lines.push(Line::from(""));
        }
        // Keep the highlighted question in view.
        let per_question = s
            .questions()
            .iter()
            .take(self.current)
            .map(|q| q.options.len() + 2)
            .sum::<usize>();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((per_question.min(u16::MAX as usize) as u16, 0)),
            parts[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Quiz, QuizQuestion};

    use super::*;

    fn session() -> QuizSession {
        let quiz = Quiz {
            id: "q-1".to_string(),
            course_id: "1".to_string(),
            title: "Basics".to_string(),
        };
        let questions = (0..2)
            .map(|i| QuizQuestion {
                id: format!("qq-{}", i),
                quiz_id: "q-1".to_string(),
                question: format!("Question {}", i),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: 1,
            })
            .collect();
        QuizSession::new(quiz, questions)
    }

    #[test]
    fn answering_advances_to_next_question() {
        let mut v = QuizView::new(Ok(session()));
        v.answer_current(1).unwrap();
        assert_eq!(v.current, 1);
        v.answer_current(0).unwrap();
        assert_eq!(v.current, 1);

        let s = v.session.as_ref().unwrap();
        assert_eq!(s.answer_for(0), Some(1));
        assert_eq!(s.answer_for(1), Some(0));
    }

    #[test]
    fn out_of_range_option_is_an_error() {
        let mut v = QuizView::new(Ok(session()));
        assert!(v.answer_current(5).is_err());
        assert_eq!(v.current, 0);
    }
}
