use std::any::Any;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use time::OffsetDateTime;

use crate::model::{Screen, Theme};

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx {
    pub(super) now: OffsetDateTime,
    pub(super) theme: Theme,
}

impl RenderCtx {
    pub(super) fn accent(&self) -> Color {
        match self.theme {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
        }
    }

    pub(super) fn muted(&self) -> Color {
        match self.theme {
            Theme::Light => Color::DarkGray,
            Theme::Dark => Color::Gray,
        }
    }
}

pub(super) trait View: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn screen(&self) -> Screen;
    fn title(&self) -> &str;
    fn updated_at(&self) -> &str;

    fn move_up(&mut self) {}
    fn move_down(&mut self) {}

    /// Key hints for the footer.
    fn hints(&self) -> &'static str {
        ""
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    updated_at: &str,
    area: Rect,
    ctx: &RenderCtx,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(ctx.accent())),
        Span::raw("  "),
        Span::styled(
            super::fmt_ts_ui(updated_at),
            Style::default().fg(ctx.muted()),
        ),
    ]);

    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
