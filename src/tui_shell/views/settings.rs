use std::any::Any;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::model::{Preferences, Screen};

use super::super::app::now_ts;
use super::super::{RenderCtx, View, render_view_chrome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum SettingsItem {
    Theme,
    Notifications,
    DeleteAccount,
}

const ITEMS: [SettingsItem; 3] = [
    SettingsItem::Theme,
    SettingsItem::Notifications,
    SettingsItem::DeleteAccount,
];

#[derive(Debug)]
pub(in crate::tui_shell) struct SettingsView {
    updated_at: String,
    email: Option<String>,
    pub(in crate::tui_shell) prefs: Preferences,
    selected: usize,
}

impl SettingsView {
    pub(in crate::tui_shell) fn new(email: Option<String>, prefs: Preferences) -> Self {
        Self {
            updated_at: now_ts(),
            email,
            prefs,
            selected: 0,
        }
    }

    pub(in crate::tui_shell) fn selected_item(&self) -> SettingsItem {
        ITEMS[self.selected.min(ITEMS.len() - 1)]
    }
}

impl View for SettingsView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn screen(&self) -> Screen {
        Screen::Settings
    }

    fn title(&self) -> &str {
        "Settings"
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        self.selected = (self.selected + 1).min(ITEMS.len() - 1);
    }

    fn hints(&self) -> &'static str {
        "Enter change  t theme"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);

        let rows: Vec<ListItem> = ITEMS
            .iter()
            .map(|item| {
                let (label, value, style) = match item {
                    SettingsItem::Theme => {
                        ("Theme", self.prefs.theme.label().to_string(), Style::default())
                    }
                    SettingsItem::Notifications => (
                        "Notifications",
                        if self.prefs.notifications { "on" } else { "off" }.to_string(),
                        Style::default(),
                    ),
                    SettingsItem::DeleteAccount => (
                        "Delete account",
                        self.email.clone().unwrap_or_default(),
                        Style::default().fg(Color::Red),
                    ),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{: <16}", label), style),
                    Span::styled(value, Style::default().fg(ctx.muted())),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.selected.min(ITEMS.len() - 1)));
        let list = List::new(rows).highlight_style(Style::default().bg(ctx.muted()));
        frame.render_stateful_widget(list, inner, &mut state);
    }
}
