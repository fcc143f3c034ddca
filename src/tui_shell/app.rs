use std::cell::Cell;
use std::io::{self, IsTerminal};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::{info, warn};

use crate::client::{Client, NoticeLevel};
use crate::model::{AuthScreen, Payload, Preferences, Route, Screen};
use crate::observe::Subscription;
use crate::store::LocalStore;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::input::Input;
use super::modal;
use super::view::{RenderCtx, View};
use super::views::{
    AuthView, ContactView, CourseView, ExploreView, HomeView, LessonView, ProfileView, QuizView,
    SettingsView,
};
use super::wizard::AuthWizard;

mod event_loop;
mod log_types;
mod modal_output;
mod modal_types;
mod navigation;
mod render;
mod settings_actions;
mod text_input;
mod time_utils;
mod view_sync;

use self::log_types::{EntryKind, ScrollEntry};
pub(super) use self::modal_types::{ConfirmedAction, Modal, ModalKind, TextInputAction};
pub(in crate::tui_shell) use self::time_utils::now_ts;
pub(super) use self::time_utils::{fmt_since, fmt_ts_ui};

/// How often the loop checks whether the access token needs a refresh.
const SESSION_MAINTENANCE_INTERVAL: Duration = Duration::from_secs(30);

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut app = App::load(opts)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

pub(super) struct App {
    pub(super) client: Client,
    store: LocalStore,
    pub(super) prefs: Preferences,

    view: Box<dyn View>,
    route_changed: Rc<Cell<bool>>,
    prompt_changed: Rc<Cell<bool>>,
    session_changed: Rc<Cell<bool>>,
    _subs: Vec<Subscription>,

    pub(super) modal: Option<Modal>,
    pub(super) auth_wizard: Option<AuthWizard>,

    log: Vec<ScrollEntry>,
    last_result: Option<ScrollEntry>,
    last_maintenance: Instant,
    pub(super) quit: bool,
}

impl App {
    fn load(opts: crate::tui::TuiRunOptions) -> Result<Self> {
        let root = LocalStore::resolve_dir(opts.data_dir.as_deref())?;
        let store = LocalStore::open(&root)?;
        crate::logging::init_file(&store.log_path())?;

        let prefs = store.preferences().unwrap_or_else(|err| {
            warn!("read preferences: {:#}", err);
            Preferences::default()
        });
        let client = Client::open(store.clone(), &opts.overrides)?;
        Ok(Self::new(client, store, prefs))
    }

    fn new(client: Client, store: LocalStore, prefs: Preferences) -> Self {
        let route_changed = Rc::new(Cell::new(false));
        let prompt_changed = Rc::new(Cell::new(false));
        let session_changed = Rc::new(Cell::new(false));
        let subs = vec![
            {
                let flag = route_changed.clone();
                client.subscribe_route(move |_| flag.set(true))
            },
            {
                let flag = prompt_changed.clone();
                client.subscribe_prompt(move |_| flag.set(true))
            },
            {
                let flag = session_changed.clone();
                client.subscribe_session(move |_| flag.set(true))
            },
        ];

        Self {
            client,
            store,
            prefs,
            view: Box::new(HomeView::loading()),
            route_changed,
            prompt_changed,
            session_changed,
            _subs: subs,
            modal: None,
            auth_wizard: None,
            log: Vec::new(),
            last_result: None,
            last_maintenance: Instant::now(),
            quit: false,
        }
    }

    /// Startup session check; the first interactive frame follows it.
    fn start(&mut self) {
        match self.client.start() {
            Some(s) => info!(email = %s.email, "session restored"),
            None => info!("no stored session"),
        }
        self.rebuild_view();
    }

    pub(super) fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub(super) fn view_mut(&mut self) -> &mut dyn View {
        self.view.as_mut()
    }

    pub(in crate::tui_shell) fn current_view<T: 'static>(&self) -> Option<&T> {
        self.view.as_any().downcast_ref::<T>()
    }

    pub(in crate::tui_shell) fn current_view_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.view.as_any_mut().downcast_mut::<T>()
    }

    pub(super) fn render_ctx(&self) -> RenderCtx {
        RenderCtx {
            now: OffsetDateTime::now_utc(),
            theme: self.prefs.theme,
        }
    }

    /// Applies whatever the client changed since the last frame. A new
    /// route or a session change rebuilds the view; views capture the
    /// session when built. Prompt visibility opens or closes the login
    /// modal, and queued notices reach the status line.
    fn sync(&mut self) {
        let session_changed = self.session_changed.replace(false);
        if self.route_changed.replace(false) || session_changed {
            self.rebuild_view();
        }
        if self.prompt_changed.replace(false) {
            let visible = self.client.is_login_prompt_visible();
            let showing = matches!(
                self.modal.as_ref().map(|m| &m.kind),
                Some(ModalKind::LoginPrompt)
            );
            if visible && !showing {
                self.open_login_prompt();
            } else if !visible && showing {
                self.close_modal();
            }
        }
        self.drain_notices();
    }

    fn drain_notices(&mut self) {
        for notice in self.client.take_notices() {
            match notice.level {
                NoticeLevel::Error => self.push_error(notice.text),
                NoticeLevel::Info | NoticeLevel::Success if self.prefs.notifications => {
                    self.push_output(vec![notice.text])
                }
                NoticeLevel::Info | NoticeLevel::Success => {}
            }
        }
    }

    fn maintain_session(&mut self) {
        if self.last_maintenance.elapsed() < SESSION_MAINTENANCE_INTERVAL {
            return;
        }
        self.last_maintenance = Instant::now();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        if let Err(err) = self.client.maintain_session(now) {
            warn!("session refresh failed: {:#}", err);
            self.push_error(format!("session refresh: {:#}", err));
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
