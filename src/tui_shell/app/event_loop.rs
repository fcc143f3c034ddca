use crate::model::Provider;

use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // One frame with the loading line, then the session check.
    terminal
        .draw(|f| super::render::draw(f, app))
        .context("draw")?;
    app.start();

    loop {
        app.sync();
        app.maintain_session();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.quit = true;
        }
        return;
    }

    if handle_view_key(app, key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.activate(),
        KeyCode::Up => app.view_mut().move_up(),
        KeyCode::Down => app.view_mut().move_down(),

        KeyCode::Char('h') => app.go(Screen::Home, None),
        KeyCode::Char('e') => app.go(Screen::Explore, None),
        KeyCode::Char('c') => app.go(Screen::Contact, None),
        KeyCode::Char('p') => app.go(Screen::Profile, None),
        KeyCode::Char('s') => app.go(Screen::Settings, None),
        KeyCode::Char('l') => app.go_auth(AuthScreen::Login),
        KeyCode::Char('u') => app.go_auth(AuthScreen::Signup),
        KeyCode::Char('o') => app.logout(),
        KeyCode::Char('r') => {
            app.rebuild_view();
            app.push_output(vec!["refreshed".to_string()]);
        }
        _ => {}
    }
}

/// Keys that only mean something on the current screen. Returns whether the
/// key was taken.
fn handle_view_key(app: &mut App, key: KeyEvent) -> bool {
    match (app.view().screen(), key.code) {
        (Screen::Explore, KeyCode::Tab) => {
            if let Some(v) = app.current_view_mut::<ExploreView>() {
                v.cycle_category();
            }
            true
        }
        (Screen::Explore, KeyCode::Char('d')) => {
            if let Some(v) = app.current_view_mut::<ExploreView>() {
                v.cycle_difficulty();
            }
            true
        }
        (Screen::Explore, KeyCode::Char('/')) => {
            app.search_courses();
            true
        }
        (Screen::Quiz, KeyCode::Char(c)) if c.is_ascii_digit() && c != '0' => {
            let n = c.to_digit(10).unwrap_or(1) as usize;
            app.answer_quiz(n - 1);
            true
        }
        (Screen::Login | Screen::Signup, KeyCode::Char('g')) => {
            app.start_oauth(Provider::Google);
            true
        }
        (Screen::Login | Screen::Signup, KeyCode::Char('G')) => {
            app.start_oauth(Provider::Github);
            true
        }
        (Screen::Settings, KeyCode::Char('t')) => {
            app.toggle_theme();
            true
        }
        _ => false,
    }
}
