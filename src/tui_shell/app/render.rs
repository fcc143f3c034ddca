use super::*;

const BRAND: &str = "TechKnots Academy";
const TABS: [(Screen, char); 5] = [
    (Screen::Home, 'h'),
    (Screen::Explore, 'e'),
    (Screen::Contact, 'c'),
    (Screen::Profile, 'p'),
    (Screen::Settings, 's'),
];
const GLOBAL_HINTS: &str = "l login  u sign up  o log out  r refresh  q quit";

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);
    let ctx = app.render_ctx();

    // Header
    let current = app.view().screen();
    let mut spans = vec![
        Span::styled(
            BRAND,
            Style::default()
                .fg(Color::White)
                .bg(ctx.accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    for (screen, key) in TABS {
        let style = if screen == current {
            Style::default()
                .fg(ctx.accent())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(ctx.muted())
        };
        spans.push(Span::styled(format!("{} {}", key, screen.title()), style));
        spans.push(Span::raw("  "));
    }
    match app.client.current_session() {
        Some(s) => spans.push(Span::styled(s.email.clone(), Style::default().fg(Color::Green))),
        None if app.client.is_loading() => {
            spans.push(Span::styled("...", Style::default().fg(ctx.muted())))
        }
        None => spans.push(Span::styled("guest", Style::default().fg(ctx.muted()))),
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Main view
    if app.client.is_loading() {
        frame.render_widget(
            Paragraph::new("Checking your session...")
                .style(Style::default().fg(ctx.muted()))
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    } else {
        app.view().render(frame, chunks[1], &ctx);
    }

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(r) = app.last_result() {
            let style = match r.kind {
                EntryKind::Output => Style::default(),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", fmt_since(&r.ts, ctx.now)),
                            Style::default().fg(ctx.muted()),
                        ),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Key hints
    let view_hints = app.view().hints();
    let hints = if view_hints.is_empty() {
        GLOBAL_HINTS.to_string()
    } else {
        format!("{}  |  {}", view_hints, GLOBAL_HINTS)
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(ctx.muted()).add_modifier(Modifier::DIM)),
        chunks[3],
    );

    if let Some(m) = &app.modal {
        dim_frame(frame);
        modal::draw_modal(frame, m);
    }
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}
