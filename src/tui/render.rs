//! TUI rendering logic

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, ScreenAreas};

const PRESS_COLOR: Color = Color::Rgb(0, 123, 255);
const SPACE_COLOR: Color = Color::Rgb(127, 219, 255);
const BACKSPACE_COLOR: Color = Color::Rgb(255, 133, 27);
const RESET_COLOR: Color = Color::Rgb(255, 65, 54);

/// Render the entire application UI and record button areas for hit-testing
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Min(5),    // Message
            Constraint::Length(3), // Hold gauge
            Constraint::Length(5), // Press pad
            Constraint::Length(5), // Edit buttons
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[4]);

    app.areas = ScreenAreas {
        press: chunks[3],
        space: buttons[0],
        backspace: buttons[1],
        reset: buttons[2],
    };

    render_title(frame, chunks[0]);
    render_message(frame, app, chunks[1]);
    render_hold_gauge(frame, app, chunks[2]);
    render_press_pad(frame, app, chunks[3]);
    render_button(frame, "Space", SPACE_COLOR, buttons[0]);
    render_button(frame, "Backspace", BACKSPACE_COLOR, buttons[1]);
    render_button(frame, "Reset", RESET_COLOR, buttons[2]);
    render_status_bar(frame, app, chunks[5]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Welcome!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("This is a morse code transmitter"),
    ];
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(widget, area);
}

/// Message log as space-separated glyphs, wrapped
fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let log = app.transmitter.message();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Message ({}) ", log.len()));

    let line = if log.is_empty() {
        Line::from(Span::styled(
            "Hold the Press pad to start keying",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let spans: Vec<Span> = log
            .symbols()
            .iter()
            .map(|s| {
                Span::styled(
                    format!("{s} "),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        Line::from(spans)
    };

    let widget = Paragraph::new(line)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

/// Elapsed hold time against the dash threshold
fn render_hold_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let tx = &app.transmitter;
    let threshold = tx.settings().dash_threshold;
    let elapsed = tx.elapsed();

    let ratio = if threshold.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / threshold.as_secs_f64()).min(1.0)
    };

    let label = match tx.pending_symbol() {
        Some(symbol) => format!("{} ms  {}", elapsed.as_millis(), symbol),
        None => "idle".to_string(),
    };

    let color = if tx.is_tracking() {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Hold (dash at {} ms) ",
            threshold.as_millis()
        )))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_press_pad(frame: &mut Frame, app: &App, area: Rect) {
    let tracking = app.transmitter.is_tracking();
    let text = if tracking { "Transmitting..." } else { "Press" };
    let mut style = Style::default().bg(PRESS_COLOR).fg(Color::White);
    if tracking {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    render_centered(frame, text, style, area);
}

fn render_button(frame: &mut Frame, label: &str, color: Color, area: Rect) {
    let style = Style::default().bg(color).fg(Color::Black);
    render_centered(frame, label, style, area);
}

/// Bordered block filled with `style`, label centered vertically
fn render_centered(frame: &mut Frame, label: &str, style: Style, area: Rect) {
    let block = Block::default().borders(Borders::ALL).style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top_pad = inner.height.saturating_sub(1) / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top_pad), Constraint::Length(1)])
        .split(inner);

    let widget = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style.add_modifier(Modifier::BOLD));
    frame.render_widget(widget, rows[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let tx = &app.transmitter;

    let audio = match tx.tone_fault() {
        Some(fault) => Span::styled(
            format!("Audio: {fault}"),
            Style::default().fg(Color::Red),
        ),
        None if tx.tone_backend() == "silent" => {
            Span::styled("Audio: muted", Style::default().fg(Color::Yellow))
        }
        None => Span::styled(
            format!("Audio: {}", tx.tone_backend()),
            Style::default().fg(Color::Green),
        ),
    };

    let keys = if app.key_release_events {
        Span::styled("Keys: hold", Style::default().fg(Color::Green))
    } else {
        Span::styled("Keys: mouse only", Style::default().fg(Color::Yellow))
    };

    let mut spans = vec![
        Span::raw("["),
        audio,
        Span::raw("] ["),
        keys,
        Span::raw("] "),
        Span::raw(format!("Symbols: {}", tx.message().len())),
    ];
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Cyan)));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        "? help | q quit",
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help_text = vec![
        Line::from("Keyboard & Mouse"),
        Line::from(""),
        Line::from("Hold Press pad     Key (short = .  long = -)"),
        Line::from("Hold Enter / k     Key (needs key release support)"),
        Line::from("/ or Tab           Word space"),
        Line::from("Backspace          Delete last symbol"),
        Line::from("r or Delete        Clear message"),
        Line::from("?                  Toggle help"),
        Line::from("q / Ctrl+C         Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let widget = Paragraph::new(help_text).block(block);
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{HoldId, TickScheduler, TickTask};
    use crate::transmitter::{KeyerSettings, Transmitter};
    use crate::tui::app::{Action, HoldSource};
    use morse_tone::SilentBackend;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    struct NoTicks;

    impl TickScheduler for NoTicks {
        fn schedule(&mut self, _hold: HoldId, _period: Duration) -> TickTask {
            TickTask::detached()
        }
    }

    fn app() -> App {
        let tx = Transmitter::new(
            KeyerSettings::default(),
            Box::new(SilentBackend::new()),
            Box::new(NoTicks),
        );
        App::new(tx, false)
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_screen_sections() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("Welcome!"));
        assert!(screen.contains("This is a morse code transmitter"));
        assert!(screen.contains("Press"));
        assert!(screen.contains("Space"));
        assert!(screen.contains("Backspace"));
        assert!(screen.contains("Reset"));
        assert!(screen.contains("Audio: muted"));
        assert!(screen.contains("Keys: mouse only"));
    }

    #[test]
    fn test_records_button_areas() {
        let mut app = app();
        draw(&mut app);
        let areas = app.areas;
        assert_eq!(areas.press.width, 80);
        assert!(areas.space.x < areas.backspace.x);
        assert!(areas.backspace.x < areas.reset.x);
        assert_eq!(areas.space.y, areas.press.y + areas.press.height);
    }

    #[test]
    fn test_message_glyphs_rendered() {
        let mut app = app();
        app.apply(Action::PressStart(HoldSource::Mouse));
        app.apply(Action::PressEnd(HoldSource::Mouse));
        app.apply(Action::Space);
        let screen = draw(&mut app);
        assert!(screen.contains(". / "));
        assert!(screen.contains("Message (2)"));
    }

    #[test]
    fn test_tracking_shows_pending_symbol() {
        let mut app = app();
        app.apply(Action::PressStart(HoldSource::Mouse));
        let screen = draw(&mut app);
        assert!(screen.contains("Transmitting..."));
        assert!(screen.contains("0 ms  ."));
    }

    #[test]
    fn test_status_bar_counts_symbols() {
        let mut app = app();
        assert!(draw(&mut app).contains("Symbols: 0"));

        app.apply(Action::Space);
        app.apply(Action::PressStart(HoldSource::Mouse));
        app.apply(Action::PressEnd(HoldSource::Mouse));
        let screen = draw(&mut app);
        assert!(screen.contains("Symbols: 2"));

        app.apply(Action::Reset);
        assert!(draw(&mut app).contains("Symbols: 0"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.apply(Action::ToggleHelp);
        let screen = draw(&mut app);
        assert!(screen.contains("Keyboard & Mouse"));
    }
}
