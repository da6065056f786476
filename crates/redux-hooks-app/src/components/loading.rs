//! Loading fallback shown while a page is being prepared

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Number of frames before the ripple repeats
const RIPPLE_FRAMES: usize = 4;

/// Ripple rings drawn from the inside out
const RINGS: [&str; RIPPLE_FRAMES] = ["   ·   ", "  ( )  ", " (   ) ", "(     )"];

/// Render the loading ripple centered in `area`
pub fn render(frame: usize, area: Rect, f: &mut Frame) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        ripple_line(frame),
        Line::from(""),
        Line::from(Span::styled("Loading...", Style::default().dim())),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, vertical[1]);
}

/// Two rings half a cycle apart, as in a ripple
fn ripple_line(frame: usize) -> Line<'static> {
    let outer = RINGS[frame % RIPPLE_FRAMES];
    let inner = RINGS[(frame + RIPPLE_FRAMES / 2) % RIPPLE_FRAMES];

    Line::from(vec![
        Span::styled(outer, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(inner, Style::default().fg(Color::Cyan)),
    ])
}
