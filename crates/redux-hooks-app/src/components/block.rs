//! Block layout component
//!
//! A titled section with configurable padding and background. Children are
//! rendered into the area returned by [`Block::render`].

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{self, Borders, Padding},
    Frame,
};

/// Titled section with padding and background
#[derive(Debug, Clone)]
pub struct Block<'a> {
    title: &'a str,
    padding: Padding,
    background: Color,
}

impl<'a> Block<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            padding: padding_shorthand(&[1]),
            background: Color::Reset,
        }
    }

    /// Set padding using 1 to 4 values, in the order top, right, bottom, left
    pub fn padding(mut self, values: &[u16]) -> Self {
        self.padding = padding_shorthand(values);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Render the block and return the area left for its children
    pub fn render(self, area: Rect, f: &mut Frame) -> Rect {
        let block = widgets::Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .padding(self.padding)
            .style(Style::default().bg(self.background));

        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    }
}

/// Expand a 1-4 value shorthand, missing sides mirror their opposite
fn padding_shorthand(values: &[u16]) -> Padding {
    match *values {
        [] => Padding::ZERO,
        [all] => Padding::uniform(all),
        [vertical, horizontal] => Padding::symmetric(horizontal, vertical),
        [top, horizontal, bottom] => Padding::new(horizontal, horizontal, top, bottom),
        [top, right, bottom, left, ..] => Padding::new(left, right, top, bottom),
    }
}
