//! Detail page
//!
//! Shows the profile read-only. Its selector builds a fresh record on every
//! call, so the page re-renders after every dispatch.

use std::rc::Rc;

use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use redux_hooks::{Binding, RenderQueue};

use super::{Page, PageEvent, ProfileBinding, ProfileScope};
use crate::actions::ProfileAction;
use crate::components::Block;
use crate::routes::Route;
use crate::state::ProfileState;

/// Everything the detail page shows
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDetail {
    pub name: Rc<str>,
    pub age: u32,
}

fn select_detail(profile: &ProfileState) -> Rc<ProfileDetail> {
    Rc::new(ProfileDetail {
        name: Rc::clone(&profile.name),
        age: profile.age,
    })
}

pub struct DetailPage {
    detail: ProfileBinding<Rc<ProfileDetail>>,
}

impl DetailPage {
    pub fn mount(scope: &ProfileScope, queue: &RenderQueue) -> redux_hooks::Result<Self> {
        let detail = Binding::connect(scope, select_detail, Rc::new(queue.component()))?;
        Ok(Self { detail })
    }

    #[cfg(test)]
    pub fn detail(&self) -> Rc<ProfileDetail> {
        self.detail.selection()
    }
}

fn read_only_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<8}", label), Style::default().dim()),
        Span::raw(value),
    ])
}

impl Page for DetailPage {
    fn route(&self) -> Route {
        Route::Detail
    }

    fn render(&self, area: Rect, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Detail block: 2 rows + padding + borders
                Constraint::Length(1),
                Constraint::Length(1), // Home button
                Constraint::Min(0),
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let detail = self.detail.selection();
        let inner = Block::new("Detail").padding(&[1, 2]).render(chunks[0], f);
        let lines = vec![
            read_only_line("Name", detail.name.to_string()),
            read_only_line("Age", detail.age.to_string()),
        ];
        f.render_widget(Paragraph::new(lines), inner);

        let button = Line::from(Span::styled(
            format!(" Go to {} ", Route::Main),
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(button), chunks[2]);

        let hints = Line::from("Enter/Esc: back to home · r: refresh").dim();
        f.render_widget(Paragraph::new(hints), chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PageEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace => Some(PageEvent::Navigate(Route::Main)),
            KeyCode::Char('r') => {
                // Unhandled by the reducer, but still a full notification pass
                self.detail.dispatch(ProfileAction::Unknown);
                None
            }
            _ => None,
        }
    }
}
