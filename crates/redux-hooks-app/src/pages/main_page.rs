//! Home page
//!
//! Edits the profile through two independent bindings, one selecting the
//! name and one the age, so typing into one field never re-renders the other.

use std::rc::Rc;

use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use redux_hooks::{Binding, ComponentHandle, RenderMarker, RenderQueue, Rerender};
use strum::Display;

use super::{Page, PageEvent, ProfileBinding, ProfileScope};
use crate::actions::ProfileAction;
use crate::components::Block;
use crate::routes::Route;
use crate::state::ProfileState;

/// Focusable element of the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ProfileField {
    #[default]
    Name,
    Age,
    #[strum(to_string = "Open detail")]
    DetailLink,
}

impl ProfileField {
    /// Move to the next field
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Age,
            Self::Age => Self::DetailLink,
            Self::DetailLink => Self::Name,
        }
    }

    /// Move to the previous field
    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::DetailLink,
            Self::Age => Self::Name,
            Self::DetailLink => Self::Age,
        }
    }
}

pub struct MainPage {
    name: ProfileBinding<Rc<str>>,
    age: ProfileBinding<u32>,
    focus: ProfileField,
    /// Re-render handle for page-local state (focus)
    view: ComponentHandle,
}

impl MainPage {
    pub fn mount(scope: &ProfileScope, queue: &RenderQueue) -> redux_hooks::Result<Self> {
        let name = Binding::connect(
            scope,
            |profile: &ProfileState| Rc::clone(&profile.name),
            Rc::new(queue.component()),
        )?;
        let age = Binding::connect(scope, |profile: &ProfileState| profile.age, Rc::new(queue.component()))?;

        Ok(Self {
            name,
            age,
            focus: ProfileField::default(),
            view: queue.component(),
        })
    }

    #[cfg(test)]
    pub fn focus(&self) -> ProfileField {
        self.focus
    }

    fn set_focus(&mut self, focus: ProfileField) {
        self.focus = focus;
        self.view.request_render(RenderMarker::next());
    }

    fn type_char(&self, c: char) {
        match self.focus {
            ProfileField::Name => {
                let mut name = self.name.with_selection(|name| name.to_string());
                name.push(c);
                self.name.dispatch(ProfileAction::SetName(name));
            }
            ProfileField::Age => {
                let Some(digit) = c.to_digit(10) else {
                    log::debug!("Ignoring non-digit age input {:?}", c);
                    return;
                };
                let next = self.age.selection().checked_mul(10).and_then(|age| age.checked_add(digit));
                match next {
                    Some(age) => self.age.dispatch(ProfileAction::SetAge(age)),
                    None => log::warn!("Age input overflows, ignoring {:?}", c),
                }
            }
            ProfileField::DetailLink => {}
        }
    }

    fn erase(&self) {
        match self.focus {
            ProfileField::Name => {
                let mut name = self.name.with_selection(|name| name.to_string());
                if name.pop().is_some() {
                    self.name.dispatch(ProfileAction::SetName(name));
                }
            }
            ProfileField::Age => {
                let age = self.age.selection();
                if age > 0 {
                    self.age.dispatch(ProfileAction::SetAge(age / 10));
                }
            }
            ProfileField::DetailLink => {}
        }
    }

    fn input_line(&self, field: ProfileField, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let value_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let cursor = if focused { "▏" } else { "" };

        Line::from(vec![
            Span::styled(format!("{:<8}", field.to_string()), Style::default().dim()),
            Span::styled(value, value_style),
            Span::raw(cursor),
        ])
    }
}

impl Page for MainPage {
    fn route(&self) -> Route {
        Route::Main
    }

    fn render(&self, area: Rect, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Profile block: 2 inputs + padding + borders
                Constraint::Length(5), // Pages block
                Constraint::Min(0),
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let profile = Block::new("Profile").padding(&[1, 2]).render(chunks[0], f);
        let lines = vec![
            self.input_line(ProfileField::Name, self.name.with_selection(|name| name.to_string())),
            self.input_line(ProfileField::Age, self.age.selection().to_string()),
        ];
        f.render_widget(Paragraph::new(lines), profile);

        let pages = Block::new("Pages").padding(&[1, 2]).render(chunks[1], f);
        let link_style = if self.focus == ProfileField::DetailLink {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().underlined()
        };
        let link = Line::from(Span::styled(format!("{} ›", Route::Detail), link_style));
        f.render_widget(Paragraph::new(link), pages);

        let hints = Line::from("Tab: next field · Enter: open detail · Esc: quit").dim();
        f.render_widget(Paragraph::new(hints), chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PageEvent> {
        match key.code {
            KeyCode::Esc => return Some(PageEvent::Quit),
            KeyCode::Enter => return Some(PageEvent::Navigate(Route::Detail)),
            KeyCode::Tab | KeyCode::Down => self.set_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.set_focus(self.focus.prev()),
            KeyCode::Char(c) => self.type_char(c),
            KeyCode::Backspace => self.erase(),
            _ => {}
        }
        None
    }
}
