use ratatui::{crossterm::event::KeyEvent, layout::Rect, Frame};
use redux_hooks::{Binding, RenderQueue, StoreScope};

use crate::actions::ProfileAction;
use crate::routes::Route;
use crate::state::ProfileState;

pub mod detail_page;
pub mod main_page;

pub use detail_page::DetailPage;
pub use main_page::MainPage;

pub type ProfileScope = StoreScope<ProfileState, ProfileAction>;
pub type ProfileBinding<T> = Binding<ProfileState, ProfileAction, T>;

/// What a page asks the app to do after handling a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Navigate(Route),
    Quit,
}

/// A mounted page
///
/// Pages own their bindings; dropping a page unbinds them.
pub trait Page {
    fn route(&self) -> Route;

    fn render(&self, area: Rect, f: &mut Frame);

    fn handle_key(&mut self, key: KeyEvent) -> Option<PageEvent>;
}

/// Mount the page for `route`, binding it to the scope's store
pub fn mount(route: Route, scope: &ProfileScope, queue: &RenderQueue) -> redux_hooks::Result<Box<dyn Page>> {
    let page: Box<dyn Page> = match route {
        Route::Main => Box::new(MainPage::mount(scope, queue)?),
        Route::Detail => Box::new(DetailPage::mount(scope, queue)?),
    };
    log::debug!("Mounted {} page", route);
    Ok(page)
}
