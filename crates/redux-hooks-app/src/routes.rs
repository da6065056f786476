use strum::Display;

/// Pages reachable in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Route {
    #[default]
    #[strum(to_string = "Home")]
    Main,
    #[strum(to_string = "Detail")]
    Detail,
}

/// Navigation history; the last entry is the active route
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    /// The active route
    pub fn current(&self) -> Route {
        // history is never empty
        self.history.last().copied().unwrap_or_default()
    }

    /// Navigate to `route`, recording it in the history
    pub fn push(&mut self, route: Route) {
        self.history.push(route);
        log::debug!("Navigated to {} (history depth {})", route, self.depth());
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::default())
    }
}
