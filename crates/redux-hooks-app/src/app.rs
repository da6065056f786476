//! Application shell
//!
//! Owns the store scope, the render queue the store batches into, the router
//! and the currently mounted page. The render loop in `main` asks it whether a
//! redraw is due and lets it draw.

use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use redux_hooks::{RenderQueue, Store};

use crate::app_config::AppConfig;
use crate::components::loading;
use crate::pages::{self, Page, PageEvent, ProfileScope};
use crate::reducer::reduce;
use crate::routes::{Route, Router};
use crate::state::ProfileState;

pub struct App {
    config: AppConfig,
    queue: RenderQueue,
    scope: ProfileScope,
    router: Router,
    page: Option<Box<dyn Page>>,
    started: Instant,
    loading_frame: usize,
    needs_redraw: bool,
    running: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let queue = RenderQueue::new();
        let scope = ProfileScope::new();
        scope.get_or_init(|| {
            Store::builder(reduce, ProfileState::from_config(&config))
                .batcher(Rc::new(queue.clone()))
                .failure_policy(config.failure_policy.into())
                .build()
        });

        Self {
            config,
            queue,
            scope,
            router: Router::default(),
            page: None,
            started: Instant::now(),
            loading_frame: 0,
            needs_redraw: true,
            running: true,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn scope(&self) -> &ProfileScope {
        &self.scope
    }

    /// The route of the mounted page, `None` while loading
    pub fn mounted_route(&self) -> Option<Route> {
        self.page.as_ref().map(|page| page.route())
    }

    /// Advance the loading fallback and mount the first page once it is done
    pub fn tick(&mut self) -> Result<()> {
        if self.page.is_some() {
            return Ok(());
        }

        if self.started.elapsed() >= Duration::from_millis(self.config.loading_ms) {
            self.mount(self.router.current())?;
        } else {
            self.loading_frame += 1;
            self.needs_redraw = true;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return Ok(());
        }

        let Some(page) = self.page.as_mut() else {
            return Ok(());
        };

        match page.handle_key(key) {
            Some(PageEvent::Navigate(route)) => self.navigate(route)?,
            Some(PageEvent::Quit) => self.quit(),
            None => {}
        }
        Ok(())
    }

    pub fn navigate(&mut self, route: Route) -> Result<()> {
        self.router.push(route);
        self.mount(route)
    }

    fn mount(&mut self, route: Route) -> Result<()> {
        // Unmount first so the old page's bindings are gone before new ones register
        self.page = None;
        self.page = Some(pages::mount(route, &self.scope, &self.queue)?);
        self.needs_redraw = true;
        Ok(())
    }

    fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    /// Whether anything changed since the last draw
    ///
    /// Consumes the committed render cycles of the queue.
    pub fn take_redraw(&mut self) -> bool {
        let cycles = self.queue.take_cycles();
        for cycle in &cycles {
            log::debug!("Render cycle for {} component(s)", cycle.components.len());
        }

        let redraw = self.needs_redraw || !cycles.is_empty();
        self.needs_redraw = false;
        redraw
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn render(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let title = self
            .mounted_route()
            .map(|route| route.to_string())
            .unwrap_or_else(|| "Loading".to_string());
        let header = Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(header), chunks[0]);

        match &self.page {
            Some(page) => page.render(chunks[1], f),
            None => loading::render(self.loading_frame, chunks[1], f),
        }
    }
}
