//! Explicit store scope
//!
//! A [`StoreScope`] is passed by the application to whatever constructs
//! bindings. It plays the role of a per-component persistent reference: the
//! store inside it is created at most once and then reused for the lifetime of
//! the scope. Several scopes can coexist, each with its own store.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, StoreError};
use crate::store::Store;

pub struct StoreScope<S, A> {
    store: OnceCell<Rc<Store<S, A>>>,
}

impl<S, A> StoreScope<S, A> {
    /// An empty scope; binding against it fails until a store is provided
    pub fn new() -> Self {
        Self {
            store: OnceCell::new(),
        }
    }

    pub fn with_store(store: Rc<Store<S, A>>) -> Self {
        Self {
            store: OnceCell::from(store),
        }
    }

    /// Return the scope's store, creating it with `init` on first use
    pub fn get_or_init(&self, init: impl FnOnce() -> Rc<Store<S, A>>) -> Rc<Store<S, A>> {
        Rc::clone(self.store.get_or_init(init))
    }

    /// Look up the store, failing if none was provided
    pub fn store(&self) -> Result<Rc<Store<S, A>>> {
        self.store.get().cloned().ok_or(StoreError::MissingStore)
    }

    pub fn is_provided(&self) -> bool {
        self.store.get().is_some()
    }
}

impl<S, A> Default for StoreScope<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> fmt::Debug for StoreScope<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreScope")
            .field("store", &self.store.get())
            .finish()
    }
}
