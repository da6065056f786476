//! Selector bindings
//!
//! A [`Binding`] connects one consuming component to a store. It keeps the
//! last value its selector produced and, on every store notification,
//! re-selects and compares by identity ([`RefEq`]). Only when the selection is
//! a different value does it ask the host to re-render the component.
//!
//! Selectors that build a new value on every call (for example a fresh record
//! combining several fields) therefore re-render on every dispatch. Memoize
//! them with [`crate::memo_selector`] when that matters.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::host::{RenderMarker, Rerender};
use crate::ref_eq::RefEq;
use crate::scope::StoreScope;
use crate::store::{Dispatch, Store, Subscriber, SubscriberId};

/// Subscriber record owned by a binding
struct Connection<S, T> {
    selector: Box<dyn Fn(&S) -> T>,
    cached: RefCell<T>,
    trigger: Rc<dyn Rerender>,
}

impl<S, T: RefEq> Subscriber<S> for Connection<S, T> {
    fn notify(&self, state: &Rc<S>) {
        let selection = (self.selector)(state);
        let changed = !selection.ref_eq(&self.cached.borrow());
        let previous = self.cached.replace(selection);
        drop(previous);

        if changed {
            self.trigger.request_render(RenderMarker::next());
        }
    }
}

/// Registration of one component's selector with a store
///
/// Dropping the binding unsubscribes it, so a torn-down component never
/// leaves its subscriber behind.
pub struct Binding<S, A, T> {
    store: Rc<Store<S, A>>,
    connection: Rc<Connection<S, T>>,
    id: Option<SubscriberId>,
}

impl<S, A, T> Binding<S, A, T>
where
    S: 'static,
    T: RefEq + 'static,
{
    /// Bind `selector` to `store`, re-rendering through `trigger` on change
    pub fn bind<F>(store: &Rc<Store<S, A>>, selector: F, trigger: Rc<dyn Rerender>) -> Self
    where
        F: Fn(&S) -> T + 'static,
    {
        let initial = store.select(&selector);
        let connection = Rc::new(Connection {
            selector: Box::new(selector),
            cached: RefCell::new(initial),
            trigger,
        });
        let id = store.subscribe(Rc::clone(&connection) as Rc<dyn Subscriber<S>>);

        Self {
            store: Rc::clone(store),
            connection,
            id: Some(id),
        }
    }

    /// Bind against the store provided in `scope`
    ///
    /// Fails with [`crate::StoreError::MissingStore`] if the scope is empty.
    pub fn connect<F>(scope: &StoreScope<S, A>, selector: F, trigger: Rc<dyn Rerender>) -> Result<Self>
    where
        F: Fn(&S) -> T + 'static,
    {
        let store = scope.store()?;
        Ok(Self::bind(&store, selector, trigger))
    }
}

impl<S, A, T> Binding<S, A, T> {
    /// The last selected value
    pub fn selection(&self) -> T
    where
        T: Clone,
    {
        self.connection.cached.borrow().clone()
    }

    /// Borrow the last selected value
    pub fn with_selection<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.connection.cached.borrow())
    }

    /// The `(selection, dispatch)` pair handed to a consuming component
    pub fn parts(&self) -> (T, Dispatch<S, A>)
    where
        T: Clone,
    {
        (self.selection(), self.dispatcher())
    }

    pub fn dispatch(&self, action: A) {
        self.store.dispatch(action);
    }

    pub fn dispatcher(&self) -> Dispatch<S, A> {
        self.store.dispatcher()
    }

    pub fn id(&self) -> Option<SubscriberId> {
        self.id
    }

    pub fn is_bound(&self) -> bool {
        self.id.is_some()
    }

    /// Unsubscribe from the store; later calls do nothing
    pub fn unbind(&mut self) {
        if let Some(id) = self.id.take() {
            self.store.unsubscribe(id);
        }
    }
}

impl<S, A, T> Drop for Binding<S, A, T> {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl<S, A, T: fmt::Debug> fmt::Debug for Binding<S, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("selection", &self.connection.cached.borrow())
            .finish()
    }
}
