//! Minimal store + selector + dispatch state core
//!
//! This crate provides:
//! - [`Store`]: one state scope with a fixed reducer and a subscriber registry,
//!   notifying every subscriber in one batch per dispatch
//! - [`Binding`]: a per-component selector registration that caches its last
//!   selection and requests a re-render only when the selection changes identity
//! - [`RenderQueue`] and the [`Batcher`]/[`Rerender`] traits: the contract with
//!   the rendering layer that coalesces a batch into one render cycle
//! - [`StoreScope`]: explicit context for looking up a store when binding
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use redux_hooks::{Binding, RenderQueue, Store};
//!
//! let queue = RenderQueue::new();
//! let store = Store::builder(
//!     |count: &Rc<u32>, step: &u32| Rc::new(**count + step),
//!     0,
//! )
//! .batcher(Rc::new(queue.clone()))
//! .build();
//!
//! let counter = Binding::bind(&store, |count: &u32| *count, Rc::new(queue.component()));
//! counter.dispatch(2);
//!
//! assert_eq!(counter.selection(), 2);
//! assert_eq!(queue.take_cycles().len(), 1);
//! ```

pub mod binding;
pub mod error;
pub mod host;
pub mod memo;
pub mod ref_eq;
pub mod scope;
pub mod store;

pub use binding::Binding;
pub use error::{Result, StoreError};
pub use host::{
    Batcher, ComponentHandle, ComponentId, Immediate, RenderCycle, RenderMarker, RenderQueue,
    Rerender,
};
pub use memo::memo_selector;
pub use ref_eq::RefEq;
pub use scope::StoreScope;
pub use store::{Dispatch, FailurePolicy, Reducer, Store, StoreBuilder, Subscriber, SubscriberId};
