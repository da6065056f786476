use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::host::{Batcher, Immediate};

/// Reducer - pure function that produces the next state from current state + action
///
/// Returning `Rc::clone(state)` signals "nothing changed" to identity-based
/// selectors downstream.
pub type Reducer<S, A> = Box<dyn Fn(&Rc<S>, &A) -> Rc<S>>;

/// Token identifying one registered subscriber
///
/// Ids are unique per store. No ordering semantics are promised to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

/// Receiver of change notifications
pub trait Subscriber<S> {
    fn notify(&self, state: &Rc<S>);
}

impl<S, F> Subscriber<S> for F
where
    F: Fn(&Rc<S>),
{
    fn notify(&self, state: &Rc<S>) {
        self(state)
    }
}

/// What happens when a subscriber panics during a notification batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The panic unwinds out of `dispatch`. Subscribers later in the batch are
    /// not notified, while the state has already been replaced.
    #[default]
    Propagate,
    /// Each notification is isolated; a failure is logged and the batch goes on
    Isolate,
}

/// Store - holds one state scope and manages the dispatch/notify loop
///
/// The store follows the Redux pattern:
/// - Centralized state, replaced (never mutated in place) on each action
/// - A single pure reducer, fixed at construction
/// - Every dispatch notifies all subscribers in one batch
///
/// The store is single-threaded. No borrow of its internals is held while
/// user code runs, so reducers and subscribers may dispatch re-entrantly.
pub struct Store<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Reducer<S, A>,
    subscribers: RefCell<BTreeMap<SubscriberId, Rc<dyn Subscriber<S>>>>,
    next_id: Cell<u64>,
    batcher: Rc<dyn Batcher>,
    failure_policy: FailurePolicy,
}

impl<S, A> Store<S, A> {
    /// Create a store with an immediate batcher and the propagating failure policy
    pub fn new<R>(reducer: R, initial_state: S) -> Rc<Self>
    where
        R: Fn(&Rc<S>, &A) -> Rc<S> + 'static,
    {
        Self::builder(reducer, initial_state).build()
    }

    pub fn builder<R>(reducer: R, initial_state: S) -> StoreBuilder<S, A>
    where
        R: Fn(&Rc<S>, &A) -> Rc<S> + 'static,
    {
        StoreBuilder {
            reducer: Box::new(reducer),
            initial_state,
            batcher: None,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    /// Apply a selector to the current state
    pub fn select<T>(&self, selector: impl FnOnce(&S) -> T) -> T {
        selector(&self.state())
    }

    /// Run the reducer and notify every subscriber
    ///
    /// The state is replaced unconditionally, even if the reducer returned the
    /// same value. A panicking reducer leaves the state untouched.
    pub fn dispatch(&self, action: A) {
        let current = self.state();
        let next = (self.reducer)(&current, &action);
        drop(current);

        *self.state.borrow_mut() = next;
        self.notify_all();
    }

    /// Get a cloneable handle that dispatches into this store
    pub fn dispatcher(self: &Rc<Self>) -> Dispatch<S, A> {
        Dispatch {
            store: Rc::clone(self),
        }
    }

    /// Register a subscriber and return its id
    pub fn subscribe(&self, subscriber: Rc<dyn Subscriber<S>>) -> SubscriberId {
        let id = SubscriberId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.subscribers.borrow_mut().insert(id, subscriber);
        log::trace!("Subscribed {:?}", id);
        id
    }

    /// Remove a subscriber; unknown ids are ignored
    pub fn unsubscribe(&self, id: SubscriberId) {
        // Dropped outside the borrow: the record may own bindings of its own
        let removed = self.subscribers.borrow_mut().remove(&id);
        if removed.is_some() {
            log::trace!("Unsubscribed {:?}", id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    fn subscriber(&self, id: SubscriberId) -> Option<Rc<dyn Subscriber<S>>> {
        self.subscribers.borrow().get(&id).cloned()
    }

    /// Notify all subscribers registered at batch start, in registration order
    fn notify_all(&self) {
        let snapshot: Vec<SubscriberId> = self.subscribers.borrow().keys().copied().collect();
        log::debug!("Notifying {} subscriber(s)", snapshot.len());

        self.batcher.batched_updates(&mut || {
            for &id in &snapshot {
                // Entries removed earlier in this batch are skipped
                let Some(subscriber) = self.subscriber(id) else {
                    continue;
                };
                let state = self.state();

                match self.failure_policy {
                    FailurePolicy::Propagate => subscriber.notify(&state),
                    FailurePolicy::Isolate => {
                        let outcome =
                            panic::catch_unwind(AssertUnwindSafe(|| subscriber.notify(&state)));
                        if let Err(payload) = outcome {
                            log::error!(
                                "Subscriber {:?} failed during notification: {}",
                                id,
                                panic_message(payload.as_ref())
                            );
                        }
                    }
                }
            }
        });
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("subscribers", &self.subscriber_count())
            .field("next_id", &self.next_id.get())
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Builder for a [`Store`] with a custom batcher or failure policy
pub struct StoreBuilder<S, A> {
    reducer: Reducer<S, A>,
    initial_state: S,
    batcher: Option<Rc<dyn Batcher>>,
    failure_policy: FailurePolicy,
}

impl<S, A> StoreBuilder<S, A> {
    pub fn batcher(mut self, batcher: Rc<dyn Batcher>) -> Self {
        self.batcher = Some(batcher);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn build(self) -> Rc<Store<S, A>> {
        Rc::new(Store {
            state: RefCell::new(Rc::new(self.initial_state)),
            reducer: self.reducer,
            subscribers: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
            batcher: self.batcher.unwrap_or_else(|| Rc::new(Immediate)),
            failure_policy: self.failure_policy,
        })
    }
}

/// Cloneable dispatch handle handed to consuming components
pub struct Dispatch<S, A> {
    store: Rc<Store<S, A>>,
}

impl<S, A> Dispatch<S, A> {
    pub fn dispatch(&self, action: A) {
        self.store.dispatch(action);
    }
}

impl<S, A> Clone for Dispatch<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
        }
    }
}

impl<S, A> fmt::Debug for Dispatch<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch").field("store", &self.store).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{RenderMarker, RenderQueue, Rerender};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Add(i64),
        Noop,
    }

    fn counter_reducer(state: &Rc<i64>, action: &CounterAction) -> Rc<i64> {
        match action {
            CounterAction::Add(n) => Rc::new(**state + n),
            CounterAction::Noop => Rc::clone(state),
        }
    }

    fn counting_subscriber(calls: &Rc<Cell<usize>>) -> Rc<dyn Subscriber<i64>> {
        let calls = Rc::clone(calls);
        Rc::new(move |_: &Rc<i64>| calls.set(calls.get() + 1))
    }

    #[test]
    fn test_state_is_left_fold_of_actions() {
        let store = Store::new(counter_reducer, 0);
        let actions = [
            CounterAction::Add(3),
            CounterAction::Noop,
            CounterAction::Add(-1),
            CounterAction::Add(10),
        ];

        let expected = actions
            .iter()
            .fold(Rc::new(0), |state, action| counter_reducer(&state, action));
        for action in actions {
            store.dispatch(action);
        }

        assert_eq!(*store.state(), *expected);
        assert_eq!(*store.state(), 12);
    }

    #[test]
    fn test_unchanged_state_still_notifies_everyone() {
        let store = Store::new(counter_reducer, 5);
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        store.subscribe(counting_subscriber(&first));
        store.subscribe(counting_subscriber(&second));

        let before = store.state();
        store.dispatch(CounterAction::Noop);

        assert!(Rc::ptr_eq(&before, &store.state()));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_unsubscribed_subscriber_is_never_notified_again() {
        let store = Store::new(counter_reducer, 0);
        let calls = Rc::new(Cell::new(0));
        let id = store.subscribe(counting_subscriber(&calls));

        store.dispatch(CounterAction::Add(1));
        store.unsubscribe(id);
        store.dispatch(CounterAction::Add(1));
        store.dispatch(CounterAction::Add(1));

        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_noop() {
        let store = Store::new(counter_reducer, 0);
        let calls = Rc::new(Cell::new(0));
        let id = store.subscribe(counting_subscriber(&calls));

        store.unsubscribe(SubscriberId(999));
        store.unsubscribe(id);
        store.unsubscribe(id);

        let other = store.subscribe(counting_subscriber(&calls));
        store.dispatch(CounterAction::Add(1));

        assert_ne!(id, other);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = Store::new(counter_reducer, 0);
        let calls = Rc::new(Cell::new(0));

        let ids: Vec<_> = (0..5).map(|_| store.subscribe(counting_subscriber(&calls))).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();

        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_subscribers_see_current_state() {
        let store = Store::new(counter_reducer, 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(Rc::new(move |state: &Rc<i64>| sink.borrow_mut().push(**state)));

        store.dispatch(CounterAction::Add(2));
        store.dispatch(CounterAction::Add(3));

        assert_eq!(*seen.borrow(), vec![2, 5]);
    }

    #[test]
    fn test_one_dispatch_produces_one_render_cycle() {
        let queue = RenderQueue::new();
        let store = Store::builder(counter_reducer, 0)
            .batcher(Rc::new(queue.clone()))
            .build();

        let handles: Vec<_> = (0..10).map(|_| queue.component()).collect();
        for handle in &handles {
            let handle = handle.clone();
            store.subscribe(Rc::new(move |_: &Rc<i64>| {
                handle.request_render(RenderMarker::next())
            }));
        }

        store.dispatch(CounterAction::Add(1));

        let cycles = queue.take_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].components.len(), 10);
    }

    #[test]
    fn test_reentrant_dispatch_keeps_registry_intact() {
        let queue = RenderQueue::new();
        let store = Store::builder(counter_reducer, 0)
            .batcher(Rc::new(queue.clone()))
            .build();

        let weak = Rc::downgrade(&store);
        store.subscribe(Rc::new(move |state: &Rc<i64>| {
            // Bounce once: 1 -> 11
            if **state == 1 {
                if let Some(store) = weak.upgrade() {
                    store.dispatch(CounterAction::Add(10));
                }
            }
        }));
        let calls = Rc::new(Cell::new(0));
        store.subscribe(counting_subscriber(&calls));

        store.dispatch(CounterAction::Add(1));

        assert_eq!(*store.state(), 11);
        assert_eq!(store.subscriber_count(), 2);
        // once from the nested batch, once from the outer batch
        assert_eq!(calls.get(), 2);
        assert_eq!(queue.cycle_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_batch_skips_only_removed_entry() {
        let store = Store::new(counter_reducer, 0);
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let third = Rc::new(Cell::new(0));

        let victim_slot: Rc<Cell<Option<SubscriberId>>> = Rc::new(Cell::new(None));
        let weak = Rc::downgrade(&store);
        let slot = Rc::clone(&victim_slot);
        let first_calls = Rc::clone(&first);
        store.subscribe(Rc::new(move |_: &Rc<i64>| {
            first_calls.set(first_calls.get() + 1);
            if let (Some(store), Some(victim)) = (weak.upgrade(), slot.get()) {
                store.unsubscribe(victim);
            }
        }));
        let victim = store.subscribe(counting_subscriber(&second));
        victim_slot.set(Some(victim));
        store.subscribe(counting_subscriber(&third));

        store.dispatch(CounterAction::Add(1));

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        assert_eq!(third.get(), 1);
        assert_eq!(store.subscriber_count(), 2);
    }

    #[test]
    fn test_subscriber_added_during_batch_waits_for_next_dispatch() {
        let store = Store::new(counter_reducer, 0);
        let late = Rc::new(Cell::new(0));
        let weak = Rc::downgrade(&store);
        let late_calls = Rc::clone(&late);
        let added = Rc::new(Cell::new(false));
        let added_flag = Rc::clone(&added);

        store.subscribe(Rc::new(move |_: &Rc<i64>| {
            if !added_flag.replace(true) {
                if let Some(store) = weak.upgrade() {
                    store.subscribe(counting_subscriber(&late_calls));
                }
            }
        }));

        store.dispatch(CounterAction::Add(1));
        assert_eq!(late.get(), 0);

        store.dispatch(CounterAction::Add(1));
        assert_eq!(late.get(), 1);
    }

    #[test]
    fn test_propagate_policy_aborts_batch_after_state_update() {
        let store = Store::new(counter_reducer, 0);
        let after = Rc::new(Cell::new(0));
        store.subscribe(Rc::new(|_: &Rc<i64>| panic!("selector failed")));
        store.subscribe(counting_subscriber(&after));

        let result = panic::catch_unwind(AssertUnwindSafe(|| store.dispatch(CounterAction::Add(4))));

        assert!(result.is_err());
        assert_eq!(*store.state(), 4);
        assert_eq!(after.get(), 0);
    }

    #[test]
    fn test_isolate_policy_notifies_remaining_subscribers() {
        let store = Store::builder(counter_reducer, 0)
            .failure_policy(FailurePolicy::Isolate)
            .build();
        let before = Rc::new(Cell::new(0));
        let after = Rc::new(Cell::new(0));
        store.subscribe(counting_subscriber(&before));
        store.subscribe(Rc::new(|_: &Rc<i64>| panic!("selector failed")));
        store.subscribe(counting_subscriber(&after));

        store.dispatch(CounterAction::Add(4));
        store.dispatch(CounterAction::Add(1));

        assert_eq!(*store.state(), 5);
        assert_eq!(before.get(), 2);
        assert_eq!(after.get(), 2);
        assert_eq!(store.failure_policy(), FailurePolicy::Isolate);
    }

    #[test]
    fn test_panicking_reducer_leaves_state_untouched() {
        let store: Rc<Store<i64, CounterAction>> = Store::new(
            |state: &Rc<i64>, action: &CounterAction| match action {
                CounterAction::Add(0) => panic!("reducer failed"),
                other => counter_reducer(state, other),
            },
            7,
        );
        let calls = Rc::new(Cell::new(0));
        store.subscribe(counting_subscriber(&calls));

        let result = panic::catch_unwind(AssertUnwindSafe(|| store.dispatch(CounterAction::Add(0))));

        assert!(result.is_err());
        assert_eq!(*store.state(), 7);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_dispatch_handle_reaches_store() {
        let store = Store::new(counter_reducer, 0);
        let dispatch = store.dispatcher();
        let copy = dispatch.clone();

        dispatch.dispatch(CounterAction::Add(2));
        copy.dispatch(CounterAction::Add(2));

        assert_eq!(*store.state(), 4);
        assert_eq!(store.select(|n| *n * 10), 40);
    }
}
