//! Host rendering contract
//!
//! The store never renders anything itself. It relies on two facilities of the
//! rendering layer that hosts it:
//!
//! - [`Batcher`]: run a closure such that every re-render requested inside it
//!   collapses into a single render cycle.
//! - [`Rerender`]: force one component instance to re-render by handing it an
//!   opaque [`RenderMarker`].
//!
//! [`Immediate`] is the trivial batcher. [`RenderQueue`] is a complete
//! in-process host that coalesces requests per outermost batch and records
//! each committed [`RenderCycle`] for the render loop to pick up.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

thread_local! {
    static NEXT_MARKER: Cell<u64> = const { Cell::new(0) };
}

/// Opaque value set on a component to force a re-render
///
/// Every marker is distinct from every other; its content carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderMarker(u64);

impl RenderMarker {
    /// Create a fresh marker
    pub fn next() -> Self {
        NEXT_MARKER.with(|next| {
            let value = next.get().wrapping_add(1);
            next.set(value);
            Self(value)
        })
    }
}

/// Batched updates facility of the host
pub trait Batcher {
    /// Run `f`; re-renders requested while it runs form one render cycle
    fn batched_updates(&self, f: &mut dyn FnMut());
}

/// Re-render primitive of one component instance
pub trait Rerender {
    /// Set the component's marker, scheduling a re-render
    fn request_render(&self, marker: RenderMarker);
}

/// Batcher that runs the closure directly without coalescing
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Batcher for Immediate {
    fn batched_updates(&self, f: &mut dyn FnMut()) {
        f();
    }
}

/// Identifier of a component registered with a [`RenderQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

/// One paint/update pass covering every component marked dirty together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCycle {
    pub components: Vec<ComponentId>,
}

impl RenderCycle {
    /// Whether the given component re-renders in this cycle
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains(&id)
    }
}

#[derive(Debug, Default)]
struct QueueInner {
    depth: Cell<usize>,
    dirty: RefCell<BTreeMap<ComponentId, RenderMarker>>,
    committed: RefCell<Vec<RenderCycle>>,
    cycle_count: Cell<usize>,
    next_component: Cell<u64>,
}

impl QueueInner {
    fn mark(&self, id: ComponentId, marker: RenderMarker) {
        self.dirty.borrow_mut().insert(id, marker);
        if self.depth.get() == 0 {
            self.commit();
        }
    }

    fn commit(&self) {
        let dirty = std::mem::take(&mut *self.dirty.borrow_mut());
        if dirty.is_empty() {
            return;
        }

        let cycle = RenderCycle {
            components: dirty.into_keys().collect(),
        };
        log::trace!("Committing render cycle for {} component(s)", cycle.components.len());
        self.committed.borrow_mut().push(cycle);
        self.cycle_count.set(self.cycle_count.get() + 1);
    }
}

/// Restores batch depth on exit, including during unwinding
struct BatchGuard<'a> {
    inner: &'a QueueInner,
}

impl<'a> BatchGuard<'a> {
    fn enter(inner: &'a QueueInner) -> Self {
        inner.depth.set(inner.depth.get() + 1);
        Self { inner }
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        let depth = self.inner.depth.get() - 1;
        self.inner.depth.set(depth);
        if depth == 0 {
            self.inner.commit();
        }
    }
}

/// In-process host that coalesces re-render requests into render cycles
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    inner: Rc<QueueInner>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new component instance and get its re-render handle
    pub fn component(&self) -> ComponentHandle {
        let id = self.inner.next_component.get() + 1;
        self.inner.next_component.set(id);
        ComponentHandle {
            id: ComponentId(id),
            inner: Rc::clone(&self.inner),
        }
    }

    /// Drain the render cycles committed since the last call
    pub fn take_cycles(&self) -> Vec<RenderCycle> {
        std::mem::take(&mut *self.inner.committed.borrow_mut())
    }

    /// Total number of render cycles committed so far
    pub fn cycle_count(&self) -> usize {
        self.inner.cycle_count.get()
    }

    /// Whether a batch is currently running
    pub fn in_batch(&self) -> bool {
        self.inner.depth.get() > 0
    }
}

impl Batcher for RenderQueue {
    fn batched_updates(&self, f: &mut dyn FnMut()) {
        let _guard = BatchGuard::enter(&self.inner);
        f();
    }
}

/// Re-render handle of one component registered with a [`RenderQueue`]
#[derive(Debug, Clone)]
pub struct ComponentHandle {
    id: ComponentId,
    inner: Rc<QueueInner>,
}

impl ComponentHandle {
    pub fn id(&self) -> ComponentId {
        self.id
    }
}

impl Rerender for ComponentHandle {
    fn request_render(&self, marker: RenderMarker) {
        self.inner.mark(self.id, marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markers_are_distinct() {
        assert_ne!(RenderMarker::next(), RenderMarker::next());
    }

    #[test]
    fn test_requests_inside_batch_form_one_cycle() {
        let queue = RenderQueue::new();
        let a = queue.component();
        let b = queue.component();

        queue.batched_updates(&mut || {
            a.request_render(RenderMarker::next());
            b.request_render(RenderMarker::next());
            a.request_render(RenderMarker::next());
        });

        assert_eq!(
            queue.take_cycles(),
            vec![RenderCycle {
                components: vec![a.id(), b.id()]
            }]
        );
        assert_eq!(queue.cycle_count(), 1);
    }

    #[test]
    fn test_empty_batch_commits_nothing() {
        let queue = RenderQueue::new();
        queue.batched_updates(&mut || {});

        assert!(queue.take_cycles().is_empty());
        assert_eq!(queue.cycle_count(), 0);
    }

    #[test]
    fn test_nested_batches_coalesce_into_outermost() {
        let queue = RenderQueue::new();
        let a = queue.component();
        let b = queue.component();
        let inner_queue = queue.clone();

        queue.batched_updates(&mut || {
            a.request_render(RenderMarker::next());
            inner_queue.batched_updates(&mut || b.request_render(RenderMarker::next()));
            assert!(inner_queue.take_cycles().is_empty());
        });

        let cycles = queue.take_cycles();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].contains(a.id()));
        assert!(cycles[0].contains(b.id()));
    }

    #[test]
    fn test_request_outside_batch_commits_immediately() {
        let queue = RenderQueue::new();
        let a = queue.component();

        a.request_render(RenderMarker::next());
        a.request_render(RenderMarker::next());

        assert_eq!(queue.cycle_count(), 2);
        assert!(!queue.in_batch());
    }

    #[test]
    fn test_depth_restored_after_panic() {
        let queue = RenderQueue::new();
        let a = queue.component();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            queue.batched_updates(&mut || {
                a.request_render(RenderMarker::next());
                panic!("render failed");
            });
        }));

        assert!(result.is_err());
        assert!(!queue.in_batch());
        assert_eq!(queue.cycle_count(), 1);
    }
}
