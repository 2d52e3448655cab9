#![forbid(unsafe_code)]

//! Bounded "first N items" mirror of an observable list.
//!
//! # Design
//!
//! A [`BoundedMirror<T>`] subscribes to a [`ListSource`] and keeps its own
//! [`ObservableList`] equal to the first `capacity` items of that source.
//! Every source change is translated by [`MirrorWindow::plan`] into at most
//! two positional steps against the mirror. Those steps are applied one by
//! one and re-emitted to the mirror's own subscribers, so a mirror can itself
//! be observed (or mirrored again).
//!
//! When a transition both evicts and admits an item, the eviction
//! (`Removed { index: capacity - 1 }`) is emitted first. The mirror therefore
//! never holds more than `capacity` items, even between the two steps.
//!
//! # Invariants
//!
//! 1. After each source notification is handled,
//!    `mirror == source[..min(capacity, source.len())]`.
//! 2. Only `Reset` reads more than one source item; every other transition
//!    touches at most the item at `capacity - 1` or the moved item.
//! 3. Forwarded steps replayed in order onto a copy of the mirror reproduce
//!    the mirror (a `Reset` requires re-reading it).
//!
//! # Failure Modes
//!
//! - **Source delivers out-of-order, dropped, or duplicated notifications**:
//!   undetectable; the mirror silently diverges. Index bounds are checked
//!   with `debug_assert!` only.

use smallvec::SmallVec;

use super::change::ListChange;
use super::observable_list::{ListSource, ObservableList, Subscription};
use crate::config::MirrorConfig;
use crate::error::Result;

/// Steps produced for one source change. Never more than two.
pub type MirrorSteps<T> = SmallVec<[ListChange<T>; 2]>;

/// Capacity and current length of a mirror: everything the transition
/// table needs besides the change and the source contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorWindow {
    pub capacity: usize,
    pub len: usize,
}

impl MirrorWindow {
    #[must_use]
    pub const fn new(capacity: usize, len: usize) -> Self {
        Self { capacity, len }
    }

    /// Whether `index` falls inside `[0, capacity)`.
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index < self.capacity
    }

    const fn is_full(self) -> bool {
        self.len >= self.capacity
    }

    /// Translate one source change into mirror steps.
    ///
    /// `source` is the post-mutation source contents.
    #[must_use]
    pub fn plan<T: Clone>(self, change: &ListChange<T>, source: &[T]) -> MirrorSteps<T> {
        match change {
            ListChange::Inserted { index, item } => self.on_inserted(*index, item, source),
            ListChange::Moved { from, to } => self.on_moved(*from, *to, source),
            ListChange::Removed { index } => self.on_removed(*index, source),
            ListChange::Replaced { index, item } => self.on_replaced(*index, item, source),
            ListChange::Reset => self.on_reset(),
        }
    }

    /// `Inserted(i)`: inside the window, evict the last slot when full and
    /// insert at `i`; outside, no-op.
    pub fn on_inserted<T: Clone>(self, index: usize, item: &T, source: &[T]) -> MirrorSteps<T> {
        debug_assert!(index < source.len(), "inserted index {index} past source end");
        let mut steps = MirrorSteps::new();
        if !self.contains(index) {
            return steps;
        }
        debug_assert!(index <= self.len, "inserted index {index} skips mirror slots");
        if self.is_full() {
            steps.push(ListChange::Removed {
                index: self.capacity - 1,
            });
        }
        steps.push(ListChange::Inserted {
            index,
            item: item.clone(),
        });
        steps
    }

    /// `Moved(from, to)`: reorder inside the window, drop and refill when
    /// leaving it, evict and admit when entering it, otherwise no-op.
    pub fn on_moved<T: Clone>(self, from: usize, to: usize, source: &[T]) -> MirrorSteps<T> {
        debug_assert!(
            from < source.len() && to < source.len(),
            "move {from} -> {to} out of bounds for source of length {}",
            source.len()
        );
        let mut steps = MirrorSteps::new();
        if from == to {
            return steps;
        }
        match (self.contains(from), self.contains(to)) {
            (true, true) => steps.push(ListChange::Moved { from, to }),
            (true, false) => {
                steps.push(ListChange::Removed { index: from });
                self.refill_last(source, &mut steps);
            }
            (false, true) => {
                if self.is_full() {
                    steps.push(ListChange::Removed {
                        index: self.capacity - 1,
                    });
                }
                steps.push(ListChange::Inserted {
                    index: to,
                    item: source[to].clone(),
                });
            }
            (false, false) => {}
        }
        steps
    }

    /// `Removed(i)`: inside the window, remove `i` and refill from
    /// `source[capacity - 1]` when it exists; outside, no-op.
    pub fn on_removed<T: Clone>(self, index: usize, source: &[T]) -> MirrorSteps<T> {
        debug_assert!(index <= source.len(), "removed index {index} past source end");
        let mut steps = MirrorSteps::new();
        if !self.contains(index) {
            return steps;
        }
        debug_assert!(index < self.len, "removed index {index} not in mirror");
        steps.push(ListChange::Removed { index });
        self.refill_last(source, &mut steps);
        steps
    }

    /// `Replaced(i)`: overwrite slot `i` inside the window; outside, no-op.
    pub fn on_replaced<T: Clone>(self, index: usize, item: &T, source: &[T]) -> MirrorSteps<T> {
        debug_assert!(index < source.len(), "replaced index {index} past source end");
        let mut steps = MirrorSteps::new();
        if self.contains(index) {
            steps.push(ListChange::Replaced {
                index,
                item: item.clone(),
            });
        }
        steps
    }

    /// `Reset`: clear and refill from the leading source items.
    pub fn on_reset<T: Clone>(self) -> MirrorSteps<T> {
        let mut steps = MirrorSteps::new();
        steps.push(ListChange::Reset);
        steps
    }

    /// Leading slice of `source` that belongs in the mirror.
    #[must_use]
    pub fn visible<T>(self, source: &[T]) -> &[T] {
        &source[..source.len().min(self.capacity)]
    }

    // After one mirror slot was vacated, pull in whatever now sits at the
    // last visible source position.
    fn refill_last<T: Clone>(self, source: &[T], steps: &mut MirrorSteps<T>) {
        if let Some(item) = source.get(self.capacity - 1) {
            steps.push(ListChange::Inserted {
                index: self.capacity - 1,
                item: item.clone(),
            });
        }
    }
}

/// The first `capacity` items of a source list, kept in sync incrementally.
///
/// Dropping the mirror unsubscribes it from its source.
pub struct BoundedMirror<T> {
    output: ObservableList<T>,
    capacity: usize,
    _subscription: Subscription,
}

impl<T: std::fmt::Debug> std::fmt::Debug for BoundedMirror<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedMirror")
            .field("capacity", &self.capacity)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> BoundedMirror<T> {
    /// Mirror the first `capacity` items of `source`.
    ///
    /// Fails with a configuration error when `capacity` is zero.
    pub fn new(source: &impl ListSource<T>, capacity: usize) -> Result<Self> {
        Self::with_config(source, &MirrorConfig { capacity })
    }

    /// Mirror the first `config.capacity` items of `source`.
    pub fn with_config(source: &impl ListSource<T>, config: &MirrorConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity;

        let initial = source.with_items(|items| {
            MirrorWindow::new(capacity, items.len())
                .visible(items)
                .to_vec()
        });
        tracing::debug!(message = "mirror.attach", capacity, initial_len = initial.len());

        let output = ObservableList::from_vec(initial);
        let target = output.clone();
        let subscription = source.subscribe_changes(move |change, items| {
            let window = MirrorWindow::new(capacity, target.len());
            let steps = window.plan(change, items);
            tracing::trace!(
                message = "mirror.apply",
                kind = change.kind(),
                steps = steps.len()
            );
            for step in steps {
                target.apply(step, || {
                    let refill = window.visible(items).to_vec();
                    tracing::debug!(message = "mirror.reset", capacity, len = refill.len());
                    refill
                });
            }
        });

        Ok(Self {
            output,
            capacity,
            _subscription: subscription,
        })
    }

    /// Snapshot of the mirrored items.
    #[must_use]
    pub fn mirror(&self) -> Vec<T> {
        self.output.to_vec()
    }

    /// Access the mirrored items by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.output.with(f)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.output.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of steps applied to the mirror since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.output.version()
    }

    /// Observe the mirror's own changes.
    pub fn subscribe(&self, callback: impl Fn(&ListChange<T>, &[T]) + 'static) -> Subscription {
        self.output.subscribe(callback)
    }
}

impl<T> Drop for BoundedMirror<T> {
    fn drop(&mut self) {
        tracing::debug!(message = "mirror.detach", capacity = self.capacity);
    }
}

impl<T: Clone + 'static> ListSource<T> for BoundedMirror<T> {
    fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.with(f)
    }

    fn subscribe_changes(
        &self,
        callback: impl Fn(&ListChange<T>, &[T]) + 'static,
    ) -> Subscription {
        self.subscribe(callback)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
