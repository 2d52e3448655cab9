#![forbid(unsafe_code)]

//! Ordered, change-notifying list with RAII subscriptions.
//!
//! # Design
//!
//! [`ObservableList<T>`] wraps a `Vec<T>` in shared, reference-counted
//! storage. Each mutation updates the vector first, bumps the version, and
//! then hands a [`ListChange`] together with the post-mutation contents to
//! every live subscriber.
//!
//! Subscribers are held as `Weak` references. The strong side lives in the
//! [`Subscription`] returned by [`subscribe`](ObservableList::subscribe), so
//! dropping the guard is all it takes to unsubscribe. Dead entries are pruned
//! lazily on the next notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation.
//! 2. Exactly one notification is delivered per mutation, after the mutation.
//! 3. Subscribers are notified in registration order.
//! 4. A subscriber registered during a notification first hears the next one.
//!
//! # Failure Modes
//!
//! - **Subscriber mutates the list it observes**: the contents are borrowed
//!   for the duration of delivery, so the nested mutation panics with a
//!   `RefCell` borrow error. Reading the list from a subscriber is fine.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::change::ListChange;

type Callback<T> = dyn Fn(&ListChange<T>, &[T]);

struct Listener<T> {
    callback: Box<Callback<T>>,
}

struct ListInner<T> {
    items: RefCell<Vec<T>>,
    version: Cell<u64>,
    listeners: RefCell<Vec<Weak<Listener<T>>>>,
}

/// RAII guard for a change callback.
///
/// The callback stays registered for as long as this guard is alive.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
    _guard: Rc<dyn Any>,
}

impl Subscription {
    /// Explicitly unsubscribe. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Something a mirror can observe: readable contents plus change events.
pub trait ListSource<T> {
    /// Run `f` against the current contents.
    fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R;

    /// Register `callback` for every subsequent change.
    fn subscribe_changes(
        &self,
        callback: impl Fn(&ListChange<T>, &[T]) + 'static,
    ) -> Subscription;
}

/// A shared, ordered list that notifies subscribers of every mutation.
///
/// Cloning an `ObservableList` creates a new handle to the **same** list.
pub struct ObservableList<T> {
    inner: Rc<ListInner<T>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &self.inner.items.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Clone + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone + 'static> ObservableList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Wrap existing contents. No notification is emitted.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(ListInner {
                items: RefCell::new(items),
                version: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Clone of the item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.items.borrow().get(index).cloned()
    }

    /// Access the contents by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self.inner.items.borrow().as_slice())
    }

    /// Snapshot of the current contents.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.items.borrow().clone()
    }

    /// Number of mutations applied since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Register a callback invoked after every mutation with the change
    /// and the post-mutation contents.
    pub fn subscribe(&self, callback: impl Fn(&ListChange<T>, &[T]) + 'static) -> Subscription {
        let listener = Rc::new(Listener {
            callback: Box::new(callback),
        });
        self.inner
            .listeners
            .borrow_mut()
            .push(Rc::downgrade(&listener));
        Subscription { _guard: listener }
    }

    /// Append `item`.
    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.inner.items.borrow_mut();
            items.push(item.clone());
            items.len() - 1
        };
        self.notify(ListChange::Inserted { index, item });
    }

    /// Append every item of `iter`, one notification per item.
    pub fn extend(&self, iter: impl IntoIterator<Item = T>) {
        for item in iter {
            self.push(item);
        }
    }

    /// Insert `item` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&self, index: usize, item: T) {
        self.inner.items.borrow_mut().insert(index, item.clone());
        self.notify(ListChange::Inserted { index, item });
    }

    /// Remove and return the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&self, index: usize) -> T {
        let removed = self.inner.items.borrow_mut().remove(index);
        self.notify(ListChange::Removed { index });
        removed
    }

    /// Move the item at `from` so that it ends up at `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len`.
    pub fn move_item(&self, from: usize, to: usize) {
        {
            let mut items = self.inner.items.borrow_mut();
            let len = items.len();
            assert!(
                from < len && to < len,
                "move {from} -> {to} out of bounds for list of length {len}"
            );
            let moved = items.remove(from);
            items.insert(to, moved);
        }
        self.notify(ListChange::Moved { from, to });
    }

    /// Overwrite the item at `index`, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn replace(&self, index: usize, item: T) -> T {
        let previous = std::mem::replace(&mut self.inner.items.borrow_mut()[index], item.clone());
        self.notify(ListChange::Replaced { index, item });
        previous
    }

    /// Remove every item.
    pub fn clear(&self) {
        self.inner.items.borrow_mut().clear();
        self.notify(ListChange::Reset);
    }

    /// Replace the entire contents in one step.
    pub fn reset(&self, items: Vec<T>) {
        *self.inner.items.borrow_mut() = items;
        self.notify(ListChange::Reset);
    }

    /// Apply an already-planned change and notify subscribers with it.
    ///
    /// `Reset` replaces the contents with `reset_with`.
    pub(crate) fn apply(&self, change: ListChange<T>, reset_with: impl FnOnce() -> Vec<T>) {
        {
            let mut items = self.inner.items.borrow_mut();
            if change.is_reset() {
                *items = reset_with();
            } else {
                change.apply_to(&mut items);
            }
        }
        self.notify(change);
    }

    fn notify(&self, change: ListChange<T>) {
        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);

        let listeners: Vec<Rc<Listener<T>>> = {
            let mut weak = self.inner.listeners.borrow_mut();
            weak.retain(|listener| listener.strong_count() > 0);
            weak.iter().filter_map(Weak::upgrade).collect()
        };

        tracing::trace!(
            message = "list.notify",
            kind = change.kind(),
            version,
            subscribers = listeners.len()
        );

        let items = self.inner.items.borrow();
        for listener in &listeners {
            (listener.callback)(&change, items.as_slice());
        }
    }
}

impl<T: Clone + 'static> ListSource<T> for ObservableList<T> {
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
