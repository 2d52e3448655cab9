#![forbid(unsafe_code)]

//! Observable lists and the bounded mirrors derived from them.
//!
//! - [`ObservableList`]: a shared, versioned list that notifies subscribers
//!   of every insert, move, removal, replacement, and reset.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`BoundedMirror`]: the first `capacity` items of a [`ListSource`],
//!   maintained incrementally from its change notifications.
//!
//! # Architecture
//!
//! Everything is single-threaded: shared state lives behind `Rc` and
//! `RefCell`, and handlers run to completion inside the mutating call.
//! Callers on multi-threaded hosts must confine a list and its mirrors to
//! one thread.
//!
//! # Invariants
//!
//! 1. Each mutation of a list produces exactly one [`ListChange`], delivered
//!    after the mutation with post-mutation indices.
//! 2. Subscribers are notified in registration order.
//! 3. A mirror equals the leading `capacity` items of its source after every
//!    delivered change.
//! 4. Dropping a [`Subscription`] (or a mirror) removes the callback before
//!    the next notification cycle.

pub mod bounded_mirror;
pub mod change;
pub mod observable_list;

pub use bounded_mirror::{BoundedMirror, MirrorSteps, MirrorWindow};
pub use change::ListChange;
pub use observable_list::{ListSource, ObservableList, Subscription};
