#![forbid(unsafe_code)]

//! Positional change notifications for ordered lists.
//!
//! A [`ListChange`] always describes a mutation that has **already**
//! happened. Every index refers to the post-mutation list.

/// One mutation of an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange<T> {
    /// `item` now lives at `index`; later items shifted right by one.
    Inserted { index: usize, item: T },
    /// The item formerly at `from` now lives at `to`.
    Moved { from: usize, to: usize },
    /// The item formerly at `index` is gone; later items shifted left.
    Removed { index: usize },
    /// The item at `index` was overwritten with `item`.
    Replaced { index: usize, item: T },
    /// Contents changed wholesale; observers must re-read the list.
    Reset,
}

impl<T> ListChange<T> {
    /// Stable name for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "inserted",
            Self::Moved { .. } => "moved",
            Self::Removed { .. } => "removed",
            Self::Replaced { .. } => "replaced",
            Self::Reset => "reset",
        }
    }

    /// Whether this is a [`ListChange::Reset`].
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }
}

impl<T: Clone> ListChange<T> {
    /// Replay a positional change onto a plain vector.
    ///
    /// `Reset` carries no payload, so it leaves `items` untouched; callers
    /// replaying a stream must resync from the observed list on reset.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `items`.
    pub fn apply_to(&self, items: &mut Vec<T>) {
        match self {
            Self::Inserted { index, item } => items.insert(*index, item.clone()),
            Self::Moved { from, to } => {
                let moved = items.remove(*from);
                items.insert(*to, moved);
            }
            Self::Removed { index } => {
                items.remove(*index);
            }
            Self::Replaced { index, item } => items[*index] = item.clone(),
            Self::Reset => {}
        }
    }
}
