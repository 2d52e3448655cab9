#![forbid(unsafe_code)]

//! Keyed item groups that own a source list and its top-items mirror.
//!
//! A [`GroupSource`] is an ordinary owned value; create one where the data
//! is loaded and hand references to whoever needs to read it.

use crate::config::MirrorConfig;
use crate::error::{MirrorError, Result};
use crate::reactive::{BoundedMirror, ObservableList};

/// A titled group of items plus its bounded "top items" view.
#[derive(Debug)]
pub struct ItemGroup<T> {
    key: String,
    title: String,
    items: ObservableList<T>,
    top_items: BoundedMirror<T>,
}

impl<T: Clone + 'static> ItemGroup<T> {
    /// Create a group whose top items hold the default capacity.
    pub fn new(key: impl Into<String>, title: impl Into<String>, items: Vec<T>) -> Result<Self> {
        Self::with_config(key, title, items, &MirrorConfig::default())
    }

    pub fn with_config(
        key: impl Into<String>,
        title: impl Into<String>,
        items: Vec<T>,
        config: &MirrorConfig,
    ) -> Result<Self> {
        let items = ObservableList::from_vec(items);
        let top_items = BoundedMirror::with_config(&items, config)?;
        Ok(Self {
            key: key.into(),
            title: title.into(),
            items,
            top_items,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The full, mutable item list.
    #[must_use]
    pub fn items(&self) -> &ObservableList<T> {
        &self.items
    }

    /// The leading items of [`items`](Self::items), kept in sync.
    #[must_use]
    pub fn top_items(&self) -> &BoundedMirror<T> {
        &self.top_items
    }
}

/// Ordered collection of uniquely keyed groups.
#[derive(Debug)]
pub struct GroupSource<T> {
    groups: Vec<ItemGroup<T>>,
}

impl<T: Clone + 'static> Default for GroupSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> GroupSource<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Append a group; keys must be unique.
    pub fn push_group(&mut self, group: ItemGroup<T>) -> Result<()> {
        if self.group(group.key()).is_some() {
            return Err(MirrorError::configuration(format!(
                "duplicate group key {:?}",
                group.key()
            )));
        }
        self.groups.push(group);
        Ok(())
    }

    #[must_use]
    pub fn groups(&self) -> &[ItemGroup<T>] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, key: &str) -> Option<&ItemGroup<T>> {
        self.groups.iter().find(|group| group.key() == key)
    }

    /// First item, across all groups in order, matching `predicate`.
    pub fn find_item(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.groups.iter().find_map(|group| {
            group
                .items()
                .with(|items| items.iter().find(|item| predicate(item)).cloned())
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
