#![forbid(unsafe_code)]

//! Runtime: observable lists and bounded mirror views over them.

pub mod config;
pub mod error;
pub mod group;
pub mod reactive;

pub use config::{DEFAULT_CAPACITY, MirrorConfig};
pub use error::{MirrorError, Result};
pub use group::{GroupSource, ItemGroup};
pub use reactive::{BoundedMirror, ListChange, ListSource, ObservableList, Subscription};
