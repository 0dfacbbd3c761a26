use alloc::vec::Vec;

use crate::{EventKind, VariantKind};

/// The lifecycle state of an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    Active,
    Suspended,
    /// `dump` was called; every further operation fails with [`crate::Error::Destroyed`].
    Destroyed,
}

/// A lightweight, serializable summary of one observer.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`. Useful for
/// debugging overlays and for asserting on observer state without holding callbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub variant: VariantKind,
    pub state: State,
    /// Bound kinds, in the variant's declaration order.
    pub listeners: Vec<EventKind>,
    pub subscriber: bool,
}
