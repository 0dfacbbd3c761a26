use alloc::vec::Vec;

use crate::{Diagnostic, EventKind};

/// A typed callback bound to one [`EventKind`].
pub trait Listener: Clone {
    fn kind(&self) -> EventKind;
}

/// Per-instance routing table: at most one listener per kind plus one catch-all.
///
/// Occupied slots are never replaced; a second registration is rejected with a
/// [`Diagnostic`]. Lookups hand out clones (listeners are `Rc`s) so the caller can invoke them
/// while mutably borrowing the owning observer.
pub(crate) struct Router<L, C> {
    listeners: Vec<L>,
    catch_all: Option<C>,
}

impl<L: Listener, C: Clone> Router<L, C> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
            catch_all: None,
        }
    }

    pub(crate) fn insert(&mut self, listener: L) -> Result<(), Diagnostic> {
        let kind = listener.kind();
        if self.contains(kind) {
            return Err(Diagnostic::DuplicateListener(kind));
        }
        self.listeners.push(listener);
        Ok(())
    }

    pub(crate) fn contains(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|l| l.kind() == kind)
    }

    pub(crate) fn get(&self, kind: EventKind) -> Option<L> {
        self.listeners.iter().find(|l| l.kind() == kind).cloned()
    }

    pub(crate) fn set_catch_all(&mut self, catch_all: C) -> Result<(), Diagnostic> {
        if self.catch_all.is_some() {
            return Err(Diagnostic::DuplicateSubscriber);
        }
        self.catch_all = Some(catch_all);
        Ok(())
    }

    pub(crate) fn catch_all(&self) -> Option<C> {
        self.catch_all.clone()
    }

    pub(crate) fn has_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
