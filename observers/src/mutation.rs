use alloc::rc::Rc;
use core::fmt;
use core::marker::PhantomData;

use crate::wiring::MutationWiring;
use crate::{
    AttrChange, EventKind, Listener, MutationOptions, MutationRecord, Observer, Result, Variant,
    VariantKind,
};

/// Marker for the structural mutation variant.
pub struct Structural<N>(PhantomData<fn() -> N>);

/// An observer over a structural mutation primitive.
pub type MutationObserver<N> = Observer<Structural<N>>;

/// Callback for `add` and `remove`: the non-empty node list of one record.
pub type NodesCallback<N> = Rc<dyn Fn(&[N], &mut MutationObserver<N>)>;

/// Callback for `mutate`: added and removed nodes of one record (at least one non-empty).
pub type MutateCallback<N> = Rc<dyn Fn(&[N], &[N], &mut MutationObserver<N>)>;

pub type AttrCallback<N> = Rc<dyn Fn(AttrChange<'_, N>, &mut MutationObserver<N>)>;

pub enum MutationListener<N> {
    Add(NodesCallback<N>),
    Remove(NodesCallback<N>),
    Mutate(MutateCallback<N>),
    Attr(AttrCallback<N>),
}

impl<N> Clone for MutationListener<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Add(f) => Self::Add(Rc::clone(f)),
            Self::Remove(f) => Self::Remove(Rc::clone(f)),
            Self::Mutate(f) => Self::Mutate(Rc::clone(f)),
            Self::Attr(f) => Self::Attr(Rc::clone(f)),
        }
    }
}

impl<N> Listener for MutationListener<N> {
    fn kind(&self) -> EventKind {
        match self {
            Self::Add(_) => EventKind::Add,
            Self::Remove(_) => EventKind::Remove,
            Self::Mutate(_) => EventKind::Mutate,
            Self::Attr(_) => EventKind::Attr,
        }
    }
}

impl<N> fmt::Debug for MutationListener<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MutationListener::{}(..)", self.kind())
    }
}

impl<N> Variant for Structural<N> {
    type Node = N;
    type Options = MutationOptions;
    type Record = MutationRecord<N>;
    type Listener = MutationListener<N>;

    const KIND: VariantKind = VariantKind::Mutation;

    fn decompose(observer: &mut MutationObserver<N>, batch: &[MutationRecord<N>]) {
        for record in batch {
            match record {
                MutationRecord::ChildList {
                    added_nodes,
                    removed_nodes,
                    ..
                } => {
                    if !added_nodes.is_empty() {
                        if let Some(MutationListener::Add(f)) = observer.listener(EventKind::Add) {
                            f(added_nodes, observer);
                        }
                    }
                    if !removed_nodes.is_empty() {
                        if let Some(MutationListener::Remove(f)) =
                            observer.listener(EventKind::Remove)
                        {
                            f(removed_nodes, observer);
                        }
                    }
                    if !added_nodes.is_empty() || !removed_nodes.is_empty() {
                        if let Some(MutationListener::Mutate(f)) =
                            observer.listener(EventKind::Mutate)
                        {
                            f(added_nodes, removed_nodes, observer);
                        }
                    }
                }
                MutationRecord::Attributes {
                    target,
                    attribute_name,
                    ..
                } => {
                    if let Some(MutationListener::Attr(f)) = observer.listener(EventKind::Attr) {
                        let change = AttrChange {
                            attribute_name: attribute_name.as_deref(),
                            target_node: target,
                        };
                        f(change, observer);
                    }
                }
                MutationRecord::CharacterData { .. } => {}
            }

            if observer.is_destroyed() {
                return;
            }
        }
    }
}

impl<N> Observer<Structural<N>> {
    /// Binds the `add` listener: called with the added nodes of each child-list record.
    pub fn on_add(&mut self, f: impl Fn(&[N], &mut Self) + 'static) -> Result<&mut Self> {
        self.on(MutationListener::Add(Rc::new(f)))
    }

    /// Binds the `remove` listener: called with the removed nodes of each child-list record.
    pub fn on_remove(&mut self, f: impl Fn(&[N], &mut Self) + 'static) -> Result<&mut Self> {
        self.on(MutationListener::Remove(Rc::new(f)))
    }

    /// Binds the `mutate` listener: called with both node lists of each child-list record that
    /// added or removed anything.
    pub fn on_mutate(&mut self, f: impl Fn(&[N], &[N], &mut Self) + 'static) -> Result<&mut Self> {
        self.on(MutationListener::Mutate(Rc::new(f)))
    }

    pub fn on_attr(
        &mut self,
        f: impl Fn(AttrChange<'_, N>, &mut Self) + 'static,
    ) -> Result<&mut Self> {
        self.on(MutationListener::Attr(Rc::new(f)))
    }

    /// Starts a wiring session in which each kind can be bound at most once, checked at
    /// compile time.
    pub fn wire(&mut self) -> MutationWiring<'_, N> {
        MutationWiring::new(self)
    }
}
