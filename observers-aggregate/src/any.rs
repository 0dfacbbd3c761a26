use alloc::rc::Rc;
use core::fmt;

use observers::{
    EventKind, IntersectionEntry, IntersectionListener, Listener, MutationListener, MutationRecord,
    ResizeEntry, ResizeListener, VariantKind,
};

use crate::Aggregate;

/// A listener for any variant, routed by [`crate::Aggregate::on`] to the child that owns its
/// kind.
pub enum AnyListener<N> {
    Mutation(MutationListener<N>),
    Resize(ResizeListener<N>),
    Intersection(IntersectionListener<N>),
}

impl<N> AnyListener<N> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Mutation(listener) => listener.kind(),
            Self::Resize(listener) => listener.kind(),
            Self::Intersection(listener) => listener.kind(),
        }
    }

    pub fn variant(&self) -> VariantKind {
        self.kind().variant()
    }
}

impl<N> Clone for AnyListener<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Mutation(listener) => Self::Mutation(listener.clone()),
            Self::Resize(listener) => Self::Resize(listener.clone()),
            Self::Intersection(listener) => Self::Intersection(listener.clone()),
        }
    }
}

impl<N> fmt::Debug for AnyListener<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyListener::{}(..)", self.kind())
    }
}

impl<N> From<MutationListener<N>> for AnyListener<N> {
    fn from(listener: MutationListener<N>) -> Self {
        Self::Mutation(listener)
    }
}

impl<N> From<ResizeListener<N>> for AnyListener<N> {
    fn from(listener: ResizeListener<N>) -> Self {
        Self::Resize(listener)
    }
}

impl<N> From<IntersectionListener<N>> for AnyListener<N> {
    fn from(listener: IntersectionListener<N>) -> Self {
        Self::Intersection(listener)
    }
}

/// One raw batch, tagged with the variant that produced it.
pub enum AnyBatch<'a, N> {
    Mutation(&'a [MutationRecord<N>]),
    Resize(&'a [ResizeEntry<N>]),
    Intersection(&'a [IntersectionEntry<N>]),
}

impl<N> AnyBatch<'_, N> {
    pub fn variant(&self) -> VariantKind {
        match self {
            Self::Mutation(_) => VariantKind::Mutation,
            Self::Resize(_) => VariantKind::Resize,
            Self::Intersection(_) => VariantKind::Intersection,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Mutation(records) => records.len(),
            Self::Resize(entries) => entries.len(),
            Self::Intersection(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<N> Clone for AnyBatch<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for AnyBatch<'_, N> {}

impl<N: fmt::Debug> fmt::Debug for AnyBatch<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutation(records) => f.debug_tuple("Mutation").field(records).finish(),
            Self::Resize(entries) => f.debug_tuple("Resize").field(entries).finish(),
            Self::Intersection(entries) => f.debug_tuple("Intersection").field(entries).finish(),
        }
    }
}

/// The aggregate catch-all registered with [`crate::Aggregate::subscribe`].
pub type AnySubscriber<N> = Rc<dyn Fn(AnyBatch<'_, N>, &mut Aggregate<N>)>;
