use alloc::rc::Rc;
use core::fmt;
use core::marker::PhantomData;

use crate::{
    EventKind, IntersectionEntry, IntersectionOptions, Listener, Observer, Result, Variant,
    VariantKind,
};

/// Marker for the intersection variant.
pub struct Intersection<N>(PhantomData<fn() -> N>);

/// An observer over a viewport intersection primitive.
pub type IntersectionObserver<N> = Observer<Intersection<N>>;

/// Callback for `intersect`: every entry of one batch.
pub type IntersectCallback<N> =
    Rc<dyn Fn(&[IntersectionEntry<N>], &mut IntersectionObserver<N>)>;

pub enum IntersectionListener<N> {
    Intersect(IntersectCallback<N>),
}

impl<N> Clone for IntersectionListener<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Intersect(f) => Self::Intersect(Rc::clone(f)),
        }
    }
}

impl<N> Listener for IntersectionListener<N> {
    fn kind(&self) -> EventKind {
        EventKind::Intersect
    }
}

impl<N> fmt::Debug for IntersectionListener<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IntersectionListener::intersect(..)")
    }
}

impl<N> Variant for Intersection<N> {
    type Node = N;
    type Options = IntersectionOptions<N>;
    type Record = IntersectionEntry<N>;
    type Listener = IntersectionListener<N>;

    const KIND: VariantKind = VariantKind::Intersection;

    fn decompose(observer: &mut IntersectionObserver<N>, batch: &[IntersectionEntry<N>]) {
        if batch.is_empty() {
            return;
        }
        if let Some(IntersectionListener::Intersect(f)) = observer.listener(EventKind::Intersect) {
            f(batch, observer);
        }
    }
}

impl<N> Observer<Intersection<N>> {
    /// Binds the `intersect` listener: called once per batch with all of its entries.
    pub fn on_intersect(
        &mut self,
        f: impl Fn(&[IntersectionEntry<N>], &mut Self) + 'static,
    ) -> Result<&mut Self> {
        self.on(IntersectionListener::Intersect(Rc::new(f)))
    }
}
