use alloc::rc::Rc;
use core::fmt;
use core::marker::PhantomData;

use crate::{
    EventKind, Listener, Observer, ResizeEntry, ResizeOptions, Result, Variant, VariantKind,
};

/// Marker for the resize variant.
pub struct Resize<N>(PhantomData<fn() -> N>);

/// An observer over a resize primitive.
pub type ResizeObserver<N> = Observer<Resize<N>>;

/// Callback for `resize`: every entry of one batch.
pub type ResizeCallback<N> = Rc<dyn Fn(&[ResizeEntry<N>], &mut ResizeObserver<N>)>;

pub enum ResizeListener<N> {
    Resize(ResizeCallback<N>),
}

impl<N> Clone for ResizeListener<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Resize(f) => Self::Resize(Rc::clone(f)),
        }
    }
}

impl<N> Listener for ResizeListener<N> {
    fn kind(&self) -> EventKind {
        EventKind::Resize
    }
}

impl<N> fmt::Debug for ResizeListener<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResizeListener::resize(..)")
    }
}

impl<N> Variant for Resize<N> {
    type Node = N;
    type Options = ResizeOptions;
    type Record = ResizeEntry<N>;
    type Listener = ResizeListener<N>;

    const KIND: VariantKind = VariantKind::Resize;

    fn decompose(observer: &mut ResizeObserver<N>, batch: &[ResizeEntry<N>]) {
        if batch.is_empty() {
            return;
        }
        if let Some(ResizeListener::Resize(f)) = observer.listener(EventKind::Resize) {
            f(batch, observer);
        }
    }
}

impl<N> Observer<Resize<N>> {
    /// Binds the `resize` listener: called once per batch with all of its entries.
    pub fn on_resize(
        &mut self,
        f: impl Fn(&[ResizeEntry<N>], &mut Self) + 'static,
    ) -> Result<&mut Self> {
        self.on(ResizeListener::Resize(Rc::new(f)))
    }
}
