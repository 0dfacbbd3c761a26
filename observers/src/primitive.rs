use alloc::boxed::Box;

/// A host change-notification primitive (e.g. a DOM `MutationObserver`).
///
/// The primitive is built by the host before an observer is constructed and is then owned
/// exclusively by that observer. While observing, the host forwards each batch the primitive
/// produces to [`crate::Observer::deliver`].
///
/// Implementations do not need to guard against redundant calls: the observer only calls
/// `observe` when suspended and `disconnect` when active, except for the final, unconditional
/// `disconnect` on dump.
pub trait Primitive<N, O> {
    /// Starts (or restarts) observing `target`.
    fn observe(&mut self, target: &N, options: &O);

    /// Stops delivery. The primitive may be observed again later.
    fn disconnect(&mut self);
}

impl<N, O, P: Primitive<N, O> + ?Sized> Primitive<N, O> for Box<P> {
    fn observe(&mut self, target: &N, options: &O) {
        (**self).observe(target, options);
    }

    fn disconnect(&mut self) {
        (**self).disconnect();
    }
}
