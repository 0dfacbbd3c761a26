use alloc::boxed::Box;

use observers::{IntersectionOptions, MutationOptions, Primitive, ResizeOptions};

/// Builds host primitives on demand.
///
/// An [`crate::Aggregate`] asks for a primitive only when the first listener of that variant is
/// bound, so an unused variant never allocates one.
pub trait Backend<N> {
    fn mutation(&mut self) -> Box<dyn Primitive<N, MutationOptions>>;
    fn resize(&mut self) -> Box<dyn Primitive<N, ResizeOptions>>;
    fn intersection(&mut self) -> Box<dyn Primitive<N, IntersectionOptions<N>>>;
}

impl<N, B: Backend<N> + ?Sized> Backend<N> for Box<B> {
    fn mutation(&mut self) -> Box<dyn Primitive<N, MutationOptions>> {
        (**self).mutation()
    }

    fn resize(&mut self) -> Box<dyn Primitive<N, ResizeOptions>> {
        (**self).resize()
    }

    fn intersection(&mut self) -> Box<dyn Primitive<N, IntersectionOptions<N>>> {
        (**self).intersection()
    }
}
