/// Target handles an [`crate::Aggregate`] can share among its children.
///
/// Every child observer owns its own clone of the target.
pub trait SharedNode: Clone + 'static {}

impl<T: Clone + 'static> SharedNode for T {}
