/// Errors returned by [`crate::Aggregate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("aggregate observer used after dump")]
    Destroyed,
    /// A child observer rejected the call, usually because it was dumped on its own.
    #[error(transparent)]
    Observer(#[from] observers::Error),
}
