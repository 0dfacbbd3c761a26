//! One target, several observers.
//!
//! [`Aggregate`] attaches structural mutation, resize and intersection observers from the
//! `observers` crate to a shared target. A child is created the first time a listener of its
//! variant is bound, using a primitive from the host's [`Backend`]. The aggregate then drives all
//! of its children through one `resume` / `suspend` / `toggle` / `dump` surface.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use observers::{
//!     IntersectionEntry, IntersectionOptions, MutationOptions, Primitive, ResizeEntry,
//!     ResizeOptions, VariantKind,
//! };
//! use observers_aggregate::{AnyBatch, Backend, observe_any};
//!
//! struct Noop;
//!
//! impl<O> Primitive<u32, O> for Noop {
//!     fn observe(&mut self, _target: &u32, _options: &O) {}
//!     fn disconnect(&mut self) {}
//! }
//!
//! struct Host;
//!
//! impl Backend<u32> for Host {
//!     fn mutation(&mut self) -> Box<dyn Primitive<u32, MutationOptions>> {
//!         Box::new(Noop)
//!     }
//!     fn resize(&mut self) -> Box<dyn Primitive<u32, ResizeOptions>> {
//!         Box::new(Noop)
//!     }
//!     fn intersection(&mut self) -> Box<dyn Primitive<u32, IntersectionOptions<u32>>> {
//!         Box::new(Noop)
//!     }
//! }
//!
//! let visible = Rc::new(Cell::new(false));
//! let mut aggregate = observe_any(Host, 1u32, None);
//! aggregate.on_resize(|_, _| {})?.on_intersect({
//!     let visible = Rc::clone(&visible);
//!     move |entries, _| visible.set(entries.iter().any(|e| e.is_intersecting))
//! })?;
//! assert_eq!(aggregate.child_count(), 2);
//! assert!(!aggregate.has_child(VariantKind::Mutation));
//!
//! aggregate.deliver(AnyBatch::Intersection(&[IntersectionEntry::new(1, true, 1.0)]))?;
//! assert!(visible.get());
//!
//! aggregate.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 10.0, 20.0)]))?;
//! aggregate.dump()?;
//! assert!(aggregate.is_destroyed());
//! # Ok::<(), observers_aggregate::Error>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod aggregate;
mod any;
mod backend;
mod error;
mod node;
mod options;

#[cfg(test)]
mod tests;

pub use aggregate::Aggregate;
pub use any::{AnyBatch, AnyListener, AnySubscriber};
pub use backend::Backend;
pub use error::Error;
pub use node::SharedNode;
pub use options::SharedOptions;

/// Convenience alias for `Result<T, observers_aggregate::Error>`.
pub type Result<T = ()> = core::result::Result<T, Error>;

/// Creates an aggregate over `target` with no children yet.
///
/// `options` defaults to [`SharedOptions::default`].
pub fn observe_any<N: SharedNode>(
    backend: impl Backend<N> + 'static,
    target: N,
    options: Option<SharedOptions<N>>,
) -> Aggregate<N> {
    Aggregate::new(backend, target, options.unwrap_or_default())
}
