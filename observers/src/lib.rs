//! Typed subscriptions and suspend/resume lifecycles over host change-notification primitives.
//!
//! The host (a DOM binding, a UI toolkit, a test double) supplies three kinds of primitive:
//! structural mutation, element resize and viewport intersection. This crate wraps each one in an
//! [`Observer`] that offers:
//! - one typed listener per event kind (`add`, `remove`, `mutate`, `attr`, `resize`,
//!   `intersect`), bound with `on_*` / [`Observer::on`]
//! - one catch-all subscriber receiving every raw batch ([`Observer::subscribe`])
//! - idempotent `resume` / `suspend` / `toggle` and a final `dump`
//!
//! Redundant calls (resuming an active observer, binding a kind twice, ...) are not errors. They
//! are reported as a [`Diagnostic`] and otherwise ignored. The only error is using an observer
//! after `dump`.
//!
//! It does not detect changes itself. The host drives it by calling [`Observer::deliver`] with
//! each batch its primitive produces.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use observers::{MutationOptions, MutationRecord, Primitive, observe_mutation};
//!
//! struct HostMutations;
//!
//! impl Primitive<u32, MutationOptions> for HostMutations {
//!     fn observe(&mut self, _target: &u32, _options: &MutationOptions) {}
//!     fn disconnect(&mut self) {}
//! }
//!
//! let added = Rc::new(Cell::new(0));
//! let mut observer = observe_mutation(HostMutations, 1u32, None);
//! observer.on_add({
//!     let added = Rc::clone(&added);
//!     move |nodes, _observer| added.set(added.get() + nodes.len())
//! })?;
//!
//! observer.deliver(&[MutationRecord::child_list(1, vec![7, 8], vec![])])?;
//! assert_eq!(added.get(), 2);
//!
//! observer.dump()?;
//! assert!(observer.resume().is_err());
//! # Ok::<(), observers::Error>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod diagnostic;
mod error;
mod intersection;
mod kind;
mod lifecycle;
mod mutation;
mod observer;
mod options;
mod primitive;
mod resize;
mod router;
mod state;
mod types;
mod wiring;


pub use diagnostic::{Diagnostic, DiagnosticCallback};
pub use error::Error;
pub use intersection::{
    IntersectCallback, Intersection, IntersectionListener, IntersectionObserver,
};
pub use kind::{EventKind, VariantKind};
pub use mutation::{
    AttrCallback, MutateCallback, MutationListener, MutationObserver, NodesCallback, Structural,
};
pub use observer::{Control, Observer, Subscriber, Variant};
pub use options::{IntersectionOptions, MutationOptions, ResizeBox, ResizeOptions};
pub use primitive::Primitive;
pub use resize::{Resize, ResizeCallback, ResizeListener, ResizeObserver};
pub use router::Listener;
pub use state::{Snapshot, State};
pub use types::{
    AttrChange, BoxSize, DomRect, IntersectionEntry, MutationRecord, ResizeEntry,
};
pub use wiring::MutationWiring;

/// Convenience alias for `Result<T, observers::Error>`.
pub type Result<T = ()> = core::result::Result<T, Error>;

/// Wraps a structural mutation primitive and starts observing `target`.
///
/// `options` defaults to attributes, child list and subtree coverage.
pub fn observe_mutation<N>(
    primitive: impl Primitive<N, MutationOptions> + 'static,
    target: N,
    options: Option<MutationOptions>,
) -> MutationObserver<N> {
    Observer::new(primitive, target, options.unwrap_or_default())
}

/// Wraps a resize primitive and starts observing `target` with the primitive's defaults.
pub fn observe_resize<N>(
    primitive: impl Primitive<N, ResizeOptions> + 'static,
    target: N,
) -> ResizeObserver<N> {
    Observer::new(primitive, target, ResizeOptions::default())
}

/// Wraps an intersection primitive and starts observing `target`.
///
/// `options` defaults to the host viewport as root and a `"0px"` root margin.
pub fn observe_intersection<N>(
    primitive: impl Primitive<N, IntersectionOptions<N>> + 'static,
    target: N,
    options: Option<IntersectionOptions<N>>,
) -> IntersectionObserver<N> {
    Observer::new(primitive, target, options.unwrap_or_default())
}
