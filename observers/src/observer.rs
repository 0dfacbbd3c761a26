use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;
use core::mem;

use crate::lifecycle::Lifecycle;
use crate::router::Router;
use crate::{
    Diagnostic, DiagnosticCallback, Error, EventKind, Listener, Primitive, Result, Snapshot, State,
    VariantKind,
};

/// One of the three primitive kinds an [`Observer`] can wrap.
///
/// A variant fixes the node, options and record types, the listener set, and the rule that
/// decomposes a delivered batch into listener calls.
pub trait Variant: Sized {
    type Node;
    type Options;
    type Record;
    type Listener: Listener;

    const KIND: VariantKind;

    /// Invokes the matching kind listeners for `batch`, in record order.
    ///
    /// Implementations must stop as soon as `observer` is destroyed by one of its own
    /// listeners.
    fn decompose(observer: &mut Observer<Self>, batch: &[Self::Record]);
}

/// The catch-all callback registered with [`Observer::subscribe`].
pub type Subscriber<V> = Rc<dyn Fn(&[<V as Variant>::Record], &mut Observer<V>)>;

/// Lifecycle controls shared by every observer, independent of its variant.
pub trait Control {
    fn variant(&self) -> VariantKind;
    fn state(&self) -> State;
    fn resume(&mut self) -> Result;
    fn suspend(&mut self) -> Result;
    fn toggle(&mut self) -> Result;
    fn dump(&mut self) -> Result;

    fn is_destroyed(&self) -> bool {
        self.state() == State::Destroyed
    }
}

struct Live<V: Variant> {
    target: V::Node,
    options: V::Options,
    lifecycle: Lifecycle<V::Node, V::Options>,
    router: Router<V::Listener, Subscriber<V>>,
    on_diagnostic: Option<DiagnosticCallback>,
}

enum Slot<V: Variant> {
    Live(Live<V>),
    Destroyed,
}

/// A typed observer over one host primitive and one target.
///
/// Listeners registered with [`Observer::on`] receive the decomposed batch; the single
/// subscriber registered with [`Observer::subscribe`] receives every raw batch afterwards. Both
/// are called with the observer itself, so a callback can inspect it or shut it down.
///
/// The observer is active as soon as it is constructed. After [`Observer::dump`] every method
/// returns [`Error::Destroyed`].
pub struct Observer<V: Variant> {
    slot: Slot<V>,
}

impl<V: Variant> Observer<V> {
    /// Wraps an already-built primitive and starts observing `target`.
    pub fn new(
        primitive: impl Primitive<V::Node, V::Options> + 'static,
        target: V::Node,
        options: V::Options,
    ) -> Self {
        Self::from_boxed(Box::new(primitive), target, options)
    }

    pub fn from_boxed(
        primitive: Box<dyn Primitive<V::Node, V::Options>>,
        target: V::Node,
        options: V::Options,
    ) -> Self {
        let mut lifecycle = Lifecycle::new(primitive);
        let activated = lifecycle.resume(&target, &options).is_ok();
        debug_assert!(activated, "fresh lifecycle must start suspended");
        odebug!(variant = V::KIND.as_str(), "Observer::new");
        Self {
            slot: Slot::Live(Live {
                target,
                options,
                lifecycle,
                router: Router::new(),
                on_diagnostic: None,
            }),
        }
    }

    fn live(&self) -> Result<&Live<V>> {
        match &self.slot {
            Slot::Live(live) => Ok(live),
            Slot::Destroyed => Err(Error::Destroyed(V::KIND)),
        }
    }

    fn live_mut(&mut self) -> Result<&mut Live<V>> {
        match &mut self.slot {
            Slot::Live(live) => Ok(live),
            Slot::Destroyed => Err(Error::Destroyed(V::KIND)),
        }
    }

    fn report(&self, outcome: core::result::Result<(), Diagnostic>) {
        let Err(diagnostic) = outcome else {
            return;
        };
        owarn!(
            variant = V::KIND.as_str(),
            operation = diagnostic.operation(),
            kind = ?diagnostic.kind(),
            "{}",
            diagnostic
        );
        if let Slot::Live(Live {
            on_diagnostic: Some(hook),
            ..
        }) = &self.slot
        {
            hook(&diagnostic);
        }
    }

    pub fn variant(&self) -> VariantKind {
        V::KIND
    }

    pub fn state(&self) -> State {
        match &self.slot {
            Slot::Live(live) if live.lifecycle.is_active() => State::Active,
            Slot::Live(_) => State::Suspended,
            Slot::Destroyed => State::Destroyed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == State::Active
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.slot, Slot::Destroyed)
    }

    /// The observed node, or `None` after dump.
    pub fn target(&self) -> Option<&V::Node> {
        self.live().ok().map(|live| &live.target)
    }

    /// The options passed to the primitive on every resume, or `None` after dump.
    pub fn options(&self) -> Option<&V::Options> {
        self.live().ok().map(|live| &live.options)
    }

    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.live().is_ok_and(|live| live.router.contains(kind))
    }

    pub fn has_subscriber(&self) -> bool {
        self.live().is_ok_and(|live| live.router.has_catch_all())
    }

    /// A handle to the listener bound to `kind`, if any.
    pub fn listener(&self, kind: EventKind) -> Option<V::Listener> {
        self.live().ok().and_then(|live| live.router.get(kind))
    }

    /// A serializable summary of the observer's state and bindings.
    pub fn snapshot(&self) -> Snapshot {
        let listeners = V::KIND
            .kinds()
            .iter()
            .copied()
            .filter(|kind| self.has_listener(*kind))
            .collect();
        Snapshot {
            variant: V::KIND,
            state: self.state(),
            listeners,
            subscriber: self.has_subscriber(),
        }
    }

    fn subscriber(&self) -> Option<Subscriber<V>> {
        self.live().ok().and_then(|live| live.router.catch_all())
    }

    /// Installs a hook that receives every [`Diagnostic`] this observer emits, replacing any
    /// previous hook.
    pub fn set_on_diagnostic(&mut self, on_diagnostic: impl Fn(&Diagnostic) + 'static) -> Result {
        self.live_mut()?.on_diagnostic = Some(Rc::new(on_diagnostic));
        Ok(())
    }

    pub fn clear_on_diagnostic(&mut self) -> Result {
        self.live_mut()?.on_diagnostic = None;
        Ok(())
    }

    /// Binds `listener` to its kind.
    ///
    /// If the kind already has a listener, the new one is discarded and
    /// [`Diagnostic::DuplicateListener`] is emitted.
    pub fn on(&mut self, listener: V::Listener) -> Result<&mut Self> {
        otrace!(
            variant = V::KIND.as_str(),
            kind = listener.kind().as_str(),
            "Observer::on"
        );
        let outcome = self.live_mut()?.router.insert(listener);
        self.report(outcome);
        Ok(self)
    }

    /// Registers the catch-all subscriber, which receives every raw batch after the kind
    /// listeners have run.
    ///
    /// Only one subscriber can exist; a second call emits [`Diagnostic::DuplicateSubscriber`].
    pub fn subscribe(&mut self, subscriber: impl Fn(&[V::Record], &mut Self) + 'static) -> Result {
        let outcome = self.live_mut()?.router.set_catch_all(Rc::new(subscriber));
        self.report(outcome);
        Ok(())
    }

    /// Resumes observation with the captured options.
    pub fn resume(&mut self) -> Result {
        let live = self.live_mut()?;
        let outcome = live.lifecycle.resume(&live.target, &live.options);
        if outcome.is_ok() {
            odebug!(variant = V::KIND.as_str(), "Observer::resume");
        }
        self.report(outcome);
        Ok(())
    }

    /// Disconnects the primitive. Options and listeners are kept for a later resume.
    pub fn suspend(&mut self) -> Result {
        let outcome = self.live_mut()?.lifecycle.suspend();
        if outcome.is_ok() {
            odebug!(variant = V::KIND.as_str(), "Observer::suspend");
        }
        self.report(outcome);
        Ok(())
    }

    pub fn toggle(&mut self) -> Result {
        let live = self.live_mut()?;
        let outcome = live.lifecycle.toggle(&live.target, &live.options);
        self.report(outcome);
        Ok(())
    }

    /// Disconnects the primitive regardless of state and drops the target, options and every
    /// callback.
    pub fn dump(&mut self) -> Result {
        match mem::replace(&mut self.slot, Slot::Destroyed) {
            Slot::Live(live) => {
                live.lifecycle.release();
                odebug!(variant = V::KIND.as_str(), "Observer::dump");
                Ok(())
            }
            Slot::Destroyed => Err(Error::Destroyed(V::KIND)),
        }
    }

    /// Routes one batch from the primitive to the listeners, then to the subscriber.
    ///
    /// Batches arriving while suspended are dropped. If a callback dumps the observer, the rest
    /// of the batch is not dispatched.
    pub fn deliver(&mut self, batch: &[V::Record]) -> Result {
        if !self.live()?.lifecycle.is_active() {
            otrace!(
                variant = V::KIND.as_str(),
                records = batch.len(),
                "Observer::deliver: suspended, batch dropped"
            );
            return Ok(());
        }
        otrace!(
            variant = V::KIND.as_str(),
            records = batch.len(),
            "Observer::deliver"
        );

        V::decompose(self, batch);

        if let Some(subscriber) = self.subscriber() {
            subscriber(batch, self);
        }
        Ok(())
    }
}

impl<V: Variant> Control for Observer<V> {
    fn variant(&self) -> VariantKind {
        V::KIND
    }

    fn state(&self) -> State {
        Observer::state(self)
    }

    fn resume(&mut self) -> Result {
        Observer::resume(self)
    }

    fn suspend(&mut self) -> Result {
        Observer::suspend(self)
    }

    fn toggle(&mut self) -> Result {
        Observer::toggle(self)
    }

    fn dump(&mut self) -> Result {
        Observer::dump(self)
    }
}

impl<V: Variant> fmt::Debug for Observer<V>
where
    V::Node: fmt::Debug,
    V::Options: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.live().ok();
        f.debug_struct("Observer")
            .field("variant", &V::KIND)
            .field("state", &self.state())
            .field("target", &live.map(|l| &l.target))
            .field("options", &live.map(|l| &l.options))
            .field("listeners", &live.map_or(0, |l| l.router.len()))
            .field("subscriber", &self.has_subscriber())
            .finish_non_exhaustive()
    }
}
