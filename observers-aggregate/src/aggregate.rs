use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;
use core::mem;

use observers::{
    AttrChange, Control, Diagnostic, DiagnosticCallback, Intersection, IntersectionEntry,
    IntersectionObserver, MutationObserver, Observer, Resize, ResizeEntry, ResizeObserver, State,
    Structural, Variant, VariantKind,
};

use crate::{
    AnyBatch, AnyListener, AnySubscriber, Backend, Error, Result, SharedNode, SharedOptions,
};

/// A child variant an [`Aggregate`] knows how to build and store.
trait Child<N: SharedNode>: Variant<Node = N> + 'static {
    fn slot(children: &mut Children<N>) -> &mut Option<Observer<Self>>;
    fn build(
        backend: &mut dyn Backend<N>,
        target: N,
        options: &SharedOptions<N>,
    ) -> Observer<Self>;
}

impl<N: SharedNode> Child<N> for Structural<N> {
    fn slot(children: &mut Children<N>) -> &mut Option<Observer<Self>> {
        &mut children.mutation
    }

    fn build(
        backend: &mut dyn Backend<N>,
        target: N,
        options: &SharedOptions<N>,
    ) -> Observer<Self> {
        Observer::from_boxed(backend.mutation(), target, options.mutation.clone())
    }
}

impl<N: SharedNode> Child<N> for Resize<N> {
    fn slot(children: &mut Children<N>) -> &mut Option<Observer<Self>> {
        &mut children.resize
    }

    fn build(
        backend: &mut dyn Backend<N>,
        target: N,
        options: &SharedOptions<N>,
    ) -> Observer<Self> {
        Observer::from_boxed(backend.resize(), target, options.resize)
    }
}

impl<N: SharedNode> Child<N> for Intersection<N> {
    fn slot(children: &mut Children<N>) -> &mut Option<Observer<Self>> {
        &mut children.intersection
    }

    fn build(
        backend: &mut dyn Backend<N>,
        target: N,
        options: &SharedOptions<N>,
    ) -> Observer<Self> {
        Observer::from_boxed(backend.intersection(), target, options.intersection.clone())
    }
}

struct Children<N: SharedNode> {
    mutation: Option<MutationObserver<N>>,
    resize: Option<ResizeObserver<N>>,
    intersection: Option<IntersectionObserver<N>>,
}

impl<N: SharedNode> Children<N> {
    fn controls(&mut self) -> impl Iterator<Item = &mut dyn Control> {
        let mutation = self.mutation.as_mut().map(|c| c as &mut dyn Control);
        let resize = self.resize.as_mut().map(|c| c as &mut dyn Control);
        let intersection = self.intersection.as_mut().map(|c| c as &mut dyn Control);
        mutation.into_iter().chain(resize).chain(intersection)
    }

    fn has(&self, variant: VariantKind) -> bool {
        match variant {
            VariantKind::Mutation => self.mutation.as_ref().is_some_and(|c| !c.is_destroyed()),
            VariantKind::Resize => self.resize.as_ref().is_some_and(|c| !c.is_destroyed()),
            VariantKind::Intersection => {
                self.intersection.as_ref().is_some_and(|c| !c.is_destroyed())
            }
        }
    }
}

/// Everything a new child inherits from its aggregate.
struct Shared<N: SharedNode> {
    backend: Box<dyn Backend<N>>,
    target: N,
    options: SharedOptions<N>,
    active: bool,
    subscriber: Option<AnySubscriber<N>>,
    on_diagnostic: Option<DiagnosticCallback>,
}

impl<N: SharedNode> Shared<N> {
    fn spawn<V: Child<N>>(&mut self) -> Result<Observer<V>> {
        let mut child = V::build(self.backend.as_mut(), self.target.clone(), &self.options);
        adebug!(variant = V::KIND.as_str(), "Aggregate: child created");
        if let Some(hook) = &self.on_diagnostic {
            adopt_hook(&mut child, hook)?;
        }
        if !self.active {
            child.suspend()?;
        }
        Ok(child)
    }
}

fn adopt_hook<V: Variant + 'static>(child: &mut Observer<V>, hook: &DiagnosticCallback) -> Result {
    let hook = Rc::clone(hook);
    child.set_on_diagnostic(move |diagnostic| hook(diagnostic))?;
    Ok(())
}

/// How a batch fared at its child.
enum Delivery {
    NoChild,
    Dropped,
    Dispatched,
}

fn deliver_to<V: Variant>(
    child: Option<&mut Observer<V>>,
    batch: &[V::Record],
) -> Result<Delivery> {
    let Some(child) = child else {
        return Ok(Delivery::NoChild);
    };
    let was_active = child.is_active();
    child.deliver(batch)?;
    if was_active && !child.is_destroyed() {
        Ok(Delivery::Dispatched)
    } else {
        Ok(Delivery::Dropped)
    }
}

struct Inner<N: SharedNode> {
    shared: Shared<N>,
    children: Children<N>,
}

enum Slot<N: SharedNode> {
    Live(Inner<N>),
    Destroyed,
}

/// Several typed observers on one target, driven as a unit.
///
/// Children are created lazily: binding `resize` creates the resize child and nothing else.
/// Each child is built from the [`Backend`], a clone of the shared target and its slice of
/// [`SharedOptions`].
///
/// `resume`, `suspend` and `toggle` track their own activity flag and apply to every child that
/// has not been dumped. A child can still be driven on its own through [`Aggregate::mutation`]
/// and friends; dumping it there leaves the aggregate and its other children untouched.
pub struct Aggregate<N: SharedNode> {
    slot: Slot<N>,
}

impl<N: SharedNode> Aggregate<N> {
    pub fn new(backend: impl Backend<N> + 'static, target: N, options: SharedOptions<N>) -> Self {
        adebug!("Aggregate::new");
        Self {
            slot: Slot::Live(Inner {
                shared: Shared {
                    backend: Box::new(backend),
                    target,
                    options,
                    active: true,
                    subscriber: None,
                    on_diagnostic: None,
                },
                children: Children {
                    mutation: None,
                    resize: None,
                    intersection: None,
                },
            }),
        }
    }

    fn live(&self) -> Result<&Inner<N>> {
        match &self.slot {
            Slot::Live(inner) => Ok(inner),
            Slot::Destroyed => Err(Error::Destroyed),
        }
    }

    fn live_mut(&mut self) -> Result<&mut Inner<N>> {
        match &mut self.slot {
            Slot::Live(inner) => Ok(inner),
            Slot::Destroyed => Err(Error::Destroyed),
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        awarn!(
            operation = diagnostic.operation(),
            kind = ?diagnostic.kind(),
            "Aggregate: {}",
            diagnostic
        );
        if let Ok(Inner {
            shared: Shared {
                on_diagnostic: Some(hook),
                ..
            },
            ..
        }) = self.live()
        {
            hook(&diagnostic);
        }
    }

    /// The child for `V`, created on first use.
    fn child<V: Child<N>>(&mut self) -> Result<&mut Observer<V>> {
        let Inner { shared, children } = self.live_mut()?;
        let slot = V::slot(children);
        let child = match slot.take() {
            Some(child) => child,
            None => shared.spawn::<V>()?,
        };
        Ok(slot.insert(child))
    }

    pub fn state(&self) -> State {
        match &self.slot {
            Slot::Live(inner) if inner.shared.active => State::Active,
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

    /// The shared target, or `None` after dump.
    pub fn target(&self) -> Option<&N> {
        self.live().ok().map(|inner| &inner.shared.target)
    }

    pub fn options(&self) -> Option<&SharedOptions<N>> {
        self.live().ok().map(|inner| &inner.shared.options)
    }

    pub fn mutation(&mut self) -> Option<&mut MutationObserver<N>> {
        self.live_mut().ok()?.children.mutation.as_mut()
    }

    pub fn resize(&mut self) -> Option<&mut ResizeObserver<N>> {
        self.live_mut().ok()?.children.resize.as_mut()
    }

    pub fn intersection(&mut self) -> Option<&mut IntersectionObserver<N>> {
        self.live_mut().ok()?.children.intersection.as_mut()
    }

    /// Every created child, dumped ones included, in variant order.
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut dyn Control> {
        match &mut self.slot {
            Slot::Live(inner) => Some(inner.children.controls()),
            Slot::Destroyed => None,
        }
        .into_iter()
        .flatten()
    }

    /// Number of children that exist and have not been dumped.
    pub fn child_count(&self) -> usize {
        VariantKind::ALL
            .iter()
            .filter(|variant| self.has_child(**variant))
            .count()
    }

    /// Whether a child of `variant` exists and has not been dumped.
    pub fn has_child(&self, variant: VariantKind) -> bool {
        self.live().is_ok_and(|inner| inner.children.has(variant))
    }

    /// Installs a diagnostic hook on the aggregate, its current children and every child created
    /// later.
    pub fn set_on_diagnostic(&mut self, on_diagnostic: impl Fn(&Diagnostic) + 'static) -> Result {
        let Inner { shared, children } = self.live_mut()?;
        let hook: DiagnosticCallback = Rc::new(on_diagnostic);
        if let Some(child) = children.mutation.as_mut().filter(|c| !c.is_destroyed()) {
            adopt_hook(child, &hook)?;
        }
        if let Some(child) = children.resize.as_mut().filter(|c| !c.is_destroyed()) {
            adopt_hook(child, &hook)?;
        }
        if let Some(child) = children.intersection.as_mut().filter(|c| !c.is_destroyed()) {
            adopt_hook(child, &hook)?;
        }
        shared.on_diagnostic = Some(hook);
        Ok(())
    }

    /// Binds `listener` on the child owning its kind, creating that child if needed.
    ///
    /// Duplicate bindings are reported by the child. Binding on a child that was dumped on its
    /// own returns [`Error::Observer`].
    pub fn on(&mut self, listener: impl Into<AnyListener<N>>) -> Result<&mut Self> {
        let listener = listener.into();
        atrace!(kind = listener.kind().as_str(), "Aggregate::on");
        match listener {
            AnyListener::Mutation(listener) => {
                self.child::<Structural<N>>()?.on(listener)?;
            }
            AnyListener::Resize(listener) => {
                self.child::<Resize<N>>()?.on(listener)?;
            }
            AnyListener::Intersection(listener) => {
                self.child::<Intersection<N>>()?.on(listener)?;
            }
        }
        Ok(self)
    }

    pub fn on_add(
        &mut self,
        f: impl Fn(&[N], &mut MutationObserver<N>) + 'static,
    ) -> Result<&mut Self> {
        self.child::<Structural<N>>()?.on_add(f)?;
        Ok(self)
    }

    pub fn on_remove(
        &mut self,
        f: impl Fn(&[N], &mut MutationObserver<N>) + 'static,
    ) -> Result<&mut Self> {
        self.child::<Structural<N>>()?.on_remove(f)?;
        Ok(self)
    }

    pub fn on_mutate(
        &mut self,
        f: impl Fn(&[N], &[N], &mut MutationObserver<N>) + 'static,
    ) -> Result<&mut Self> {
        self.child::<Structural<N>>()?.on_mutate(f)?;
        Ok(self)
    }

    pub fn on_attr(
        &mut self,
        f: impl Fn(AttrChange<'_, N>, &mut MutationObserver<N>) + 'static,
    ) -> Result<&mut Self> {
        self.child::<Structural<N>>()?.on_attr(f)?;
        Ok(self)
    }

    pub fn on_resize(
        &mut self,
        f: impl Fn(&[ResizeEntry<N>], &mut ResizeObserver<N>) + 'static,
    ) -> Result<&mut Self> {
        self.child::<Resize<N>>()?.on_resize(f)?;
        Ok(self)
    }

    pub fn on_intersect(
        &mut self,
        f: impl Fn(&[IntersectionEntry<N>], &mut IntersectionObserver<N>) + 'static,
    ) -> Result<&mut Self> {
        self.child::<Intersection<N>>()?.on_intersect(f)?;
        Ok(self)
    }

    /// Registers the aggregate catch-all. It receives every batch a child dispatched through
    /// [`Aggregate::deliver`], tagged by variant, after that child's own listeners and
    /// subscriber, together with the aggregate itself.
    ///
    /// The children's own `subscribe` slots are left free. A second call emits
    /// [`Diagnostic::DuplicateSubscriber`] and is otherwise ignored.
    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(AnyBatch<'_, N>, &mut Self) + 'static,
    ) -> Result {
        let shared = &mut self.live_mut()?.shared;
        if shared.subscriber.is_some() {
            self.report(Diagnostic::DuplicateSubscriber);
            return Ok(());
        }
        let subscriber: AnySubscriber<N> = Rc::new(subscriber);
        shared.subscriber = Some(subscriber);
        Ok(())
    }

    fn subscriber(&self) -> Option<AnySubscriber<N>> {
        self.live().ok().and_then(|inner| inner.shared.subscriber.clone())
    }

    /// Resumes every suspended child. Dumped children are skipped.
    pub fn resume(&mut self) -> Result {
        let inner = self.live_mut()?;
        if inner.shared.active {
            self.report(Diagnostic::AlreadyActive);
            return Ok(());
        }
        inner.shared.active = true;
        for child in inner.children.controls().filter(|c| c.state() == State::Suspended) {
            child.resume()?;
        }
        adebug!("Aggregate::resume");
        Ok(())
    }

    /// Suspends every active child. Dumped children are skipped.
    pub fn suspend(&mut self) -> Result {
        let inner = self.live_mut()?;
        if !inner.shared.active {
            self.report(Diagnostic::AlreadySuspended);
            return Ok(());
        }
        inner.shared.active = false;
        for child in inner.children.controls().filter(|c| c.state() == State::Active) {
            child.suspend()?;
        }
        adebug!("Aggregate::suspend");
        Ok(())
    }

    pub fn toggle(&mut self) -> Result {
        if self.live()?.shared.active {
            self.suspend()
        } else {
            self.resume()
        }
    }

    /// Dumps every child that has not been dumped yet, then drops the backend, target and
    /// callbacks.
    pub fn dump(&mut self) -> Result {
        match mem::replace(&mut self.slot, Slot::Destroyed) {
            Slot::Live(mut inner) => {
                for child in inner.children.controls().filter(|c| !c.is_destroyed()) {
                    child.dump()?;
                }
                adebug!("Aggregate::dump");
                Ok(())
            }
            Slot::Destroyed => Err(Error::Destroyed),
        }
    }

    /// Routes a batch from the host to the child of the same variant, then to the aggregate
    /// catch-all.
    ///
    /// A batch for a variant without a child is dropped. The catch-all does not see batches the
    /// child dropped while suspended, nor batches during which the child was dumped.
    pub fn deliver(&mut self, batch: AnyBatch<'_, N>) -> Result {
        let children = &mut self.live_mut()?.children;
        let delivery = match batch {
            AnyBatch::Mutation(records) => deliver_to(children.mutation.as_mut(), records)?,
            AnyBatch::Resize(entries) => deliver_to(children.resize.as_mut(), entries)?,
            AnyBatch::Intersection(entries) => {
                deliver_to(children.intersection.as_mut(), entries)?
            }
        };
        match delivery {
            Delivery::NoChild => {
                atrace!(
                    variant = batch.variant().as_str(),
                    records = batch.len(),
                    "Aggregate::deliver: no child, batch dropped"
                );
            }
            Delivery::Dropped => {}
            Delivery::Dispatched => {
                if let Some(subscriber) = self.subscriber() {
                    subscriber(batch, self);
                }
            }
        }
        Ok(())
    }
}

impl<N: SharedNode + fmt::Debug> fmt::Debug for Aggregate<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("state", &self.state())
            .field("target", &self.target())
            .field("children", &self.child_count())
            .finish_non_exhaustive()
    }
}
