use crate::{AttrChange, MutationObserver, Result};

/// A wiring session on a [`MutationObserver`] that tracks bound kinds in its type.
///
/// Each `on_*` method is only available while its kind is still unbound in this session, so
/// binding a kind twice is a compile error rather than a runtime [`crate::Diagnostic`]:
///
/// ```compile_fail
/// use observers::{MutationOptions, Primitive, observe_mutation};
///
/// struct Host;
///
/// impl Primitive<u32, MutationOptions> for Host {
///     fn observe(&mut self, _: &u32, _: &MutationOptions) {}
///     fn disconnect(&mut self) {}
/// }
///
/// let mut observer = observe_mutation(Host, 1u32, None);
/// observer.wire().on_add(|_, _| {})?.on_add(|_, _| {})?;
/// # Ok::<(), observers::Error>(())
/// ```
///
/// Listeners bound before the session started are not tracked; the runtime duplicate guard
/// still applies to them.
pub struct MutationWiring<
    'a,
    N,
    const ADD: bool = false,
    const REMOVE: bool = false,
    const MUTATE: bool = false,
    const ATTR: bool = false,
> {
    observer: &'a mut MutationObserver<N>,
}

impl<'a, N> MutationWiring<'a, N> {
    pub(crate) fn new(observer: &'a mut MutationObserver<N>) -> Self {
        Self { observer }
    }
}

impl<'a, N, const ADD: bool, const REMOVE: bool, const MUTATE: bool, const ATTR: bool>
    MutationWiring<'a, N, ADD, REMOVE, MUTATE, ATTR>
{
    /// Ends the session.
    pub fn finish(self) -> &'a mut MutationObserver<N> {
        self.observer
    }
}

impl<'a, N, const REMOVE: bool, const MUTATE: bool, const ATTR: bool>
    MutationWiring<'a, N, false, REMOVE, MUTATE, ATTR>
{
    pub fn on_add(
        self,
        f: impl Fn(&[N], &mut MutationObserver<N>) + 'static,
    ) -> Result<MutationWiring<'a, N, true, REMOVE, MUTATE, ATTR>> {
        self.observer.on_add(f)?;
        Ok(MutationWiring {
            observer: self.observer,
        })
    }
}

impl<'a, N, const ADD: bool, const MUTATE: bool, const ATTR: bool>
    MutationWiring<'a, N, ADD, false, MUTATE, ATTR>
{
    pub fn on_remove(
        self,
        f: impl Fn(&[N], &mut MutationObserver<N>) + 'static,
    ) -> Result<MutationWiring<'a, N, ADD, true, MUTATE, ATTR>> {
        self.observer.on_remove(f)?;
        Ok(MutationWiring {
            observer: self.observer,
        })
    }
}

impl<'a, N, const ADD: bool, const REMOVE: bool, const ATTR: bool>
    MutationWiring<'a, N, ADD, REMOVE, false, ATTR>
{
    pub fn on_mutate(
        self,
        f: impl Fn(&[N], &[N], &mut MutationObserver<N>) + 'static,
    ) -> Result<MutationWiring<'a, N, ADD, REMOVE, true, ATTR>> {
        self.observer.on_mutate(f)?;
        Ok(MutationWiring {
            observer: self.observer,
        })
    }
}

impl<'a, N, const ADD: bool, const REMOVE: bool, const MUTATE: bool>
    MutationWiring<'a, N, ADD, REMOVE, MUTATE, false>
{
    pub fn on_attr(
        self,
        f: impl Fn(AttrChange<'_, N>, &mut MutationObserver<N>) + 'static,
    ) -> Result<MutationWiring<'a, N, ADD, REMOVE, MUTATE, true>> {
        self.observer.on_attr(f)?;
        Ok(MutationWiring {
            observer: self.observer,
        })
    }
}
