use crate::*;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use observers::{
    Diagnostic, EventKind, IntersectionEntry, IntersectionOptions, MutationListener,
    MutationObserver, MutationOptions, MutationRecord, Primitive, ResizeEntry, ResizeOptions,
    State, VariantKind,
};

#[derive(Default)]
struct HostLog {
    built: Vec<VariantKind>,
    observed: Vec<VariantKind>,
    disconnected: Vec<VariantKind>,
}

impl HostLog {
    fn observed(&self, variant: VariantKind) -> usize {
        self.observed.iter().filter(|v| **v == variant).count()
    }

    fn disconnected(&self, variant: VariantKind) -> usize {
        self.disconnected.iter().filter(|v| **v == variant).count()
    }
}

struct Probe {
    variant: VariantKind,
    log: Rc<RefCell<HostLog>>,
}

impl<O> Primitive<u32, O> for Probe {
    fn observe(&mut self, _target: &u32, _options: &O) {
        self.log.borrow_mut().observed.push(self.variant);
    }

    fn disconnect(&mut self) {
        self.log.borrow_mut().disconnected.push(self.variant);
    }
}

struct Host {
    log: Rc<RefCell<HostLog>>,
}

impl Host {
    fn probe(&self, variant: VariantKind) -> Box<Probe> {
        self.log.borrow_mut().built.push(variant);
        Box::new(Probe {
            variant,
            log: Rc::clone(&self.log),
        })
    }
}

impl Backend<u32> for Host {
    fn mutation(&mut self) -> Box<dyn Primitive<u32, MutationOptions>> {
        self.probe(VariantKind::Mutation)
    }

    fn resize(&mut self) -> Box<dyn Primitive<u32, ResizeOptions>> {
        self.probe(VariantKind::Resize)
    }

    fn intersection(&mut self) -> Box<dyn Primitive<u32, IntersectionOptions<u32>>> {
        self.probe(VariantKind::Intersection)
    }
}

fn aggregate() -> (Aggregate<u32>, Rc<RefCell<HostLog>>) {
    let log = Rc::new(RefCell::new(HostLog::default()));
    let host = Host {
        log: Rc::clone(&log),
    };
    (observe_any(host, 1u32, None), log)
}

fn collect_diagnostics(aggregate: &mut Aggregate<u32>) -> Rc<RefCell<Vec<Diagnostic>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    aggregate
        .set_on_diagnostic(move |d| sink.borrow_mut().push(*d))
        .unwrap();
    seen
}

#[test]
fn resize_and_intersect_create_exactly_two_active_children() {
    let (mut a, log) = aggregate();
    assert_eq!(a.child_count(), 0);
    assert!(log.borrow().built.is_empty());

    a.on_resize(|_, _| {}).unwrap().on_intersect(|_, _| {}).unwrap();

    assert_eq!(a.child_count(), 2);
    assert!(a.has_child(VariantKind::Resize));
    assert!(a.has_child(VariantKind::Intersection));
    assert!(!a.has_child(VariantKind::Mutation));
    assert!(a.mutation().is_none());
    assert_eq!(
        log.borrow().built,
        vec![VariantKind::Resize, VariantKind::Intersection]
    );
    assert_eq!(a.resize().unwrap().state(), State::Active);
    assert_eq!(a.intersection().unwrap().state(), State::Active);
    assert_eq!(a.intersection().unwrap().target(), Some(&1));
}

#[test]
fn structural_kinds_share_one_child() {
    let (mut a, log) = aggregate();
    a.on_add(|_, _| {}).unwrap();
    a.on_remove(|_, _| {}).unwrap();
    a.on_mutate(|_, _, _| {}).unwrap();
    a.on_attr(|_, _| {}).unwrap();

    assert_eq!(log.borrow().built, vec![VariantKind::Mutation]);
    assert_eq!(a.child_count(), 1);
    let child = a.mutation().unwrap();
    for kind in VariantKind::Mutation.kinds() {
        assert!(child.has_listener(*kind));
    }
}

#[test]
fn generic_on_routes_listener_to_its_variant() {
    let (mut a, _log) = aggregate();
    let added = Rc::new(Cell::new(0));
    let counter = Rc::clone(&added);
    let listener = MutationListener::<u32>::Add(Rc::new(
        move |nodes: &[u32], _: &mut MutationObserver<u32>| {
            counter.set(counter.get() + nodes.len());
        },
    ));
    a.on(listener).unwrap();

    assert!(a.has_child(VariantKind::Mutation));
    a.deliver(AnyBatch::Mutation(&[MutationRecord::child_list(1, vec![4, 5], vec![])]))
        .unwrap();
    assert_eq!(added.get(), 2);
}

#[test]
fn shared_options_reach_each_child() {
    let log = Rc::new(RefCell::new(HostLog::default()));
    let options = SharedOptions::default()
        .with_mutation(MutationOptions::default().with_subtree(false))
        .with_intersection(IntersectionOptions::default().with_threshold([0.5, 1.0]));
    let mut a = observe_any(Host { log }, 1u32, Some(options.clone()));

    a.on_add(|_, _| {}).unwrap().on_intersect(|_, _| {}).unwrap();

    assert_eq!(a.options(), Some(&options));
    assert_eq!(a.mutation().unwrap().options(), Some(&options.mutation));
    assert_eq!(
        a.intersection().unwrap().options(),
        Some(&options.intersection)
    );
}

#[test]
fn suspend_and_resume_apply_to_every_child_and_warn_when_redundant() {
    let (mut a, log) = aggregate();
    let seen = collect_diagnostics(&mut a);
    a.on_add(|_, _| {}).unwrap().on_resize(|_, _| {}).unwrap();

    a.resume().unwrap();
    assert_eq!(*seen.borrow(), vec![Diagnostic::AlreadyActive]);

    a.suspend().unwrap();
    assert_eq!(a.state(), State::Suspended);
    assert_eq!(a.mutation().unwrap().state(), State::Suspended);
    assert_eq!(a.resize().unwrap().state(), State::Suspended);
    assert_eq!(log.borrow().disconnected(VariantKind::Mutation), 1);
    assert_eq!(log.borrow().disconnected(VariantKind::Resize), 1);

    a.suspend().unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![Diagnostic::AlreadyActive, Diagnostic::AlreadySuspended]
    );
    assert_eq!(log.borrow().disconnected(VariantKind::Mutation), 1);

    a.resume().unwrap();
    assert!(a.is_active());
    assert_eq!(log.borrow().observed(VariantKind::Mutation), 2);
    assert_eq!(log.borrow().observed(VariantKind::Resize), 2);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn toggle_alternates_aggregate_and_children() {
    let (mut a, _log) = aggregate();
    a.on_intersect(|_, _| {}).unwrap();

    let mut states = Vec::new();
    for _ in 0..4 {
        a.toggle().unwrap();
        states.push((a.state(), a.intersection().unwrap().state()));
    }
    assert_eq!(
        states,
        vec![
            (State::Suspended, State::Suspended),
            (State::Active, State::Active),
            (State::Suspended, State::Suspended),
            (State::Active, State::Active),
        ]
    );
}

#[test]
fn child_created_while_suspended_follows_the_aggregate() {
    let (mut a, log) = aggregate();
    a.suspend().unwrap();

    a.on_resize(|_, _| {}).unwrap();
    assert_eq!(a.resize().unwrap().state(), State::Suspended);
    assert_eq!(log.borrow().observed(VariantKind::Resize), 1);
    assert_eq!(log.borrow().disconnected(VariantKind::Resize), 1);

    a.resume().unwrap();
    assert_eq!(a.resize().unwrap().state(), State::Active);
}

#[test]
fn dumping_one_child_leaves_aggregate_and_siblings_intact() {
    let (mut a, log) = aggregate();
    a.on_resize(|_, _| {}).unwrap().on_intersect(|_, _| {}).unwrap();

    a.resize().unwrap().dump().unwrap();

    assert_eq!(a.target(), Some(&1));
    assert_eq!(a.child_count(), 1);
    assert!(!a.has_child(VariantKind::Resize));
    assert_eq!(a.intersection().unwrap().state(), State::Active);

    a.suspend().unwrap();
    assert_eq!(a.intersection().unwrap().state(), State::Suspended);
    assert_eq!(log.borrow().disconnected(VariantKind::Resize), 1);
}

#[test]
fn dump_completes_past_a_destroyed_child() {
    let (mut a, log) = aggregate();
    a.on_add(|_, _| {}).unwrap().on_intersect(|_, _| {}).unwrap();
    a.mutation().unwrap().dump().unwrap();

    a.dump().unwrap();

    assert!(a.is_destroyed());
    assert_eq!(log.borrow().disconnected(VariantKind::Mutation), 1);
    assert_eq!(log.borrow().disconnected(VariantKind::Intersection), 1);
    assert_eq!(a.child_count(), 0);
    assert_eq!(a.children_mut().count(), 0);
}

#[test]
fn dumped_aggregate_rejects_every_call() {
    let (mut a, _log) = aggregate();
    a.on_resize(|_, _| {}).unwrap();
    a.dump().unwrap();

    assert_eq!(a.dump(), Err(Error::Destroyed));
    assert_eq!(a.resume(), Err(Error::Destroyed));
    assert_eq!(a.suspend(), Err(Error::Destroyed));
    assert_eq!(a.toggle(), Err(Error::Destroyed));
    assert_eq!(a.subscribe(|_, _| {}), Err(Error::Destroyed));
    assert!(matches!(a.on_add(|_, _| {}), Err(Error::Destroyed)));
    assert_eq!(
        a.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 1.0, 1.0)])),
        Err(Error::Destroyed)
    );
    assert_eq!(a.state(), State::Destroyed);
    assert_eq!(a.target(), None);
    assert!(a.resize().is_none());
}

#[test]
fn binding_on_a_dumped_child_surfaces_the_child_error() {
    let (mut a, _log) = aggregate();
    a.on_resize(|_, _| {}).unwrap();
    a.resize().unwrap().dump().unwrap();

    let err = a.on_resize(|_, _| {}).map(|_| ()).unwrap_err();
    assert_eq!(
        err,
        Error::Observer(observers::Error::Destroyed(VariantKind::Resize))
    );
}

#[test]
fn subscriber_sees_tagged_batches_from_current_and_later_children() {
    let (mut a, _log) = aggregate();
    let seen_diagnostics = collect_diagnostics(&mut a);
    a.on_resize(|_, _| {}).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    a.subscribe(move |batch, _| sink.borrow_mut().push((batch.variant(), batch.len())))
        .unwrap();
    a.on_add(|_, _| {}).unwrap();

    a.deliver(AnyBatch::Resize(&[
        ResizeEntry::new(1, 1.0, 1.0),
        ResizeEntry::new(1, 2.0, 2.0),
    ]))
    .unwrap();
    a.deliver(AnyBatch::Mutation(&[MutationRecord::attributes(1, "class")]))
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![(VariantKind::Resize, 2), (VariantKind::Mutation, 1)]
    );

    a.subscribe(|_, _| {}).unwrap();
    assert_eq!(*seen_diagnostics.borrow(), vec![Diagnostic::DuplicateSubscriber]);
}

#[test]
fn aggregate_and_child_subscribers_both_run_in_either_order() {
    let hits = Rc::new(RefCell::new(Vec::<&'static str>::new()));

    // Child subscriber first, aggregate second.
    let (mut a, _log) = aggregate();
    let seen = collect_diagnostics(&mut a);
    a.on_resize(|_, _| {}).unwrap();
    let sink = Rc::clone(&hits);
    a.resize()
        .unwrap()
        .subscribe(move |_, _| sink.borrow_mut().push("child"))
        .unwrap();
    let sink = Rc::clone(&hits);
    a.subscribe(move |_, _| sink.borrow_mut().push("aggregate"))
        .unwrap();
    a.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 1.0, 1.0)]))
        .unwrap();
    assert_eq!(*hits.borrow(), vec!["child", "aggregate"]);
    assert!(seen.borrow().is_empty());

    // Aggregate subscriber first, then a child created and subscribed later.
    hits.borrow_mut().clear();
    let (mut a, _log) = aggregate();
    let seen = collect_diagnostics(&mut a);
    let sink = Rc::clone(&hits);
    a.subscribe(move |_, _| sink.borrow_mut().push("aggregate"))
        .unwrap();
    a.on_intersect(|_, _| {}).unwrap();
    let sink = Rc::clone(&hits);
    a.intersection()
        .unwrap()
        .subscribe(move |_, _| sink.borrow_mut().push("child"))
        .unwrap();
    a.deliver(AnyBatch::Intersection(&[IntersectionEntry::new(1, true, 1.0)]))
        .unwrap();
    assert_eq!(*hits.borrow(), vec!["child", "aggregate"]);
    assert!(seen.borrow().is_empty());
}

#[test]
fn aggregate_subscriber_receives_the_aggregate() {
    let (mut a, log) = aggregate();
    a.on_resize(|_, _| {}).unwrap();
    a.subscribe(|batch, aggregate| {
        assert_eq!(batch.variant(), VariantKind::Resize);
        assert_eq!(aggregate.target(), Some(&1));
        aggregate.dump().unwrap();
    })
    .unwrap();

    a.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 1.0, 1.0)]))
        .unwrap();
    assert!(a.is_destroyed());
    assert_eq!(log.borrow().disconnected(VariantKind::Resize), 1);
}

#[test]
fn aggregate_subscriber_skips_batches_the_child_did_not_dispatch() {
    let (mut a, _log) = aggregate();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    a.subscribe(move |_, _| counter.set(counter.get() + 1))
        .unwrap();
    a.on_resize(|_, observer| {
        observer.dump().unwrap();
    })
    .unwrap();
    a.on_intersect(|_, _| {}).unwrap();

    a.intersection().unwrap().suspend().unwrap();
    a.deliver(AnyBatch::Intersection(&[IntersectionEntry::new(1, true, 1.0)]))
        .unwrap();
    a.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 1.0, 1.0)]))
        .unwrap();
    a.deliver(AnyBatch::Mutation(&[MutationRecord::attributes(1, "id")]))
        .unwrap();

    assert_eq!(hits.get(), 0);
    assert!(!a.has_child(VariantKind::Resize));
}

#[test]
fn aggregate_fan_out_skips_children_already_in_the_target_state() {
    let (mut a, log) = aggregate();
    let seen = collect_diagnostics(&mut a);
    a.on_resize(|_, _| {}).unwrap().on_add(|_, _| {}).unwrap();

    a.resize().unwrap().suspend().unwrap();
    a.suspend().unwrap();
    assert!(seen.borrow().is_empty());
    assert_eq!(a.resize().unwrap().state(), State::Suspended);
    assert_eq!(a.mutation().unwrap().state(), State::Suspended);
    assert_eq!(log.borrow().disconnected(VariantKind::Resize), 1);

    a.mutation().unwrap().resume().unwrap();
    a.resume().unwrap();
    assert!(seen.borrow().is_empty());
    assert_eq!(a.resize().unwrap().state(), State::Active);
    assert_eq!(a.mutation().unwrap().state(), State::Active);
    assert_eq!(log.borrow().observed(VariantKind::Mutation), 2);

    a.toggle().unwrap();
    a.toggle().unwrap();
    assert!(seen.borrow().is_empty());
}

#[test]
fn deliver_drops_batches_for_variants_without_a_child() {
    let (mut a, _log) = aggregate();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    a.on_intersect(move |entries, _| counter.set(counter.get() + entries.len()))
        .unwrap();

    a.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 1.0, 1.0)]))
        .unwrap();
    a.deliver(AnyBatch::Intersection(&[
        IntersectionEntry::new(1, true, 0.5),
        IntersectionEntry::new(1, false, 0.0),
    ]))
    .unwrap();

    assert_eq!(hits.get(), 2);
    assert!(!a.has_child(VariantKind::Resize));
}

#[test]
fn suspended_aggregate_children_drop_batches() {
    let (mut a, _log) = aggregate();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    a.on_resize(move |_, _| counter.set(counter.get() + 1))
        .unwrap();
    a.suspend().unwrap();

    a.deliver(AnyBatch::Resize(&[ResizeEntry::new(1, 1.0, 1.0)]))
        .unwrap();
    assert_eq!(hits.get(), 0);
}

#[test]
fn diagnostic_hook_reaches_existing_and_later_children() {
    let (mut a, _log) = aggregate();
    a.on_resize(|_, _| {}).unwrap();
    let seen = collect_diagnostics(&mut a);

    a.on_resize(|_, _| {}).unwrap();
    a.on_add(|_, _| {}).unwrap().on_add(|_, _| {}).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            Diagnostic::DuplicateListener(EventKind::Resize),
            Diagnostic::DuplicateListener(EventKind::Add),
        ]
    );
}

#[test]
fn children_mut_yields_created_children_in_variant_order() {
    let (mut a, _log) = aggregate();
    a.on_intersect(|_, _| {}).unwrap().on_attr(|_, _| {}).unwrap();

    let variants: Vec<VariantKind> = a.children_mut().map(|c| c.variant()).collect();
    assert_eq!(variants, vec![VariantKind::Mutation, VariantKind::Intersection]);

    for child in a.children_mut() {
        child.suspend().unwrap();
    }
    assert_eq!(a.mutation().unwrap().state(), State::Suspended);
    assert_eq!(a.state(), State::Active);
}
