// Example: one element watched for size and visibility, driven as a unit.
use observers::{
    IntersectionEntry, IntersectionOptions, MutationOptions, Primitive, ResizeEntry,
    ResizeOptions,
};
use observers_aggregate::{AnyBatch, Backend, SharedOptions, observe_any};

struct Named(&'static str);

impl<O> Primitive<u32, O> for Named {
    fn observe(&mut self, target: &u32, _options: &O) {
        println!("{}: observe #{target}", self.0);
    }

    fn disconnect(&mut self) {
        println!("{}: disconnect", self.0);
    }
}

struct Host;

impl Backend<u32> for Host {
    fn mutation(&mut self) -> Box<dyn Primitive<u32, MutationOptions>> {
        Box::new(Named("mutation"))
    }

    fn resize(&mut self) -> Box<dyn Primitive<u32, ResizeOptions>> {
        Box::new(Named("resize"))
    }

    fn intersection(&mut self) -> Box<dyn Primitive<u32, IntersectionOptions<u32>>> {
        Box::new(Named("intersection"))
    }
}

fn main() -> observers_aggregate::Result {
    let options = SharedOptions::default()
        .with_intersection(IntersectionOptions::default().with_threshold([0.0, 0.5, 1.0]));
    let mut card = observe_any(Host, 42u32, Some(options));

    card.on_resize(|entries, _| {
        for e in entries {
            println!("resized to {}x{}", e.content_rect.width, e.content_rect.height);
        }
    })?
    .on_intersect(|entries, _| {
        for e in entries {
            println!("visible={} ratio={}", e.is_intersecting, e.intersection_ratio);
        }
    })?;
    card.subscribe(|batch, card| {
        println!("{} batch, {} item(s), {:?}", batch.variant(), batch.len(), card.state());
    })?;
    println!("children: {}", card.child_count());

    card.deliver(AnyBatch::Resize(&[ResizeEntry::new(42, 300.0, 120.0)]))?;
    card.deliver(AnyBatch::Intersection(&[IntersectionEntry::new(42, true, 0.5)]))?;

    card.toggle()?;
    card.deliver(AnyBatch::Resize(&[ResizeEntry::new(42, 10.0, 10.0)]))?;
    card.toggle()?;

    if let Some(resize) = card.resize() {
        resize.dump()?;
    }
    println!("children after dumping resize: {}", card.child_count());

    card.dump()
}
