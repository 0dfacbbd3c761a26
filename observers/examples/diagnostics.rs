// Example: redundant calls are reported, not raised.
use observers::{Diagnostic, Primitive, ResizeEntry, ResizeOptions, observe_resize};

struct Host;

impl Primitive<u32, ResizeOptions> for Host {
    fn observe(&mut self, _target: &u32, _options: &ResizeOptions) {}
    fn disconnect(&mut self) {}
}

fn main() -> observers::Result {
    let mut panel = observe_resize(Host, 7u32);
    panel.set_on_diagnostic(|d: &Diagnostic| println!("diagnostic ({}): {d}", d.operation()))?;

    panel.resume()?;
    panel.on_resize(|entries, _| println!("{} resize entr(ies)", entries.len()))?;
    panel.on_resize(|_, _| unreachable!("second listener is discarded"))?;

    panel.deliver(&[ResizeEntry::new(7, 320.0, 200.0)])?;
    println!("{:?}", panel.snapshot());

    // A listener can shut its own observer down.
    panel.subscribe(|_, observer| {
        let _ = observer.dump();
    })?;
    panel.deliver(&[ResizeEntry::new(7, 640.0, 400.0)])?;
    println!("after self-dump: {:?}", panel.state());
    match panel.resume() {
        Err(err) => println!("error: {err}"),
        Ok(()) => unreachable!(),
    }
    Ok(())
}
