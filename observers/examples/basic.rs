// Example: typed listeners over a simulated mutation primitive.
use observers::{MutationOptions, MutationRecord, Primitive, observe_mutation};

struct LoggingHost;

impl Primitive<&'static str, MutationOptions> for LoggingHost {
    fn observe(&mut self, target: &&'static str, options: &MutationOptions) {
        println!("host: observe {target} subtree={}", options.subtree);
    }

    fn disconnect(&mut self) {
        println!("host: disconnect");
    }
}

fn main() -> observers::Result {
    let mut list = observe_mutation(LoggingHost, "#list", None);
    list.on_add(|nodes, _| println!("added {nodes:?}"))?
        .on_remove(|nodes, _| println!("removed {nodes:?}"))?
        .on_attr(|change, _| {
            println!("attr {:?} on {}", change.attribute_name, change.target_node);
        })?;
    list.subscribe(|batch, _| println!("batch of {} record(s)", batch.len()))?;

    list.deliver(&[
        MutationRecord::child_list("#list", vec!["li#a", "li#b"], vec![]),
        MutationRecord::attributes("li#a", "class"),
    ])?;

    list.suspend()?;
    list.deliver(&[MutationRecord::child_list("#list", vec![], vec!["li#b"])])?;
    println!("while suspended: {:?}", list.state());

    list.resume()?;
    list.deliver(&[MutationRecord::child_list("#list", vec![], vec!["li#b"])])?;

    list.dump()
}
