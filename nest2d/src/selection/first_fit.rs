use log::debug;

use crate::entities::Instance;
use crate::error::NestError;
use crate::placement::Placer;
use crate::selection::{ItemQueue, Monitor, Selection, SelectionConfig, try_pack};

/// Tries every pending item once, in input order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFitSelection;

impl Selection for FirstFitSelection {
    fn from_config(_config: &SelectionConfig) -> Self {
        FirstFitSelection
    }

    fn fill_bin<P: Placer>(
        &self,
        instance: &Instance,
        queue: &mut ItemQueue,
        placer: &mut P,
        monitor: &mut Monitor,
    ) -> Result<(), NestError> {
        let mut rejected = vec![];
        let mut pending = queue.take_all().into_iter();
        while let Some(item_id) = pending.next() {
            if let Err(e) = monitor.check(item_id) {
                //put everything that was not tried back in the queue
                rejected.push(item_id);
                rejected.extend(pending);
                queue.replace(rejected);
                return Err(e);
            }
            match try_pack(placer, instance.item(item_id))? {
                true => monitor.report(rejected.len() + pending.len()),
                false => rejected.push(item_id),
            }
        }
        debug!(
            "[FF] bin {} filled with {} items, {} rejected",
            placer.pile().bin_id,
            placer.pile().len(),
            rejected.len()
        );
        queue.replace(rejected);
        Ok(())
    }
}
