use std::collections::HashSet;

use itertools::Itertools;
use log::debug;

use crate::entities::Instance;
use crate::error::NestError;
use crate::placement::Placer;
use crate::selection::{ItemQueue, Monitor, Selection, SelectionConfig, try_pack};

/// Djang and Finch style selection.
///
/// Items are considered from large to small. The bin is first filled greedily up to `initial_fill`.
/// Afterwards single items, pairs and (optionally) triplets are searched whose combined area fills the remaining
/// space up to a tolerated waste. The tolerated waste starts at zero and grows by `waste_increment` each time
/// no combination fits, until it covers all free space.
#[derive(Clone, Debug, Default)]
pub struct DjdSelection {
    pub config: SelectionConfig,
}

impl DjdSelection {
    pub fn new(config: SelectionConfig) -> Self {
        DjdSelection { config }
    }

    fn fill<P: Placer>(
        &self,
        instance: &Instance,
        pending: &mut Vec<usize>,
        placer: &mut P,
        monitor: &mut Monitor,
    ) -> Result<(), NestError> {
        let area = |id: usize| instance.item(id).area;
        let capacity = placer.pile().rect.area();
        let mut used = placer.pile().placed_area();
        //item types that failed since the last successful placement
        let mut failed = HashSet::new();

        pending.sort_by(|&a, &b| area(b).total_cmp(&area(a)));

        let mut i = 0;
        while i < pending.len() {
            let id = pending[i];
            if used < self.config.initial_fill * capacity && !failed.contains(&id) {
                monitor.check(id)?;
                if try_pack(placer, instance.item(id))? {
                    used += area(id);
                    pending.remove(i);
                    failed.clear();
                    monitor.report(pending.len());
                    continue;
                }
                failed.insert(id);
            }
            i += 1;
        }

        let mut waste = 0.0;
        while !pending.is_empty() {
            let free = capacity - used;
            let max_waste = waste * capacity;
            let mut placed = None;

            for k in 0..pending.len() {
                let id = pending[k];
                let a = area(id);
                if a > free || free - a > max_waste || failed.contains(&id) {
                    continue;
                }
                monitor.check(id)?;
                if try_pack(placer, instance.item(id))? {
                    pending.remove(k);
                    placed = Some(a);
                    break;
                }
                failed.insert(id);
            }
            if placed.is_none() && self.config.try_pairs {
                placed = self.try_combinations(2, instance, pending, placer, monitor, free, max_waste)?;
            }
            if placed.is_none() && self.config.try_triplets {
                placed = self.try_combinations(3, instance, pending, placer, monitor, free, max_waste)?;
            }

            match placed {
                Some(a) => {
                    used += a;
                    failed.clear();
                    monitor.report(pending.len());
                }
                None if max_waste >= free => break,
                None => waste += self.config.waste_increment,
            }
        }
        debug!(
            "[DJD] bin {} filled to {:.1}% with {} items, tolerated waste {:.0}%",
            placer.pile().bin_id,
            used / capacity * 100.0,
            placer.pile().len(),
            waste * 100.0
        );
        Ok(())
    }

    /// Looks for `k` items among the first `max_lookahead` pending ones with a combined area that fills
    /// the free space up to `max_waste` and that can all be placed.
    /// Tentative placements are undone if one of the items does not fit.
    #[allow(clippy::too_many_arguments)]
    fn try_combinations<P: Placer>(
        &self,
        k: usize,
        instance: &Instance,
        pending: &mut Vec<usize>,
        placer: &mut P,
        monitor: &mut Monitor,
        free: f64,
        max_waste: f64,
    ) -> Result<Option<f64>, NestError> {
        let lookahead = pending.len().min(self.config.max_lookahead);
        for combination in (0..lookahead).combinations(k) {
            let a = combination
                .iter()
                .map(|&i| instance.item(pending[i]).area)
                .sum::<f64>();
            if a > free || free - a > max_waste {
                continue;
            }
            monitor.check(pending[combination[0]])?;

            let snapshot = placer.save();
            let mut all_placed = true;
            for &i in &combination {
                if !try_pack(placer, instance.item(pending[i]))? {
                    all_placed = false;
                    break;
                }
            }
            if all_placed {
                for &i in combination.iter().rev() {
                    pending.remove(i);
                }
                return Ok(Some(a));
            }
            placer.restore(&snapshot);
        }
        Ok(None)
    }
}

impl Selection for DjdSelection {
    fn from_config(config: &SelectionConfig) -> Self {
        DjdSelection::new(config.clone())
    }

    fn fill_bin<P: Placer>(
        &self,
        instance: &Instance,
        queue: &mut ItemQueue,
        placer: &mut P,
        monitor: &mut Monitor,
    ) -> Result<(), NestError> {
        let mut pending = queue.take_all();
        let result = self.fill(instance, &mut pending, placer, monitor);
        queue.replace(pending);
        result
    }
}
