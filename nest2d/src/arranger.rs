use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::entities::{ArrangeResult, Instance, Item, UnplacedItem};
use crate::error::{GeometryError, NestError};
use crate::geometry::primitives::Coord;
use crate::geometry::shape_modification::offset_polygon;
use crate::placement::{ObjectFunction, PlacementConfig, Placer};
use crate::selection::{ItemQueue, Monitor, Selection, SelectionConfig};

/// Configuration of an [`Arranger`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct ArrangerConfig {
    pub placement: PlacementConfig,
    pub selection: SelectionConfig,
    /// Minimum distance between any two placed items
    pub min_object_distance: Coord,
}

impl ArrangerConfig {
    pub fn validate(&self) -> Result<(), NestError> {
        self.placement.validate()?;
        self.selection.validate()?;
        if self.min_object_distance < 0 {
            return Err(NestError::Configuration(format!(
                "negative minimum object distance: {}",
                self.min_object_distance
            )));
        }
        Ok(())
    }
}

/// Arranges all items of an [`Instance`] over as few bins as possible.
///
/// Bins are opened in the order of the instance, as long as their stock lasts.
/// Every bin is filled by the [`Selection`] strategy `S` feeding items to a fresh [`Placer`] `P`.
/// When a fresh bin stays empty, the next type of bin is tried.
/// Items which end up in no bin are reported as unplaced, together with the reason.
pub struct Arranger<'a, P: Placer, S: Selection> {
    config: ArrangerConfig,
    selection: S,
    objective: Option<Arc<dyn ObjectFunction>>,
    progress: Option<Box<dyn FnMut(usize) + 'a>>,
    cancel_flag: Option<Arc<AtomicBool>>,
    _placer: PhantomData<P>,
}

impl<'a, P: Placer, S: Selection> Arranger<'a, P, S> {
    /// Creates an arranger with the selection strategy built from the configuration.
    pub fn new(config: ArrangerConfig) -> Result<Self, NestError> {
        let selection = S::from_config(&config.selection);
        Self::with_selection(config, selection)
    }

    pub fn with_selection(config: ArrangerConfig, selection: S) -> Result<Self, NestError> {
        config.validate()?;
        Ok(Arranger {
            config,
            selection,
            objective: None,
            progress: None,
            cancel_flag: None,
            _placer: PhantomData,
        })
    }

    /// Registers a callback, invoked with the number of remaining items after every placement and closed bin.
    pub fn with_progress(mut self, progress: impl FnMut(usize) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Registers a flag which, once set, stops the arrangement before the next placement.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Replaces the objective function of the placers.
    pub fn with_objective(mut self, objective: impl ObjectFunction + 'static) -> Self {
        self.objective = Some(Arc::new(objective));
        self
    }

    pub fn config(&self) -> &ArrangerConfig {
        &self.config
    }

    pub fn arrange(&mut self, instance: &Instance) -> Result<ArrangeResult, NestError> {
        let mut monitor = Monitor::new(self.progress.take(), self.cancel_flag.clone());
        let result = self.run(instance, &mut monitor);
        self.progress = monitor.into_progress();
        result
    }

    fn run(&self, instance: &Instance, monitor: &mut Monitor) -> Result<ArrangeResult, NestError> {
        let start = Instant::now();
        validate_bins(instance)?;

        let mut result = ArrangeResult::default();
        let prepared = self.prepare(instance, &mut result.unplaced);

        let mut queue = ItemQueue::new(prepared.item_copies());
        let mut stock = instance.bins.iter().map(|b| b.stock).collect_vec();
        let mut bin_idx = 0;

        while !queue.is_empty() && bin_idx < instance.bins.len() {
            if stock[bin_idx] == Some(0) {
                bin_idx += 1;
                continue;
            }
            let bin = &instance.bins[bin_idx];
            let mut placer = P::new(bin, &self.config.placement);
            if let Some(objective) = &self.objective {
                placer.set_objective(objective.clone());
            }

            let filled = self.selection.fill_bin(&prepared, &mut queue, &mut placer, monitor);
            let pile = placer.finalize();
            match filled {
                Ok(()) => {}
                Err(NestError::Cancelled { item_id }) => {
                    info!("[ARR] cancelled before placing item {item_id}");
                    result.cancelled = true;
                }
                Err(e) => return Err(e),
            }

            if pile.is_empty() {
                if result.cancelled {
                    break;
                }
                //nothing fits in a fresh bin of this type
                bin_idx += 1;
                continue;
            }

            info!(
                "[ARR] closed pile {} (bin {}) with {} items, density {:.2}%",
                result.piles.len(),
                bin.id,
                pile.len(),
                pile.density() * 100.0
            );
            if let Some(s) = stock[bin_idx].as_mut() {
                *s -= 1;
            }
            result.piles.push(pile);
            monitor.report(queue.len());

            if result.cancelled {
                break;
            }
        }

        for item_id in queue.take_all() {
            let error = match result.cancelled {
                true => NestError::Cancelled { item_id },
                false => NestError::infeasible(item_id, "does not fit in any available bin"),
            };
            warn!("[ARR] item {item_id} not placed: {error}");
            result.unplaced.push(UnplacedItem { item_id, error });
        }

        info!(
            "[ARR] arranged {}/{} items in {} piles in {:.3}ms",
            result.n_placed(),
            instance.total_item_qty(),
            result.piles.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(result)
    }

    /// Validates the items and builds their collision shapes.
    /// Copies of items that cannot be used are reported as unplaced, and get zero demand in the returned instance.
    fn prepare(&self, instance: &Instance, unplaced: &mut Vec<UnplacedItem>) -> Instance {
        let items = instance
            .items
            .iter()
            .map(|(item, qty)| match self.prepare_item(item) {
                Ok(prepared) => (prepared, *qty),
                Err(source) => {
                    warn!("[ARR] item {} rejected: {source}", item.id);
                    unplaced.extend((0..*qty).map(|_| UnplacedItem {
                        item_id: item.id,
                        error: NestError::Geometry {
                            item_id: item.id,
                            source: source.clone(),
                        },
                    }));
                    (item.clone(), 0)
                }
            })
            .collect_vec();
        Instance::new(items, instance.bins.clone())
    }

    fn prepare_item(&self, item: &Item) -> Result<Item, GeometryError> {
        item.shape_orig.validate()?;
        if let Some(r) = item.allowed_rotations.iter().flatten().find(|r| !r.is_finite()) {
            return Err(GeometryError::Degenerate(format!("non-finite rotation {r}")));
        }
        match self.config.min_object_distance {
            0 => Ok(item.clone()),
            d => {
                let dilated = offset_polygon(&item.shape_orig, d as f64 / 2.0)
                    .map_err(|e| GeometryError::Degenerate(e.to_string()))?;
                Ok(item.clone().with_collision_shape(dilated))
            }
        }
    }
}

fn validate_bins(instance: &Instance) -> Result<(), NestError> {
    if instance.bins.is_empty() {
        return Err(NestError::Configuration("no bins".into()));
    }
    for bin in &instance.bins {
        if bin.rect.width() <= 0 || bin.rect.height() <= 0 {
            return Err(NestError::Configuration(format!(
                "bin {} has a non-positive dimension ({}x{})",
                bin.id,
                bin.rect.width(),
                bin.rect.height()
            )));
        }
        if bin.stock == Some(0) {
            return Err(NestError::Configuration(format!("bin {} has no stock", bin.id)));
        }
    }
    Ok(())
}
