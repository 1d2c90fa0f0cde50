//! Strategies deciding which items go into a bin, and in which order.

mod djd;
mod first_fit;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::entities::{Instance, Item};
use crate::error::NestError;
use crate::placement::Placer;

#[doc(inline)]
pub use djd::DjdSelection;
#[doc(inline)]
pub use first_fit::FirstFitSelection;

/// Fills a single bin with items from the queue.
pub trait Selection {
    fn from_config(config: &SelectionConfig) -> Self
    where
        Self: Sized;

    /// Packs items from `queue` into the bin of `placer` until no more fit.
    /// Placed items are removed from the queue, the others stay in it.
    fn fill_bin<P: Placer>(
        &self,
        instance: &Instance,
        queue: &mut ItemQueue,
        placer: &mut P,
        monitor: &mut Monitor,
    ) -> Result<(), NestError>;
}

/// Configuration of the selection heuristics
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Step by which the tolerated waste grows, as a fraction of the bin area
    pub waste_increment: f64,
    /// Fraction of the bin that is filled greedily before the waste-driven search starts
    pub initial_fill: f64,
    pub try_pairs: bool,
    pub try_triplets: bool,
    /// Number of items considered when combining pairs and triplets
    pub max_lookahead: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            waste_increment: 0.1,
            initial_fill: 1.0 / 3.0,
            try_pairs: true,
            try_triplets: false,
            max_lookahead: 24,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<(), NestError> {
        if self.waste_increment.is_nan() || self.waste_increment <= 0.0 {
            return Err(NestError::Configuration(format!(
                "waste increment must be positive, got {}",
                self.waste_increment
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_fill) {
            return Err(NestError::Configuration(format!(
                "initial fill {} outside [0, 1]",
                self.initial_fill
            )));
        }
        Ok(())
    }
}

/// Copies of items (by id) that still have to be placed
#[derive(Clone, Debug, Default)]
pub struct ItemQueue {
    pending: Vec<usize>,
}

impl ItemQueue {
    pub fn new(pending: Vec<usize>) -> Self {
        ItemQueue { pending }
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remove(&mut self, idx: usize) -> usize {
        self.pending.remove(idx)
    }

    pub fn take_all(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn replace(&mut self, pending: Vec<usize>) {
        self.pending = pending;
    }
}

/// Reports progress and watches for cancellation.
#[derive(Default)]
pub struct Monitor<'a> {
    progress: Option<Box<dyn FnMut(usize) + 'a>>,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl<'a> Monitor<'a> {
    pub fn new(progress: Option<Box<dyn FnMut(usize) + 'a>>, cancel_flag: Option<Arc<AtomicBool>>) -> Self {
        Monitor {
            progress,
            cancel_flag,
        }
    }

    /// Hands the progress callback back.
    pub fn into_progress(self) -> Option<Box<dyn FnMut(usize) + 'a>> {
        self.progress
    }

    /// Reports the number of items still to be placed.
    pub fn report(&mut self, remaining: usize) {
        if let Some(progress) = self.progress.as_mut() {
            progress(remaining);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::Relaxed))
    }

    /// Fails with [`NestError::Cancelled`] if cancellation was requested before `item_id` is placed.
    pub fn check(&self, item_id: usize) -> Result<(), NestError> {
        match self.is_cancelled() {
            true => Err(NestError::Cancelled { item_id }),
            false => Ok(()),
        }
    }
}

/// Packs a single item, turning per-item failures into `false`.
pub(crate) fn try_pack<P: Placer>(placer: &mut P, item: &Item) -> Result<bool, NestError> {
    match placer.pack(item) {
        Ok(_) => Ok(true),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            trace!("[SEL] {e}");
            Ok(false)
        }
    }
}
