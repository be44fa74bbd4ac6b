use std::collections::{BTreeMap, HashMap};
use anyhow::Result;
use log::debug;

use super::damping::Damping;
use super::model::ItemMeanModel;
use super::sources::RatingSource;
use super::types::{ItemId, Rating, RatingValue};

/// Running sums for the global and per-item means.
///
/// Subtracting the global mean from each item mean is the same as averaging the
/// item's offsets from the global mean, so both can be accumulated in one pass
/// and the offsets derived afterwards. Partial accumulators over disjoint parts
/// of a stream can be merged in any order.
#[derive(Debug, Clone, Default)]
pub struct ItemMeanAccumulator {
    total: f64,
    count: usize,
    item_sums: HashMap<ItemId, f64>,
    item_counts: HashMap<ItemId, usize>,
}

impl ItemMeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one rating event; unrates are skipped
    pub fn add(&mut self, rating: &Rating) {
        let Some(value) = rating.value else {
            return;
        };

        self.total += value;
        self.count += 1;
        *self.item_sums.entry(rating.item).or_insert(0.0) += value;
        *self.item_counts.entry(rating.item).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: ItemMeanAccumulator) {
        self.total += other.total;
        self.count += other.count;
        for (item, sum) in other.item_sums {
            *self.item_sums.entry(item).or_insert(0.0) += sum;
        }
        for (item, count) in other.item_counts {
            *self.item_counts.entry(item).or_insert(0) += count;
        }
    }

    pub fn rating_count(&self) -> usize {
        self.count
    }

    pub fn global_mean(&self) -> RatingValue {
        if self.count > 0 {
            self.total / self.count as f64
        } else {
            0.0
        }
    }

    pub fn finish(self, damping: Damping) -> ItemMeanModel {
        let mean = self.global_mean();
        debug!(
            "Computed global mean {} for {} items",
            mean,
            self.item_sums.len()
        );

        debug!("Computing item offsets, damping={}", damping);
        let offsets = compute_item_offsets(&self.item_sums, &self.item_counts, mean, damping);

        ItemMeanModel::new(mean, offsets)
    }
}

fn compute_item_offsets(
    item_sums: &HashMap<ItemId, f64>,
    item_counts: &HashMap<ItemId, usize>,
    mean: RatingValue,
    damping: Damping,
) -> BTreeMap<ItemId, RatingValue> {
    let d = damping.value();
    let mut offsets = BTreeMap::new();

    for (&item, &sum) in item_sums {
        let count = item_counts.get(&item).copied().unwrap_or(0);
        let damped_count = count as f64 + d;
        let damped_total = sum + d * mean;
        if damped_count > 0.0 {
            offsets.insert(item, damped_total / damped_count - mean);
        }
    }

    offsets
}

/// Builds an [`ItemMeanModel`] from an in-memory rating stream
pub fn build_model<I>(ratings: I, damping: Damping) -> ItemMeanModel
where
    I: IntoIterator<Item = Rating>,
{
    let mut acc = ItemMeanAccumulator::new();
    for rating in ratings {
        acc.add(&rating);
    }
    acc.finish(damping)
}

/// Builds the item mean model from a rating source.
///
/// The source is only used during [`build`](Self::build); the resulting model
/// does not depend on it.
pub struct ItemMeanModelBuilder<S> {
    source: S,
    damping: Damping,
}

impl<S: RatingSource> ItemMeanModelBuilder<S> {
    pub fn new(source: S, damping: Damping) -> Self {
        Self { source, damping }
    }

    pub fn build(self) -> Result<ItemMeanModel> {
        let mut acc = ItemMeanAccumulator::new();
        self.source.stream_ratings(&mut |rating| acc.add(&rating))?;
        debug!("Streamed {} valid ratings", acc.rating_count());
        Ok(acc.finish(self.damping))
    }
}
