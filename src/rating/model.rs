use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use super::types::{ItemId, RatingValue};

/// Global mean rating plus each item's mean offset from it.
///
/// Built once by [`super::builder::ItemMeanModelBuilder`] and then shared
/// read-only. The model keeps no link to the ratings it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMeanModel {
    global_mean: RatingValue,
    item_offsets: BTreeMap<ItemId, RatingValue>,
}

impl ItemMeanModel {
    pub fn new(global_mean: RatingValue, item_offsets: BTreeMap<ItemId, RatingValue>) -> Self {
        Self {
            global_mean,
            item_offsets,
        }
    }

    pub fn global_mean(&self) -> RatingValue {
        self.global_mean
    }

    /// Offset of the item's mean from the global mean.
    ///
    /// Returns exactly `0.0` for items that were never rated.
    pub fn item_offset(&self, item: ItemId) -> RatingValue {
        self.item_offsets.get(&item).copied().unwrap_or(0.0)
    }

    /// Damped mean rating of the item, or the global mean for unknown items
    pub fn item_mean(&self, item: ItemId) -> RatingValue {
        self.global_mean + self.item_offset(item)
    }

    pub fn item_offsets(&self) -> &BTreeMap<ItemId, RatingValue> {
        &self.item_offsets
    }

    pub fn contains_item(&self, item: ItemId) -> bool {
        self.item_offsets.contains_key(&item)
    }

    pub fn item_count(&self) -> usize {
        self.item_offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> ItemMeanModel {
        ItemMeanModel::new(4.0, BTreeMap::from([(4, 1.0), (5, -0.5), (7, 0.0)]))
    }

    #[test]
    fn test_unknown_item_offset_is_zero() {
        let model = sample_model();

        assert_eq!(model.item_offset(10), 0.0);
        assert!(!model.contains_item(10));
        assert_eq!(model.item_mean(10), 4.0);
    }

    #[test]
    fn test_known_item_accessors() {
        let model = sample_model();

        assert_eq!(model.global_mean(), 4.0);
        assert_eq!(model.item_offset(5), -0.5);
        assert_eq!(model.item_mean(4), 5.0);
        assert_eq!(model.item_count(), 3);
        assert_eq!(model.item_offsets().keys().copied().collect::<Vec<_>>(), vec![4, 5, 7]);
    }

    #[test]
    fn test_json_round_trip_keeps_offsets() {
        let model = sample_model();
        let json = serde_json::to_string(&model).unwrap();
        let restored: ItemMeanModel = serde_json::from_str(&json).unwrap();

        assert!(json.contains("globalMean"));
        assert_eq!(restored, model);
    }
}
