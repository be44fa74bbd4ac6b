use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ItemId = i64;
pub type RatingValue = f64;

/// Item id -> rating value for a single user, built per scoring call
pub type UserRatingVector = HashMap<ItemId, RatingValue>;

/// Item id -> predicted score, ordered by item id
pub type ScoreMap = BTreeMap<ItemId, RatingValue>;

/// A single rating event. A rating without a value is an unrate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user: UserId,
    pub item: ItemId,
    #[serde(rename = "rating", default)]
    pub value: Option<RatingValue>,
}

impl Rating {
    pub fn new(user: UserId, item: ItemId, value: RatingValue) -> Self {
        Self {
            user,
            item,
            value: Some(value),
        }
    }

    pub fn unrate(user: UserId, item: ItemId) -> Self {
        Self {
            user,
            item,
            value: None,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Folds a user's history into a rating vector.
///
/// Later ratings of an item replace earlier ones and an unrate removes the item.
pub fn user_rating_vector<'a, I>(history: I) -> UserRatingVector
where
    I: IntoIterator<Item = &'a Rating>,
{
    let mut vector = UserRatingVector::new();
    for rating in history {
        match rating.value {
            Some(value) => {
                vector.insert(rating.item, value);
            }
            None => {
                vector.remove(&rating.item);
            }
        }
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_rating_replaces_earlier() {
        let history = vec![Rating::new(1, 5, 2.0), Rating::new(1, 5, 4.5)];
        let vector = user_rating_vector(&history);

        assert_eq!(vector.len(), 1);
        assert_eq!(vector[&5], 4.5);
    }

    #[test]
    fn test_unrate_removes_item() {
        let history = vec![
            Rating::new(1, 5, 3.0),
            Rating::new(1, 7, 4.0),
            Rating::unrate(1, 5),
        ];
        let vector = user_rating_vector(&history);

        assert!(!vector.contains_key(&5));
        assert_eq!(vector[&7], 4.0);
    }

    #[test]
    fn test_rating_json_uses_optional_rating_field() {
        let rated: Rating = serde_json::from_str(r#"{"user": 1, "item": 5, "rating": 3.0}"#).unwrap();
        let unrated: Rating = serde_json::from_str(r#"{"user": 1, "item": 5}"#).unwrap();

        assert_eq!(rated, Rating::new(1, 5, 3.0));
        assert_eq!(unrated, Rating::unrate(1, 5));
    }
}
