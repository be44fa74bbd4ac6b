use std::sync::Arc;
use anyhow::Result;
use log::debug;

use super::damping::Damping;
use super::model::ItemMeanModel;
use super::sources::UserRatingSource;
use super::types::{ItemId, RatingValue, ScoreMap, UserId, UserRatingVector, user_rating_vector};

/// Baseline scorer `p(u, i) = mu + b(i) + b(u)`.
///
/// `mu` is the global mean, `b(i)` the item's offset from it and `b(u)` the
/// user's damped mean offset from the item-mean baseline. More user damping
/// pulls `b(u)` toward zero.
#[derive(Debug, Clone)]
pub struct ItemUserMeanScorer {
    model: Arc<ItemMeanModel>,
    user_damping: Damping,
}

impl ItemUserMeanScorer {
    pub fn new(model: Arc<ItemMeanModel>, user_damping: Damping) -> Self {
        Self {
            model,
            user_damping,
        }
    }

    pub fn model(&self) -> &ItemMeanModel {
        &self.model
    }

    /// Damped mean residual of the user's ratings against the item-mean baseline
    pub fn user_offset(&self, ratings: &UserRatingVector) -> RatingValue {
        if ratings.is_empty() {
            return 0.0;
        }

        let global_mean = self.model.global_mean();
        let sum: f64 = ratings
            .iter()
            .map(|(&item, &value)| value - global_mean - self.model.item_offset(item))
            .sum();

        let denominator = ratings.len() as f64 + self.user_damping.value();
        if denominator > 0.0 { sum / denominator } else { 0.0 }
    }

    /// Scores every requested item against an already-built user vector
    pub fn score_vector<I>(&self, ratings: &UserRatingVector, items: I) -> ScoreMap
    where
        I: IntoIterator<Item = ItemId>,
    {
        let base_score = self.model.global_mean() + self.user_offset(ratings);

        items
            .into_iter()
            .map(|item| (item, base_score + self.model.item_offset(item)))
            .collect()
    }

    /// Fetches the user's history and scores every requested item.
    ///
    /// Unknown users and unknown items fall back to the global mean; the only
    /// errors come from the history source.
    pub fn score<S, I>(&self, source: &S, user: UserId, items: I) -> Result<ScoreMap>
    where
        S: UserRatingSource + ?Sized,
        I: IntoIterator<Item = ItemId>,
    {
        let history = source.ratings_for_user(user)?;
        let ratings = user_rating_vector(&history);
        let scores = self.score_vector(&ratings, items);
        debug!(
            "Scored {} items for user {} from {} ratings",
            scores.len(),
            user,
            ratings.len()
        );
        Ok(scores)
    }
}

/// One-shot scoring with an explicit model and damping
pub fn score<S, I>(
    model: &Arc<ItemMeanModel>,
    user_damping: Damping,
    source: &S,
    user: UserId,
    items: I,
) -> Result<ScoreMap>
where
    S: UserRatingSource + ?Sized,
    I: IntoIterator<Item = ItemId>,
{
    ItemUserMeanScorer::new(Arc::clone(model), user_damping).score(source, user, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::builder::build_model;
    use crate::rating::sources::{EventCollection, PrefetchingUserHistory};
    use crate::rating::types::Rating;

    const EPS: f64 = 1e-5;

    fn reference_events() -> EventCollection {
        EventCollection::new(vec![
            Rating::new(1, 5, 3.0),
            Rating::new(1, 7, 4.0),
            Rating::new(8, 4, 5.0),
            Rating::new(8, 5, 4.0),
        ])
    }

    fn reference_scorer(events: &EventCollection, user_damping: f64) -> ItemUserMeanScorer {
        let model = build_model(events.ratings().iter().copied(), Damping::NONE);
        ItemUserMeanScorer::new(Arc::new(model), Damping::user(user_damping).unwrap())
    }

    #[test]
    fn test_reference_user_one() {
        let events = reference_events();
        let history = PrefetchingUserHistory::from_source(&events).unwrap();
        let scorer = reference_scorer(&events, 0.0);

        let scores = scorer.score(&history, 1, [5, 7, 10]).unwrap();

        assert_eq!(scores.len(), 3);
        assert!((scores[&5] - 3.25).abs() < EPS);
        assert!((scores[&7] - 3.75).abs() < EPS);
        // unseen item falls back to the user's overall baseline
        assert!((scores[&10] - 3.75).abs() < EPS);
        assert!(!scores.contains_key(&4));
    }

    #[test]
    fn test_reference_user_eight() {
        let events = reference_events();
        let scorer = reference_scorer(&events, 0.0);

        let scores = scorer.score(&events, 8, [4, 5, 7]).unwrap();

        assert!((scores[&5] - 3.75).abs() < EPS);
        assert!((scores[&7] - 4.25).abs() < EPS);
        assert!((scores[&4] - 5.25).abs() < EPS);
    }

    #[test]
    fn test_unknown_user_gets_item_means() {
        let events = reference_events();
        let scorer = reference_scorer(&events, 0.0);

        let scores = scorer.score(&events, 2, [5, 7, 10]).unwrap();

        assert!((scores[&5] - 3.5).abs() < EPS);
        assert!((scores[&7] - 4.0).abs() < EPS);
        assert_eq!(scores[&10], scorer.model().global_mean());
    }

    #[test]
    fn test_empty_request_gives_empty_scores() {
        let events = reference_events();
        let scorer = reference_scorer(&events, 0.0);

        let scores = scorer.score(&events, 1, Vec::new()).unwrap();

        assert!(scores.is_empty());
    }

    #[test]
    fn test_user_damping_shrinks_offset() {
        let events = reference_events();
        let history = user_rating_vector(&events.ratings_for_user(1).unwrap());

        let undamped = reference_scorer(&events, 0.0).user_offset(&history);
        let damped = reference_scorer(&events, 2.0).user_offset(&history);
        let heavy = reference_scorer(&events, 20.0).user_offset(&history);

        assert!((undamped + 0.25).abs() < EPS);
        assert!((damped + 0.125).abs() < EPS);
        assert!(heavy.abs() < damped.abs());
    }

    #[test]
    fn test_unrated_history_is_ignored() {
        let mut ratings = reference_events().ratings().to_vec();
        ratings.push(Rating::unrate(1, 5));
        let events = EventCollection::new(ratings);
        let model = build_model(reference_events().ratings().iter().copied(), Damping::NONE);
        let scorer = ItemUserMeanScorer::new(Arc::new(model), Damping::NONE);

        let scores = scorer.score(&events, 1, [7]).unwrap();

        // only item 7 (residual 0) remains in user 1's vector
        assert!((scores[&7] - 4.0).abs() < EPS);
    }

    #[test]
    fn test_free_function_matches_scorer() {
        let events = reference_events();
        let model = Arc::new(build_model(events.ratings().iter().copied(), Damping::NONE));

        let a = score(&model, Damping::NONE, &events, 1, [5, 7, 10]).unwrap();
        let b = score(&model, Damping::NONE, &events, 1, [5, 7, 10]).unwrap();

        assert_eq!(a, b);
        assert!((a[&5] - 3.25).abs() < EPS);
    }
}
