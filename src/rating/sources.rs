use std::collections::HashMap;
use anyhow::Result;

use super::types::{Rating, UserId};

/// Full rating history, pushed once per call to `stream_ratings`.
///
/// Implementations must be restartable: every call yields the whole dataset.
pub trait RatingSource {
    fn stream_ratings(&self, sink: &mut dyn FnMut(Rating)) -> Result<()>;
}

/// Per-user rating history. Unknown users yield an empty history.
pub trait UserRatingSource {
    fn ratings_for_user(&self, user: UserId) -> Result<Vec<Rating>>;
}

impl<T: RatingSource + ?Sized> RatingSource for &T {
    fn stream_ratings(&self, sink: &mut dyn FnMut(Rating)) -> Result<()> {
        (**self).stream_ratings(sink)
    }
}

impl<T: UserRatingSource + ?Sized> UserRatingSource for &T {
    fn ratings_for_user(&self, user: UserId) -> Result<Vec<Rating>> {
        (**self).ratings_for_user(user)
    }
}

/// In-memory list of rating events, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct EventCollection {
    ratings: Vec<Rating>,
}

impl EventCollection {
    pub fn new(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl RatingSource for EventCollection {
    fn stream_ratings(&self, sink: &mut dyn FnMut(Rating)) -> Result<()> {
        for rating in &self.ratings {
            sink(*rating);
        }
        Ok(())
    }
}

impl UserRatingSource for EventCollection {
    fn ratings_for_user(&self, user: UserId) -> Result<Vec<Rating>> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.user == user)
            .copied()
            .collect())
    }
}

/// User histories indexed up front from a [`RatingSource`]
#[derive(Debug, Clone, Default)]
pub struct PrefetchingUserHistory {
    by_user: HashMap<UserId, Vec<Rating>>,
}

impl PrefetchingUserHistory {
    pub fn from_source<S: RatingSource + ?Sized>(source: &S) -> Result<Self> {
        let mut by_user: HashMap<UserId, Vec<Rating>> = HashMap::new();
        source.stream_ratings(&mut |rating| {
            by_user.entry(rating.user).or_default().push(rating);
        })?;
        log::debug!("Prefetched histories for {} users", by_user.len());
        Ok(Self { by_user })
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}

impl UserRatingSource for PrefetchingUserHistory {
    fn ratings_for_user(&self, user: UserId) -> Result<Vec<Rating>> {
        Ok(self.by_user.get(&user).cloned().unwrap_or_default())
    }
}
