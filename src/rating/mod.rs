pub mod builder;
pub mod damping;
pub mod model;
pub mod scorer;
pub mod sources;
pub mod types;

pub use builder::{build_model, ItemMeanAccumulator, ItemMeanModelBuilder};
pub use damping::Damping;
pub use model::ItemMeanModel;
pub use scorer::{score, ItemUserMeanScorer};
pub use sources::{EventCollection, PrefetchingUserHistory, RatingSource, UserRatingSource};
pub use types::{ItemId, Rating, RatingValue, ScoreMap, UserId, UserRatingVector};
