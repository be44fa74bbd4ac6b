use serde::Serialize;

use crate::rating::{ItemId, RatingValue, UserId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub global_mean: RatingValue,
    pub item_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    pub item: ItemId,
    pub known: bool,
    pub offset: RatingValue,
    pub mean: RatingValue,
}

#[derive(Debug, Serialize)]
pub struct ScoredItem {
    pub item: ItemId,
    pub score: RatingValue,
}

#[derive(Debug, Serialize)]
pub struct UserScoresResponse {
    pub user: UserId,
    pub scores: Vec<ScoredItem>,
}
