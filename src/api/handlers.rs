use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::models::{ItemDetail, ModelSummary, ScoredItem, UserScoresResponse};
use crate::rating::{ItemId, UserId};
use crate::services::scoring::{parse_item_list, ScoringService};

pub struct AppState {
    pub scoring: ScoringService,
}

#[derive(Deserialize)]
pub struct ScoreParams {
    items: Option<String>,
}

pub async fn get_model_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model = state.scoring.model();
    Json(ModelSummary {
        global_mean: model.global_mean(),
        item_count: model.item_count(),
    })
}

pub async fn get_item_detail(
    State(state): State<Arc<AppState>>,
    Path(item): Path<ItemId>,
) -> impl IntoResponse {
    let model = state.scoring.model();
    Json(ItemDetail {
        item,
        known: model.contains_item(item),
        offset: model.item_offset(item),
        mean: model.item_mean(item),
    })
}

pub async fn get_user_scores(
    State(state): State<Arc<AppState>>,
    Path(user): Path<UserId>,
    Query(params): Query<ScoreParams>,
) -> impl IntoResponse {
    let items = match parse_item_list(params.items.as_deref().unwrap_or("")) {
        Ok(items) => items,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let scoring = state.scoring.clone();
    let result = tokio::task::spawn_blocking(move || scoring.score(user, &items)).await;

    let scores = match result {
        Ok(Ok(scores)) => scores,
        Ok(Err(e)) => {
            log::error!("Scoring failed for user {}: {:?}", user, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Scoring Error: {}", e)).into_response();
        }
        Err(e) => {
            log::error!("Scoring task panicked for user {}: {:?}", user, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    Json(UserScoresResponse {
        user,
        scores: scores
            .into_iter()
            .map(|(item, score)| ScoredItem { item, score })
            .collect(),
    })
    .into_response()
}
