use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{get_item_detail, get_model_summary, get_user_scores, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/model", get(get_model_summary))
        .route("/api/items/:id", get(get_item_detail))
        .route("/api/users/:id/scores", get(get_user_scores))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::database::{create_memory_pool, SqliteRatingStore};
    use crate::rating::{build_model, Damping, ItemUserMeanScorer, Rating};
    use crate::services::scoring::ScoringService;

    fn test_router() -> Router {
        let ratings = vec![
            Rating::new(1, 5, 3.0),
            Rating::new(1, 7, 4.0),
            Rating::new(8, 4, 5.0),
            Rating::new(8, 5, 4.0),
        ];
        let store = SqliteRatingStore::new(create_memory_pool().unwrap());
        store.ensure_schema().unwrap();
        store.insert_all(&ratings).unwrap();
        let model = Arc::new(build_model(ratings, Damping::NONE));
        let scoring = ScoringService::with_parts(ItemUserMeanScorer::new(model, Damping::NONE), store);
        create_router(Arc::new(AppState { scoring }))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_model_summary() {
        let (status, body) = get_json(test_router(), "/api/model").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["globalMean"], 4.0);
        assert_eq!(body["itemCount"], 3);
    }

    #[tokio::test]
    async fn test_unknown_item_detail() {
        let (status, body) = get_json(test_router(), "/api/items/10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["known"], false);
        assert_eq!(body["offset"], 0.0);
        assert_eq!(body["mean"], 4.0);
    }

    #[tokio::test]
    async fn test_user_scores() {
        let (status, body) = get_json(test_router(), "/api/users/1/scores?items=5,7,10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], 1);
        let scores = body["scores"].as_array().unwrap();
        let expected = [(5, 3.25), (7, 3.75), (10, 3.75)];
        assert_eq!(scores.len(), expected.len());
        for (entry, (item, score)) in scores.iter().zip(expected) {
            assert_eq!(entry["item"], item);
            assert!((entry["score"].as_f64().unwrap() - score).abs() < 1e-5);
        }
    }

    #[tokio::test]
    async fn test_malformed_items_is_bad_request() {
        let (status, _) = get_json(test_router(), "/api/users/1/scores?items=5,abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
