use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::client::FoodDataClient;
use super::search::{NutritionSearchError, NutritionSearchRequest, NutritionSearchService};

/// Router exposing the nutrition search proxy over GET (query string) and
/// POST (JSON body).
pub fn nutrition_router<C>(service: Arc<NutritionSearchService<C>>) -> Router
where
    C: FoodDataClient + 'static,
{
    Router::new()
        .route(
            "/api/v1/nutrition/search",
            get(search_query_handler::<C>).post(search_body_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn search_query_handler<C>(
    State(service): State<Arc<NutritionSearchService<C>>>,
    Query(request): Query<NutritionSearchRequest>,
) -> Response
where
    C: FoodDataClient + 'static,
{
    respond(service.search(request).await)
}

pub(crate) async fn search_body_handler<C>(
    State(service): State<Arc<NutritionSearchService<C>>>,
    Json(request): Json<NutritionSearchRequest>,
) -> Response
where
    C: FoodDataClient + 'static,
{
    respond(service.search(request).await)
}

fn respond(result: Result<super::NutritionSearchResponse, NutritionSearchError>) -> Response {
    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(NutritionSearchError::MissingQuery) => {
            let payload = json!({ "error": NutritionSearchError::MissingQuery.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(NutritionSearchError::Upstream(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
