use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{ExerciseRecord, FoodEntry, MentalHealthLog, SleepRecord, StepRecord, UserId};
use super::repository::WellnessRepository;
use super::service::{WellnessService, WellnessServiceError};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardParams {
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DayParams {
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// Router builder exposing record intake and the Trinity dashboard.
pub fn wellness_router<R>(service: Arc<WellnessService<R>>) -> Router
where
    R: WellnessRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/wellness/:user_id/dashboard",
            get(dashboard_handler::<R>),
        )
        .route(
            "/api/v1/wellness/:user_id/nutrition",
            get(nutrition_handler::<R>),
        )
        .route("/api/v1/wellness/:user_id/sleep", post(sleep_handler::<R>))
        .route(
            "/api/v1/wellness/:user_id/exercise",
            post(exercise_handler::<R>),
        )
        .route("/api/v1/wellness/:user_id/mood", post(mood_handler::<R>))
        .route("/api/v1/wellness/:user_id/food", post(food_handler::<R>))
        .route(
            "/api/v1/wellness/:user_id/steps",
            get(steps_handler::<R>).put(record_steps_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: WellnessServiceError) -> Response {
    let status = match &error {
        WellnessServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WellnessServiceError::Repository(_) => {
            warn!(error = %error, "wellness store request failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    success: StatusCode,
    result: Result<T, WellnessServiceError>,
) -> Response {
    match result {
        Ok(body) => (success, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Query(params): Query<DashboardParams>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let now = params.now.unwrap_or_else(Utc::now);
    let result = service.dashboard(&UserId(user_id), now).await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn nutrition_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Query(params): Query<DayParams>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let result = service.nutrition_summary(&UserId(user_id), date).await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn steps_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Query(params): Query<DayParams>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let today = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let result = service.recent_steps(&UserId(user_id), today).await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn sleep_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Json(record): Json<SleepRecord>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let result = service.log_sleep(&UserId(user_id), record).await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn exercise_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Json(record): Json<ExerciseRecord>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let result = service.log_exercise(&UserId(user_id), record).await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn mood_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Json(record): Json<MentalHealthLog>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let result = service.log_mood(&UserId(user_id), record).await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn food_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Json(record): Json<FoodEntry>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let result = service.log_food(&UserId(user_id), record).await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn record_steps_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    Path(user_id): Path<String>,
    Json(record): Json<StepRecord>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let result = service.record_steps(&UserId(user_id), record).await;
    respond(StatusCode::OK, result)
}
