use crate::config::ConfigError;
use crate::nutrition::{FoodDataError, NutritionSearchError};
use crate::telemetry::TelemetryError;
use crate::wellness::WellnessServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Input(serde_json::Error),
    Wellness(WellnessServiceError),
    Nutrition(NutritionSearchError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::Wellness(err) => write!(f, "wellness error: {}", err),
            AppError::Nutrition(err) => write!(f, "nutrition error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Wellness(err) => Some(err),
            AppError::Nutrition(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Input(_)
            | AppError::Nutrition(NutritionSearchError::MissingQuery) => StatusCode::BAD_REQUEST,
            AppError::Wellness(WellnessServiceError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Wellness(WellnessServiceError::Repository(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Nutrition(NutritionSearchError::Upstream(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value)
    }
}

impl From<WellnessServiceError> for AppError {
    fn from(value: WellnessServiceError) -> Self {
        Self::Wellness(value)
    }
}

impl From<NutritionSearchError> for AppError {
    fn from(value: NutritionSearchError) -> Self {
        Self::Nutrition(value)
    }
}

impl From<FoodDataError> for AppError {
    fn from(value: FoodDataError) -> Self {
        Self::Nutrition(NutritionSearchError::Upstream(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_maps_to_bad_request() {
        let response = AppError::from(NutritionSearchError::MissingQuery).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failure_maps_to_internal_error() {
        let error = FoodDataError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        let response = AppError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
