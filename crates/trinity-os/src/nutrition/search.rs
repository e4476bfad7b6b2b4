use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::client::{FdcFood, FoodDataClient, FoodDataError};
use super::nutrients::NutrientProfile;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Proxy request. Both fields are optional on the wire so that a missing
/// query is reported as a 400 rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    pub fdc_id: u64,
    pub description: String,
    pub data_type: String,
    pub nutrients: NutrientProfile,
}

impl From<FdcFood> for FoodSearchResult {
    fn from(food: FdcFood) -> Self {
        let nutrients = NutrientProfile::from_nutrients(
            food.food_nutrients
                .iter()
                .filter_map(|nutrient| nutrient.nutrient_id.map(|id| (id, nutrient.value))),
        );
        Self {
            fdc_id: food.fdc_id,
            description: food.description,
            data_type: food.data_type,
            nutrients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSearchResponse {
    pub foods: Vec<FoodSearchResult>,
    pub total_hits: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum NutritionSearchError {
    #[error("query parameter is required")]
    MissingQuery,
    #[error(transparent)]
    Upstream(#[from] FoodDataError),
}

pub fn normalize_page_size(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Validates proxy requests and translates upstream results.
pub struct NutritionSearchService<C> {
    client: Arc<C>,
}

impl<C> NutritionSearchService<C>
where
    C: FoodDataClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        request: NutritionSearchRequest,
    ) -> Result<NutritionSearchResponse, NutritionSearchError> {
        let query = request
            .query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .ok_or(NutritionSearchError::MissingQuery)?;
        let page_size = normalize_page_size(request.page_size);

        let upstream = self
            .client
            .search_foods(query, page_size)
            .await
            .map_err(|err| {
                warn!(%query, error = %err, "food data search failed");
                err
            })?;

        debug!(%query, hits = upstream.total_hits, "food data search completed");

        Ok(NutritionSearchResponse {
            total_hits: upstream.total_hits,
            foods: upstream.foods.into_iter().map(FoodSearchResult::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::client::{FdcFoodNutrient, FdcSearchResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl FoodDataClient for RecordingClient {
        async fn search_foods(
            &self,
            query: &str,
            page_size: u32,
        ) -> Result<FdcSearchResponse, FoodDataError> {
            self.calls
                .lock()
                .expect("calls mutex poisoned")
                .push((query.to_string(), page_size));
            Ok(FdcSearchResponse {
                foods: vec![FdcFood {
                    fdc_id: 1750340,
                    description: "Apples, fuji, with skin, raw".to_string(),
                    data_type: "Foundation".to_string(),
                    food_nutrients: vec![
                        FdcFoodNutrient {
                            nutrient_id: Some(1008),
                            value: Some(63.0),
                        },
                        FdcFoodNutrient {
                            nutrient_id: None,
                            value: Some(1.0),
                        },
                    ],
                }],
                total_hits: 1,
            })
        }
    }

    #[test]
    fn page_size_defaults_and_clamps() {
        assert_eq!(normalize_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(0)), 1);
        assert_eq!(normalize_page_size(Some(5_000)), MAX_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(12)), 12);
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_upstream_call() {
        let client = Arc::new(RecordingClient::default());
        let service = NutritionSearchService::new(client.clone());

        for query in [None, Some(String::new()), Some("   ".to_string())] {
            let result = service
                .search(NutritionSearchRequest {
                    query,
                    page_size: None,
                })
                .await;
            assert!(matches!(result, Err(NutritionSearchError::MissingQuery)));
        }
        assert!(client.calls.lock().expect("calls mutex poisoned").is_empty());
    }

    #[tokio::test]
    async fn search_trims_query_and_maps_foods() {
        let client = Arc::new(RecordingClient::default());
        let service = NutritionSearchService::new(client.clone());

        let response = service
            .search(NutritionSearchRequest {
                query: Some("  apple ".to_string()),
                page_size: Some(5),
            })
            .await
            .expect("search succeeds");

        assert_eq!(response.total_hits, 1);
        assert_eq!(response.foods[0].nutrients.calories, Some(63.0));
        assert_eq!(
            client.calls.lock().expect("calls mutex poisoned").as_slice(),
            &[("apple".to_string(), 5)]
        );
    }
}
