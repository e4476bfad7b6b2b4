//! FoodData Central search client.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::NutritionConfig;

const SEARCH_PATH: &str = "/fdc/v1/foods/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw search payload as returned by FoodData Central.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcSearchResponse {
    #[serde(default)]
    pub foods: Vec<FdcFood>,
    #[serde(default)]
    pub total_hits: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFood {
    pub fdc_id: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub food_nutrients: Vec<FdcFoodNutrient>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFoodNutrient {
    #[serde(default)]
    pub nutrient_id: Option<u32>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Upstream food-composition search.
#[async_trait]
pub trait FoodDataClient: Send + Sync {
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<FdcSearchResponse, FoodDataError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FoodDataError {
    #[error("food data request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("food data service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// [`FoodDataClient`] backed by reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestFoodDataClient {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestFoodDataClient {
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self, FoodDataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn from_config(config: &NutritionConfig) -> Result<Self, FoodDataError> {
        Self::new(&config.base_url, config.api_key.clone())
    }

    async fn error_from_response(resp: reqwest::Response) -> FoodDataError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        FoodDataError::Status {
            status,
            body: body.chars().take(256).collect(),
        }
    }
}

#[async_trait]
impl FoodDataClient for ReqwestFoodDataClient {
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<FdcSearchResponse, FoodDataError> {
        let url = format!("{}{SEARCH_PATH}", self.base_url);
        let page_size = page_size.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.expose_secret()),
                ("query", query),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        Ok(resp.json::<FdcSearchResponse>().await?)
    }
}
