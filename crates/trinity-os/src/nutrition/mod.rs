//! Nutrition lookup proxy and food-log totals.

pub mod client;
pub mod nutrients;
pub mod router;
pub mod search;
pub mod totals;

pub use client::{FoodDataClient, FoodDataError, ReqwestFoodDataClient};
pub use nutrients::{field_for_id, NutrientField, NutrientProfile, NUTRIENT_IDS};
pub use router::nutrition_router;
pub use search::{
    FoodSearchResult, NutritionSearchError, NutritionSearchRequest, NutritionSearchResponse,
    NutritionSearchService,
};
pub use totals::{DailyNutritionSummary, MealTotals, NutritionTotals};
