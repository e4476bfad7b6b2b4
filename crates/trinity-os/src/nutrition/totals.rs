use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::search::FoodSearchResult;
use crate::wellness::domain::{measure_value, FoodEntry, MealType};

/// Macro totals in kcal and grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl NutritionTotals {
    pub fn from_entry(entry: &FoodEntry) -> Self {
        Self {
            calories: measure_value(entry.calories),
            protein_g: measure_value(entry.protein_g),
            carbs_g: measure_value(entry.carbs_g),
            fat_g: measure_value(entry.fat_g),
        }
    }
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, other: Self) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MealTotals {
    pub meal_type: MealType,
    pub meal_label: &'static str,
    pub entries: usize,
    pub totals: NutritionTotals,
}

/// Everything eaten on one UTC calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub entries: usize,
    pub totals: NutritionTotals,
    pub meals: Vec<MealTotals>,
}

impl DailyNutritionSummary {
    pub fn for_day(entries: &[FoodEntry], date: NaiveDate) -> Self {
        let mut totals = NutritionTotals::default();
        let mut per_meal: BTreeMap<MealType, (usize, NutritionTotals)> = BTreeMap::new();
        let mut count = 0;

        for entry in entries
            .iter()
            .filter(|entry| entry.consumed_at.date_naive() == date)
        {
            let entry_totals = NutritionTotals::from_entry(entry);
            totals += entry_totals;
            count += 1;

            let slot = per_meal.entry(entry.meal_type).or_default();
            slot.0 += 1;
            slot.1 += entry_totals;
        }

        let meals = MealType::ordered()
            .into_iter()
            .filter_map(|meal_type| {
                per_meal.get(&meal_type).map(|(entries, totals)| MealTotals {
                    meal_type,
                    meal_label: meal_type.label(),
                    entries: *entries,
                    totals: *totals,
                })
            })
            .collect();

        Self {
            date,
            entries: count,
            totals,
            meals,
        }
    }
}

impl FoodEntry {
    /// Logs `grams` of a search result, converting its per-100 g values.
    pub fn from_search_result(
        food: &FoodSearchResult,
        grams: f64,
        meal_type: MealType,
        consumed_at: DateTime<Utc>,
    ) -> Self {
        let serving = food.nutrients.scaled(grams);
        Self {
            food_name: food.description.clone(),
            meal_type,
            calories: serving.calories,
            protein_g: serving.protein,
            carbs_g: serving.carbs,
            fat_g: serving.fat,
            serving_grams: Some(measure_value(Some(grams))),
            fdc_id: Some(food.fdc_id),
            consumed_at,
        }
    }
}
