use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Named nutrient fields exposed by the search proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugar,
    Sodium,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    Thiamin,
    Riboflavin,
    Niacin,
    VitaminB6,
    Folate,
    VitaminB12,
    Calcium,
    Iron,
    Magnesium,
    Phosphorus,
    Potassium,
    Zinc,
}

/// FoodData Central nutrient id to field. Ids not listed here are dropped.
pub const NUTRIENT_IDS: &[(u32, NutrientField)] = &[
    (1008, NutrientField::Calories),
    (1003, NutrientField::Protein),
    (1005, NutrientField::Carbs),
    (1004, NutrientField::Fat),
    (1079, NutrientField::Fiber),
    (2000, NutrientField::Sugar),
    (1093, NutrientField::Sodium),
    (1106, NutrientField::VitaminA),
    (1162, NutrientField::VitaminC),
    (1114, NutrientField::VitaminD),
    (1109, NutrientField::VitaminE),
    (1185, NutrientField::VitaminK),
    (1165, NutrientField::Thiamin),
    (1166, NutrientField::Riboflavin),
    (1167, NutrientField::Niacin),
    (1175, NutrientField::VitaminB6),
    (1177, NutrientField::Folate),
    (1178, NutrientField::VitaminB12),
    (1087, NutrientField::Calcium),
    (1089, NutrientField::Iron),
    (1090, NutrientField::Magnesium),
    (1091, NutrientField::Phosphorus),
    (1092, NutrientField::Potassium),
    (1095, NutrientField::Zinc),
];

static NUTRIENT_ID_MAP: OnceLock<HashMap<u32, NutrientField>> = OnceLock::new();

pub fn field_for_id(nutrient_id: u32) -> Option<NutrientField> {
    NUTRIENT_ID_MAP
        .get_or_init(|| NUTRIENT_IDS.iter().copied().collect())
        .get(&nutrient_id)
        .copied()
}

impl NutrientField {
    /// Wire name used in the proxy response.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
            Self::Fiber => "fiber",
            Self::Sugar => "sugar",
            Self::Sodium => "sodium",
            Self::VitaminA => "vitaminA",
            Self::VitaminC => "vitaminC",
            Self::VitaminD => "vitaminD",
            Self::VitaminE => "vitaminE",
            Self::VitaminK => "vitaminK",
            Self::Thiamin => "thiamin",
            Self::Riboflavin => "riboflavin",
            Self::Niacin => "niacin",
            Self::VitaminB6 => "vitaminB6",
            Self::Folate => "folate",
            Self::VitaminB12 => "vitaminB12",
            Self::Calcium => "calcium",
            Self::Iron => "iron",
            Self::Magnesium => "magnesium",
            Self::Phosphorus => "phosphorus",
            Self::Potassium => "potassium",
            Self::Zinc => "zinc",
        }
    }
}

/// Nutrient amounts for a food. Values follow the upstream units (kcal, g, mg,
/// or µg per 100 g for FoodData Central search results).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_e: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thiamin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riboflavin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niacin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b6: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b12: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zinc: Option<f64>,
}

impl NutrientProfile {
    /// Builds a profile from `(nutrient id, value)` pairs, skipping unknown ids
    /// and pairs without a finite value.
    pub fn from_nutrients<I>(nutrients: I) -> Self
    where
        I: IntoIterator<Item = (u32, Option<f64>)>,
    {
        let mut profile = Self::default();
        for (nutrient_id, value) in nutrients {
            let (Some(field), Some(value)) = (field_for_id(nutrient_id), value) else {
                continue;
            };
            if value.is_finite() {
                *profile.slot_mut(field) = Some(value);
            }
        }
        profile
    }

    pub fn get(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Protein => self.protein,
            NutrientField::Carbs => self.carbs,
            NutrientField::Fat => self.fat,
            NutrientField::Fiber => self.fiber,
            NutrientField::Sugar => self.sugar,
            NutrientField::Sodium => self.sodium,
            NutrientField::VitaminA => self.vitamin_a,
            NutrientField::VitaminC => self.vitamin_c,
            NutrientField::VitaminD => self.vitamin_d,
            NutrientField::VitaminE => self.vitamin_e,
            NutrientField::VitaminK => self.vitamin_k,
            NutrientField::Thiamin => self.thiamin,
            NutrientField::Riboflavin => self.riboflavin,
            NutrientField::Niacin => self.niacin,
            NutrientField::VitaminB6 => self.vitamin_b6,
            NutrientField::Folate => self.folate,
            NutrientField::VitaminB12 => self.vitamin_b12,
            NutrientField::Calcium => self.calcium,
            NutrientField::Iron => self.iron,
            NutrientField::Magnesium => self.magnesium,
            NutrientField::Phosphorus => self.phosphorus,
            NutrientField::Potassium => self.potassium,
            NutrientField::Zinc => self.zinc,
        }
    }

    pub fn is_empty(&self) -> bool {
        NUTRIENT_IDS
            .iter()
            .all(|(_, field)| self.get(*field).is_none())
    }

    /// Converts per-100 g values into amounts for a `grams` serving.
    pub fn scaled(&self, grams: f64) -> Self {
        if !grams.is_finite() || grams <= 0.0 {
            return Self::default();
        }

        let factor = grams / 100.0;
        let mut scaled = self.clone();
        for (_, field) in NUTRIENT_IDS {
            let slot = scaled.slot_mut(*field);
            *slot = slot.map(|value| value * factor);
        }
        scaled
    }

    fn slot_mut(&mut self, field: NutrientField) -> &mut Option<f64> {
        match field {
            NutrientField::Calories => &mut self.calories,
            NutrientField::Protein => &mut self.protein,
            NutrientField::Carbs => &mut self.carbs,
            NutrientField::Fat => &mut self.fat,
            NutrientField::Fiber => &mut self.fiber,
            NutrientField::Sugar => &mut self.sugar,
            NutrientField::Sodium => &mut self.sodium,
            NutrientField::VitaminA => &mut self.vitamin_a,
            NutrientField::VitaminC => &mut self.vitamin_c,
            NutrientField::VitaminD => &mut self.vitamin_d,
            NutrientField::VitaminE => &mut self.vitamin_e,
            NutrientField::VitaminK => &mut self.vitamin_k,
            NutrientField::Thiamin => &mut self.thiamin,
            NutrientField::Riboflavin => &mut self.riboflavin,
            NutrientField::Niacin => &mut self.niacin,
            NutrientField::VitaminB6 => &mut self.vitamin_b6,
            NutrientField::Folate => &mut self.folate,
            NutrientField::VitaminB12 => &mut self.vitamin_b12,
            NutrientField::Calcium => &mut self.calcium,
            NutrientField::Iron => &mut self.iron,
            NutrientField::Magnesium => &mut self.magnesium,
            NutrientField::Phosphorus => &mut self.phosphorus,
            NutrientField::Potassium => &mut self.potassium,
            NutrientField::Zinc => &mut self.zinc,
        }
    }
}
