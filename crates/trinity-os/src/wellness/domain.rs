use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 10.0;

/// Identity of the user owning a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Records ordered by a single timestamp column.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// One logged sleep session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Self-reported quality, 1-10.
    #[serde(default)]
    pub quality: Option<f64>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// One completed workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default = "Utc::now")]
    pub completed_at: DateTime<Utc>,
}

/// One mental health check-in. All ratings are 1-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalHealthLog {
    #[serde(default)]
    pub mood: Option<f64>,
    #[serde(default)]
    pub stress: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default = "Utc::now")]
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const fn ordered() -> [MealType; 4] {
        [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

/// One logged food item with its macro totals for the portion eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub food_name: String,
    pub meal_type: MealType,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    #[serde(default = "Utc::now")]
    pub consumed_at: DateTime<Utc>,
}

/// Daily step count, upserted by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub date: NaiveDate,
    pub steps: u32,
}

impl Timestamped for SleepRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timestamped for ExerciseRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

impl Timestamped for MentalHealthLog {
    fn timestamp(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

impl Timestamped for FoodEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.consumed_at
    }
}

impl Timestamped for StepRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

/// Rating as used by the aggregators: clamped to 1-10 when present, 0 when
/// missing or not a number.
pub fn rating_value(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() => value.clamp(RATING_MIN, RATING_MAX),
        _ => 0.0,
    }
}

/// Non-negative measurement (hours, minutes, grams); anything else counts as 0.
pub fn measure_value(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Rejection raised when a record is logged with out-of-range values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("{field} must be between 1 and 10, got {value}")]
    RatingOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidMeasure { field: &'static str, value: f64 },
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn check_rating(field: &'static str, raw: Option<f64>) -> Result<(), RecordValidationError> {
    match raw {
        Some(value) if !(RATING_MIN..=RATING_MAX).contains(&value) => {
            Err(RecordValidationError::RatingOutOfRange { field, value })
        }
        _ => Ok(()),
    }
}

fn check_measure(field: &'static str, raw: Option<f64>) -> Result<(), RecordValidationError> {
    match raw {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(RecordValidationError::InvalidMeasure { field, value })
        }
        _ => Ok(()),
    }
}

impl SleepRecord {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        check_rating("quality", self.quality)?;
        check_measure("duration_hours", self.duration_hours)
    }
}

impl ExerciseRecord {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        check_measure("duration_minutes", self.duration_minutes)
    }
}

impl MentalHealthLog {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        check_rating("mood", self.mood)?;
        check_rating("stress", self.stress)?;
        check_rating("energy", self.energy)
    }
}

impl FoodEntry {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.food_name.trim().is_empty() {
            return Err(RecordValidationError::MissingField("food_name"));
        }
        check_measure("calories", self.calories)?;
        check_measure("protein_g", self.protein_g)?;
        check_measure("carbs_g", self.carbs_g)?;
        check_measure("fat_g", self.fat_g)?;
        check_measure("serving_grams", self.serving_grams)
    }
}
