use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::wellness::domain::{
    ExerciseRecord, FoodEntry, MealType, MentalHealthLog, SleepRecord, StepRecord, UserId,
};
use crate::wellness::repository::{RecordQuery, RepositoryError, WellnessRepository};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

pub(super) fn sleep(days_ago: i64, quality: f64, hours: f64) -> SleepRecord {
    SleepRecord {
        quality: Some(quality),
        duration_hours: Some(hours),
        created_at: fixed_now() - Duration::days(days_ago),
    }
}

pub(super) fn workout(days_ago: i64, minutes: f64) -> ExerciseRecord {
    ExerciseRecord {
        exercise_type: Some("cycling".to_string()),
        duration_minutes: Some(minutes),
        completed_at: fixed_now() - Duration::days(days_ago),
    }
}

pub(super) fn check_in(days_ago: i64, mood: f64, stress: f64) -> MentalHealthLog {
    MentalHealthLog {
        mood: Some(mood),
        stress: Some(stress),
        energy: Some(6.0),
        logged_at: fixed_now() - Duration::days(days_ago),
    }
}

pub(super) fn meal(meal_type: MealType, calories: f64, hours_ago: i64) -> FoodEntry {
    FoodEntry {
        food_name: "Greek yogurt".to_string(),
        meal_type,
        calories: Some(calories),
        protein_g: Some(17.0),
        carbs_g: Some(6.0),
        fat_g: Some(0.7),
        serving_grams: Some(170.0),
        fdc_id: None,
        consumed_at: fixed_now() - Duration::hours(hours_ago),
    }
}

/// Store whose every call fails, for exercising the unavailable path.
#[derive(Default)]
pub(super) struct UnavailableRepository;

fn unavailable<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl WellnessRepository for UnavailableRepository {
    async fn sleep_records(
        &self,
        _user: &UserId,
        _query: RecordQuery,
    ) -> Result<Vec<SleepRecord>, RepositoryError> {
        unavailable()
    }

    async fn exercise_records(
        &self,
        _user: &UserId,
        _query: RecordQuery,
    ) -> Result<Vec<ExerciseRecord>, RepositoryError> {
        unavailable()
    }

    async fn mental_health_logs(
        &self,
        _user: &UserId,
        _query: RecordQuery,
    ) -> Result<Vec<MentalHealthLog>, RepositoryError> {
        unavailable()
    }

    async fn food_entries(
        &self,
        _user: &UserId,
        _query: RecordQuery,
    ) -> Result<Vec<FoodEntry>, RepositoryError> {
        unavailable()
    }

    async fn step_records(
        &self,
        _user: &UserId,
        _query: RecordQuery,
    ) -> Result<Vec<StepRecord>, RepositoryError> {
        unavailable()
    }

    async fn insert_sleep(
        &self,
        _user: &UserId,
        _record: SleepRecord,
    ) -> Result<SleepRecord, RepositoryError> {
        unavailable()
    }

    async fn insert_exercise(
        &self,
        _user: &UserId,
        _record: ExerciseRecord,
    ) -> Result<ExerciseRecord, RepositoryError> {
        unavailable()
    }

    async fn insert_mental_health(
        &self,
        _user: &UserId,
        _record: MentalHealthLog,
    ) -> Result<MentalHealthLog, RepositoryError> {
        unavailable()
    }

    async fn insert_food(
        &self,
        _user: &UserId,
        _record: FoodEntry,
    ) -> Result<FoodEntry, RepositoryError> {
        unavailable()
    }

    async fn upsert_steps(
        &self,
        _user: &UserId,
        _record: StepRecord,
    ) -> Result<StepRecord, RepositoryError> {
        unavailable()
    }
}
