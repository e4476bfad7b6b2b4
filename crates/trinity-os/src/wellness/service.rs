use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use super::domain::{
    ExerciseRecord, FoodEntry, MentalHealthLog, RecordValidationError, SleepRecord, StepRecord,
    UserId,
};
use super::repository::{
    day_bounds, days_before, RecordQuery, RepositoryError, WellnessRepository,
};
use super::views::{WellnessDashboard, WellnessSnapshot};
use crate::config::WellnessConfig;
use crate::nutrition::DailyNutritionSummary;

/// Service composing the record store with the aggregators and score composer.
pub struct WellnessService<R> {
    repository: Arc<R>,
    config: WellnessConfig,
}

impl<R> WellnessService<R>
where
    R: WellnessRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: WellnessConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> WellnessConfig {
        self.config
    }

    /// Fetches the four independent slices concurrently; fails if any read fails.
    pub async fn snapshot(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
    ) -> Result<WellnessSnapshot, WellnessServiceError> {
        let window = self.config.recent_window;
        let cutoff = days_before(now, self.config.lookback_days);

        let (recent_sleep, prior_sleep, exercise, mood) = tokio::try_join!(
            self.repository
                .sleep_records(user, RecordQuery::latest(window)),
            self.repository
                .sleep_records(user, RecordQuery::before(cutoff).with_limit(window)),
            self.repository
                .exercise_records(user, RecordQuery::since(cutoff)),
            self.repository
                .mental_health_logs(user, RecordQuery::latest(window)),
        )?;

        Ok(WellnessSnapshot {
            recent_sleep,
            prior_sleep,
            exercise,
            mood,
        })
    }

    /// Recomputes the Trinity score view-model from a fresh snapshot.
    pub async fn dashboard(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
    ) -> Result<WellnessDashboard, WellnessServiceError> {
        let snapshot = self.snapshot(user, now).await?;
        let dashboard = WellnessDashboard::compose(user.clone(), &snapshot, now, self.config);
        debug!(
            user = %user.0,
            health = dashboard.trinity.health.score,
            overall = dashboard.trinity.overall,
            trend = %dashboard.trend.label,
            "wellness dashboard composed"
        );
        Ok(dashboard)
    }

    pub async fn nutrition_summary(
        &self,
        user: &UserId,
        date: NaiveDate,
    ) -> Result<DailyNutritionSummary, WellnessServiceError> {
        let (start, end) = day_bounds(date);
        let entries = self
            .repository
            .food_entries(user, RecordQuery::between(start, end))
            .await?;
        Ok(DailyNutritionSummary::for_day(&entries, date))
    }

    /// Step counts from `lookback_days` before `today` through `today`,
    /// newest first.
    pub async fn recent_steps(
        &self,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<StepRecord>, WellnessServiceError> {
        let (start, end) = day_bounds(today);
        let since = days_before(start, self.config.lookback_days);
        Ok(self
            .repository
            .step_records(user, RecordQuery::between(since, end))
            .await?)
    }

    pub async fn log_sleep(
        &self,
        user: &UserId,
        record: SleepRecord,
    ) -> Result<SleepRecord, WellnessServiceError> {
        record.validate()?;
        let stored = self.repository.insert_sleep(user, record).await?;
        info!(user = %user.0, "sleep record logged");
        Ok(stored)
    }

    pub async fn log_exercise(
        &self,
        user: &UserId,
        record: ExerciseRecord,
    ) -> Result<ExerciseRecord, WellnessServiceError> {
        record.validate()?;
        let stored = self.repository.insert_exercise(user, record).await?;
        info!(user = %user.0, "exercise record logged");
        Ok(stored)
    }

    pub async fn log_mood(
        &self,
        user: &UserId,
        record: MentalHealthLog,
    ) -> Result<MentalHealthLog, WellnessServiceError> {
        record.validate()?;
        let stored = self.repository.insert_mental_health(user, record).await?;
        info!(user = %user.0, "mental health check-in logged");
        Ok(stored)
    }

    pub async fn log_food(
        &self,
        user: &UserId,
        record: FoodEntry,
    ) -> Result<FoodEntry, WellnessServiceError> {
        record.validate()?;
        let stored = self.repository.insert_food(user, record).await?;
        info!(user = %user.0, "food entry logged");
        Ok(stored)
    }

    pub async fn record_steps(
        &self,
        user: &UserId,
        record: StepRecord,
    ) -> Result<StepRecord, WellnessServiceError> {
        let stored = self.repository.upsert_steps(user, record).await?;
        info!(user = %user.0, date = %stored.date, steps = stored.steps, "daily steps recorded");
        Ok(stored)
    }
}

/// Error raised by the wellness service.
#[derive(Debug, thiserror::Error)]
pub enum WellnessServiceError {
    #[error(transparent)]
    Validation(#[from] RecordValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
