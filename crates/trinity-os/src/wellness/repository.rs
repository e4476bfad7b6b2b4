use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::domain::{
    ExerciseRecord, FoodEntry, MentalHealthLog, SleepRecord, StepRecord, Timestamped, UserId,
};

/// Read filter applied to a single table: an inclusive lower bound, an
/// exclusive upper bound, and a row limit. Results are always newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub since: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl RecordQuery {
    /// Most recent `limit` rows.
    pub fn latest(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Rows at or after `since`.
    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            ..Self::default()
        }
    }

    /// Rows strictly older than `before`.
    pub fn before(before: DateTime<Utc>) -> Self {
        Self {
            before: Some(before),
            ..Self::default()
        }
    }

    pub fn between(since: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            before: Some(before),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, timestamp: DateTime<Utc>) -> bool {
        self.since.map_or(true, |since| timestamp >= since)
            && self.before.map_or(true, |before| timestamp < before)
    }

    /// Applies the filter, ordering, and limit to an in-memory slice.
    pub fn select<'a, T, I>(&self, records: I) -> Vec<T>
    where
        T: Timestamped + Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut selected: Vec<&T> = records
            .into_iter()
            .filter(|record| self.matches(record.timestamp()))
            .collect();
        selected.sort_by_key(|record| std::cmp::Reverse(record.timestamp()));
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected.into_iter().cloned().collect()
    }
}

/// `at` moved back by `days`, saturating at the earliest representable instant.
pub fn days_before(at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| at.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Half-open UTC bounds of a calendar day. The end saturates on the last
/// representable date.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = date
        .succ_opt()
        .map(|next| next.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

/// Storage abstraction for the per-user wellness tables.
#[async_trait]
pub trait WellnessRepository: Send + Sync {
    async fn sleep_records(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<SleepRecord>, RepositoryError>;

    async fn exercise_records(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<ExerciseRecord>, RepositoryError>;

    async fn mental_health_logs(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<MentalHealthLog>, RepositoryError>;

    async fn food_entries(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<FoodEntry>, RepositoryError>;

    async fn step_records(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<StepRecord>, RepositoryError>;

    async fn insert_sleep(
        &self,
        user: &UserId,
        record: SleepRecord,
    ) -> Result<SleepRecord, RepositoryError>;

    async fn insert_exercise(
        &self,
        user: &UserId,
        record: ExerciseRecord,
    ) -> Result<ExerciseRecord, RepositoryError>;

    async fn insert_mental_health(
        &self,
        user: &UserId,
        record: MentalHealthLog,
    ) -> Result<MentalHealthLog, RepositoryError>;

    async fn insert_food(
        &self,
        user: &UserId,
        record: FoodEntry,
    ) -> Result<FoodEntry, RepositoryError>;

    /// Inserts or replaces the step count for `(user, record.date)`.
    async fn upsert_steps(
        &self,
        user: &UserId,
        record: StepRecord,
    ) -> Result<StepRecord, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
