use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::domain::{
    ExerciseRecord, FoodEntry, MentalHealthLog, SleepRecord, StepRecord, Timestamped, UserId,
};
use super::repository::{RecordQuery, RepositoryError, WellnessRepository};

#[derive(Debug, Default)]
struct UserTables {
    sleep: Vec<SleepRecord>,
    exercise: Vec<ExerciseRecord>,
    mental_health: Vec<MentalHealthLog>,
    food: Vec<FoodEntry>,
    steps: Vec<StepRecord>,
}

/// Process-local store used by the API binary and by tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWellnessStore {
    users: Arc<Mutex<HashMap<UserId, UserTables>>>,
}

impl InMemoryWellnessStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserTables>>, RepositoryError> {
        self.users
            .lock()
            .map_err(|_| RepositoryError::Unavailable("wellness store lock poisoned".to_string()))
    }

    fn read<T, F>(
        &self,
        user: &UserId,
        query: RecordQuery,
        table: F,
    ) -> Result<Vec<T>, RepositoryError>
    where
        T: Timestamped + Clone,
        F: FnOnce(&UserTables) -> &Vec<T>,
    {
        let guard = self.lock()?;
        Ok(guard
            .get(user)
            .map(|tables| query.select(table(tables)))
            .unwrap_or_default())
    }

    fn write<T, F>(&self, user: &UserId, record: T, table: F) -> Result<T, RepositoryError>
    where
        T: Clone,
        F: FnOnce(&mut UserTables) -> &mut Vec<T>,
    {
        let mut guard = self.lock()?;
        let tables = guard.entry(user.clone()).or_default();
        table(tables).push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl WellnessRepository for InMemoryWellnessStore {
    async fn sleep_records(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<SleepRecord>, RepositoryError> {
        self.read(user, query, |tables| &tables.sleep)
    }

    async fn exercise_records(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<ExerciseRecord>, RepositoryError> {
        self.read(user, query, |tables| &tables.exercise)
    }

    async fn mental_health_logs(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<MentalHealthLog>, RepositoryError> {
        self.read(user, query, |tables| &tables.mental_health)
    }

    async fn food_entries(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<FoodEntry>, RepositoryError> {
        self.read(user, query, |tables| &tables.food)
    }

    async fn step_records(
        &self,
        user: &UserId,
        query: RecordQuery,
    ) -> Result<Vec<StepRecord>, RepositoryError> {
        self.read(user, query, |tables| &tables.steps)
    }

    async fn insert_sleep(
        &self,
        user: &UserId,
        record: SleepRecord,
    ) -> Result<SleepRecord, RepositoryError> {
        self.write(user, record, |tables| &mut tables.sleep)
    }

    async fn insert_exercise(
        &self,
        user: &UserId,
        record: ExerciseRecord,
    ) -> Result<ExerciseRecord, RepositoryError> {
        self.write(user, record, |tables| &mut tables.exercise)
    }

    async fn insert_mental_health(
        &self,
        user: &UserId,
        record: MentalHealthLog,
    ) -> Result<MentalHealthLog, RepositoryError> {
        self.write(user, record, |tables| &mut tables.mental_health)
    }

    async fn insert_food(
        &self,
        user: &UserId,
        record: FoodEntry,
    ) -> Result<FoodEntry, RepositoryError> {
        self.write(user, record, |tables| &mut tables.food)
    }

    async fn upsert_steps(
        &self,
        user: &UserId,
        record: StepRecord,
    ) -> Result<StepRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let steps = &mut guard.entry(user.clone()).or_default().steps;
        match steps.iter_mut().find(|existing| existing.date == record.date) {
            Some(existing) => *existing = record.clone(),
            None => steps.push(record.clone()),
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[tokio::test]
    async fn reads_are_scoped_to_the_user() {
        let store = InMemoryWellnessStore::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");

        for offset in 0..3 {
            store
                .insert_sleep(
                    &alice,
                    SleepRecord {
                        quality: Some(7.0),
                        duration_hours: Some(7.5),
                        created_at: now - Duration::days(offset),
                    },
                )
                .await
                .expect("insert succeeds");
        }

        let alice_rows = store
            .sleep_records(&alice, RecordQuery::latest(2))
            .await
            .expect("read succeeds");
        assert_eq!(alice_rows.len(), 2);
        assert_eq!(alice_rows[0].created_at, now);

        let bob_rows = store
            .sleep_records(&bob, RecordQuery::default())
            .await
            .expect("read succeeds");
        assert!(bob_rows.is_empty());
    }

    #[tokio::test]
    async fn step_upsert_replaces_same_day() {
        let store = InMemoryWellnessStore::default();
        let user = UserId::from("walker");
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");

        store
            .upsert_steps(&user, StepRecord { date, steps: 4000 })
            .await
            .expect("first upsert");
        store
            .upsert_steps(&user, StepRecord { date, steps: 10500 })
            .await
            .expect("second upsert");
        store
            .upsert_steps(
                &user,
                StepRecord {
                    date: date - Duration::days(1),
                    steps: 7000,
                },
            )
            .await
            .expect("other day");

        let rows = store
            .step_records(&user, RecordQuery::default())
            .await
            .expect("read succeeds");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], StepRecord { date, steps: 10500 });
    }
}
