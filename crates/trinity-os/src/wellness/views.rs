use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{
    aggregate_exercise, aggregate_mood, aggregate_sleep, ExerciseAggregate, MoodAggregate,
    SleepAggregate,
};
use super::domain::{ExerciseRecord, MentalHealthLog, SleepRecord, UserId};
use super::repository::{days_before, RecordQuery};
use super::score::{
    health_score, SleepTrend, TrinityScore, EXERCISE_MAX_POINTS, EXERCISE_MINUTES_PER_POINT,
    SLEEP_TARGET_HOURS,
};
use crate::config::WellnessConfig;

/// Full record history for one user, as loaded from a JSON export.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WellnessHistory {
    #[serde(default)]
    pub sleep: Vec<SleepRecord>,
    #[serde(default)]
    pub exercise: Vec<ExerciseRecord>,
    #[serde(default)]
    pub mood: Vec<MentalHealthLog>,
}

/// The record slices the composer reads, fetched fresh for each computation.
#[derive(Debug, Clone, Default)]
pub struct WellnessSnapshot {
    pub recent_sleep: Vec<SleepRecord>,
    pub prior_sleep: Vec<SleepRecord>,
    pub exercise: Vec<ExerciseRecord>,
    pub mood: Vec<MentalHealthLog>,
}

impl WellnessSnapshot {
    /// Applies the same windows the repository reads use to an in-memory history.
    pub fn from_history(
        history: &WellnessHistory,
        now: DateTime<Utc>,
        config: WellnessConfig,
    ) -> Self {
        let cutoff = days_before(now, config.lookback_days);
        Self {
            recent_sleep: RecordQuery::latest(config.recent_window).select(&history.sleep),
            prior_sleep: RecordQuery::before(cutoff)
                .with_limit(config.recent_window)
                .select(&history.sleep),
            exercise: RecordQuery::since(cutoff).select(&history.exercise),
            mood: RecordQuery::latest(config.recent_window).select(&history.mood),
        }
    }
}

/// Immutable view-model rendered by the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct WellnessDashboard {
    pub user_id: UserId,
    pub generated_at: DateTime<Utc>,
    pub trinity: TrinityScore,
    pub trend: SleepTrend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<SleepAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodAggregate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}

impl WellnessDashboard {
    pub fn compose(
        user_id: UserId,
        snapshot: &WellnessSnapshot,
        now: DateTime<Utc>,
        config: WellnessConfig,
    ) -> Self {
        let sleep = aggregate_sleep(&snapshot.recent_sleep, config.recent_window);
        let prior_sleep = aggregate_sleep(&snapshot.prior_sleep, config.recent_window);
        let exercise = aggregate_exercise(&snapshot.exercise, now, config.lookback_days);
        let mood = aggregate_mood(&snapshot.mood, config.recent_window);

        let health = health_score(sleep.as_ref(), exercise.as_ref(), mood.as_ref());
        let trinity = TrinityScore::from_health(health);
        let trend = SleepTrend::compare(sleep.as_ref(), prior_sleep.as_ref());
        let observations = observations(sleep.as_ref(), exercise.as_ref(), mood.as_ref());

        Self {
            user_id,
            generated_at: now,
            trinity,
            trend,
            sleep,
            exercise,
            mood,
            observations,
        }
    }
}

fn observations(
    sleep: Option<&SleepAggregate>,
    exercise: Option<&ExerciseAggregate>,
    mood: Option<&MoodAggregate>,
) -> Vec<String> {
    let mut notes = Vec::new();

    if sleep.is_none() && exercise.is_none() && mood.is_none() {
        notes.push("No wellness data logged yet; start with a sleep or mood check-in".to_string());
    }

    if let Some(sleep) = sleep {
        if sleep.avg_duration < SLEEP_TARGET_HOURS {
            notes.push(format!(
                "Averaging {:.1} hours of sleep; {SLEEP_TARGET_HOURS:.0}+ hours earns the full duration bonus",
                sleep.avg_duration
            ));
        }
    }

    if let Some(exercise) = exercise {
        let full_credit_minutes = EXERCISE_MAX_POINTS * EXERCISE_MINUTES_PER_POINT;
        if exercise.total_minutes < full_credit_minutes {
            notes.push(format!(
                "{:.0} active minutes this week; {full_credit_minutes:.0} minutes maxes the exercise contribution",
                exercise.total_minutes
            ));
        }
    }

    if let Some(mood) = mood {
        if mood.avg_stress > mood.avg_mood {
            notes.push("Stress is outpacing mood across recent check-ins".to_string());
        }
    }

    notes.push(
        "Wealth and relationship pillars are not yet integrated and count as 0 in the overall score"
            .to_string(),
    );

    notes
}
