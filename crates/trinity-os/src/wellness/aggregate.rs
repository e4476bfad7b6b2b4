//! Per-domain reductions over a small window of logged records.
//!
//! Every aggregator is total: an empty slice yields `None`, and missing fields
//! on individual records count as zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    measure_value, rating_value, ExerciseRecord, MentalHealthLog, SleepRecord, Timestamped,
};
use super::repository::{days_before, RecordQuery};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepAggregate {
    pub avg_quality: f64,
    pub avg_duration: f64,
    pub sessions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAggregate {
    pub total_minutes: f64,
    pub sessions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodAggregate {
    pub avg_mood: f64,
    pub avg_stress: f64,
    pub avg_energy: f64,
    pub check_ins: usize,
}

fn most_recent<T: Timestamped + Clone>(records: &[T], window: usize) -> Vec<T> {
    RecordQuery::latest(window).select(records)
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// Mean quality and duration over the `window` most recent sessions.
pub fn aggregate_sleep(records: &[SleepRecord], window: usize) -> Option<SleepAggregate> {
    let recent = most_recent(records, window);
    if recent.is_empty() {
        return None;
    }

    let sessions = recent.len();
    Some(SleepAggregate {
        avg_quality: mean(recent.iter().map(|r| rating_value(r.quality)), sessions),
        avg_duration: mean(
            recent.iter().map(|r| measure_value(r.duration_hours)),
            sessions,
        ),
        sessions,
    })
}

/// Total minutes over workouts completed in the trailing `lookback_days`,
/// the boundary instant included.
pub fn aggregate_exercise(
    records: &[ExerciseRecord],
    now: DateTime<Utc>,
    lookback_days: i64,
) -> Option<ExerciseAggregate> {
    let window = RecordQuery::since(days_before(now, lookback_days)).select(records);
    if window.is_empty() {
        return None;
    }

    Some(ExerciseAggregate {
        total_minutes: window
            .iter()
            .map(|r| measure_value(r.duration_minutes))
            .sum(),
        sessions: window.len(),
    })
}

/// Mean mood, stress, and energy over the `window` most recent check-ins.
pub fn aggregate_mood(records: &[MentalHealthLog], window: usize) -> Option<MoodAggregate> {
    let recent = most_recent(records, window);
    if recent.is_empty() {
        return None;
    }

    let check_ins = recent.len();
    Some(MoodAggregate {
        avg_mood: mean(recent.iter().map(|r| rating_value(r.mood)), check_ins),
        avg_stress: mean(recent.iter().map(|r| rating_value(r.stress)), check_ins),
        avg_energy: mean(recent.iter().map(|r| rating_value(r.energy)), check_ins),
        check_ins,
    })
}
