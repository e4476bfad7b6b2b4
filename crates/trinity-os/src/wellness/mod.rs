//! Wellness record intake, per-domain aggregation, and Trinity scoring.

pub mod aggregate;
pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod score;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use aggregate::{
    aggregate_exercise, aggregate_mood, aggregate_sleep, ExerciseAggregate, MoodAggregate,
    SleepAggregate,
};
pub use domain::{
    ExerciseRecord, FoodEntry, MealType, MentalHealthLog, RecordValidationError, SleepRecord,
    StepRecord, Timestamped, UserId,
};
pub use memory::InMemoryWellnessStore;
pub use repository::{RecordQuery, RepositoryError, WellnessRepository};
pub use router::wellness_router;
pub use score::{
    health_score, overall_score, Pillar, PillarScore, PillarStatus, SleepTrend, TrinityScore,
};
pub use service::{WellnessService, WellnessServiceError};
pub use views::{WellnessDashboard, WellnessHistory, WellnessSnapshot};
