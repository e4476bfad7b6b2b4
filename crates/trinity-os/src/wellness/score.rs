use serde::Serialize;

use super::aggregate::{ExerciseAggregate, MoodAggregate, SleepAggregate};

pub const SLEEP_QUALITY_WEIGHT: f64 = 5.0;
pub const SLEEP_TARGET_HOURS: f64 = 7.0;
pub const SLEEP_TARGET_BONUS: f64 = 25.0;
pub const SLEEP_HOUR_WEIGHT: f64 = 3.0;
pub const EXERCISE_MINUTES_PER_POINT: f64 = 5.0;
pub const EXERCISE_MAX_POINTS: f64 = 35.0;
pub const MOOD_WEIGHT: f64 = 3.0;
pub const STRESS_WEIGHT: f64 = 1.0;

pub fn sleep_contribution(sleep: &SleepAggregate) -> f64 {
    let duration_points = if sleep.avg_duration >= SLEEP_TARGET_HOURS {
        SLEEP_TARGET_BONUS
    } else {
        sleep.avg_duration * SLEEP_HOUR_WEIGHT
    };
    sleep.avg_quality * SLEEP_QUALITY_WEIGHT + duration_points
}

pub fn exercise_contribution(exercise: &ExerciseAggregate) -> f64 {
    (exercise.total_minutes / EXERCISE_MINUTES_PER_POINT).min(EXERCISE_MAX_POINTS)
}

/// May be negative when stress outweighs mood; the final clamp absorbs it.
pub fn mood_contribution(mood: &MoodAggregate) -> f64 {
    mood.avg_mood * MOOD_WEIGHT - mood.avg_stress * STRESS_WEIGHT
}

/// Health sub-score in 0..=100. Absent domains contribute nothing.
pub fn health_score(
    sleep: Option<&SleepAggregate>,
    exercise: Option<&ExerciseAggregate>,
    mood: Option<&MoodAggregate>,
) -> u8 {
    let raw = sleep.map_or(0.0, sleep_contribution)
        + exercise.map_or(0.0, exercise_contribution)
        + mood.map_or(0.0, mood_contribution);

    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Unweighted mean of the three pillars. Pillars without a data source still
/// count in the divisor.
pub fn overall_score(health: u8, wealth: u8, relationships: u8) -> u8 {
    let sum = f64::from(health) + f64::from(wealth) + f64::from(relationships);
    (sum / 3.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Health,
    Wealth,
    Relationships,
}

impl Pillar {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Wealth => "Wealth",
            Self::Relationships => "Relationships",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarStatus {
    Integrated,
    /// No data source is wired up yet; the score is pinned at 0.
    NotYetIntegrated,
}

impl PillarStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Integrated => "Integrated",
            Self::NotYetIntegrated => "Not yet integrated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub pillar_label: &'static str,
    pub score: u8,
    pub status: PillarStatus,
}

impl PillarScore {
    pub const fn integrated(pillar: Pillar, score: u8) -> Self {
        Self {
            pillar,
            pillar_label: pillar.label(),
            score,
            status: PillarStatus::Integrated,
        }
    }

    pub const fn not_yet_integrated(pillar: Pillar) -> Self {
        Self {
            pillar,
            pillar_label: pillar.label(),
            score: 0,
            status: PillarStatus::NotYetIntegrated,
        }
    }
}

/// The three pillar scores and their combined 0-100 "Trinity Score".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrinityScore {
    pub overall: u8,
    pub health: PillarScore,
    pub wealth: PillarScore,
    pub relationships: PillarScore,
}

impl TrinityScore {
    pub fn from_health(health: u8) -> Self {
        let health = PillarScore::integrated(Pillar::Health, health);
        let wealth = PillarScore::not_yet_integrated(Pillar::Wealth);
        let relationships = PillarScore::not_yet_integrated(Pillar::Relationships);

        Self {
            overall: overall_score(health.score, wealth.score, relationships.score),
            health,
            wealth,
            relationships,
        }
    }

    pub fn pillars(&self) -> [PillarScore; 3] {
        [self.health, self.wealth, self.relationships]
    }
}

/// Sleep-quality change between the current window and the prior period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepTrend {
    pub current_avg_quality: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_avg_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<i64>,
    pub label: String,
}

impl SleepTrend {
    pub fn compare(current: Option<&SleepAggregate>, previous: Option<&SleepAggregate>) -> Self {
        let current_avg_quality = current.map_or(0.0, |sleep| sleep.avg_quality);
        let previous_avg_quality = previous.map(|sleep| sleep.avg_quality);

        let percent_change = previous_avg_quality
            .filter(|previous| *previous != 0.0)
            .map(|previous| (current_avg_quality - previous) / previous * 100.0)
            .filter(|change| change.is_finite())
            .map(|change| change.round() as i64);

        let label = match percent_change {
            Some(change) => format_trend(change),
            None => "0%".to_string(),
        };

        Self {
            current_avg_quality,
            previous_avg_quality,
            percent_change,
            label,
        }
    }
}

pub fn format_trend(change: i64) -> String {
    if change >= 0 {
        format!("+{change}%")
    } else {
        format!("{change}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sleep(avg_quality: f64, avg_duration: f64) -> SleepAggregate {
        SleepAggregate {
            avg_quality,
            avg_duration,
            sessions: 7,
        }
    }

    fn exercise(total_minutes: f64) -> ExerciseAggregate {
        ExerciseAggregate {
            total_minutes,
            sessions: 3,
        }
    }

    fn mood(avg_mood: f64, avg_stress: f64) -> MoodAggregate {
        MoodAggregate {
            avg_mood,
            avg_stress,
            avg_energy: 5.0,
            check_ins: 4,
        }
    }

    #[test]
    fn no_data_scores_zero() {
        assert_eq!(health_score(None, None, None), 0);
        let trinity = TrinityScore::from_health(0);
        assert_eq!(trinity.overall, 0);
    }

    #[test]
    fn sleep_meeting_target_earns_flat_bonus() {
        assert_eq!(sleep_contribution(&sleep(8.0, 8.0)), 65.0);
        assert_eq!(health_score(Some(&sleep(8.0, 8.0)), None, None), 65);
    }

    #[test]
    fn short_sleep_scales_by_hours() {
        assert_eq!(sleep_contribution(&sleep(6.0, 5.0)), 6.0 * 5.0 + 5.0 * 3.0);
    }

    #[test]
    fn exercise_points_cap_at_thirty_five() {
        assert_eq!(exercise_contribution(&exercise(300.0)), 35.0);
        assert_eq!(exercise_contribution(&exercise(100.0)), 20.0);
    }

    #[test]
    fn health_score_clamps_to_one_hundred() {
        let score = health_score(
            Some(&sleep(10.0, 9.0)),
            Some(&exercise(400.0)),
            Some(&mood(10.0, 1.0)),
        );
        assert_eq!(score, 100);
    }

    #[test]
    fn health_score_floors_negative_mood_at_zero() {
        assert_eq!(health_score(None, None, Some(&mood(1.0, 10.0))), 0);
    }

    #[test]
    fn overall_divides_by_three_regardless_of_integration() {
        let trinity = TrinityScore::from_health(60);
        assert_eq!(trinity.overall, 20);
        assert_eq!(trinity.wealth.status, PillarStatus::NotYetIntegrated);
        assert_eq!(trinity.relationships.score, 0);
        assert_eq!(trinity.health.status, PillarStatus::Integrated);
    }

    #[test]
    fn trend_without_prior_data_is_zero_percent() {
        let trend = SleepTrend::compare(Some(&sleep(7.0, 7.0)), None);
        assert_eq!(trend.label, "0%");
        assert!(trend.percent_change.is_none());

        let trend = SleepTrend::compare(Some(&sleep(7.0, 7.0)), Some(&sleep(0.0, 6.0)));
        assert_eq!(trend.label, "0%");
    }

    #[test]
    fn trend_formats_sign_explicitly() {
        let up = SleepTrend::compare(Some(&sleep(9.0, 7.0)), Some(&sleep(8.0, 7.0)));
        assert_eq!(up.label, "+13%");

        let flat = SleepTrend::compare(Some(&sleep(8.0, 7.0)), Some(&sleep(8.0, 7.0)));
        assert_eq!(flat.label, "+0%");

        let down = SleepTrend::compare(Some(&sleep(4.0, 7.0)), Some(&sleep(8.0, 7.0)));
        assert_eq!(down.label, "-50%");
        assert_eq!(down.percent_change, Some(-50));
    }
}
