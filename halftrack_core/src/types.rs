//! Core domain types for the half-marathon planner.
//!
//! - Runner profile (generation input)
//! - Workouts and their lifecycle status
//! - Target pace sets

use crate::timefmt::parse_time_secs;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Half-marathon distance in miles
pub const HALF_MARATHON_MILES: f64 = 13.1;

/// 5K distance in miles
pub const FIVE_K_MILES: f64 = 3.1;

/// 10K distance in miles
pub const TEN_K_MILES: f64 = 6.2;

// ============================================================================
// Workout Types
// ============================================================================

/// Kind of run
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Easy,
    Tempo,
    Long,
    Recovery,
    Race,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Easy,
        WorkoutType::Tempo,
        WorkoutType::Long,
        WorkoutType::Recovery,
        WorkoutType::Race,
    ];

    /// Seconds per mile added to the reference pace for this type.
    ///
    /// Race pace is multiplicative, so races have no additive offset and
    /// never feed back into recalibration.
    pub fn pace_offset(self) -> Option<f64> {
        match self {
            WorkoutType::Easy => Some(90.0),
            WorkoutType::Long => Some(90.0),
            WorkoutType::Tempo => Some(18.0),
            WorkoutType::Recovery => Some(120.0),
            WorkoutType::Race => None,
        }
    }

    /// Default display label
    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Easy => "Easy Run",
            WorkoutType::Tempo => "Tempo Run",
            WorkoutType::Long => "Long Run",
            WorkoutType::Recovery => "Recovery Run",
            WorkoutType::Race => "Race Day",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Easy => "easy",
            WorkoutType::Tempo => "tempo",
            WorkoutType::Long => "long",
            WorkoutType::Recovery => "recovery",
            WorkoutType::Race => "race",
        }
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        WorkoutType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidWorkout(format!("unknown workout type '{}'", s)))
    }
}

/// Lifecycle status of a workout.
///
/// `Scheduled -> Completed | Skipped`, and back to `Scheduled` on undo.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    #[default]
    Scheduled,
    Completed,
    Skipped,
}

/// Logged sub-distances for a tempo workout (miles)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TempoBreakdown {
    pub warmup: Option<f64>,
    pub tempo: Option<f64>,
    pub cooldown: Option<f64>,
}

impl TempoBreakdown {
    pub fn is_empty(&self) -> bool {
        self.warmup.is_none() && self.tempo.is_none() && self.cooldown.is_none()
    }

    /// Total distance when all three segments were logged
    pub fn total(&self) -> Option<f64> {
        match (self.warmup, self.tempo, self.cooldown) {
            (Some(w), Some(t), Some(c)) => Some(round_tenth(w + t + c)),
            _ => None,
        }
    }
}

/// A single scheduled run
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub label: String,
    /// Planned distance in miles
    pub distance: f64,
    /// Target pace in seconds per mile
    pub estimated_pace: f64,
    pub week: u32,
    pub weeks_from_end: u32,
    pub plan_generated: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: WorkoutStatus,
    /// None when the run matched the planned distance
    #[serde(default)]
    pub actual_distance: Option<f64>,
    /// None when the run matched the target pace
    #[serde(default)]
    pub actual_pace: Option<f64>,
    #[serde(default, skip_serializing_if = "TempoBreakdown::is_empty")]
    pub tempo_breakdown: TempoBreakdown,
}

impl Workout {
    /// Create a scheduled, plan-generated workout
    pub fn planned(
        date: NaiveDate,
        kind: WorkoutType,
        label: impl Into<String>,
        distance: f64,
        estimated_pace: f64,
        week: u32,
        weeks_from_end: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            label: label.into(),
            distance,
            estimated_pace,
            week,
            weeks_from_end,
            plan_generated: true,
            notes: String::new(),
            status: WorkoutStatus::Scheduled,
            actual_distance: None,
            actual_pace: None,
            tempo_breakdown: TempoBreakdown::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == WorkoutStatus::Completed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == WorkoutStatus::Skipped
    }

    /// Neither completed nor skipped
    pub fn is_pending(&self) -> bool {
        self.status == WorkoutStatus::Scheduled
    }

    /// Distance actually run, falling back to the plan
    pub fn effective_distance(&self) -> f64 {
        self.actual_distance.unwrap_or(self.distance)
    }

    pub(crate) fn clear_actuals(&mut self) {
        self.actual_distance = None;
        self.actual_pace = None;
        self.tempo_breakdown = TempoBreakdown::default();
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Runner inputs for plan generation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RunnerProfile {
    pub name: String,
    /// 5K personal best as `M:SS` or `H:MM:SS`
    #[serde(default)]
    pub five_k_time: Option<String>,
    /// 10K personal best as `M:SS` or `H:MM:SS`
    #[serde(default)]
    pub ten_k_time: Option<String>,
    pub days_per_week: u8,
    pub long_run_day: Weekday,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub race_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_weeks: Option<u32>,
}

impl RunnerProfile {
    /// Parsed 5K time; malformed strings count as unknown
    pub fn five_k_seconds(&self) -> Option<u32> {
        self.five_k_time.as_deref().and_then(parse_time_secs)
    }

    /// Parsed 10K time; malformed strings count as unknown
    pub fn ten_k_seconds(&self) -> Option<u32> {
        self.ten_k_time.as_deref().and_then(parse_time_secs)
    }

    /// Days per week clamped to the supported 3..=6 range
    pub fn clamped_days_per_week(&self) -> u8 {
        self.days_per_week.clamp(3, 6)
    }

    /// Plan length: explicit override (at most a year) or derived from the dates
    pub fn plan_weeks(&self) -> u32 {
        match self.total_weeks {
            Some(weeks) if weeks > 0 => weeks.min(crate::calendar::MAX_OVERRIDE_WEEKS),
            _ => crate::calendar::calc_total_weeks(self.start_date, self.race_date),
        }
    }

    /// Target paces derived from the profile's race times
    pub fn paces(&self) -> Paces {
        crate::pace::calc_paces(self.five_k_seconds(), self.ten_k_seconds())
    }
}

// ============================================================================
// Paces
// ============================================================================

/// Target paces per workout type, seconds per mile
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Paces {
    pub easy: f64,
    pub tempo: f64,
    pub long: f64,
    pub recovery: f64,
    pub race: f64,
}

impl Paces {
    /// Race pace multiplier over the reference pace
    pub const RACE_FACTOR: f64 = 1.08;

    /// Build every target pace from a single reference pace
    pub fn from_reference(reference: f64) -> Self {
        let offset = |kind: WorkoutType| reference + kind.pace_offset().unwrap_or_default();
        Self {
            easy: offset(WorkoutType::Easy),
            tempo: offset(WorkoutType::Tempo),
            long: offset(WorkoutType::Long),
            recovery: offset(WorkoutType::Recovery),
            race: reference * Self::RACE_FACTOR,
        }
    }

    pub fn for_type(&self, kind: WorkoutType) -> f64 {
        match kind {
            WorkoutType::Easy => self.easy,
            WorkoutType::Tempo => self.tempo,
            WorkoutType::Long => self.long,
            WorkoutType::Recovery => self.recovery,
            WorkoutType::Race => self.race,
        }
    }

    /// Same paces rounded to whole seconds
    pub fn rounded(&self) -> Self {
        Self {
            easy: self.easy.round(),
            tempo: self.tempo.round(),
            long: self.long.round(),
            recovery: self.recovery.round(),
            race: self.race.round(),
        }
    }
}

/// Round to one decimal place (distances)
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest half mile
pub fn round_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_parses_case_insensitively() {
        assert_eq!("Tempo".parse::<WorkoutType>().unwrap(), WorkoutType::Tempo);
        assert_eq!(" long ".parse::<WorkoutType>().unwrap(), WorkoutType::Long);
        assert!("sprint".parse::<WorkoutType>().is_err());
    }

    #[test]
    fn test_race_has_no_offset() {
        assert!(WorkoutType::Race.pace_offset().is_none());
        for kind in [
            WorkoutType::Easy,
            WorkoutType::Tempo,
            WorkoutType::Long,
            WorkoutType::Recovery,
        ] {
            assert!(kind.pace_offset().is_some());
        }
    }

    #[test]
    fn test_tempo_breakdown_total_requires_all_segments() {
        let partial = TempoBreakdown {
            warmup: Some(1.0),
            tempo: Some(3.0),
            cooldown: None,
        };
        assert_eq!(partial.total(), None);

        let full = TempoBreakdown {
            cooldown: Some(1.04),
            ..partial
        };
        assert_eq!(full.total(), Some(5.0));
    }

    #[test]
    fn test_workout_serializes_type_field() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        let workout = Workout::planned(date, WorkoutType::Long, "Long Run", 8.0, 630.0, 1, 12);
        let json = serde_json::to_value(&workout).unwrap();

        assert_eq!(json["type"], "long");
        assert_eq!(json["date"], "2025-01-11");
        assert_eq!(json["status"], "scheduled");
        assert!(json.get("tempo_breakdown").is_none());
    }

    #[test]
    fn test_profile_ignores_malformed_times() {
        let profile = RunnerProfile {
            name: "Sam".into(),
            five_k_time: Some("22:xx".into()),
            ten_k_time: Some("48:30".into()),
            days_per_week: 9,
            long_run_day: Weekday::Sat,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            race_date: None,
            total_weeks: None,
        };

        assert_eq!(profile.five_k_seconds(), None);
        assert_eq!(profile.ten_k_seconds(), Some(2910));
        assert_eq!(profile.clamped_days_per_week(), 6);
        assert_eq!(profile.plan_weeks(), 13);
    }

    #[test]
    fn test_plan_weeks_override_is_bounded() {
        let mut profile = RunnerProfile {
            name: "Sam".into(),
            five_k_time: None,
            ten_k_time: None,
            days_per_week: 4,
            long_run_day: Weekday::Sat,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            race_date: None,
            total_weeks: Some(8),
        };
        assert_eq!(profile.plan_weeks(), 8);

        profile.total_weeks = Some(5_000_000);
        assert_eq!(profile.plan_weeks(), crate::calendar::MAX_OVERRIDE_WEEKS);

        profile.total_weeks = Some(0);
        assert_eq!(profile.plan_weeks(), 13);
    }

    #[test]
    fn test_round_half() {
        assert_eq!(round_half(3.04), 3.0);
        assert_eq!(round_half(3.3), 3.5);
        assert_eq!(round_half(4.76), 5.0);
    }
}
