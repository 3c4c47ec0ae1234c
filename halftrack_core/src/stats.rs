//! Plan-wide progress summary.

use crate::pace::estimate_half;
use crate::recalibration::training_projection;
use crate::{RunnerProfile, Workout};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Planned and logged miles for one week
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct WeekVolume {
    pub planned: f64,
    pub completed: f64,
    pub skipped: f64,
}

/// Summary numbers for a plan
#[derive(Clone, Debug, Serialize)]
pub struct PlanStats {
    pub total: usize,
    pub completed: usize,
    pub skipped: usize,
    pub upcoming: usize,
    pub miles_completed: f64,
    pub miles_planned: f64,
    /// Consecutive days with a completed run, ending today
    pub streak: u32,
    pub weeks: BTreeMap<u32, WeekVolume>,
    /// Half-marathon estimate from the profile's race times
    pub half_estimate: Option<f64>,
    /// Half-marathon projection from logged training
    pub training_projection: Option<f64>,
}

impl PlanStats {
    pub fn compute(workouts: &[Workout], profile: &RunnerProfile, today: NaiveDate) -> Self {
        let completed: Vec<&Workout> = workouts.iter().filter(|w| w.is_completed()).collect();

        let mut weeks: BTreeMap<u32, WeekVolume> = BTreeMap::new();
        for w in workouts {
            let volume = weeks.entry(w.week).or_default();
            volume.planned += w.distance;
            if w.is_completed() {
                volume.completed += w.distance;
            }
            if w.is_skipped() {
                volume.skipped += w.distance;
            }
        }

        Self {
            total: workouts.len(),
            completed: completed.len(),
            skipped: workouts.iter().filter(|w| w.is_skipped()).count(),
            upcoming: workouts.iter().filter(|w| w.is_pending()).count(),
            miles_completed: completed.iter().map(|w| w.effective_distance()).sum(),
            miles_planned: workouts.iter().map(|w| w.distance).sum(),
            streak: streak(&completed, today),
            weeks,
            half_estimate: estimate_half(profile.five_k_seconds(), profile.ten_k_seconds()),
            training_projection: training_projection(workouts, today),
        }
    }
}

fn streak(completed: &[&Workout], today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = completed.iter().map(|w| w.date).collect();
    let mut day = today;
    let mut count = 0;
    while dates.contains(&day) && count < 365 {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TrainingPlan, WorkoutStatus};
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn test_plan() -> TrainingPlan {
        TrainingPlan::generate(RunnerProfile {
            name: "Stats".into(),
            five_k_time: Some("22:00".into()),
            ten_k_time: None,
            days_per_week: 3,
            long_run_day: Weekday::Sun,
            start_date: date("2025-03-02"),
            race_date: Some(date("2025-05-25")),
            total_weeks: None,
        })
    }

    #[test]
    fn test_counts_add_up() {
        let mut plan = test_plan();
        plan.workouts[0].status = WorkoutStatus::Completed;
        plan.workouts[0].actual_distance = Some(10.0);
        plan.workouts[1].status = WorkoutStatus::Skipped;

        let stats = PlanStats::compute(&plan.workouts, &plan.profile, date("2025-03-10"));
        assert_eq!(stats.total, plan.workouts.len());
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.upcoming, stats.total - 2);
        assert_eq!(stats.miles_completed, 10.0);

        let planned: f64 = stats.weeks.values().map(|v| v.planned).sum();
        assert!((planned - stats.miles_planned).abs() < 1e-9);
        assert_eq!(stats.weeks.len() as u32, plan.total_weeks());
        assert!(stats.half_estimate.is_some());
        assert_eq!(stats.training_projection, None);
    }

    #[test]
    fn test_streak_ends_today() {
        let mut plan = test_plan();
        let today = date("2025-03-20");
        for (i, days_ago) in [0, 1, 2, 4].iter().enumerate() {
            plan.workouts[i].date = today - Duration::days(*days_ago);
            plan.workouts[i].status = WorkoutStatus::Completed;
        }

        let stats = PlanStats::compute(&plan.workouts, &plan.profile, today);
        assert_eq!(stats.streak, 3);

        let stats = PlanStats::compute(&plan.workouts, &plan.profile, today + Duration::days(1));
        assert_eq!(stats.streak, 0);
    }
}
