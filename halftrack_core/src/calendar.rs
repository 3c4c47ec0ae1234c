//! Calendar arithmetic on timezone-naive days.
//!
//! Weeks run Sunday through Saturday. Nothing here fails: missing or
//! inverted dates fall back to defaults and clamps.

use crate::Workout;
use chrono::{Datelike, Duration, NaiveDate};

/// Plan length used when no race date is known
pub const DEFAULT_TOTAL_WEEKS: u32 = 13;

/// Shortest supported plan
pub const MIN_TOTAL_WEEKS: u32 = 5;

/// Longest supported plan
pub const MAX_TOTAL_WEEKS: u32 = 20;

/// Upper bound on an explicit plan length
pub const MAX_OVERRIDE_WEEKS: u32 = 52;

/// Days between a race-week Sunday and the default plan start
const DEFAULT_LEAD_DAYS: i64 = 84;

/// Sunday that starts the week containing `date`
pub fn week_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Signed number of whole weeks between the weeks containing two dates
fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (week_sunday(to) - week_sunday(from)).num_days() / 7
}

/// Number of plan weeks, race week included, clamped to 5..=20
pub fn calc_total_weeks(start: NaiveDate, race: Option<NaiveDate>) -> u32 {
    let Some(race) = race else {
        return DEFAULT_TOTAL_WEEKS;
    };
    let weeks = weeks_between(start, race) + 1;
    weeks.clamp(i64::from(MIN_TOTAL_WEEKS), i64::from(MAX_TOTAL_WEEKS)) as u32
}

/// Default plan start: twelve weeks before the race-week Sunday
pub fn calc_start_from_race(race: NaiveDate) -> NaiveDate {
    week_sunday(race) - Duration::days(DEFAULT_LEAD_DAYS)
}

/// 1-indexed plan week for a date; dates before the plan map to week 1
pub fn week_number_for(start: NaiveDate, date: NaiveDate) -> u32 {
    (weeks_between(start, date) + 1).max(1) as u32
}

/// Week the runner is currently in.
///
/// The week of the earliest pending workout on or after `today`; once
/// everything is behind, the last workout's week.
pub fn current_week(workouts: &[Workout], today: NaiveDate) -> u32 {
    let upcoming = workouts
        .iter()
        .filter(|w| w.is_pending() && w.date >= today)
        .min_by_key(|w| w.date);

    match upcoming {
        Some(w) => w.week,
        None => workouts.iter().max_by_key(|w| w.date).map_or(1, |w| w.week),
    }
}

/// Highest week number in the plan
pub fn plan_total_weeks(workouts: &[Workout]) -> u32 {
    workouts
        .iter()
        .map(|w| w.week)
        .max()
        .unwrap_or(DEFAULT_TOTAL_WEEKS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkoutType;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_sunday() {
        assert_eq!(week_sunday(date("2025-01-06")), date("2025-01-05"));
        assert_eq!(week_sunday(date("2025-01-05")), date("2025-01-05"));
        assert_eq!(week_sunday(date("2025-01-11")), date("2025-01-05"));
    }

    #[test]
    fn test_no_race_date_defaults_to_13() {
        assert_eq!(calc_total_weeks(date("2025-01-01"), None), 13);
        assert_eq!(calc_total_weeks(date("2031-07-19"), None), 13);
    }

    #[test]
    fn test_total_weeks_clamps() {
        assert_eq!(calc_total_weeks(date("2025-06-15"), Some(date("2025-06-22"))), 5);
        assert_eq!(calc_total_weeks(date("2025-01-01"), Some(date("2026-12-01"))), 20);
        // Race before start
        assert_eq!(calc_total_weeks(date("2025-06-15"), Some(date("2025-01-01"))), 5);
    }

    #[test]
    fn test_total_weeks_counts_race_week() {
        assert_eq!(calc_total_weeks(date("2025-01-06"), Some(date("2025-04-06"))), 14);
        assert_eq!(calc_total_weeks(date("2025-01-05"), Some(date("2025-04-05"))), 13);
    }

    #[test]
    fn test_start_from_race_is_sunday_twelve_weeks_out() {
        let start = calc_start_from_race(date("2025-04-12"));
        assert_eq!(start, date("2025-01-12"));
        assert_eq!(start.weekday(), chrono::Weekday::Sun);
        assert_eq!(calc_total_weeks(start, Some(date("2025-04-12"))), 13);
    }

    #[test]
    fn test_week_number_for() {
        let start = date("2025-01-06");
        assert_eq!(week_number_for(start, date("2025-01-05")), 1);
        assert_eq!(week_number_for(start, date("2025-01-12")), 2);
        assert_eq!(week_number_for(start, date("2024-12-01")), 1);
    }

    #[test]
    fn test_current_week() {
        let mut first = Workout::planned(date("2025-01-07"), WorkoutType::Easy, "Easy Run", 3.0, 600.0, 1, 1);
        let second = Workout::planned(date("2025-01-14"), WorkoutType::Easy, "Easy Run", 3.0, 600.0, 2, 0);
        assert_eq!(current_week(&[], date("2025-01-07")), 1);

        first.status = crate::WorkoutStatus::Completed;
        let plan = vec![first, second];
        assert_eq!(current_week(&plan, date("2025-01-08")), 2);
        assert_eq!(current_week(&plan, date("2025-03-01")), 2);
    }
}
