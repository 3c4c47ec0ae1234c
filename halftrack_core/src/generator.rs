//! Plan generation: profile in, dated workouts out.
//!
//! Each week gets one long run on the preferred weekday and fills the
//! remaining run days with easy, tempo or recovery runs scaled from the
//! long-run distance. The last week holds the race.

use crate::calendar::week_sunday;
use crate::days::{assign_other_days, choose_tempo_slot};
use crate::week::WeekInfo;
use crate::{round_half, Paces, RunnerProfile, Workout, WorkoutType, HALF_MARATHON_MILES};
use chrono::{Datelike, Duration, NaiveDate};

/// Long-run miles by days per week (3..=6), indexed by weeks from the
/// end minus one. Index 0 is the final training week. Plans longer than
/// the table repeat the last entry.
const LONG_FROM_END: [[f64; 16]; 4] = [
    [5.0, 7.0, 9.0, 7.0, 10.0, 11.0, 9.0, 7.0, 5.0, 6.0, 5.0, 4.0, 4.0, 4.0, 4.0, 4.0],
    [7.0, 10.0, 12.0, 11.0, 9.0, 10.0, 9.0, 8.0, 6.0, 7.0, 6.0, 5.0, 5.0, 5.0, 5.0, 4.0],
    [7.0, 11.0, 13.0, 12.0, 9.0, 11.0, 10.0, 9.0, 6.0, 8.0, 7.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [8.0, 12.0, 13.0, 13.0, 10.0, 12.0, 11.0, 10.0, 7.0, 9.0, 8.0, 6.0, 6.0, 6.0, 5.0, 5.0],
];

/// Minimum distance of any non-long training run
const MIN_RUN_MILES: f64 = 3.0;

/// Race-week shakeout distance
const SHAKEOUT_MILES: f64 = 3.0;

/// Maximum shakeout runs before the race
const MAX_SHAKEOUTS: usize = 2;

/// Label given to the generated race workout
pub const RACE_LABEL: &str = "RACE DAY!";

/// Long-run distance for a training week
pub fn long_run_miles(days_per_week: u8, weeks_from_end: u32) -> f64 {
    let row = &LONG_FROM_END[usize::from(days_per_week.clamp(3, 6) - 3)];
    let idx = (weeks_from_end.saturating_sub(1) as usize).min(row.len() - 1);
    row[idx]
}

fn scaled(long_miles: f64, fraction: f64) -> f64 {
    round_half(long_miles * fraction).max(MIN_RUN_MILES)
}

/// Generate the full plan, sorted by date
pub fn generate_plan(profile: &RunnerProfile) -> Vec<Workout> {
    let paces = profile.paces();
    let days_per_week = profile.clamped_days_per_week();
    let long_day = profile.long_run_day.num_days_from_sunday();
    let other_days = assign_other_days(long_day, u32::from(days_per_week));
    let tempo_slot = choose_tempo_slot(&other_days, long_day);
    let total_weeks = profile.plan_weeks();
    let first_sunday = week_sunday(profile.start_date);

    tracing::info!(
        "Generating {}-week plan for {} ({} days/week, long run {})",
        total_weeks,
        profile.name,
        days_per_week,
        profile.long_run_day
    );

    let mut workouts = Vec::new();
    for week in 1..=total_weeks {
        let info = WeekInfo::for_week(week, total_weeks);
        let sunday = first_sunday + Duration::weeks(i64::from(week - 1));
        let on_day = |day: u32| sunday + Duration::days(i64::from(day));

        if info.race {
            let race_date = profile.race_date.unwrap_or_else(|| on_day(long_day));
            push_race_week(&mut workouts, &info, &other_days, &paces, race_date, on_day);
            continue;
        }

        let long_miles = long_run_miles(days_per_week, info.weeks_from_end);
        tracing::debug!(
            "Week {} (wFE {}): {:?}, long run {} mi",
            week,
            info.weeks_from_end,
            info.phase(),
            long_miles
        );

        workouts.push(Workout::planned(
            on_day(long_day),
            WorkoutType::Long,
            WorkoutType::Long.label(),
            long_miles,
            paces.long,
            week,
            info.weeks_from_end,
        ));

        for (i, &day) in other_days.iter().enumerate() {
            let (kind, distance) = if info.tempo && i == tempo_slot {
                (WorkoutType::Tempo, scaled(long_miles, 0.38))
            } else if info.cutback {
                (WorkoutType::Recovery, scaled(long_miles, 0.28))
            } else if i == 0 {
                (WorkoutType::Easy, scaled(long_miles, 0.42))
            } else {
                (WorkoutType::Easy, scaled(long_miles, 0.32))
            };

            workouts.push(Workout::planned(
                on_day(day),
                kind,
                kind.label(),
                distance,
                paces.for_type(kind),
                week,
                info.weeks_from_end,
            ));
        }
    }

    workouts.sort_by_key(|w| w.date);
    tracing::info!("Generated {} workouts", workouts.len());
    workouts
}

fn push_race_week(
    workouts: &mut Vec<Workout>,
    info: &WeekInfo,
    other_days: &[u32],
    paces: &Paces,
    race_date: NaiveDate,
    on_day: impl Fn(u32) -> NaiveDate,
) {
    let race_day = race_date.weekday().num_days_from_sunday();

    for &day in other_days
        .iter()
        .filter(|&&d| d < race_day)
        .take(MAX_SHAKEOUTS)
    {
        workouts.push(Workout::planned(
            on_day(day),
            WorkoutType::Easy,
            WorkoutType::Easy.label(),
            SHAKEOUT_MILES,
            paces.easy,
            info.week,
            0,
        ));
    }

    workouts.push(Workout::planned(
        race_date,
        WorkoutType::Race,
        RACE_LABEL,
        HALF_MARATHON_MILES,
        paces.race,
        info.week,
        0,
    ));
}

// ============================================================================
// Punishment plan
// ============================================================================

/// Raw 5K and 10K paces (s/mi) used by the punishment schedule
fn punishment_base_paces(profile: &RunnerProfile) -> (f64, f64) {
    let five_k_pace = profile
        .five_k_seconds()
        .filter(|&s| s > 0)
        .map_or(crate::pace::DEFAULT_REFERENCE_PACE, |s| {
            f64::from(s) / crate::FIVE_K_MILES
        });
    let ten_k_pace = profile
        .ten_k_seconds()
        .filter(|&s| s > 0)
        .map_or(five_k_pace * 1.06, |s| f64::from(s) / crate::TEN_K_MILES);
    (five_k_pace, ten_k_pace)
}

fn punishment_pace_for(
    kind: WorkoutType,
    weeks_from_end: u32,
    max_wfe: u32,
    five_k_pace: f64,
    ten_k_pace: f64,
) -> f64 {
    // 0 at week 1, 1 at race week
    let t = if max_wfe > 0 {
        f64::from(max_wfe.saturating_sub(weeks_from_end)) / f64::from(max_wfe)
    } else {
        1.0
    };

    let pace = match kind {
        WorkoutType::Easy => five_k_pace * (1.06 - t * 0.06),
        WorkoutType::Recovery => five_k_pace * (1.10 - t * 0.05),
        WorkoutType::Tempo => five_k_pace * (0.95 - t * 0.05),
        WorkoutType::Long => ten_k_pace * (1.00 - t * 0.03),
        WorkoutType::Race => five_k_pace * 0.90,
    };
    pace.round()
}

/// Punishment pace for a single workout in the profile's plan
pub fn punishment_pace(profile: &RunnerProfile, kind: WorkoutType, weeks_from_end: u32) -> f64 {
    let (five_k_pace, ten_k_pace) = punishment_base_paces(profile);
    let max_wfe = profile.plan_weeks().saturating_sub(1);
    punishment_pace_for(kind, weeks_from_end, max_wfe, five_k_pace, ten_k_pace)
}

/// Same schedule as [`generate_plan`], with paces that tighten every week
pub fn generate_punishment_plan(profile: &RunnerProfile) -> Vec<Workout> {
    let mut workouts = generate_plan(profile);
    let (five_k_pace, ten_k_pace) = punishment_base_paces(profile);
    let max_wfe = profile.plan_weeks().saturating_sub(1);

    for workout in &mut workouts {
        workout.estimated_pace = punishment_pace_for(
            workout.kind,
            workout.weeks_from_end,
            max_wfe,
            five_k_pace,
            ten_k_pace,
        );
    }

    tracing::info!("Applied punishment paces to {} workouts", workouts.len());
    workouts
}
