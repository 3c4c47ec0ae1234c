//! Adaptive pacing from logged training runs.
//!
//! Each completed run with a logged pace implies a reference pace
//! (actual pace minus its type's offset). Recent runs are weighted
//! linearly toward the newest and the result re-derives future targets.

use crate::{Paces, Workout, HALF_MARATHON_MILES};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Qualifying runs needed before targets are adjusted
pub const MIN_RECALC_SAMPLES: usize = 3;

/// Most recent runs considered when adjusting targets
pub const RECALC_WINDOW: usize = 8;

/// Qualifying runs needed before projecting a finish time
pub const MIN_PROJECTION_SAMPLES: usize = 5;

/// Most recent runs considered for the projection
pub const PROJECTION_WINDOW: usize = 10;

/// Reference pace implied by a logged run, if it can feed back.
///
/// Only completed runs on or before `today` with a positive pace and an
/// offset-based type count.
fn implied_reference(workout: &Workout, today: NaiveDate) -> Option<f64> {
    if !workout.is_completed() {
        return None;
    }
    if workout.date > today {
        tracing::warn!("Ignoring future-dated completion on {}", workout.date);
        return None;
    }
    let pace = workout.actual_pace.filter(|p| p.is_finite() && *p > 0.0)?;
    let offset = workout.kind.pace_offset()?;
    Some(pace - offset)
}

/// Implied reference paces of qualifying runs, oldest first
fn qualifying_samples(workouts: &[Workout], today: NaiveDate) -> Vec<(NaiveDate, f64)> {
    let mut samples: Vec<_> = workouts
        .iter()
        .filter_map(|w| implied_reference(w, today).map(|r| (w.date, r)))
        .collect();
    samples.sort_by_key(|(date, _)| *date);
    samples
}

/// Linearly weighted mean of the last `window` samples (newest weighs most)
fn weighted_reference(samples: &[(NaiveDate, f64)], window: usize) -> Option<f64> {
    let recent = &samples[samples.len().saturating_sub(window)..];
    if recent.is_empty() {
        return None;
    }

    let (sum, weights) = recent
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, (_, reference))| {
            let weight = (i + 1) as f64;
            (sum + reference * weight, weights + weight)
        });
    Some(sum / weights)
}

/// Reference pace from recent training, once enough runs are logged
pub fn training_reference(workouts: &[Workout], today: NaiveDate) -> Option<f64> {
    let samples = qualifying_samples(workouts, today);
    if samples.len() < MIN_RECALC_SAMPLES {
        return None;
    }
    weighted_reference(&samples, RECALC_WINDOW)
}

/// Re-derive target paces of every pending workout from recent runs.
///
/// Does nothing with fewer than three qualifying runs. Completed and
/// skipped workouts are never touched. New paces are computed in full
/// before any workout is modified. Returns the number of workouts updated.
pub fn recalc_future_paces(workouts: &mut [Workout], today: NaiveDate) -> usize {
    let Some(reference) = training_reference(workouts, today) else {
        tracing::debug!("Not enough logged paces to recalibrate");
        return 0;
    };

    let paces = Paces::from_reference(reference).rounded();
    tracing::info!(
        "Recalibrated reference pace to {:.1} s/mi (easy {}, tempo {}, race {})",
        reference,
        paces.easy,
        paces.tempo,
        paces.race
    );

    let mut updated = 0;
    for workout in workouts.iter_mut().filter(|w| w.is_pending()) {
        workout.estimated_pace = paces.for_type(workout.kind);
        updated += 1;
    }
    updated
}

/// Projected half-marathon finish (seconds) from recent training
pub fn training_projection(workouts: &[Workout], today: NaiveDate) -> Option<f64> {
    let samples = qualifying_samples(workouts, today);
    if samples.len() < MIN_PROJECTION_SAMPLES {
        return None;
    }
    let reference = weighted_reference(&samples, PROJECTION_WINDOW)?;
    Some((reference * Paces::RACE_FACTOR * HALF_MARATHON_MILES).round())
}

/// Mean implied reference pace for one plan week
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct PaceTrendPoint {
    pub week: u32,
    pub reference_pace: f64,
}

/// Weekly implied reference pace, ascending by week
pub fn pace_trend(workouts: &[Workout], today: NaiveDate) -> Vec<PaceTrendPoint> {
    let mut by_week: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for workout in workouts {
        if let Some(reference) = implied_reference(workout, today) {
            by_week.entry(workout.week).or_default().push(reference);
        }
    }

    by_week
        .into_iter()
        .map(|(week, refs)| PaceTrendPoint {
            week,
            reference_pace: (refs.iter().sum::<f64>() / refs.len() as f64).round(),
        })
        .collect()
}
