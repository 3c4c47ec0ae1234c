//! Training plan ownership and the workout lifecycle.
//!
//! A `TrainingPlan` owns the profile it was generated from and the
//! date-ordered workout list. All edits go through it so status changes
//! follow the allowed transitions:
//!
//! - `Scheduled -> Completed` (not for future-dated workouts)
//! - `Scheduled -> Skipped`
//! - `Completed -> Scheduled` and `Skipped -> Scheduled` (undo)

use crate::calendar::{plan_total_weeks, week_number_for};
use crate::recalibration::recalc_future_paces;
use crate::{
    generator, round_tenth, Error, Result, RunnerProfile, TempoBreakdown, Workout, WorkoutStatus,
    WorkoutType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completions older than this many days need explicit confirmation
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 7;

/// Results reported for a finished workout
#[derive(Clone, Debug, Default)]
pub struct CompletionInput {
    /// Miles run; None means as planned
    pub actual_distance: Option<f64>,
    /// Seconds per mile; None means on target
    pub actual_pace: Option<f64>,
    /// Tempo segments; all three replace `actual_distance`
    pub tempo: TempoBreakdown,
    /// Accept a completion older than the stale window
    pub confirm_stale: bool,
}

/// A generated plan together with the profile that produced it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub profile: RunnerProfile,
    pub workouts: Vec<Workout>,
    /// Paces follow the tightening punishment schedule instead of feedback
    #[serde(default)]
    pub punishment: bool,
}

fn check_positive(value: Option<f64>, what: &str) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(Error::InvalidWorkout(format!(
            "{} must be a positive number, got {}",
            what, v
        ))),
        _ => Ok(()),
    }
}

impl TrainingPlan {
    /// Generate a fresh plan from a profile
    pub fn generate(profile: RunnerProfile) -> Self {
        let workouts = generator::generate_plan(&profile);
        Self {
            profile,
            workouts,
            punishment: false,
        }
    }

    /// Generate a plan using the progressive punishment paces
    pub fn generate_punishment(profile: RunnerProfile) -> Self {
        let workouts = generator::generate_punishment_plan(&profile);
        Self {
            profile,
            workouts,
            punishment: true,
        }
    }

    pub fn total_weeks(&self) -> u32 {
        plan_total_weeks(&self.workouts)
    }

    /// Target pace for a new or retyped workout in this plan's mode
    pub fn target_pace(&self, kind: WorkoutType, weeks_from_end: u32) -> f64 {
        if self.punishment {
            generator::punishment_pace(&self.profile, kind, weeks_from_end)
        } else {
            self.profile.paces().for_type(kind)
        }
    }

    /// Re-derive pending paces from logged runs; punishment plans keep their schedule
    fn recalibrate(&mut self, today: NaiveDate) {
        if self.punishment {
            tracing::debug!("Punishment plan, keeping scheduled paces");
            return;
        }
        recalc_future_paces(&mut self.workouts, today);
    }

    pub fn get(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Workout> {
        self.workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::WorkoutNotFound(id.to_string()))
    }

    /// Workouts in one plan week, in date order
    pub fn week(&self, week: u32) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(move |w| w.week == week)
    }

    /// Workouts dated on `date`
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(move |w| w.date == date)
    }

    /// Resolve a full id or a unique id prefix
    pub fn resolve_id(&self, prefix: &str) -> Result<Uuid> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(Error::WorkoutNotFound(prefix.to_string()));
        }

        let matches: Vec<Uuid> = self
            .workouts
            .iter()
            .map(|w| w.id)
            .filter(|id| id.to_string().starts_with(&needle))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(Error::WorkoutNotFound(prefix.to_string())),
            _ => Err(Error::AmbiguousId {
                prefix: prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// Mark a workout completed using the default stale window
    pub fn complete(&mut self, id: Uuid, input: &CompletionInput, today: NaiveDate) -> Result<()> {
        self.complete_within(id, input, today, DEFAULT_STALE_AFTER_DAYS)
    }

    /// Mark a workout completed and recalibrate future paces.
    ///
    /// Future-dated workouts are rejected outright; workouts older than
    /// `stale_after_days` need `confirm_stale`.
    pub fn complete_within(
        &mut self,
        id: Uuid,
        input: &CompletionInput,
        today: NaiveDate,
        stale_after_days: i64,
    ) -> Result<()> {
        validate_input(input)?;
        let workout = self.get_mut(id)?;

        if workout.date > today {
            return Err(Error::FutureCompletion { date: workout.date });
        }
        if workout.status != WorkoutStatus::Scheduled {
            return Err(Error::InvalidTransition {
                id,
                from: workout.status,
                to: WorkoutStatus::Completed,
            });
        }
        let age = (today - workout.date).num_days();
        if age > stale_after_days && !input.confirm_stale {
            return Err(Error::StaleCompletion { days: age });
        }

        workout.status = WorkoutStatus::Completed;
        apply_actuals(workout, input);
        tracing::info!("Completed {} on {}", workout.label, workout.date);

        self.recalibrate(today);
        Ok(())
    }

    /// Edit the logged results of a completed workout
    pub fn update_actuals(
        &mut self,
        id: Uuid,
        input: &CompletionInput,
        today: NaiveDate,
    ) -> Result<()> {
        validate_input(input)?;
        let workout = self.get_mut(id)?;
        if !workout.is_completed() {
            return Err(Error::InvalidWorkout(format!(
                "workout {} has no results to update",
                id
            )));
        }

        apply_actuals(workout, input);
        self.recalibrate(today);
        Ok(())
    }

    /// Undo a completion, discarding its results
    pub fn uncomplete(&mut self, id: Uuid) -> Result<()> {
        let workout = self.get_mut(id)?;
        transition(workout, WorkoutStatus::Completed, WorkoutStatus::Scheduled)?;
        workout.clear_actuals();
        Ok(())
    }

    pub fn skip(&mut self, id: Uuid) -> Result<()> {
        let workout = self.get_mut(id)?;
        transition(workout, WorkoutStatus::Scheduled, WorkoutStatus::Skipped)?;
        workout.clear_actuals();
        Ok(())
    }

    pub fn unskip(&mut self, id: Uuid) -> Result<()> {
        let workout = self.get_mut(id)?;
        transition(workout, WorkoutStatus::Skipped, WorkoutStatus::Scheduled)
    }

    /// Change a workout's type, resetting its label and target pace
    pub fn retype(&mut self, id: Uuid, kind: WorkoutType) -> Result<()> {
        let weeks_from_end = self.get_mut(id)?.weeks_from_end;
        let pace = self.target_pace(kind, weeks_from_end);
        let workout = self.get_mut(id)?;
        if workout.kind == kind {
            return Ok(());
        }
        workout.kind = kind;
        workout.label = kind.label().to_string();
        workout.estimated_pace = pace;
        if kind != WorkoutType::Tempo {
            workout.tempo_breakdown = TempoBreakdown::default();
        }
        Ok(())
    }

    /// Reschedule a workout to another day.
    ///
    /// A completed workout cannot move past `today`.
    pub fn move_to(&mut self, id: Uuid, date: NaiveDate, today: NaiveDate) -> Result<()> {
        let workout = self.get_mut(id)?;
        if workout.date == date {
            return Ok(());
        }
        if workout.is_completed() && date > today {
            return Err(Error::FutureCompletion { date });
        }
        tracing::debug!("Moving {} from {} to {}", workout.label, workout.date, date);
        workout.date = date;
        self.sort();
        Ok(())
    }

    pub fn set_notes(&mut self, id: Uuid, notes: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.notes = notes.into();
        Ok(())
    }

    /// Add a user-created workout and return its id
    pub fn add_workout(
        &mut self,
        date: NaiveDate,
        kind: WorkoutType,
        distance: f64,
        notes: impl Into<String>,
    ) -> Result<Uuid> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(Error::InvalidWorkout("enter a distance greater than zero".into()));
        }

        let week = week_number_for(self.profile.start_date, date);
        let weeks_from_end = self.total_weeks().saturating_sub(week);
        let mut workout = Workout::planned(
            date,
            kind,
            kind.label(),
            round_tenth(distance),
            self.target_pace(kind, weeks_from_end),
            week,
            weeks_from_end,
        );
        workout.plan_generated = false;
        workout.notes = notes.into();

        let id = workout.id;
        self.workouts.push(workout);
        self.sort();
        tracing::info!("Added {} on {} (week {})", kind.label(), date, week);
        Ok(id)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Workout> {
        let idx = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| Error::WorkoutNotFound(id.to_string()))?;
        Ok(self.workouts.remove(idx))
    }

    fn sort(&mut self) {
        self.workouts.sort_by_key(|w| w.date);
    }
}

fn transition(workout: &mut Workout, from: WorkoutStatus, to: WorkoutStatus) -> Result<()> {
    if workout.status != from {
        return Err(Error::InvalidTransition {
            id: workout.id,
            from: workout.status,
            to,
        });
    }
    workout.status = to;
    Ok(())
}

fn validate_input(input: &CompletionInput) -> Result<()> {
    check_positive(input.actual_distance, "actual distance")?;
    check_positive(input.actual_pace, "actual pace")?;
    check_positive(input.tempo.warmup, "warm-up distance")?;
    check_positive(input.tempo.tempo, "tempo distance")?;
    check_positive(input.tempo.cooldown, "cool-down distance")
}

/// Store results, keeping None where they match the plan
fn apply_actuals(workout: &mut Workout, input: &CompletionInput) {
    let mut distance = input.actual_distance.unwrap_or(workout.distance);

    if workout.kind == WorkoutType::Tempo {
        workout.tempo_breakdown = input.tempo;
        if let Some(total) = input.tempo.total() {
            distance = total;
        }
    }

    workout.actual_distance = (distance != workout.distance).then_some(distance);
    workout.actual_pace = input
        .actual_pace
        .filter(|&pace| pace != workout.estimated_pace);
}
