//! Error types for the halftrack_core library.

use crate::WorkoutStatus;
use chrono::NaiveDate;
use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for halftrack_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plan state file error
    #[error("State error: {0}")]
    State(String),

    /// No workout with the given id
    #[error("Workout not found: {0}")]
    WorkoutNotFound(String),

    /// An id prefix matched more than one workout
    #[error("Workout id prefix '{prefix}' matches {count} workouts")]
    AmbiguousId { prefix: String, count: usize },

    /// Attempted to complete a workout dated after today
    #[error("Cannot complete a workout dated {date} before it happens")]
    FutureCompletion { date: NaiveDate },

    /// Attempted to complete an old workout without confirmation
    #[error("Workout is {days} days old; confirm to log it")]
    StaleCompletion { days: i64 },

    /// Workout status change that the lifecycle does not allow
    #[error("Cannot move workout {id} from {from:?} to {to:?}")]
    InvalidTransition {
        id: Uuid,
        from: WorkoutStatus,
        to: WorkoutStatus,
    },

    /// Rejected workout field values
    #[error("Invalid workout: {0}")]
    InvalidWorkout(String),
}
