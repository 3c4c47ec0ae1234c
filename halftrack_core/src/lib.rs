#![forbid(unsafe_code)]

//! Core domain model and planning engine for halftrack.
//!
//! This crate provides:
//! - Domain types (profiles, workouts, paces)
//! - Pace model and half-marathon estimates
//! - Week classification and weekday assignment
//! - Plan generation and the workout lifecycle
//! - Adaptive pace recalibration and projections
//! - Persistence, CSV export and configuration

pub mod types;
pub mod error;
pub mod timefmt;
pub mod pace;
pub mod calendar;
pub mod week;
pub mod days;
pub mod generator;
pub mod recalibration;
pub mod plan;
pub mod stats;
pub mod store;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use pace::{calc_paces, estimate_half};
pub use calendar::{calc_start_from_race, calc_total_weeks, current_week};
pub use week::{is_cutback_wfe, is_tempo_wfe, WeekInfo, WeekPhase};
pub use days::{assign_other_days, choose_tempo_slot};
pub use generator::{generate_plan, generate_punishment_plan};
pub use recalibration::{pace_trend, recalc_future_paces, training_projection, PaceTrendPoint};
pub use plan::{CompletionInput, TrainingPlan};
pub use stats::PlanStats;
pub use export::write_workout_log;
