//! CSV export of the workout log.

use crate::{Result, Workout, WorkoutStatus};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: String,
    date: String,
    week: u32,
    weeks_from_end: u32,
    #[serde(rename = "type")]
    kind: &'static str,
    label: &'a str,
    status: &'static str,
    distance: f64,
    actual_distance: Option<f64>,
    estimated_pace: u32,
    actual_pace: Option<u32>,
    warmup: Option<f64>,
    tempo: Option<f64>,
    cooldown: Option<f64>,
    plan_generated: bool,
    notes: &'a str,
}

impl<'a> From<&'a Workout> for CsvRow<'a> {
    fn from(w: &'a Workout) -> Self {
        CsvRow {
            id: w.id.to_string(),
            date: w.date.to_string(),
            week: w.week,
            weeks_from_end: w.weeks_from_end,
            kind: w.kind.as_str(),
            label: &w.label,
            status: match w.status {
                WorkoutStatus::Scheduled => "scheduled",
                WorkoutStatus::Completed => "completed",
                WorkoutStatus::Skipped => "skipped",
            },
            distance: w.distance,
            actual_distance: w.actual_distance,
            estimated_pace: w.estimated_pace.round() as u32,
            actual_pace: w.actual_pace.map(|p| p.round() as u32),
            warmup: w.tempo_breakdown.warmup,
            tempo: w.tempo_breakdown.tempo,
            cooldown: w.tempo_breakdown.cooldown,
            plan_generated: w.plan_generated,
            notes: &w.notes,
        }
    }
}

/// Write every workout to `path` as CSV, replacing any existing file.
///
/// Returns the number of rows written.
pub fn write_workout_log(workouts: &[Workout], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for workout in workouts {
        writer.serialize(CsvRow::from(workout))?;
    }
    writer.flush()?;

    tracing::info!("Exported {} workouts to {:?}", workouts.len(), path);
    Ok(workouts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkoutType;
    use chrono::NaiveDate;

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("log").join("workouts.csv");

        let date = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        let mut done = Workout::planned(date, WorkoutType::Long, "Long Run", 8.0, 629.6, 1, 12);
        done.status = WorkoutStatus::Completed;
        done.actual_pace = Some(601.0);
        let pending = Workout::planned(date, WorkoutType::Easy, "Easy Run", 4.0, 629.6, 1, 12);

        let count = write_workout_log(&[done, pending], &path).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,date,week,weeks_from_end,type,label,status"));
        assert!(lines[1].contains("2025-01-11"));
        assert!(lines[1].contains(",long,Long Run,completed,"));
        assert!(lines[1].contains(",630,601,"));
        assert!(lines[2].contains(",easy,Easy Run,scheduled,"));
    }

    #[test]
    fn test_export_empty_plan() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.csv");

        assert_eq!(write_workout_log(&[], &path).unwrap(), 0);
        assert!(path.exists());
    }
}
