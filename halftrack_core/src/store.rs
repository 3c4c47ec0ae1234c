//! Plan persistence with file locking.
//!
//! The whole plan (profile + workouts) is one JSON document. Reads take a
//! shared lock; writes go to a locked temp file that is renamed over the
//! existing file, so readers never see a partial plan.

use crate::{Error, Result, TrainingPlan};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// File name of the plan inside the data directory
pub const PLAN_FILE: &str = "plan.json";

impl TrainingPlan {
    /// Load a plan, or `None` if none has been saved yet
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No plan file at {:?}", path);
            return Ok(None);
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let plan = serde_json::from_str::<TrainingPlan>(&contents).map_err(|e| {
            Error::State(format!("Failed to parse plan file {:?}: {}", path, e))
        })?;

        tracing::debug!("Loaded {} workouts from {:?}", plan.workouts.len(), path);
        Ok(Some(plan))
    }

    /// Load a plan that must already exist
    pub fn load_existing(path: &Path) -> Result<Self> {
        Self::load(path)?.ok_or_else(|| {
            Error::State(format!("No plan found at {:?}; run `halftrack init` first", path))
        })
    }

    /// Save atomically: temp file, fsync, rename
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "plan path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} workouts to {:?}", self.workouts.len(), path);
        Ok(())
    }

    /// Load, modify and save back; nothing is written if `f` fails
    pub fn update<F, T>(path: &Path, f: F) -> Result<(Self, T)>
    where
        F: FnOnce(&mut TrainingPlan) -> Result<T>,
    {
        let mut plan = Self::load_existing(path)?;
        let value = f(&mut plan)?;
        plan.save(path)?;
        Ok((plan, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RunnerProfile, WorkoutType};
    use chrono::{NaiveDate, Weekday};

    fn test_plan() -> TrainingPlan {
        TrainingPlan::generate(RunnerProfile {
            name: "Store".into(),
            five_k_time: None,
            ten_k_time: Some("50:00".into()),
            days_per_week: 5,
            long_run_day: Weekday::Sun,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
            race_date: Some(NaiveDate::from_ymd_opt(2025, 5, 4).unwrap()),
            total_weeks: None,
        })
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(PLAN_FILE);

        let plan = test_plan();
        plan.save(&path).unwrap();

        let loaded = TrainingPlan::load(&path).unwrap().unwrap();
        assert_eq!(loaded.profile, plan.profile);
        assert_eq!(loaded.workouts.len(), plan.workouts.len());
        for (a, b) in loaded.workouts.iter().zip(&plan.workouts) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.date, b.date);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.distance, b.distance);
            assert!((a.estimated_pace - b.estimated_pace).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nope.json");

        assert!(TrainingPlan::load(&path).unwrap().is_none());
        assert!(matches!(
            TrainingPlan::load_existing(&path),
            Err(Error::State(_))
        ));
    }

    #[test]
    fn test_corrupted_plan_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(PLAN_FILE);
        std::fs::write(&path, "{ invalid json }").unwrap();

        assert!(matches!(TrainingPlan::load(&path), Err(Error::State(_))));
    }

    #[test]
    fn test_update_saves_only_on_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(PLAN_FILE);
        let plan = test_plan();
        plan.save(&path).unwrap();
        let id = plan.workouts.iter().find(|w| w.kind == WorkoutType::Easy).unwrap().id;

        let result = TrainingPlan::update(&path, |p| {
            p.skip(id)?;
            p.skip(id)
        });
        assert!(result.is_err());
        let reloaded = TrainingPlan::load_existing(&path).unwrap();
        assert!(reloaded.get(id).unwrap().is_pending());

        TrainingPlan::update(&path, |p| p.skip(id)).unwrap();
        let reloaded = TrainingPlan::load_existing(&path).unwrap();
        assert!(reloaded.get(id).unwrap().is_skipped());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(PLAN_FILE);

        test_plan().save(&path).unwrap();
        test_plan().save(&path).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != PLAN_FILE)
            .collect();
        assert!(extras.is_empty(), "unexpected files: {:?}", extras);
    }
}
