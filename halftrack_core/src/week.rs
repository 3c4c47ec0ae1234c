//! Week classification by distance from race week.
//!
//! `weeks_from_end` (wFE) counts down to the race: 0 is race week,
//! 1 the last training week, and so on.

use serde::Serialize;

/// Reduced-volume recovery week
pub fn is_cutback_wfe(weeks_from_end: u32) -> bool {
    weeks_from_end == 2
        || weeks_from_end == 5
        || (weeks_from_end >= 9 && (weeks_from_end - 9) % 4 == 0)
}

/// Week that carries one tempo run. Never true for a cutback week.
pub fn is_tempo_wfe(weeks_from_end: u32) -> bool {
    if weeks_from_end <= 3 || is_cutback_wfe(weeks_from_end) {
        return false;
    }
    if matches!(weeks_from_end, 4 | 6 | 8 | 11) {
        return true;
    }
    weeks_from_end >= 12 && weeks_from_end % 3 == 2
}

/// Training phase of a week
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeekPhase {
    Race,
    Taper,
    Cutback,
    Tempo,
    Standard,
}

/// Derived classification for one plan week
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct WeekInfo {
    pub week: u32,
    pub weeks_from_end: u32,
    pub race: bool,
    pub cutback: bool,
    pub tempo: bool,
}

impl WeekInfo {
    /// Classify week `week` (1-indexed) of a `total_weeks` plan
    pub fn for_week(week: u32, total_weeks: u32) -> Self {
        let weeks_from_end = total_weeks.saturating_sub(week);
        let race = week >= total_weeks;
        let cutback = !race && is_cutback_wfe(weeks_from_end);
        let tempo = !race && !cutback && is_tempo_wfe(weeks_from_end);

        Self {
            week,
            weeks_from_end,
            race,
            cutback,
            tempo,
        }
    }

    /// Phase label; taper wins over cutback in the last two training weeks
    pub fn phase(&self) -> WeekPhase {
        if self.race {
            WeekPhase::Race
        } else if self.weeks_from_end <= 2 {
            WeekPhase::Taper
        } else if self.cutback {
            WeekPhase::Cutback
        } else if self.tempo {
            WeekPhase::Tempo
        } else {
            WeekPhase::Standard
        }
    }
}
