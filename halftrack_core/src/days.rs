//! Weekday assignment around the long run.
//!
//! Weekdays are indexed Sunday = 0 through Saturday = 6.

/// Weekdays (other than the long run) that carry the week's runs.
///
/// The day before the long run is only used when the other five days
/// are not enough. Chosen days are spread evenly over the preferred
/// pool. Returns `days_per_week - 1` indices in ascending order.
pub fn assign_other_days(long_run_day: u32, days_per_week: u32) -> Vec<u32> {
    let long_run_day = long_run_day % 7;
    let day_before = (long_run_day + 6) % 7;

    let (fallback, preferred): (Vec<u32>, Vec<u32>) = (0..7)
        .filter(|&d| d != long_run_day)
        .partition(|&d| d == day_before);

    let needed = days_per_week.saturating_sub(1) as usize;
    if needed == 0 {
        return Vec::new();
    }

    let mut days: Vec<u32> = if needed <= preferred.len() {
        let step = preferred.len() as f64 / needed as f64;
        (0..needed)
            .map(|i| {
                let idx = (i as f64 * step + step / 2.0).floor() as usize;
                preferred[idx.min(preferred.len() - 1)]
            })
            .collect()
    } else {
        preferred
            .iter()
            .chain(fallback.iter().take(needed - preferred.len()))
            .copied()
            .collect()
    };

    days.sort_unstable();
    days
}

/// Index into `other_days` of the tempo run.
///
/// Prefers the day whose gap before the long run is closest to three
/// days while leaving at least two. Falls back to the first day.
pub fn choose_tempo_slot(other_days: &[u32], long_run_day: u32) -> usize {
    let mut best = 0;
    let mut best_score = u32::MAX;

    for (i, &day) in other_days.iter().enumerate() {
        let before = (long_run_day % 7 + 7 - day % 7) % 7;
        let score = before.abs_diff(3);
        if before >= 2 && score < best_score {
            best_score = score;
            best = i;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturday_long_run_four_days() {
        assert_eq!(assign_other_days(6, 4), vec![0, 2, 4]);
    }

    #[test]
    fn test_day_before_long_run_avoided() {
        for long in 0..7 {
            let day_before = (long + 6) % 7;
            for dpw in 3..=6 {
                let days = assign_other_days(long, dpw);
                assert!(!days.contains(&day_before), "long={} dpw={}", long, dpw);
            }
        }
    }

    #[test]
    fn test_fallback_day_used_when_needed() {
        let days = assign_other_days(6, 7);
        assert_eq!(days, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_assignment_shape() {
        for long in 0..7 {
            for dpw in 3..=6 {
                let days = assign_other_days(long, dpw);
                assert_eq!(days.len(), (dpw - 1) as usize);
                assert!(!days.contains(&long));
                assert!(days.windows(2).all(|w| w[0] < w[1]), "sorted and distinct");
            }
        }
    }

    #[test]
    fn test_single_day_week_has_no_other_days() {
        assert!(assign_other_days(6, 1).is_empty());
    }

    #[test]
    fn test_tempo_slot_three_days_before_long_run() {
        // Saturday long run: Wednesday sits three days out
        let days = vec![1, 3, 5];
        assert_eq!(choose_tempo_slot(&days, 6), 1);
    }

    #[test]
    fn test_tempo_slot_wraps_week() {
        // Sunday long run: Thursday is three days before
        let days = assign_other_days(0, 4);
        let slot = choose_tempo_slot(&days, 0);
        let before = (7 - days[slot]) % 7;
        assert!(before >= 2);
    }

    #[test]
    fn test_tempo_slot_default() {
        // Only the day before the long run is available
        assert_eq!(choose_tempo_slot(&[5], 6), 0);
        assert_eq!(choose_tempo_slot(&[], 6), 0);
    }
}
