//! Goal history ledger model.
//!
//! # Responsibility
//! - Define the per-day goal-completion summary entry.
//! - Provide the single archival operation enforcing the ledger's shape.
//!
//! # Invariants
//! - The ledger is newest-first and never exceeds [`HISTORY_CAP`] entries.
//! - At most one entry exists per date; archival is idempotent.
//! - Entries are derived from daily goals at rollover, never edited
//!   directly.

use crate::model::date_key::DateKey;
use crate::model::goal::Goal;
use serde::{Deserialize, Serialize};

/// Maximum ledger length; the oldest entry is dropped beyond this.
pub const HISTORY_CAP: usize = 60;

/// Completion summary for one archived day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalHistoryEntry {
    pub date: DateKey,
    pub total: u32,
    pub completed: u32,
}

/// Archives one day's daily-goal completion into the ledger.
///
/// No entry is written when the day had no daily goals, or when the ledger
/// already holds an entry for that date (the idempotence guard that makes
/// re-running rollover safe). Returns whether an entry was inserted.
pub fn archive_day(
    history: &mut Vec<GoalHistoryEntry>,
    date: &DateKey,
    daily_goals: &[Goal],
) -> bool {
    if daily_goals.is_empty() {
        return false;
    }
    if history.iter().any(|entry| entry.date == *date) {
        return false;
    }

    let completed = daily_goals.iter().filter(|goal| goal.done).count() as u32;
    history.insert(
        0,
        GoalHistoryEntry {
            date: date.clone(),
            total: daily_goals.len() as u32,
            completed,
        },
    );
    history.truncate(HISTORY_CAP);
    true
}

#[cfg(test)]
mod tests {
    use super::{archive_day, GoalHistoryEntry, HISTORY_CAP};
    use crate::model::date_key::DateKey;
    use crate::model::goal::{Goal, GoalPriority};

    fn goals(done_flags: &[bool]) -> Vec<Goal> {
        done_flags
            .iter()
            .enumerate()
            .map(|(index, done)| {
                let mut goal = Goal::new(format!("goal {index}"), GoalPriority::Medium);
                goal.done = *done;
                goal
            })
            .collect()
    }

    fn key(day: u32) -> DateKey {
        DateKey::parse(&format!("2026-03-{day:02}")).unwrap()
    }

    #[test]
    fn archives_completion_ratio_newest_first() {
        let mut history = vec![GoalHistoryEntry {
            date: key(1),
            total: 1,
            completed: 1,
        }];

        assert!(archive_day(&mut history, &key(2), &goals(&[true, false, true])));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, key(2));
        assert_eq!(history[0].total, 3);
        assert_eq!(history[0].completed, 2);
    }

    #[test]
    fn skips_days_without_daily_goals() {
        let mut history = Vec::new();
        assert!(!archive_day(&mut history, &key(3), &[]));
        assert!(history.is_empty());
    }

    #[test]
    fn duplicate_date_is_not_archived_twice() {
        let mut history = Vec::new();
        assert!(archive_day(&mut history, &key(4), &goals(&[false])));
        assert!(!archive_day(&mut history, &key(4), &goals(&[false])));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn ledger_is_capped_and_drops_oldest() {
        let mut history = Vec::new();
        for day in 0..70u32 {
            let date =
                DateKey::from_date(chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    + chrono::Days::new(u64::from(day)));
            archive_day(&mut history, &date, &goals(&[true]));
        }
        assert_eq!(history.len(), HISTORY_CAP);
        // Newest stays at the front, the earliest archived days are gone.
        assert_eq!(history[0].date.to_string(), "2026-03-11");
        assert!(history
            .iter()
            .all(|entry| entry.date.to_string().as_str() > "2026-01-10"));
    }
}
