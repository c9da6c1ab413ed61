//! Tracking use-case service.
//!
//! # Responsibility
//! - Provide the mutation entry points the screens call: goals, sleep,
//!   medication, screen time, reading and focus counters.
//! - Compose every mutation as a partial update through the reconciler;
//!   never bypass the single save path.
//!
//! # Invariants
//! - Updates are built against the latest snapshot under the reconciler's
//!   lock, so rapid-fire calls cannot lose each other's changes.
//! - Goal ids are unique within their list; toggling or removing an
//!   unknown id is reported, not silently ignored.

use crate::model::date_key::DateKey;
use crate::model::goal::{Goal, GoalKind, GoalPriority};
use crate::model::record::{
    FocusCounters, MedicationDose, ReadingLog, ScreenTime, SleepEntry, SleepQuality,
};
use crate::repo::kv_store::{KeyValueStore, StoreError};
use crate::service::day_state::{DayState, Snapshot, SnapshotUpdate};
use crate::service::projector::{self, DailySummary, DayView, MonthOverview};
use chrono::{DateTime, Local};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for tracking use-cases.
#[derive(Debug)]
pub enum TrackerError {
    /// Goal text was empty after trimming.
    EmptyGoalText,
    /// No goal with this id exists in the targeted list.
    GoalNotFound(String),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGoalText => write!(f, "goal text cannot be empty"),
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Facade over [`DayState`] exposed to the UI layer.
pub struct TrackerService<S: KeyValueStore> {
    state: DayState<S>,
}

impl<S: KeyValueStore> TrackerService<S> {
    pub fn new(state: DayState<S>) -> Self {
        Self { state }
    }

    /// Direct access for callers that need the raw reconciler.
    pub fn state(&self) -> &DayState<S> {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn load_day(&self, date: &DateKey) -> DayView {
        self.state.load_day(date)
    }

    pub fn month_overview(&self, year: i32, month: u32) -> MonthOverview {
        self.state.month_overview(year, month)
    }

    pub fn daily_summary(&self) -> DailySummary {
        projector::daily_summary(&self.state.snapshot())
    }

    /// Adds a goal to the daily or fixed list and returns it.
    pub fn add_goal(
        &self,
        text: &str,
        kind: GoalKind,
        priority: GoalPriority,
    ) -> Result<Goal, TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TrackerError::EmptyGoalText);
        }

        let goal = Goal::new(text, priority);
        let created = goal.clone();
        self.state.save_with(move |snapshot| {
            let mut goals = match kind {
                GoalKind::Daily => snapshot.daily_goals.clone(),
                GoalKind::Fixed => snapshot.fixed_goals.clone(),
            };
            goals.push(goal);
            goal_list_update(kind, goals)
        })?;

        Ok(created)
    }

    /// Flips the completion flag of one goal.
    pub fn toggle_goal(&self, id: &str, kind: GoalKind) -> Result<(), TrackerError> {
        let mut found = false;
        self.state.save_with(|snapshot| {
            let mut goals = match kind {
                GoalKind::Daily => snapshot.daily_goals.clone(),
                GoalKind::Fixed => snapshot.fixed_goals.clone(),
            };
            for goal in &mut goals {
                if goal.id == id {
                    goal.done = !goal.done;
                    found = true;
                }
            }
            goal_list_update(kind, goals)
        })?;

        if found {
            Ok(())
        } else {
            Err(TrackerError::GoalNotFound(id.to_string()))
        }
    }

    /// Removes one goal from the daily or fixed list.
    pub fn remove_goal(&self, id: &str, kind: GoalKind) -> Result<(), TrackerError> {
        let mut found = false;
        self.state.save_with(|snapshot| {
            let mut goals = match kind {
                GoalKind::Daily => snapshot.daily_goals.clone(),
                GoalKind::Fixed => snapshot.fixed_goals.clone(),
            };
            let before = goals.len();
            goals.retain(|goal| goal.id != id);
            found = goals.len() != before;
            goal_list_update(kind, goals)
        })?;

        if found {
            Ok(())
        } else {
            Err(TrackerError::GoalNotFound(id.to_string()))
        }
    }

    /// Drops completed goals from the daily list.
    pub fn clear_completed_daily_goals(&self) -> Result<(), TrackerError> {
        self.state.save_with(|snapshot| {
            let mut goals = snapshot.daily_goals.clone();
            goals.retain(|goal| !goal.done);
            SnapshotUpdate {
                daily_goals: Some(goals),
                ..SnapshotUpdate::default()
            }
        })?;
        Ok(())
    }

    /// Prepends a sleep entry for the current day.
    ///
    /// The reconciler enforces the per-day entry cap; pushing beyond it
    /// evicts the oldest entry.
    pub fn record_sleep(
        &self,
        hours: f64,
        quality: SleepQuality,
        notes: impl Into<String>,
    ) -> Result<(), TrackerError> {
        let notes = notes.into();
        self.state.save_with(move |snapshot| {
            let mut entries = Vec::with_capacity(snapshot.sleep_entries.len() + 1);
            entries.push(SleepEntry {
                display_date: snapshot.date.display_date(),
                hours_slept: hours,
                quality,
                notes,
            });
            entries.extend(snapshot.sleep_entries.iter().cloned());
            SnapshotUpdate {
                sleep_entries: Some(entries),
                ..SnapshotUpdate::default()
            }
        })?;
        Ok(())
    }

    /// Records the day's medication dose; a second dose overwrites.
    pub fn record_medication_dose(
        &self,
        taken_at: DateTime<Local>,
    ) -> Result<(), TrackerError> {
        self.state.save(SnapshotUpdate {
            medication_dose: Some(Some(MedicationDose { taken_at })),
            ..SnapshotUpdate::default()
        })?;
        Ok(())
    }

    /// Clears the recorded dose so a new one can be registered.
    pub fn clear_medication_dose(&self) -> Result<(), TrackerError> {
        self.state.save(SnapshotUpdate {
            medication_dose: Some(None),
            ..SnapshotUpdate::default()
        })?;
        Ok(())
    }

    pub fn record_screen_time(&self, hours: u32, minutes: u32) -> Result<(), TrackerError> {
        self.state.save(SnapshotUpdate {
            screen_time: Some(Some(ScreenTime { hours, minutes })),
            ..SnapshotUpdate::default()
        })?;
        Ok(())
    }

    pub fn record_reading(&self, pages: u32) -> Result<(), TrackerError> {
        self.state.save(SnapshotUpdate {
            reading: Some(Some(ReadingLog { pages })),
            ..SnapshotUpdate::default()
        })?;
        Ok(())
    }

    pub fn clear_reading(&self) -> Result<(), TrackerError> {
        self.state.save(SnapshotUpdate {
            reading: Some(None),
            ..SnapshotUpdate::default()
        })?;
        Ok(())
    }

    /// Persists the focus-timer collaborator's cumulative counters.
    pub fn record_focus_progress(&self, counters: FocusCounters) -> Result<(), TrackerError> {
        self.state.save(SnapshotUpdate {
            focus: Some(counters),
            ..SnapshotUpdate::default()
        })?;
        Ok(())
    }
}

fn goal_list_update(kind: GoalKind, goals: Vec<Goal>) -> SnapshotUpdate {
    match kind {
        GoalKind::Daily => SnapshotUpdate {
            daily_goals: Some(goals),
            ..SnapshotUpdate::default()
        },
        GoalKind::Fixed => SnapshotUpdate {
            fixed_goals: Some(goals),
            ..SnapshotUpdate::default()
        },
    }
}
