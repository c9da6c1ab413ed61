//! In-memory day state and the save reconciler.
//!
//! # Responsibility
//! - Hold the single authoritative snapshot of the current day.
//! - Merge partial updates against the latest snapshot, re-project the
//!   current day's record and perform the durable writes.
//! - Serve read-only projections of historical days.
//!
//! # Invariants
//! - All mutation flows through [`DayState::save_with`]; the merge and
//!   record projection happen under one exclusive lock, so concurrent
//!   saves cannot base themselves on a stale snapshot.
//! - The four persisted keys are written independently; a failed write is
//!   logged and reported but never rolls the in-memory snapshot back.
//! - The snapshot's `date` is fixed at load time and only moves with the
//!   next load's rollover check.

use crate::model::date_key::DateKey;
use crate::model::goal::Goal;
use crate::model::history::GoalHistoryEntry;
use crate::model::record::{
    DailyRecord, FocusCounters, MedicationDose, ReadingLog, ScreenTime, SleepEntry,
    SLEEP_ENTRY_CAP,
};
use crate::repo::kv_store::{KeyValueStore, StoreResult};
use crate::repo::state_repo::StateRepository;
use crate::service::projector::{self, DayView, MonthOverview};
use crate::service::rollover;
use log::error;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// The merged view of the current day plus the cross-day resources.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: DateKey,
    pub sleep_entries: Vec<SleepEntry>,
    pub medication_dose: Option<MedicationDose>,
    pub daily_goals: Vec<Goal>,
    pub fixed_goals: Vec<Goal>,
    pub goal_history: Vec<GoalHistoryEntry>,
    pub screen_time: Option<ScreenTime>,
    pub reading: Option<ReadingLog>,
    pub focus: FocusCounters,
}

/// Partial update merged field-by-field onto the snapshot.
///
/// `None` leaves a field untouched. Optional snapshot fields use a nested
/// `Option` so an update can explicitly clear them (`Some(None)`).
/// The goal history is derived state and deliberately has no slot here.
#[derive(Debug, Clone, Default)]
pub struct SnapshotUpdate {
    pub sleep_entries: Option<Vec<SleepEntry>>,
    pub medication_dose: Option<Option<MedicationDose>>,
    pub daily_goals: Option<Vec<Goal>>,
    pub fixed_goals: Option<Vec<Goal>>,
    pub screen_time: Option<Option<ScreenTime>>,
    pub reading: Option<Option<ReadingLog>>,
    pub focus: Option<FocusCounters>,
}

impl Snapshot {
    fn apply(&mut self, update: SnapshotUpdate) {
        if let Some(mut entries) = update.sleep_entries {
            entries.truncate(SLEEP_ENTRY_CAP);
            self.sleep_entries = entries;
        }
        if let Some(dose) = update.medication_dose {
            self.medication_dose = dose;
        }
        if let Some(goals) = update.daily_goals {
            self.daily_goals = goals;
        }
        if let Some(goals) = update.fixed_goals {
            self.fixed_goals = goals;
        }
        if let Some(screen_time) = update.screen_time {
            self.screen_time = screen_time;
        }
        if let Some(reading) = update.reading {
            self.reading = reading;
        }
        if let Some(focus) = update.focus {
            self.focus = focus;
        }
    }

    /// Projects the day-scoped fields into the persisted record shape.
    ///
    /// The fixed-goal list is snapshotted into the record so historical
    /// views show the set as it stood that day.
    fn project_record(&self) -> DailyRecord {
        DailyRecord {
            sleep_entries: self.sleep_entries.clone(),
            medication_dose: self.medication_dose.clone(),
            daily_goals: self.daily_goals.clone(),
            fixed_goals: self.fixed_goals.clone(),
            screen_time: self.screen_time,
            reading: self.reading,
            focus: self.focus,
        }
    }
}

struct Inner {
    records: BTreeMap<DateKey, DailyRecord>,
    snapshot: Snapshot,
}

/// State holder owning the reconciler and the persisted-state repository.
///
/// Create one per process via [`DayState::load`]; pass it by reference to
/// every consumer instead of sharing snapshots through globals.
pub struct DayState<S: KeyValueStore> {
    repo: StateRepository<S>,
    inner: Mutex<Inner>,
}

impl<S: KeyValueStore> DayState<S> {
    /// Loads persisted state and runs the rollover check for today.
    pub fn load(store: S) -> StoreResult<Self> {
        Self::load_at(store, DateKey::today())
    }

    /// Loads with an explicit current day instead of reading the local
    /// clock.
    pub fn load_at(store: S, today: DateKey) -> StoreResult<Self> {
        let repo = StateRepository::new(store);
        let loaded = rollover::run(&repo, today)?;

        let snapshot = Snapshot {
            date: loaded.today,
            sleep_entries: loaded.today_record.sleep_entries,
            medication_dose: loaded.today_record.medication_dose,
            daily_goals: loaded.today_record.daily_goals,
            fixed_goals: loaded.fixed_goals,
            goal_history: loaded.history,
            screen_time: loaded.today_record.screen_time,
            reading: loaded.today_record.reading,
            focus: loaded.today_record.focus,
        };

        Ok(Self {
            repo,
            inner: Mutex::new(Inner {
                records: loaded.records,
                snapshot,
            }),
        })
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    /// The day writes currently target.
    pub fn current_date(&self) -> DateKey {
        self.lock().snapshot.date.clone()
    }

    /// Merges `update` onto the snapshot and persists the result.
    pub fn save(&self, update: SnapshotUpdate) -> StoreResult<()> {
        self.save_with(move |_| update)
    }

    /// Like [`DayState::save`], but builds the update against the latest
    /// snapshot under the exclusive lock. Read-modify-write sequences must
    /// go through here so they cannot base themselves on a stale read.
    pub fn save_with<F>(&self, build: F) -> StoreResult<()>
    where
        F: FnOnce(&Snapshot) -> SnapshotUpdate,
    {
        let (records, history, fixed_goals, date) = {
            let mut inner = self.lock();
            let update = build(&inner.snapshot);
            inner.snapshot.apply(update);

            let date = inner.snapshot.date.clone();
            let record = inner.snapshot.project_record();
            inner.records.insert(date.clone(), record);

            (
                inner.records.clone(),
                inner.snapshot.goal_history.clone(),
                inner.snapshot.fixed_goals.clone(),
                date,
            )
        };

        // Four independent writes, no cross-key atomicity; rollover's
        // idempotence covers a crash landing between them.
        let mut outcome = Ok(());
        let mut report = |key: &str, result: StoreResult<()>| {
            if let Err(err) = result {
                error!("event=save_write module=service status=error key={key} error={err}");
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        };
        report("daily-records", self.repo.store_daily_records(&records));
        report("goal-history", self.repo.store_goal_history(&history));
        report("fixed-goals", self.repo.store_fixed_goals(&fixed_goals));
        report("last-access-date", self.repo.store_last_access(&date));
        outcome
    }

    /// Read-only projection of any day's record.
    ///
    /// The current day is served from the live snapshot; other days come
    /// from the stored records, with missing dates projecting to an
    /// all-empty view. Loading a day never changes which day writes
    /// target.
    pub fn load_day(&self, date: &DateKey) -> DayView {
        let inner = self.lock();
        if *date == inner.snapshot.date {
            return projector::view_of_record(date.clone(), inner.snapshot.project_record());
        }
        projector::project_day(&inner.records, date)
    }

    /// Per-day summary markers for one calendar month, derived purely
    /// from stored records.
    pub fn month_overview(&self, year: i32, month: u32) -> MonthOverview {
        projector::month_overview(&self.lock().records, year, month)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
