//! Day rollover engine.
//!
//! # Responsibility
//! - Detect a day-boundary crossing since the last persisted access and
//!   run the archival/reset transition exactly once per load.
//! - Assemble the initial state every other service reads from.
//!
//! # Invariants
//! - Archival is idempotent: the ledger's per-date guard makes re-running
//!   the transition with a stale last-access key a no-op.
//! - Fixed-goal composition is preserved across the transition; only the
//!   `done` flags clear.
//! - The reset fixed-goal list is persisted before the load completes;
//!   the last-access key itself is only advanced by the next save.

use crate::model::date_key::DateKey;
use crate::model::goal::{default_fixed_goals, Goal};
use crate::model::history::{archive_day, GoalHistoryEntry};
use crate::model::record::{record_or_default, DailyRecord};
use crate::repo::kv_store::{KeyValueStore, StoreResult};
use crate::repo::state_repo::StateRepository;
use log::info;
use std::collections::BTreeMap;

/// Everything the rollover run resolves for the process lifetime.
pub struct LoadedState {
    pub today: DateKey,
    pub records: BTreeMap<DateKey, DailyRecord>,
    pub history: Vec<GoalHistoryEntry>,
    pub fixed_goals: Vec<Goal>,
    pub today_record: DailyRecord,
}

/// Runs the rollover transition against persisted state.
///
/// Any inequality between the stored last-access key and `today` takes the
/// archival/reset path, including a clock moved backward; the engine does
/// not distinguish direction.
///
/// # Errors
/// Only the immediate fixed-goal persist can fail; reads degrade to
/// defaults inside the repository layer.
pub fn run<S: KeyValueStore>(
    repo: &StateRepository<S>,
    today: DateKey,
) -> StoreResult<LoadedState> {
    let records = repo.load_daily_records();
    let mut history = repo.load_goal_history();
    let last_access = repo.load_last_access();
    let persisted_fixed = repo.load_fixed_goals();

    let mut fixed_goals = persisted_fixed.clone().unwrap_or_else(default_fixed_goals);
    // First run: seed the default set durably even without a day change.
    let mut fixed_dirty = persisted_fixed.is_none();
    let mut archived = false;

    let day_changed = matches!(&last_access, Some(last) if *last != today);

    if let Some(last) = last_access.filter(|last| *last != today) {
        let previous = record_or_default(&records, &last);
        archived = archive_day(&mut history, &last, &previous.daily_goals);

        for goal in &mut fixed_goals {
            goal.done = false;
        }
        fixed_dirty = true;
    }

    if fixed_dirty {
        repo.store_fixed_goals(&fixed_goals)?;
    }

    let today_record = record_or_default(&records, &today);

    info!(
        "event=rollover module=service status=ok today={today} day_changed={day_changed} archived={archived} history_len={} fixed_goals={}",
        history.len(),
        fixed_goals.len()
    );

    Ok(LoadedState {
        today,
        records,
        history,
        fixed_goals,
        today_record,
    })
}
