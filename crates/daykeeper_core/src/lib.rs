//! Core domain logic for Daykeeper, a personal ADHD day-tracking app.
//! This crate is the single source of truth for daily-state invariants:
//! rollover at day boundaries, snapshot reconciliation and persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_key::{DateKey, DateKeyError};
pub use model::goal::{
    default_fixed_goals, goal_progress, sort_goals_for_display, Goal, GoalKind, GoalPriority,
    GoalProgress,
};
pub use model::history::{GoalHistoryEntry, HISTORY_CAP};
pub use model::record::{
    record_or_default, DailyRecord, FocusCounters, MedicationDose, ReadingLog, ScreenTime,
    SleepEntry, SleepQuality, SLEEP_ENTRY_CAP,
};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use repo::state_repo::StateRepository;
pub use service::day_state::{DayState, Snapshot, SnapshotUpdate};
pub use service::projector::{DailySummary, DayView, MonthDaySummary, MonthOverview};
pub use service::tracker_service::{TrackerError, TrackerService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
