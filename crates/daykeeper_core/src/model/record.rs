//! Daily record model.
//!
//! # Responsibility
//! - Define the full set of tracked fields for one calendar day.
//! - Keep the empty-record shape in one place (`DailyRecord::default`),
//!   so absent store entries and fresh days share one definition.
//!
//! # Invariants
//! - `sleep_entries` is most-recent-first and never longer than
//!   [`SLEEP_ENTRY_CAP`] once it has passed through the reconciler.
//! - At most one medication dose exists per day; recording a new dose
//!   replaces the previous one.
//! - `fixed_goals` inside a record is a snapshot taken at save time for
//!   historical display; the live fixed-goal list is a cross-day resource.

use crate::model::date_key::DateKey;
use crate::model::goal::Goal;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sleep entries retained per day; the oldest entry is evicted beyond this.
pub const SLEEP_ENTRY_CAP: usize = 7;

/// Subjective sleep quality attached to a sleep entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

/// One logged night of sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    /// Human-facing date label captured at recording time.
    pub display_date: String,
    pub hours_slept: f64,
    pub quality: SleepQuality,
    pub notes: String,
}

/// The single medication dose tracked for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDose {
    pub taken_at: DateTime<Local>,
}

/// Logged phone screen time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenTime {
    pub hours: u32,
    pub minutes: u32,
}

/// Pages read during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingLog {
    pub pages: u32,
}

/// Cumulative focus-timer counters for one day.
///
/// The timer itself is an external collaborator; only its per-day totals
/// are persisted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCounters {
    pub session_count: u32,
    pub cycle_count: u32,
    pub sessions_in_current_cycle: u32,
    pub focus_minutes_total: u32,
}

/// Everything tracked for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyRecord {
    pub sleep_entries: Vec<SleepEntry>,
    pub medication_dose: Option<MedicationDose>,
    pub daily_goals: Vec<Goal>,
    pub fixed_goals: Vec<Goal>,
    pub screen_time: Option<ScreenTime>,
    pub reading: Option<ReadingLog>,
    pub focus: FocusCounters,
}

/// Looks up the record for `date`, falling back to the empty record.
///
/// Absent map entries are not an error; a day that was never written
/// simply has nothing tracked yet.
pub fn record_or_default(
    records: &BTreeMap<DateKey, DailyRecord>,
    date: &DateKey,
) -> DailyRecord {
    records.get(date).cloned().unwrap_or_default()
}
