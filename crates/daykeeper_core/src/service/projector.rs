//! Read-only projections over stored daily records.
//!
//! # Responsibility
//! - Project any day's record into a display view without mutating state.
//! - Derive the monthly overview and the current-day summary.
//!
//! # Invariants
//! - Projections are pure functions of their inputs.
//! - Missing records project to the all-empty view, never an error.

use crate::model::date_key::DateKey;
use crate::model::goal::{goal_progress, Goal, GoalProgress};
use crate::model::record::{
    record_or_default, DailyRecord, FocusCounters, MedicationDose, ReadingLog, ScreenTime,
    SleepEntry,
};
use crate::service::day_state::Snapshot;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Display projection of one day's record.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: DateKey,
    pub sleep_entries: Vec<SleepEntry>,
    pub medication_dose: Option<MedicationDose>,
    pub daily_goals: Vec<Goal>,
    pub fixed_goals: Vec<Goal>,
    pub screen_time: Option<ScreenTime>,
    pub reading: Option<ReadingLog>,
    pub focus: FocusCounters,
}

/// Builds the view for `date` from the stored records.
pub fn project_day(records: &BTreeMap<DateKey, DailyRecord>, date: &DateKey) -> DayView {
    view_of_record(date.clone(), record_or_default(records, date))
}

pub(crate) fn view_of_record(date: DateKey, record: DailyRecord) -> DayView {
    DayView {
        date,
        sleep_entries: record.sleep_entries,
        medication_dose: record.medication_dose,
        daily_goals: record.daily_goals,
        fixed_goals: record.fixed_goals,
        screen_time: record.screen_time,
        reading: record.reading,
        focus: record.focus,
    }
}

/// Calendar-day marker row for the monthly overview.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDaySummary {
    pub date: DateKey,
    /// Whether any record exists for the day at all.
    pub recorded: bool,
    /// Hours of the most recent sleep entry, when one exists.
    pub sleep_hours: Option<f64>,
    pub focus_minutes: u32,
    pub screen_time: Option<ScreenTime>,
}

/// One month of per-day markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub days: Vec<MonthDaySummary>,
}

/// Derives the monthly overview for `year`/`month`.
///
/// An invalid month yields an empty day list rather than an error.
pub fn month_overview(
    records: &BTreeMap<DateKey, DailyRecord>,
    year: i32,
    month: u32,
) -> MonthOverview {
    let mut days = Vec::new();
    let mut day = 1;
    while let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        let key = DateKey::from_date(date);
        let record = records.get(&key);
        days.push(MonthDaySummary {
            recorded: record.is_some(),
            sleep_hours: record
                .and_then(|r| r.sleep_entries.first())
                .map(|entry| entry.hours_slept),
            focus_minutes: record.map_or(0, |r| r.focus.focus_minutes_total),
            screen_time: record.and_then(|r| r.screen_time),
            date: key,
        });
        day += 1;
    }

    MonthOverview { year, month, days }
}

/// End-of-day report card over the live snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: DateKey,
    pub goals: GoalProgress,
    pub latest_sleep_hours: Option<f64>,
    pub focus_minutes_total: u32,
    pub medication_taken: bool,
}

/// Summarizes the snapshot the way the daily report screen renders it.
pub fn daily_summary(snapshot: &Snapshot) -> DailySummary {
    DailySummary {
        date: snapshot.date.clone(),
        goals: goal_progress(&snapshot.fixed_goals, &snapshot.daily_goals),
        latest_sleep_hours: snapshot
            .sleep_entries
            .first()
            .map(|entry| entry.hours_slept),
        focus_minutes_total: snapshot.focus.focus_minutes_total,
        medication_taken: snapshot.medication_dose.is_some(),
    }
}
