//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daykeeper_core` wiring
//!   end-to-end against an in-memory store.
//! - Keep output deterministic enough for quick local sanity checks.

use daykeeper_core::{
    DayState, GoalKind, GoalPriority, MemoryKeyValueStore, SleepQuality, TrackerService,
};

fn main() {
    println!("daykeeper_core version={}", daykeeper_core::core_version());

    let state = match DayState::load(MemoryKeyValueStore::new()) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("failed to load day state: {err}");
            std::process::exit(1);
        }
    };
    let tracker = TrackerService::new(state);

    if let Err(err) = tracker.add_goal("Review inbox", GoalKind::Daily, GoalPriority::Medium) {
        eprintln!("failed to add goal: {err}");
        std::process::exit(1);
    }
    if let Err(err) = tracker.record_sleep(7.5, SleepQuality::Good, "") {
        eprintln!("failed to record sleep: {err}");
        std::process::exit(1);
    }

    let summary = tracker.daily_summary();
    println!(
        "date={} goals={}/{} ({}%) sleep={:?} focus_min={} medication_taken={}",
        summary.date,
        summary.goals.completed,
        summary.goals.total,
        summary.goals.percent(),
        summary.latest_sleep_hours,
        summary.focus_minutes_total,
        summary.medication_taken
    );

    let today = summary.date;
    let overview = tracker.month_overview(today.year(), today.month());
    let recorded_days = overview.days.iter().filter(|day| day.recorded).count();
    println!(
        "month={}-{:02} days={} recorded={recorded_days}",
        overview.year,
        overview.month,
        overview.days.len()
    );
}
