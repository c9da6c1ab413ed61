use daykeeper_core::{
    default_fixed_goals, DateKey, DayState, Goal, GoalPriority, MemoryKeyValueStore,
    SnapshotUpdate, StateRepository, HISTORY_CAP,
};

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

fn daily_goal(text: &str, done: bool) -> Goal {
    let mut goal = Goal::new(text, GoalPriority::Medium);
    goal.done = done;
    goal
}

fn daily_goals_update(goals: Vec<Goal>) -> SnapshotUpdate {
    SnapshotUpdate {
        daily_goals: Some(goals),
        ..SnapshotUpdate::default()
    }
}

#[test]
fn fresh_install_starts_with_documented_defaults() {
    let store = MemoryKeyValueStore::new();
    let state = DayState::load_at(&store, key("2026-08-06")).unwrap();

    let snapshot = state.snapshot();
    assert_eq!(snapshot.fixed_goals, default_fixed_goals());
    assert!(snapshot.daily_goals.is_empty());
    assert!(snapshot.sleep_entries.is_empty());
    assert!(snapshot.medication_dose.is_none());
    assert!(snapshot.goal_history.is_empty());
    assert!(snapshot.screen_time.is_none());
    assert!(snapshot.reading.is_none());
    assert_eq!(snapshot.focus.session_count, 0);
}

#[test]
fn fresh_install_persists_the_default_fixed_goals() {
    let store = MemoryKeyValueStore::new();
    let _state = DayState::load_at(&store, key("2026-08-06")).unwrap();

    let repo = StateRepository::new(&store);
    assert_eq!(repo.load_fixed_goals(), Some(default_fixed_goals()));
    // The last-access key is only advanced by the first save.
    assert_eq!(repo.load_last_access(), None);
}

#[test]
fn day_advance_archives_daily_goals_and_resets_fixed_flags() {
    let store = MemoryKeyValueStore::new();

    let state = DayState::load_at(&store, key("2026-08-06")).unwrap();
    state
        .save_with(|snapshot| {
            let mut fixed = snapshot.fixed_goals.clone();
            for goal in &mut fixed {
                goal.done = true;
            }
            SnapshotUpdate {
                daily_goals: Some(vec![
                    daily_goal("write report", true),
                    daily_goal("call dentist", false),
                    daily_goal("tidy desk", true),
                ]),
                fixed_goals: Some(fixed),
                ..SnapshotUpdate::default()
            }
        })
        .unwrap();
    drop(state);

    let fixed_ids_before: Vec<String> = default_fixed_goals()
        .into_iter()
        .map(|goal| goal.id)
        .collect();

    let state = DayState::load_at(&store, key("2026-08-07")).unwrap();
    let snapshot = state.snapshot();

    assert!(snapshot.daily_goals.is_empty());
    assert_eq!(snapshot.goal_history.len(), 1);
    assert_eq!(snapshot.goal_history[0].date, key("2026-08-06"));
    assert_eq!(snapshot.goal_history[0].total, 3);
    assert_eq!(snapshot.goal_history[0].completed, 2);

    assert!(snapshot.fixed_goals.iter().all(|goal| !goal.done));
    let fixed_ids_after: Vec<String> = snapshot
        .fixed_goals
        .iter()
        .map(|goal| goal.id.clone())
        .collect();
    assert_eq!(fixed_ids_after, fixed_ids_before);
}

#[test]
fn repeated_rollover_for_the_same_stale_day_is_a_no_op() {
    let store = MemoryKeyValueStore::new();

    let state = DayState::load_at(&store, key("2026-08-06")).unwrap();
    state
        .save(daily_goals_update(vec![daily_goal("journal", true)]))
        .unwrap();
    drop(state);

    // Two loads on the new day without an intervening save: the stale
    // last-access key makes the transition run twice.
    let state = DayState::load_at(&store, key("2026-08-07")).unwrap();
    let first = state.snapshot();
    drop(state);

    let state = DayState::load_at(&store, key("2026-08-07")).unwrap();
    let second = state.snapshot();

    assert_eq!(first.goal_history, second.goal_history);
    assert_eq!(second.goal_history.len(), 1);
    assert_eq!(first.fixed_goals, second.fixed_goals);
    assert!(second.fixed_goals.iter().all(|goal| !goal.done));
}

#[test]
fn day_without_daily_goals_leaves_the_ledger_untouched() {
    let store = MemoryKeyValueStore::new();

    let state = DayState::load_at(&store, key("2026-08-06")).unwrap();
    state
        .save(SnapshotUpdate {
            reading: Some(Some(daykeeper_core::ReadingLog { pages: 12 })),
            ..SnapshotUpdate::default()
        })
        .unwrap();
    drop(state);

    let state = DayState::load_at(&store, key("2026-08-07")).unwrap();
    assert!(state.snapshot().goal_history.is_empty());
}

#[test]
fn backward_clock_is_treated_as_a_plain_day_change() {
    let store = MemoryKeyValueStore::new();

    let state = DayState::load_at(&store, key("2026-08-07")).unwrap();
    state
        .save(daily_goals_update(vec![daily_goal("stretch", false)]))
        .unwrap();
    drop(state);

    // Clock moved backward: the stored last-access day is ahead of today.
    let state = DayState::load_at(&store, key("2026-08-06")).unwrap();
    let snapshot = state.snapshot();

    assert_eq!(snapshot.date, key("2026-08-06"));
    assert_eq!(snapshot.goal_history.len(), 1);
    assert_eq!(snapshot.goal_history[0].date, key("2026-08-07"));
    assert!(snapshot.fixed_goals.iter().all(|goal| !goal.done));
}

#[test]
fn ledger_never_exceeds_the_cap_over_many_days() {
    let store = MemoryKeyValueStore::new();
    let base = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    for offset in 0..70u64 {
        let today = DateKey::from_date(base + chrono::Days::new(offset));
        let state = DayState::load_at(&store, today).unwrap();
        state
            .save(daily_goals_update(vec![daily_goal("daily", true)]))
            .unwrap();
    }

    let today = DateKey::from_date(base + chrono::Days::new(70));
    let state = DayState::load_at(&store, today).unwrap();
    let history = state.snapshot().goal_history;

    assert_eq!(history.len(), HISTORY_CAP);
    // Newest-first: the most recently archived day leads.
    assert_eq!(history[0].date, DateKey::from_date(base + chrono::Days::new(69)));
}
