//! Integration tests for the daily promise lifecycle:
//! - Session-start flow: rollover, then today's promise lookup
//! - Multi-day histories with auto-failed promises
//! - Ledger summaries and streaks over the same data

use chrono::NaiveDate;
use mrror::{
    CheckInLog, Clock, EngagementLog, FixedClock, PromiseError, PromiseState, PromiseStore,
    AUTO_FAIL_REASON,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup(date: NaiveDate) -> (PromiseStore, FixedClock, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::on(date);
    let store = PromiseStore::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone()))
        .unwrap();
    (store, clock, dir)
}

#[test]
fn test_full_day_cycle_create_complete_recreate() {
    let (store, _clock, _dir) = setup(day(2024, 1, 2));

    // Commit, keep, commit again on the same day.
    let first = store.create("Finish report", Some(30)).unwrap();
    assert_eq!(first.state, PromiseState::Pending);

    let kept = store.complete().unwrap();
    assert_eq!(kept.state, PromiseState::Completed);
    assert!(kept.completed_at.is_some());

    let second = store.create("Second promise today", None).unwrap();
    assert_eq!(second.state, PromiseState::Pending);

    // Today's ledger row counts both records.
    let summary = store.last_n_days_summary(1).unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].date, day(2024, 1, 2));
    assert_eq!(
        (summary[0].kept, summary[0].broken, summary[0].pending),
        (1, 0, 1)
    );
}

#[test]
fn test_session_start_flow_across_days() {
    let (store, clock, _dir) = setup(day(2024, 1, 1));
    store.create("Day one promise", None).unwrap();

    // User never comes back on Jan 1. Next session opens on Jan 3.
    clock.advance_days(2);

    // App load: rollover first, then read today's promise.
    let corrected = store.rollover().unwrap();
    assert_eq!(corrected, 1);
    assert!(store.today_promise().unwrap().is_none());

    // Creation is unblocked even though an old promise was left pending.
    store.create("Day three promise", None).unwrap();

    let stale = store.get_by_date(day(2024, 1, 1)).unwrap().unwrap();
    assert_eq!(stale.state, PromiseState::Failed);
    assert_eq!(stale.failure_reason.as_deref(), Some(AUTO_FAIL_REASON));
}

#[test]
fn test_rollover_twice_changes_nothing_more() {
    let (store, clock, _dir) = setup(day(2024, 1, 1));
    store.create("Stale", None).unwrap();
    clock.advance_days(1);

    store.rollover().unwrap();
    let before = store.history().unwrap();

    clock.set(clock.now() + chrono::Duration::hours(5));
    assert_eq!(store.rollover().unwrap(), 0);
    let after = store.history().unwrap();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.state, b.state);
        assert_eq!(a.completed_at, b.completed_at);
        assert_eq!(a.failure_reason, b.failure_reason);
    }
}

#[test]
fn test_week_of_mixed_outcomes_in_ledger() {
    let (store, clock, _dir) = setup(day(2024, 1, 1));

    // Jan 1: kept. Jan 2: broken with a reason. Jan 3: never resolved.
    store.create("Run 5k", None).unwrap();
    store.complete().unwrap();

    clock.advance_days(1);
    store.create("Read 50 pages", None).unwrap();
    store.fail("stayed up too late").unwrap();

    clock.advance_days(1);
    store.create("Clean inbox", None).unwrap();

    // Jan 4: session start rolls Jan 3 over, new promise still pending.
    clock.advance_days(1);
    store.rollover().unwrap();
    store.create("Write journal", None).unwrap();

    let summary = store.last_n_days_summary(7).unwrap();
    assert_eq!(summary.len(), 7);
    assert_eq!(summary[0].date, day(2024, 1, 4));
    assert_eq!(summary[0].pending, 1);
    assert_eq!(summary[1].broken, 1); // Jan 3, auto-failed
    assert_eq!(summary[2].broken, 1); // Jan 2, user-failed
    assert_eq!(summary[3].kept, 1); // Jan 1

    let total: u32 = summary.iter().map(|s| s.kept + s.broken + s.pending).sum();
    assert_eq!(total, 4);
}

#[test]
fn test_validation_failures_leave_state_untouched() {
    let (store, _clock, _dir) = setup(day(2024, 1, 2));

    assert!(matches!(
        store.create("   ", None).unwrap_err(),
        PromiseError::EmptyPromise
    ));
    assert!(store.history().unwrap().is_empty());

    store.create("Finish report", None).unwrap();
    assert!(matches!(
        store.fail("   ").unwrap_err(),
        PromiseError::EmptyReason
    ));
    assert!(store.today_promise().unwrap().unwrap().is_pending());
}

#[test]
fn test_promise_history_survives_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::on(day(2024, 1, 2));

    {
        let store =
            PromiseStore::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone()))
                .unwrap();
        store.create("Persist me", Some(15)).unwrap();
        store.complete().unwrap();
    }

    let reopened =
        PromiseStore::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone()))
            .unwrap();
    let promise = reopened.today_promise().unwrap().unwrap();
    assert_eq!(promise.promise, "Persist me");
    assert_eq!(promise.state, PromiseState::Completed);
    assert_eq!(promise.estimated_minutes, Some(15));
}

#[test]
fn test_streak_and_promises_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::on(day(2024, 1, 1));
    let store = PromiseStore::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone()))
        .unwrap();
    let engagement =
        EngagementLog::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone()))
            .unwrap();

    // Open the app three days running but break every promise.
    for _ in 0..3 {
        engagement.mark_opened_today().unwrap();
        store.rollover().unwrap();
        store.create("Promise of the day", None).unwrap();
        store.fail("did not happen").unwrap();
        clock.advance_days(1);
    }
    clock.advance_days(-1); // back to the last marked day

    assert_eq!(engagement.streak().unwrap(), 3);
    let summary = store.last_n_days_summary(3).unwrap();
    let broken: u32 = summary.iter().map(|s| s.broken).sum();
    assert_eq!(broken, 3);
}

#[test]
fn test_morning_flow_checkin_then_promise() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::on(day(2024, 1, 1));
    let store = PromiseStore::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone()))
        .unwrap();
    let checkins =
        CheckInLog::with_dir_and_clock(dir.path().to_path_buf(), Box::new(clock.clone())).unwrap();

    checkins.submit(true, "Tomorrow: start before checking mail").unwrap();
    store.create("Deep work until noon", None).unwrap();
    store.complete().unwrap();

    clock.advance_days(1);
    assert!(!checkins.is_complete_today().unwrap());
    assert_eq!(
        checkins.yesterday_message().unwrap().as_deref(),
        Some("Tomorrow: start before checking mail")
    );
    store.rollover().unwrap();
    assert!(store.today_promise().unwrap().is_none());
}
