// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::super::test_support::*;
use cascade_core::StartTimerAttributes;

fn timer(timer_id: &str, seconds: i64) -> StartTimerAttributes {
    StartTimerAttributes { timer_id: timer_id.to_string(), start_to_fire_timeout: seconds }
}

#[test]
fn started_computes_expiry_from_clock() {
    let mut state = started_workflow();
    let now = state.execution_info().start_timestamp;

    let (event, ti) = state.add_timer_started_event(4, timer("t1", 30)).unwrap();
    assert_eq!(ti.started_id, event.event_id);
    assert_eq!(ti.expiry_time, now + 30_000_000_000);
    assert_eq!(state.get_user_timer("t1").unwrap(), &ti);
}

#[test]
fn started_rejects_duplicate_timer_id() {
    let mut state = started_workflow();
    state.add_timer_started_event(4, timer("t1", 30)).unwrap();
    assert!(state.add_timer_started_event(4, timer("t1", 60)).is_none());
}

#[test]
fn fired_deletes_pending_timer() {
    let mut state = started_workflow();
    let (started, _) = state.add_timer_started_event(4, timer("t1", 30)).unwrap();

    let event = state.add_timer_fired_event(started.event_id, "t1").unwrap();
    assert!(event.is_some());
    assert!(state.get_user_timer("t1").is_none());
}

#[test]
fn fired_rejects_unknown_timer() {
    let mut state = started_workflow();
    assert!(state.add_timer_fired_event(2, "nope").unwrap().is_none());
}

#[test]
fn canceled_references_started_event_and_deletes() {
    let mut state = started_workflow();
    let (started, _) = state.add_timer_started_event(4, timer("t1", 30)).unwrap();

    let event = state.add_timer_canceled_event(9, "t1", "worker").unwrap().unwrap();
    match &event.attributes {
        cascade_core::event::EventAttributes::TimerCanceled(a) => {
            assert_eq!(a.started_event_id, started.event_id);
            assert_eq!(a.timer_id, "t1");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(state.get_user_timer("t1").is_none());
}

#[test]
fn canceled_rejects_unknown_timer() {
    let mut state = started_workflow();
    assert!(state.add_timer_canceled_event(4, "nope", "w").unwrap().is_none());
}

#[test]
fn cancel_failed_is_unconditional() {
    let mut state = started_workflow();
    let before = state.get_next_event_id();
    let event = state.add_cancel_timer_failed_event(4, "nope", "TIMER_ID_UNKNOWN", "w");
    assert_eq!(event.event_id, before);
    assert_eq!(state.get_next_event_id(), before + 1);
}

#[test]
fn update_user_timer_replaces_pending_entry() {
    let mut state = started_workflow();
    let (_, mut ti) = state.add_timer_started_event(4, timer("t1", 30)).unwrap();

    ti.task_status = cascade_core::timer_task_status::CREATED;
    state.update_user_timer(ti).unwrap();
    assert_eq!(
        state.get_user_timer("t1").unwrap().task_status,
        cascade_core::timer_task_status::CREATED
    );

    let stray = cascade_core::TimerInfo {
        timer_id: "nope".to_string(),
        expiry_time: 0,
        started_id: 1,
        task_status: 0,
    };
    assert!(state.update_user_timer(stray).is_err());
}

#[test]
fn timer_can_restart_after_fired() {
    let mut state = started_workflow();
    let (started, _) = state.add_timer_started_event(4, timer("t1", 30)).unwrap();
    state.add_timer_fired_event(started.event_id, "t1").unwrap();

    assert!(state.add_timer_started_event(4, timer("t1", 60)).is_some());
}
