// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::super::test_support::*;
use cascade_core::event::EventAttributes;
use cascade_core::{ScheduleActivityAttributes, TimeoutType, EMPTY_EVENT_ID};

/// Schedule one activity after a completed decision; returns its schedule ID.
fn scheduled_activity(
    state: &mut crate::mutable_state::MutableState<cascade_core::FakeClock>,
    activity_id: &str,
) -> i64 {
    let decision_completed = complete_decision(state);
    let (event, ai) = state
        .add_activity_task_scheduled_event(
            decision_completed,
            ScheduleActivityAttributes::builder().activity_id(activity_id).build(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(event.event_id, ai.schedule_id);
    ai.schedule_id
}

#[test]
fn schedule_creates_info_and_both_indexes() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");

    let ai = state.get_activity_info(schedule_id).unwrap();
    assert_eq!(ai.activity_id, "a1");
    assert_eq!(ai.started_id, EMPTY_EVENT_ID);
    assert!(!ai.scheduled_event.is_empty());
    assert_eq!(state.get_schedule_id_by_activity_id("a1"), Some(schedule_id));
    assert_eq!(state.get_activity_by_activity_id("a1").unwrap().schedule_id, schedule_id);
}

#[test]
fn schedule_defaults_unset_timeouts_from_config() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    let (event, ai) = state
        .add_activity_task_scheduled_event(
            decision_completed,
            ScheduleActivityAttributes::builder()
                .activity_id("a1")
                .schedule_to_start_timeout(0)
                .schedule_to_close_timeout(-1)
                .start_to_close_timeout(7)
                .heartbeat_timeout(0)
                .build(),
        )
        .unwrap()
        .unwrap();

    assert_eq!(ai.schedule_to_start_timeout, 10);
    assert_eq!(ai.schedule_to_close_timeout, 30);
    assert_eq!(ai.start_to_close_timeout, 7);
    assert_eq!(ai.heartbeat_timeout, 10);
    // the event carries the defaulted values too
    match &event.attributes {
        EventAttributes::ActivityTaskScheduled(a) => {
            assert_eq!(a.schedule_to_start_timeout, 10);
            assert_eq!(a.start_to_close_timeout, 7);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn schedule_rejects_duplicate_activity_id() {
    let mut state = started_workflow();
    scheduled_activity(&mut state, "a1");
    let result = state
        .add_activity_task_scheduled_event(
            4,
            ScheduleActivityAttributes::builder().activity_id("a1").build(),
        )
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn schedule_rejects_empty_activity_id() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    let result = state
        .add_activity_task_scheduled_event(
            decision_completed,
            ScheduleActivityAttributes::builder().activity_id("").build(),
        )
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn started_sets_fields_and_refuses_restart() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");

    let event = state
        .add_activity_task_started_event(schedule_id, "poll-req", "worker-7")
        .unwrap();
    let ai = state.get_activity_info(schedule_id).unwrap();
    assert_eq!(ai.started_id, event.event_id);
    assert_eq!(ai.request_id, "poll-req");
    assert!(ai.started_time > 0);

    assert!(state.add_activity_task_started_event(schedule_id, "again", "w").is_none());
}

#[test]
fn started_rejects_unknown_activity() {
    let mut state = started_workflow();
    assert!(state.add_activity_task_started_event(99, "r", "w").is_none());
}

#[test]
fn completed_deletes_from_both_indexes() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");
    let started = state.add_activity_task_started_event(schedule_id, "r", "w").unwrap();

    let event = state
        .add_activity_task_completed_event(schedule_id, started.event_id, None, "w")
        .unwrap()
        .unwrap();
    match &event.attributes {
        EventAttributes::ActivityTaskCompleted(a) => {
            assert_eq!(a.scheduled_event_id, schedule_id);
            assert_eq!(a.started_event_id, started.event_id);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(state.get_activity_info(schedule_id).is_none());
    assert!(state.get_activity_by_activity_id("a1").is_none());
    assert!(state.get_schedule_id_by_activity_id("a1").is_none());
}

#[test]
fn completed_rejects_started_id_mismatch() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");
    state.add_activity_task_started_event(schedule_id, "r", "w").unwrap();

    let result = state
        .add_activity_task_completed_event(schedule_id, EMPTY_EVENT_ID, None, "w")
        .unwrap();
    assert!(result.is_none());
    assert!(state.get_activity_info(schedule_id).is_some());
}

#[test]
fn failed_requires_started_match_then_deletes() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");
    let started = state.add_activity_task_started_event(schedule_id, "r", "w").unwrap();

    assert!(state
        .add_activity_task_failed_event(schedule_id, started.event_id + 1, "boom", None, "w")
        .unwrap()
        .is_none());
    assert!(state
        .add_activity_task_failed_event(schedule_id, started.event_id, "boom", None, "w")
        .unwrap()
        .is_some());
    assert!(state.get_activity_info(schedule_id).is_none());
}

#[test]
fn schedule_to_start_timeout_allows_unstarted_activity() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");

    let event = state
        .add_activity_task_timed_out_event(
            schedule_id,
            EMPTY_EVENT_ID,
            TimeoutType::ScheduleToStart,
            None,
        )
        .unwrap();
    assert!(event.is_some());
    assert!(state.get_activity_info(schedule_id).is_none());
}

#[yare::parameterized(
    start_to_close = { TimeoutType::StartToClose },
    heartbeat      = { TimeoutType::Heartbeat },
)]
fn started_only_timeouts_reject_unstarted_activity(timeout_type: TimeoutType) {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");

    let result = state
        .add_activity_task_timed_out_event(schedule_id, EMPTY_EVENT_ID, timeout_type, None)
        .unwrap();
    assert!(result.is_none());
    assert!(state.get_activity_info(schedule_id).is_some());
}

#[test]
fn start_to_close_timeout_on_started_activity() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");
    let started = state.add_activity_task_started_event(schedule_id, "r", "w").unwrap();

    let event = state
        .add_activity_task_timed_out_event(
            schedule_id,
            started.event_id,
            TimeoutType::StartToClose,
            Some(vec![1]),
        )
        .unwrap();
    assert!(event.is_some());
    assert!(state.get_activity_info(schedule_id).is_none());
}

#[test]
fn cancel_requested_flags_activity_once() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");

    let (event, ai) = state.add_activity_task_cancel_requested_event(4, "a1").unwrap();
    assert!(ai.cancel_requested);
    assert_eq!(ai.cancel_request_id, event.event_id);
    assert_eq!(state.get_activity_info(schedule_id).unwrap().cancel_request_id, event.event_id);

    assert!(state.add_activity_task_cancel_requested_event(4, "a1").is_none());
}

#[test]
fn cancel_requested_rejects_unknown_activity() {
    let mut state = started_workflow();
    assert!(state.add_activity_task_cancel_requested_event(4, "nope").is_none());
}

#[test]
fn request_cancel_failed_is_unconditional() {
    let mut state = started_workflow();
    let before = state.get_next_event_id();
    let event = state.add_request_cancel_activity_task_failed_event(
        4,
        "nope",
        "ACTIVITY_ID_UNKNOWN",
    );
    assert_eq!(event.event_id, before);
}

#[test]
fn heartbeat_refreshes_timestamp_and_stages() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");
    assert_eq!(state.get_activity_info(schedule_id).unwrap().last_heartbeat_updated_time, 0);

    assert!(state.record_activity_heartbeat(schedule_id));
    assert!(state.get_activity_info(schedule_id).unwrap().last_heartbeat_updated_time > 0);
    assert!(!state.record_activity_heartbeat(schedule_id + 10));
}

#[test]
fn update_activity_replaces_pending_entry() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");

    let mut ai = state.get_activity_info(schedule_id).unwrap().clone();
    ai.timer_task_status = cascade_core::timer_task_status::CREATED_SCHEDULE_TO_START;
    state.update_activity(ai).unwrap();
    assert_eq!(
        state.get_activity_info(schedule_id).unwrap().timer_task_status,
        cascade_core::timer_task_status::CREATED_SCHEDULE_TO_START
    );

    let mut stray = state.get_activity_info(schedule_id).unwrap().clone();
    stray.schedule_id = 999;
    assert!(state.update_activity(stray).is_err());
}

#[test]
fn canceled_requires_started_match_then_deletes() {
    let mut state = started_workflow();
    let schedule_id = scheduled_activity(&mut state, "a1");
    let started = state.add_activity_task_started_event(schedule_id, "r", "w").unwrap();
    let (cancel_requested, _) = state.add_activity_task_cancel_requested_event(4, "a1").unwrap();

    assert!(state
        .add_activity_task_canceled_event(schedule_id, EMPTY_EVENT_ID, cancel_requested.event_id, None, "w")
        .unwrap()
        .is_none());

    let event = state
        .add_activity_task_canceled_event(
            schedule_id,
            started.event_id,
            cancel_requested.event_id,
            None,
            "w",
        )
        .unwrap();
    assert!(event.is_some());
    assert!(state.get_activity_info(schedule_id).is_none());
}
