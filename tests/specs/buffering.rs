// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event buffering, transient decision retries, and flush-time ID repair.

use cascade_core::event::EventAttributes;
use cascade_core::{EventType, ScheduleActivityAttributes, BUFFERED_EVENT_ID};
use similar_asserts::assert_eq;

use super::support::started_workflow;

// A decision is in flight; everything it produces buffers until it closes,
// then the flush renumbers and stages.
#[test]
fn buffered_activity_schedule_flushes_with_final_ids() {
    let mut state = started_workflow();
    state.add_decision_task_scheduled_event().unwrap().unwrap();
    state.add_decision_task_started_event(2, "r", "w").unwrap();

    let (event, _) = state
        .add_activity_task_scheduled_event(
            4,
            ScheduleActivityAttributes::builder().activity_id("a").build(),
        )
        .unwrap()
        .unwrap();
    assert!(event.is_buffered());
    assert_eq!(state.get_next_event_id(), 4);

    let completed = state.add_decision_task_completed_event(2, 3, "w").unwrap();
    assert_eq!(completed.event_id, 4);
    assert_eq!(state.get_next_event_id(), 5);

    let updates = state.close_update_session().unwrap();
    assert_eq!(state.get_next_event_id(), 6);
    let flushed = updates.new_events.last().unwrap();
    assert_eq!(flushed.event_id, 5);
    assert_eq!(flushed.event_type(), EventType::ActivityTaskScheduled);
    assert_eq!(
        updates.update_activity_infos.iter().map(|ai| ai.schedule_id).collect::<Vec<_>>(),
        vec![5]
    );
}

#[test]
fn transient_retry_materializes_after_interleaved_events() {
    let mut state = started_workflow();
    state.add_decision_task_scheduled_event().unwrap().unwrap();
    state.add_decision_task_started_event(2, "r", "w").unwrap();

    // first timeout writes the event, later ones only count attempts
    let timed_out = state.add_decision_task_timed_out_event(2, 3);
    assert!(timed_out.is_some());
    assert_eq!(state.execution_info().decision_attempt, 1);
    assert_eq!(state.get_next_event_id(), 5);

    // transient schedule: no event, notional schedule ID is the next ID
    let retry = state.add_decision_task_scheduled_event().unwrap().unwrap();
    assert_eq!(retry.schedule_id, 5);
    assert_eq!(state.get_next_event_id(), 5);

    // an activity slips in and takes event 5
    let (scheduled, _) = state
        .add_activity_task_scheduled_event(
            4,
            ScheduleActivityAttributes::builder().activity_id("a").build(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(scheduled.event_id, 5);

    // the start detects the interleave and materializes scheduled+started
    let started = state
        .add_decision_task_started_event(retry.schedule_id, "r2", "w")
        .unwrap();
    assert_eq!(started.decision.schedule_id, 6);
    assert_eq!(started.decision.started_id, 7);
    assert_eq!(started.decision.attempt, 0);
}

// Started/completed buffered mid-decision: the flush assigns 9 and 10, then
// back-patches the completion's started_event_id and the pending info.
#[test]
fn activity_cross_reference_patch() {
    let mut state = started_workflow();
    state.add_decision_task_scheduled_event().unwrap().unwrap();
    state.add_decision_task_started_event(2, "r", "w").unwrap();
    state.add_decision_task_completed_event(2, 3, "w").unwrap();

    let (scheduled, _) = state
        .add_activity_task_scheduled_event(
            4,
            ScheduleActivityAttributes::builder().activity_id("a").build(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(scheduled.event_id, 5);

    state.add_decision_task_scheduled_event().unwrap().unwrap();
    state.add_decision_task_started_event(6, "r2", "w").unwrap();

    let started = state.add_activity_task_started_event(5, "poll", "w").unwrap();
    assert!(started.is_buffered());
    let sentinel = state.get_activity_info(5).unwrap().started_id;
    assert_eq!(sentinel, BUFFERED_EVENT_ID);
    state
        .add_activity_task_completed_event(5, sentinel, None, "w")
        .unwrap()
        .unwrap();

    state.add_decision_task_completed_event(6, 7, "w").unwrap();
    let updates = state.close_update_session().unwrap();

    let ids: Vec<i64> = updates.new_events.iter().map(|e| e.event_id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    match &updates.new_events[9].attributes {
        EventAttributes::ActivityTaskCompleted(a) => {
            assert_eq!(a.scheduled_event_id, 5);
            assert_eq!(a.started_event_id, 9);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(updates.new_events[8].event_type(), EventType::ActivityTaskStarted);
    assert_eq!(updates.delete_activity_info, Some(5));
}

#[test]
fn buffered_batches_survive_sessions_until_decision_closes() {
    let mut state = started_workflow();
    state.add_decision_task_scheduled_event().unwrap().unwrap();
    state.add_decision_task_started_event(2, "r", "w").unwrap();

    state.add_workflow_execution_signaled_event("first", None, "cli");
    let mid = state.close_update_session().unwrap();
    assert!(mid.new_buffered_events.is_some());
    assert!(!mid.clear_buffered_events);

    state.add_workflow_execution_signaled_event("second", None, "cli");
    state.add_decision_task_completed_event(2, 3, "w").unwrap();
    let done = state.close_update_session().unwrap();

    assert!(done.clear_buffered_events);
    assert!(done.new_buffered_events.is_none());
    let signals: Vec<_> = done
        .new_events
        .iter()
        .filter_map(|e| match &e.attributes {
            EventAttributes::WorkflowExecutionSignaled(a) => {
                Some((e.event_id, a.signal_name.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(signals, vec![(5, "first".to_string()), (6, "second".to_string())]);
}
