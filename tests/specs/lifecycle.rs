// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start, decision round-trips, cancellation, and terminal transitions.

use cascade_core::{CloseStatus, WorkflowState};
use cascade_engine::{EngineConfig, MutableState};
use cascade_storage::WorkflowSnapshot;
use similar_asserts::assert_eq;

use super::support::started_workflow;

#[test]
fn fresh_start_then_first_decision() {
    let mut state = started_workflow();

    // start event is 1 and the next ID is reserved
    assert_eq!(state.history()[0].event_id, 1);
    assert_eq!(state.get_next_event_id(), 2);
    assert_eq!(state.execution_info().state, WorkflowState::Created);

    let decision = state.add_decision_task_scheduled_event().unwrap().unwrap();
    assert_eq!(decision.schedule_id, 2);
    assert_eq!(decision.attempt, 0);
    assert_eq!(state.get_next_event_id(), 3);

    let started = state.add_decision_task_started_event(2, "r", "worker").unwrap();
    assert_eq!(started.decision.started_id, 3);
    assert_eq!(state.execution_info().state, WorkflowState::Running);
    assert_eq!(state.get_next_event_id(), 4);
}

#[test]
fn cancel_request_is_idempotent() {
    let mut state = started_workflow();

    let first = state.add_workflow_execution_cancel_requested_event(
        "operator",
        "c1",
        "cli",
        None,
        None,
    );
    assert!(first.is_some());
    assert!(state.is_cancel_requested());
    assert_eq!(state.execution_info().cancel_request_id, "c1");
    let history_len = state.history().len();

    let second = state.add_workflow_execution_cancel_requested_event(
        "operator",
        "c1",
        "cli",
        None,
        None,
    );
    assert!(second.is_none());
    assert_eq!(state.history().len(), history_len);
    assert_eq!(state.execution_info().cancel_request_id, "c1");
}

#[test]
fn first_close_status_wins() {
    let mut state = started_workflow();
    let decision = state.add_decision_task_scheduled_event().unwrap().unwrap();
    let started = state
        .add_decision_task_started_event(decision.schedule_id, "r", "w")
        .unwrap();
    let completed = state
        .add_decision_task_completed_event(decision.schedule_id, started.decision.started_id, "w")
        .unwrap();

    state
        .add_workflow_execution_completed_event(completed.event_id, None)
        .unwrap()
        .unwrap();
    assert_eq!(state.execution_info().close_status, CloseStatus::Completed);

    assert!(state
        .add_workflow_execution_terminated_event("too late", None, "op")
        .unwrap()
        .is_none());
    assert!(state
        .add_workflow_execution_timed_out_event(cascade_core::TimeoutType::StartToClose)
        .unwrap()
        .is_none());
    assert_eq!(state.execution_info().state, WorkflowState::Completed);
    assert_eq!(state.execution_info().close_status, CloseStatus::Completed);
}

#[test]
fn rehydrated_state_closes_with_no_changes() {
    let mut source = started_workflow();
    let decision = source.add_decision_task_scheduled_event().unwrap().unwrap();
    let started = source
        .add_decision_task_started_event(decision.schedule_id, "r", "w")
        .unwrap();
    source
        .add_decision_task_completed_event(decision.schedule_id, started.decision.started_id, "w")
        .unwrap();
    source.close_update_session().unwrap();

    let snapshot = WorkflowSnapshot {
        execution_info: source.execution_info().clone(),
        ..Default::default()
    };
    let mut reloaded = MutableState::new(EngineConfig::default());
    reloaded.load(snapshot);

    assert_eq!(reloaded.execution_info(), source.execution_info());
    let updates = reloaded.close_update_session().unwrap();
    assert!(updates.new_events.is_empty());
    assert!(updates.update_activity_infos.is_empty());
    assert!(updates.delete_activity_info.is_none());
    assert!(updates.update_timer_infos.is_empty());
    assert!(updates.update_child_execution_infos.is_empty());
    assert!(updates.update_signal_infos.is_empty());
    assert!(updates.update_request_cancel_infos.is_empty());
    assert!(updates.continue_as_new.is_none());
    assert!(!updates.clear_buffered_events);
}
