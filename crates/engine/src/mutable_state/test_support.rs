// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for mutable-state tests.

use cascade_core::{FakeClock, StartWorkflowRequest, WorkflowExecution};

use crate::config::EngineConfig;

use super::MutableState;

pub(crate) fn fresh_state() -> MutableState<FakeClock> {
    MutableState::with_clock(EngineConfig::default(), FakeClock::new())
}

/// A state with the start event recorded (event 1).
pub(crate) fn started_workflow() -> MutableState<FakeClock> {
    let mut state = fresh_state();
    let event = state.add_workflow_execution_started_event(
        WorkflowExecution::new("wf", "run-1"),
        None,
        StartWorkflowRequest::builder().build(),
    );
    assert!(event.is_some());
    state
}

/// A state with an in-flight decision: start (1), scheduled (2), started (3).
/// Returns the state plus (schedule_id, started_id).
pub(crate) fn with_started_decision() -> (MutableState<FakeClock>, i64, i64) {
    let mut state = started_workflow();
    let di = state.add_decision_task_scheduled_event().unwrap().unwrap();
    let started = state
        .add_decision_task_started_event(di.schedule_id, "request-1", "worker")
        .unwrap();
    (state, di.schedule_id, started.decision.started_id)
}

/// Drive a full decision cycle to completion; returns the decision-completed
/// event ID.
pub(crate) fn complete_decision(state: &mut MutableState<FakeClock>) -> i64 {
    let di = state.add_decision_task_scheduled_event().unwrap().unwrap();
    let started = state
        .add_decision_task_started_event(di.schedule_id, "request-n", "worker")
        .unwrap();
    let completed = state
        .add_decision_task_completed_event(di.schedule_id, started.decision.started_id, "worker")
        .unwrap();
    completed.event_id
}
