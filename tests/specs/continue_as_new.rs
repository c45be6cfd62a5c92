// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Continue-as-new chains the workflow identity onto a fresh run.

use cascade_core::{CloseStatus, ContinueAsNewAttributes, EventType, WorkflowState};
use similar_asserts::assert_eq;

use super::support::started_workflow;

#[test]
fn continue_as_new_closes_and_seeds_successor() {
    let mut state = started_workflow();
    let decision = state.add_decision_task_scheduled_event().unwrap().unwrap();
    let started = state
        .add_decision_task_started_event(decision.schedule_id, "r", "w")
        .unwrap();
    let completed = state
        .add_decision_task_completed_event(decision.schedule_id, started.decision.started_id, "w")
        .unwrap();

    let (event, successor) = state
        .add_continue_as_new_event(
            completed.event_id,
            "R2",
            ContinueAsNewAttributes::default(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(event.event_type(), EventType::WorkflowExecutionContinuedAsNew);
    assert_eq!(state.execution_info().state, WorkflowState::Completed);
    assert_eq!(state.execution_info().close_status, CloseStatus::ContinuedAsNew);

    // successor: started is event 1, first decision scheduled is event 2
    let kinds: Vec<_> = successor
        .history()
        .iter()
        .map(|e| (e.event_id, e.event_type()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (1, EventType::WorkflowExecutionStarted),
            (2, EventType::DecisionTaskScheduled),
        ]
    );
    assert_eq!(successor.get_next_event_id(), 3);
    assert_eq!(successor.execution_info().workflow_id, "W");
    assert_eq!(successor.execution_info().run_id, "R2");
    assert_eq!(successor.execution_info().task_list, "TL");
    assert_eq!(successor.execution_info().workflow_type, "T");
    assert!(successor.has_pending_decision_task());

    // the staged create request carries the chain
    let updates = state.close_update_session().unwrap();
    let request = updates.continue_as_new.unwrap();
    assert_eq!(request.previous_run_id, "R");
    assert_eq!(request.execution.workflow_id, "W");
    assert_eq!(request.execution.run_id, "R2");
    assert_eq!(request.next_event_id, 3);
    assert_eq!(request.decision_schedule_id, 2);
    assert_eq!(request.transfer_task.task_list, "TL");
    assert_eq!(request.transfer_task.schedule_id, 2);
}

#[test]
fn successor_start_references_previous_run() {
    let mut state = started_workflow();
    let decision = state.add_decision_task_scheduled_event().unwrap().unwrap();
    let started = state
        .add_decision_task_started_event(decision.schedule_id, "r", "w")
        .unwrap();
    let completed = state
        .add_decision_task_completed_event(decision.schedule_id, started.decision.started_id, "w")
        .unwrap();

    let (_, successor) = state
        .add_continue_as_new_event(
            completed.event_id,
            "R2",
            ContinueAsNewAttributes::default(),
        )
        .unwrap()
        .unwrap();

    match &successor.history()[0].attributes {
        cascade_core::event::EventAttributes::WorkflowExecutionStarted(a) => {
            assert_eq!(a.continued_execution_run_id.as_deref(), Some("R"));
            assert_eq!(a.task_list, "TL");
            assert_eq!(a.execution_timeout, 60);
            assert_eq!(a.decision_timeout, 10);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
