// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::super::test_support::*;
use cascade_core::event::EventAttributes;
use cascade_core::{
    CloseStatus, ContinueAsNewAttributes, EventType, ParentExecution, StartTimerAttributes,
    StartWorkflowRequest, TimeoutType, WorkflowExecution, WorkflowState, EMPTY_EVENT_ID,
    FIRST_EVENT_ID,
};

#[test]
fn started_populates_execution_info() {
    let mut state = fresh_state();
    let event = state
        .add_workflow_execution_started_event(
            WorkflowExecution::new("wf", "run-1"),
            None,
            StartWorkflowRequest::builder()
                .domain_id("d1")
                .workflow_type("order-processing")
                .task_list("orders")
                .request_id("create-1")
                .execution_timeout(60)
                .decision_timeout(10)
                .build(),
        )
        .unwrap();
    assert_eq!(event.event_id, FIRST_EVENT_ID);

    let info = state.execution_info();
    assert_eq!(info.domain_id, "d1");
    assert_eq!(info.workflow_id, "wf");
    assert_eq!(info.run_id, "run-1");
    assert_eq!(info.workflow_type, "order-processing");
    assert_eq!(info.task_list, "orders");
    assert_eq!(info.execution_timeout, 60);
    assert_eq!(info.decision_timeout, 10);
    assert_eq!(info.state, WorkflowState::Created);
    assert_eq!(info.close_status, CloseStatus::None);
    assert_eq!(info.create_request_id, "create-1");
    assert_eq!(info.last_processed_event, EMPTY_EVENT_ID);
    assert!(info.start_timestamp > 0);
    assert_eq!(state.get_next_event_id(), 2);
}

#[test]
fn started_rejects_non_virgin_state() {
    let mut state = started_workflow();
    assert!(state
        .add_workflow_execution_started_event(
            WorkflowExecution::new("wf", "run-2"),
            None,
            StartWorkflowRequest::builder().build(),
        )
        .is_none());
}

#[test]
fn completed_sets_state_and_close_status() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);

    let event = state
        .add_workflow_execution_completed_event(decision_completed, Some(vec![1]))
        .unwrap()
        .unwrap();
    assert_eq!(event.event_type(), EventType::WorkflowExecutionCompleted);
    assert_eq!(state.execution_info().state, WorkflowState::Completed);
    assert_eq!(state.execution_info().close_status, CloseStatus::Completed);
    // no parent: no completion event retained
    assert!(state.get_completion_event().unwrap().is_none());
}

#[test]
fn completion_event_retained_only_with_parent() {
    let mut state = fresh_state();
    state
        .add_workflow_execution_started_event(
            WorkflowExecution::new("wf", "run-1"),
            Some(ParentExecution {
                domain_id: "parent-domain".to_string(),
                execution: WorkflowExecution::new("parent-wf", "parent-run"),
                initiated_id: 12,
            }),
            StartWorkflowRequest::builder().build(),
        )
        .unwrap();
    let decision_completed = complete_decision(&mut state);

    let event = state
        .add_workflow_execution_completed_event(decision_completed, None)
        .unwrap()
        .unwrap();
    let retained = state.get_completion_event().unwrap().unwrap();
    assert_eq!(retained, event);
}

#[yare::parameterized(
    completed  = { "completed" },
    failed     = { "failed" },
    timed_out  = { "timed_out" },
    terminated = { "terminated" },
)]
fn terminal_ops_reject_after_close(second: &str) {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    state
        .add_workflow_execution_failed_event(decision_completed, "boom", None)
        .unwrap()
        .unwrap();
    assert_eq!(state.execution_info().close_status, CloseStatus::Failed);

    let rejected = match second {
        "completed" => state
            .add_workflow_execution_completed_event(decision_completed, None)
            .unwrap()
            .is_none(),
        "failed" => state
            .add_workflow_execution_failed_event(decision_completed, "again", None)
            .unwrap()
            .is_none(),
        "timed_out" => state
            .add_workflow_execution_timed_out_event(TimeoutType::StartToClose)
            .unwrap()
            .is_none(),
        _ => state
            .add_workflow_execution_terminated_event("reason", None, "op")
            .unwrap()
            .is_none(),
    };
    assert!(rejected);
    // first close status wins
    assert_eq!(state.execution_info().state, WorkflowState::Completed);
    assert_eq!(state.execution_info().close_status, CloseStatus::Failed);
}

#[test]
fn continue_as_new_rejected_after_close() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    state
        .add_workflow_execution_completed_event(decision_completed, None)
        .unwrap()
        .unwrap();
    assert!(state
        .add_continue_as_new_event(decision_completed, "run-2", ContinueAsNewAttributes::default())
        .unwrap()
        .is_none());
}

// Long-observed oddity, kept on purpose: canceling an already-closed
// workflow logs the invalid action but still emits the event and overwrites
// the close status.
#[test]
fn canceled_on_completed_state_still_mutates() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    state
        .add_workflow_execution_completed_event(decision_completed, None)
        .unwrap()
        .unwrap();

    let event = state
        .add_workflow_execution_canceled_event(decision_completed, None)
        .unwrap();
    assert_eq!(event.event_type(), EventType::WorkflowExecutionCanceled);
    assert_eq!(state.execution_info().close_status, CloseStatus::Canceled);
}

#[test]
fn cancel_requested_is_idempotent() {
    let mut state = started_workflow();
    let event = state
        .add_workflow_execution_cancel_requested_event("user request", "c1", "cli", None, None)
        .unwrap();
    assert_eq!(event.event_type(), EventType::WorkflowExecutionCancelRequested);
    assert!(state.is_cancel_requested());
    assert_eq!(state.execution_info().cancel_request_id, "c1");
    let events_after_first = state.history().len();

    // second request rejects and leaves everything untouched
    assert!(state
        .add_workflow_execution_cancel_requested_event("user request", "c1", "cli", None, None)
        .is_none());
    assert_eq!(state.execution_info().cancel_request_id, "c1");
    assert_eq!(state.history().len(), events_after_first);
}

#[test]
fn cancel_requested_rejects_closed_workflow() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    state
        .add_workflow_execution_completed_event(decision_completed, None)
        .unwrap()
        .unwrap();
    assert!(state
        .add_workflow_execution_cancel_requested_event("late", "c1", "cli", None, None)
        .is_none());
}

#[test]
fn signaled_and_marker_are_plain_emissions() {
    let mut state = started_workflow();
    let signaled = state.add_workflow_execution_signaled_event("go", Some(vec![1]), "cli");
    assert_eq!(signaled.event_type(), EventType::WorkflowExecutionSignaled);
    let marker = state.add_marker_recorded_event(4, "side-effect", Some(vec![2]));
    assert_eq!(marker.event_type(), EventType::MarkerRecorded);
    assert_eq!(marker.event_id, signaled.event_id + 1);
}

#[test]
fn signal_requested_set_tracks_delivery() {
    let mut state = started_workflow();
    assert!(!state.is_signal_requested("req-1"));
    state.add_signal_requested("req-1");
    assert!(state.is_signal_requested("req-1"));
    state.delete_signal_requested("req-1");
    assert!(!state.is_signal_requested("req-1"));
}

#[test]
fn continue_as_new_seeds_successor() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);

    let (event, successor) = state
        .add_continue_as_new_event(
            decision_completed,
            "run-2",
            ContinueAsNewAttributes::default(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(event.event_type(), EventType::WorkflowExecutionContinuedAsNew);
    assert_eq!(state.execution_info().state, WorkflowState::Completed);
    assert_eq!(state.execution_info().close_status, CloseStatus::ContinuedAsNew);

    // successor: start event 1, first decision scheduled as event 2
    assert_eq!(successor.execution_info().run_id, "run-2");
    assert_eq!(successor.execution_info().workflow_id, "wf");
    assert_eq!(successor.get_next_event_id(), 3);
    let kinds: Vec<_> = successor.history().iter().map(|e| e.event_type()).collect();
    assert_eq!(
        kinds,
        vec![EventType::WorkflowExecutionStarted, EventType::DecisionTaskScheduled]
    );
    match &successor.history()[0].attributes {
        EventAttributes::WorkflowExecutionStarted(a) => {
            assert_eq!(a.continued_execution_run_id.as_deref(), Some("run-1"));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    // the staged create request ties predecessor to successor
    let updates = state.close_update_session().unwrap();
    let request = updates.continue_as_new.unwrap();
    assert_eq!(request.previous_run_id, "run-1");
    assert_eq!(request.execution, WorkflowExecution::new("wf", "run-2"));
    assert_eq!(request.next_event_id, 3);
    assert_eq!(request.decision_schedule_id, 2);
    assert_eq!(request.transfer_task.schedule_id, 2);
    assert!(!request.request_id.is_empty());
    assert_eq!(request.request_id, successor.execution_info().create_request_id);
}

#[test]
fn continue_as_new_inherits_with_attribute_overrides() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);

    let (_, successor) = state
        .add_continue_as_new_event(
            decision_completed,
            "run-2",
            ContinueAsNewAttributes {
                workflow_type: None,
                task_list: Some("new-tl".to_string()),
                input: None,
                execution_timeout: 0,
                decision_timeout: 99,
            },
        )
        .unwrap()
        .unwrap();

    let info = successor.execution_info();
    // unset fields fall back to the closing execution
    assert_eq!(info.workflow_type, state.execution_info().workflow_type);
    assert_eq!(info.execution_timeout, state.execution_info().execution_timeout);
    // set fields override
    assert_eq!(info.task_list, "new-tl");
    assert_eq!(info.decision_timeout, 99);
}

// Outstanding work never blocks continue-as-new; it is only logged.
#[test]
fn continue_as_new_proceeds_with_pending_tasks() {
    let mut state = started_workflow();
    let decision_completed = complete_decision(&mut state);
    state
        .add_timer_started_event(
            decision_completed,
            StartTimerAttributes { timer_id: "t1".to_string(), start_to_fire_timeout: 600 },
        )
        .unwrap();

    let result = state
        .add_continue_as_new_event(decision_completed, "run-2", ContinueAsNewAttributes::default())
        .unwrap();
    assert!(result.is_some());
    assert_eq!(state.execution_info().close_status, CloseStatus::ContinuedAsNew);
}
