// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use cascade_core::{FakeClock, StartWorkflowRequest, WorkflowExecution};
use cascade_engine::{EngineConfig, MutableState};

/// A deterministic engine with the start event recorded:
/// domain `D`, workflow `W`, run `R`, task list `TL`, type `T`,
/// execution timeout 60s, decision timeout 10s.
pub fn started_workflow() -> MutableState<FakeClock> {
    let mut state = MutableState::with_clock(EngineConfig::default(), FakeClock::new());
    let event = state.add_workflow_execution_started_event(
        WorkflowExecution::new("W", "R"),
        None,
        StartWorkflowRequest::builder()
            .domain_id("D")
            .workflow_type("T")
            .task_list("TL")
            .execution_timeout(60)
            .decision_timeout(10)
            .build(),
    );
    assert!(event.is_some());
    state
}
