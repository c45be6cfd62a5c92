// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow execution identity types.

use serde::{Deserialize, Serialize};

/// Identity of one workflow execution: the stable workflow ID plus the
/// run ID of this particular attempt. Continue-as-new keeps the workflow
/// ID and mints a new run ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub workflow_id: String,
    pub run_id: String,
}

impl WorkflowExecution {
    pub fn new(workflow_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self { workflow_id: workflow_id.into(), run_id: run_id.into() }
    }
}

impl std::fmt::Display for WorkflowExecution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.workflow_id, self.run_id)
    }
}

/// Parent linkage for a child workflow execution.
///
/// `initiated_id` is the event ID of the StartChildWorkflowExecutionInitiated
/// event in the parent's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentExecution {
    pub domain_id: String,
    pub execution: WorkflowExecution,
    pub initiated_id: i64,
}
