// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-issued command inputs that drive new history events.
//!
//! These are the decoded payloads handed to the mutable-state operations by
//! the decision/RPC layer. Timeout fields ≤ 0 mean "unspecified"; the engine
//! substitutes configured defaults where the operation allows it.

use serde::{Deserialize, Serialize};

/// Request to start a fresh workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartWorkflowRequest {
    pub domain_id: String,
    pub workflow_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    /// Execution start-to-close timeout, seconds
    pub execution_timeout: i32,
    /// Decision task start-to-close timeout, seconds
    pub decision_timeout: i32,
    #[serde(default)]
    pub identity: String,
    /// Idempotence key for the create
    pub request_id: String,
}

crate::builder! {
    pub struct StartWorkflowRequestBuilder => StartWorkflowRequest {
        into {
            domain_id: String = "domain",
            workflow_type: String = "test-workflow",
            task_list: String = "tl",
            identity: String = "",
            request_id: String = "create-request",
        }
        set {
            execution_timeout: i32 = 60,
            decision_timeout: i32 = 10,
        }
        option {
            input: Vec<u8> = None,
        }
    }
}

/// Schedule-activity command from a completed decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleActivityAttributes {
    pub activity_id: String,
    pub activity_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    pub schedule_to_close_timeout: i32,
    pub schedule_to_start_timeout: i32,
    pub start_to_close_timeout: i32,
    pub heartbeat_timeout: i32,
}

crate::builder! {
    pub struct ScheduleActivityAttributesBuilder => ScheduleActivityAttributes {
        into {
            activity_id: String = "activity-1",
            activity_type: String = "test-activity",
            task_list: String = "tl",
        }
        set {
            schedule_to_close_timeout: i32 = 30,
            schedule_to_start_timeout: i32 = 10,
            start_to_close_timeout: i32 = 20,
            heartbeat_timeout: i32 = 10,
        }
        option {
            input: Vec<u8> = None,
        }
    }
}

/// Start-timer command from a completed decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTimerAttributes {
    pub timer_id: String,
    /// Seconds until the timer fires
    pub start_to_fire_timeout: i64,
}

/// Continue-as-new command. Unset fields fall back to the closing
/// execution's values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueAsNewAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    pub execution_timeout: i32,
    pub decision_timeout: i32,
}

/// Start-child-workflow command from a completed decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartChildWorkflowAttributes {
    pub domain: String,
    pub workflow_id: String,
    pub workflow_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    pub execution_timeout: i32,
    pub decision_timeout: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

crate::builder! {
    pub struct StartChildWorkflowAttributesBuilder => StartChildWorkflowAttributes {
        into {
            domain: String = "child-domain",
            workflow_id: String = "child-wf",
            workflow_type: String = "child-type",
            task_list: String = "child-tl",
        }
        set {
            execution_timeout: i32 = 60,
            decision_timeout: i32 = 10,
        }
        option {
            input: Vec<u8> = None,
            control: Vec<u8> = None,
        }
    }
}

/// Request-cancel-external-workflow command from a completed decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCancelExternalAttributes {
    pub domain: String,
    pub workflow_execution: crate::execution::WorkflowExecution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

/// Signal-external-workflow command from a completed decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalExternalAttributes {
    pub domain: String,
    pub workflow_execution: crate::execution::WorkflowExecution,
    pub signal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}
