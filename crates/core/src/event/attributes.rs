// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-kind event attribute payloads.
//!
//! Only semantic fields are modeled; the wire format beyond these fields is
//! owned by the serializer. Event IDs referenced here may temporarily hold
//! the buffered sentinel until the buffer engine assigns final IDs.

use crate::execution::WorkflowExecution;
use crate::state::TimeoutType;
use serde::{Deserialize, Serialize};

// -- workflow --

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionStartedAttributes {
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
    /// Run ID of the predecessor when this run was created by continue-as-new
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continued_execution_run_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionCompletedAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<u8>>,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionFailedAttributes {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionTimedOutAttributes {
    pub timeout_type: TimeoutType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionCanceledAttributes {
    pub decision_task_completed_event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionTerminatedAttributes {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    #[serde(default)]
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionContinuedAsNewAttributes {
    pub new_execution_run_id: String,
    pub workflow_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    pub execution_timeout: i32,
    pub decision_timeout: i32,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionCancelRequestedAttributes {
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub identity: String,
    pub request_id: String,
    /// Set when the cancel came from another workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_initiated_event_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_execution: Option<WorkflowExecution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecutionSignaledAttributes {
    pub signal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    #[serde(default)]
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRecordedAttributes {
    pub marker_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub decision_task_completed_event_id: i64,
}

// -- decision --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTaskScheduledAttributes {
    pub task_list: String,
    /// Start-to-close timeout, seconds
    pub start_to_close_timeout: i32,
    /// Retry attempt; > 0 only for materialized transient decisions
    #[serde(default)]
    pub attempt: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTaskStartedAttributes {
    pub scheduled_event_id: i64,
    #[serde(default)]
    pub identity: String,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTaskCompletedAttributes {
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    #[serde(default)]
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTaskTimedOutAttributes {
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    pub timeout_type: TimeoutType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTaskFailedAttributes {
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    pub cause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    #[serde(default)]
    pub identity: String,
}

// -- activity --

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskScheduledAttributes {
    pub activity_id: String,
    pub activity_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    pub schedule_to_close_timeout: i32,
    pub schedule_to_start_timeout: i32,
    pub start_to_close_timeout: i32,
    pub heartbeat_timeout: i32,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskStartedAttributes {
    pub scheduled_event_id: i64,
    #[serde(default)]
    pub identity: String,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskCompletedAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<u8>>,
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    #[serde(default)]
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskFailedAttributes {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    #[serde(default)]
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskTimedOutAttributes {
    /// Last recorded heartbeat details, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    pub timeout_type: TimeoutType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskCancelRequestedAttributes {
    pub activity_id: String,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCancelActivityTaskFailedAttributes {
    pub activity_id: String,
    pub cause: String,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTaskCanceledAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub latest_cancel_requested_event_id: i64,
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    #[serde(default)]
    pub identity: String,
}

// -- timer --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStartedAttributes {
    pub timer_id: String,
    /// Seconds until the timer fires
    pub start_to_fire_timeout: i64,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerFiredAttributes {
    pub timer_id: String,
    pub started_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerCanceledAttributes {
    pub timer_id: String,
    pub started_event_id: i64,
    pub decision_task_completed_event_id: i64,
    #[serde(default)]
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTimerFailedAttributes {
    pub timer_id: String,
    pub cause: String,
    pub decision_task_completed_event_id: i64,
    #[serde(default)]
    pub identity: String,
}

// -- external cancel --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCancelExternalWorkflowExecutionInitiatedAttributes {
    pub decision_task_completed_event_id: i64,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCancelExternalWorkflowExecutionFailedAttributes {
    pub cause: String,
    pub decision_task_completed_event_id: i64,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub initiated_event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalWorkflowExecutionCancelRequestedAttributes {
    pub initiated_event_id: i64,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
}

// -- external signal --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalExternalWorkflowExecutionInitiatedAttributes {
    pub decision_task_completed_event_id: i64,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub signal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalExternalWorkflowExecutionFailedAttributes {
    pub cause: String,
    pub decision_task_completed_event_id: i64,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub initiated_event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalWorkflowExecutionSignaledAttributes {
    pub initiated_event_id: i64,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

// -- child workflow --

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartChildWorkflowExecutionInitiatedAttributes {
    pub domain: String,
    pub workflow_id: String,
    pub workflow_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    pub execution_timeout: i32,
    pub decision_timeout: i32,
    pub decision_task_completed_event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartChildWorkflowExecutionFailedAttributes {
    pub domain: String,
    pub workflow_id: String,
    pub workflow_type: String,
    pub cause: String,
    pub initiated_event_id: i64,
    pub decision_task_completed_event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowExecutionStartedAttributes {
    pub domain: String,
    pub initiated_event_id: i64,
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowExecutionCompletedAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<u8>>,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
    pub initiated_event_id: i64,
    pub started_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowExecutionFailedAttributes {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
    pub initiated_event_id: i64,
    pub started_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowExecutionCanceledAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<u8>>,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
    pub initiated_event_id: i64,
    pub started_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowExecutionTimedOutAttributes {
    pub timeout_type: TimeoutType,
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
    pub initiated_event_id: i64,
    pub started_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowExecutionTerminatedAttributes {
    pub domain: String,
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
    pub initiated_event_id: i64,
    pub started_event_id: i64,
}
