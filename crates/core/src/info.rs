// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable-state records: the execution header and the pending-collection
//! entries for activities, timers, children, cancellations, and signals.
//!
//! These are the persistence-shaped rows the engine mutates in memory and
//! stages for the write-set at session close.

use crate::execution::ParentExecution;
use crate::state::{CloseStatus, WorkflowState, EMPTY_EVENT_ID, EMPTY_UUID, FIRST_EVENT_ID};
use serde::{Deserialize, Serialize};

/// Sticky task-list affinity for decision routing.
///
/// Present while a worker holds decision affinity; cleared whenever a
/// decision fails or its schedule-to-start timeout fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stickiness {
    pub task_list: String,
    /// Schedule-to-start timeout for the sticky task list, seconds
    pub schedule_to_start_timeout: i32,
    pub client_library_version: String,
    pub client_feature_version: String,
    pub client_impl: String,
}

/// The in-flight (or pending) decision task, as returned by queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionInfo {
    pub schedule_id: i64,
    pub started_id: i64,
    pub request_id: String,
    /// Start-to-close timeout, seconds
    pub decision_timeout: i32,
    pub attempt: i64,
    /// Wall-clock nanos when a transient decision started; 0 when the
    /// started event is materialized in history
    pub timestamp: i64,
}

impl DecisionInfo {
    /// The empty decision: no schedule, no start, attempt reset.
    pub fn none() -> Self {
        Self {
            schedule_id: EMPTY_EVENT_ID,
            started_id: EMPTY_EVENT_ID,
            request_id: EMPTY_UUID.to_string(),
            decision_timeout: 0,
            attempt: 0,
            timestamp: 0,
        }
    }
}

/// Singleton header for one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionInfo {
    pub domain_id: String,
    pub workflow_id: String,
    pub run_id: String,
    pub workflow_type: String,
    pub task_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<Stickiness>,
    /// Execution start-to-close timeout, seconds
    pub execution_timeout: i32,
    /// Decision task start-to-close timeout, seconds
    pub decision_timeout: i32,
    pub state: WorkflowState,
    pub close_status: CloseStatus,
    pub next_event_id: i64,
    pub last_processed_event: i64,
    /// First event ID of the most recent persisted history batch
    pub last_first_event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentExecution>,
    /// Serialized completion event, retained iff this run has a parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_event: Option<Vec<u8>>,
    pub create_request_id: String,
    pub cancel_requested: bool,
    #[serde(default)]
    pub cancel_request_id: String,
    // current decision
    pub decision_schedule_id: i64,
    pub decision_started_id: i64,
    pub decision_request_id: String,
    pub decision_timeout_value: i32,
    pub decision_attempt: i64,
    pub decision_timestamp: i64,
    /// Wall-clock nanos when the execution started
    pub start_timestamp: i64,
    /// Wall-clock nanos of the last persisted update
    pub last_updated_timestamp: i64,
}

impl Default for ExecutionInfo {
    fn default() -> Self {
        Self {
            domain_id: String::new(),
            workflow_id: String::new(),
            run_id: String::new(),
            workflow_type: String::new(),
            task_list: String::new(),
            sticky: None,
            execution_timeout: 0,
            decision_timeout: 0,
            state: WorkflowState::Created,
            close_status: CloseStatus::None,
            next_event_id: FIRST_EVENT_ID,
            last_processed_event: EMPTY_EVENT_ID,
            last_first_event_id: EMPTY_EVENT_ID,
            parent: None,
            completion_event: None,
            create_request_id: String::new(),
            cancel_requested: false,
            cancel_request_id: String::new(),
            decision_schedule_id: EMPTY_EVENT_ID,
            decision_started_id: EMPTY_EVENT_ID,
            decision_request_id: EMPTY_UUID.to_string(),
            decision_timeout_value: 0,
            decision_attempt: 0,
            decision_timestamp: 0,
            start_timestamp: 0,
            last_updated_timestamp: 0,
        }
    }
}

impl ExecutionInfo {
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_sticky_task_list_enabled(&self) -> bool {
        self.sticky.is_some()
    }

    /// Drop decision affinity: sticky task list, its schedule-to-start
    /// timeout, and the client version triple.
    pub fn clear_stickyness(&mut self) {
        self.sticky = None;
    }

    /// Consume and return the next event ID.
    pub fn increase_next_event_id(&mut self) -> i64 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        id
    }

    /// Current decision fields as a [`DecisionInfo`].
    pub fn decision_info(&self) -> DecisionInfo {
        DecisionInfo {
            schedule_id: self.decision_schedule_id,
            started_id: self.decision_started_id,
            request_id: self.decision_request_id.clone(),
            decision_timeout: self.decision_timeout_value,
            attempt: self.decision_attempt,
            timestamp: self.decision_timestamp,
        }
    }

    /// Overwrite the current decision fields.
    pub fn set_decision(&mut self, di: &DecisionInfo) {
        self.decision_schedule_id = di.schedule_id;
        self.decision_started_id = di.started_id;
        self.decision_request_id = di.request_id.clone();
        self.decision_timeout_value = di.decision_timeout;
        self.decision_attempt = di.attempt;
        self.decision_timestamp = di.timestamp;
    }

    /// Last-updated timestamp with the clock-skew correction: never at or
    /// before the start timestamp.
    pub fn last_updated_time(&self) -> i64 {
        let last_updated = self.last_updated_timestamp;
        if self.start_timestamp >= last_updated {
            // This could happen due to clock skews; keep last-updated
            // strictly after the start timestamp.
            return self.start_timestamp + 1;
        }
        last_updated
    }
}

/// A pending activity, keyed by its schedule-event ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub schedule_id: i64,
    /// Serialized ActivityTaskScheduled event
    pub scheduled_event: Vec<u8>,
    /// Wall-clock nanos of the scheduled event
    pub scheduled_time: i64,
    pub started_id: i64,
    /// Wall-clock nanos of the started event; 0 until started
    pub started_time: i64,
    pub activity_id: String,
    /// Idempotence key of the poll that started the activity
    #[serde(default)]
    pub request_id: String,
    pub schedule_to_start_timeout: i32,
    pub schedule_to_close_timeout: i32,
    pub start_to_close_timeout: i32,
    pub heartbeat_timeout: i32,
    pub cancel_requested: bool,
    /// Event ID of the ActivityTaskCancelRequested event
    pub cancel_request_id: i64,
    /// Wall-clock nanos of the last recorded heartbeat
    #[serde(default)]
    pub last_heartbeat_updated_time: i64,
    /// Bitmap of timer-queue tasks created for this activity
    #[serde(default)]
    pub timer_task_status: i32,
}

/// A pending user timer, keyed by its timer ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerInfo {
    pub timer_id: String,
    /// Wall-clock nanos at which the timer fires
    pub expiry_time: i64,
    pub started_id: i64,
    /// Timer-queue task status
    #[serde(default)]
    pub task_status: i32,
}

/// A pending child workflow execution, keyed by its initiated-event ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildExecutionInfo {
    pub initiated_id: i64,
    /// Serialized StartChildWorkflowExecutionInitiated event
    pub initiated_event: Vec<u8>,
    pub started_id: i64,
    /// Serialized ChildWorkflowExecutionStarted event; empty until started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_event: Option<Vec<u8>>,
    pub create_request_id: String,
}

/// A pending external-workflow cancellation request, keyed by its
/// initiated-event ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCancelInfo {
    pub initiated_id: i64,
    pub cancel_request_id: String,
}

/// A pending external-workflow signal, keyed by its initiated-event ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    pub initiated_id: i64,
    pub signal_request_id: String,
    pub signal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Vec<u8>>,
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;
