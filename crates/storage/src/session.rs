// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The write-set emitted when an update session closes.
//!
//! One `SessionUpdates` is the atomic diff the persistence driver applies
//! for a single update session: new history events, per-collection update
//! lists and (at most one per kind) deletions, the buffered-events delta,
//! and an optional continue-as-new create request.

use cascade_core::{
    ActivityInfo, ChildExecutionInfo, HistoryEvent, ParentExecution, RequestCancelInfo,
    SignalInfo, TimerInfo, WorkflowExecution,
};
use serde::{Deserialize, Serialize};

/// Transfer task dispatching the first decision of a new run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTransferTask {
    pub task_list: String,
    pub schedule_id: i64,
}

/// Create request staged when a run continues as new: everything the
/// persistence layer needs to write the successor run atomically with the
/// predecessor's close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueAsNewRequest {
    /// Idempotence key for the create, minted by the engine
    pub request_id: String,
    pub domain_id: String,
    pub execution: WorkflowExecution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentExecution>,
    pub task_list: String,
    pub workflow_type: String,
    pub execution_timeout: i32,
    pub decision_timeout: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<u8>>,
    /// The successor's next event ID after its seed events
    pub next_event_id: i64,
    pub last_processed_event: i64,
    pub decision_schedule_id: i64,
    pub decision_started_id: i64,
    pub decision_timeout_value: i32,
    pub transfer_task: DecisionTransferTask,
    /// Run ID of the execution being closed
    pub previous_run_id: String,
}

/// Diff produced by closing an update session.
///
/// Update lists are cloned snapshots in deterministic (key) order; deletes
/// are single-valued because the engine batches at most one deletion per
/// kind per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdates {
    /// Committed history events appended this session, in order
    pub new_events: Vec<HistoryEvent>,
    pub update_activity_infos: Vec<ActivityInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_activity_info: Option<i64>,
    pub update_timer_infos: Vec<TimerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_timer_info: Option<String>,
    pub update_child_execution_infos: Vec<ChildExecutionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_child_execution_info: Option<i64>,
    pub update_request_cancel_infos: Vec<RequestCancelInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_request_cancel_info: Option<i64>,
    pub update_signal_infos: Vec<SignalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_signal_info: Option<i64>,
    pub update_signal_requested_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_signal_requested_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_as_new: Option<ContinueAsNewRequest>,
    /// Buffered batch produced this session while a decision stayed in flight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_buffered_events: Option<Vec<u8>>,
    /// Tell persistence to drop its stored buffered batches
    pub clear_buffered_events: bool,
}

impl SessionUpdates {
    /// True when nothing changed this session.
    pub fn is_empty(&self) -> bool {
        self.new_events.is_empty()
            && self.update_activity_infos.is_empty()
            && self.delete_activity_info.is_none()
            && self.update_timer_infos.is_empty()
            && self.delete_timer_info.is_none()
            && self.update_child_execution_infos.is_empty()
            && self.delete_child_execution_info.is_none()
            && self.update_request_cancel_infos.is_empty()
            && self.delete_request_cancel_info.is_none()
            && self.update_signal_infos.is_empty()
            && self.delete_signal_info.is_none()
            && self.update_signal_requested_ids.is_empty()
            && self.delete_signal_requested_id.is_none()
            && self.continue_as_new.is_none()
            && self.new_buffered_events.is_none()
            && !self.clear_buffered_events
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
