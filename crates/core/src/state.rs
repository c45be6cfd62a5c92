// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow state, close status, timeout kinds, and sentinel constants.

use serde::{Deserialize, Serialize};

/// Initial value of `next_event_id` for a fresh execution.
pub const FIRST_EVENT_ID: i64 = 1;

/// Sentinel meaning "no event assigned" (e.g. an activity not yet started).
pub const EMPTY_EVENT_ID: i64 = -1;

/// Sentinel stamped on events produced while a decision is in flight;
/// replaced by a real ID when the buffer is flushed.
pub const BUFFERED_EVENT_ID: i64 = -2;

/// Sentinel meaning "no request ID" (e.g. no decision currently started).
pub const EMPTY_UUID: &str = "";

/// Lifecycle state of a workflow execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Start event recorded, first decision not yet started
    Created,
    /// A decision has started; the workflow is making progress
    Running,
    /// A terminal event has been recorded
    Completed,
}

crate::simple_display! {
    WorkflowState {
        Created => "created",
        Running => "running",
        Completed => "completed",
    }
}

/// How a completed workflow execution closed.
///
/// `None` iff the execution is not in [`WorkflowState::Completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseStatus {
    None,
    Completed,
    Failed,
    Canceled,
    Terminated,
    TimedOut,
    ContinuedAsNew,
}

crate::simple_display! {
    CloseStatus {
        None => "none",
        Completed => "completed",
        Failed => "failed",
        Canceled => "canceled",
        Terminated => "terminated",
        TimedOut => "timed_out",
        ContinuedAsNew => "continued_as_new",
    }
}

/// Which timeout fired for a timeout event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutType {
    StartToClose,
    ScheduleToStart,
    ScheduleToClose,
    Heartbeat,
}

crate::simple_display! {
    TimeoutType {
        StartToClose => "start_to_close",
        ScheduleToStart => "schedule_to_start",
        ScheduleToClose => "schedule_to_close",
        Heartbeat => "heartbeat",
    }
}

/// Bitmap recording which timer-queue tasks have been created for a
/// pending activity or user timer. Owned by the timer-queue processor;
/// the engine only stores it.
pub mod timer_task_status {
    pub const NONE: i32 = 0;
    pub const CREATED: i32 = 1;
    pub const CREATED_START_TO_CLOSE: i32 = 1 << 1;
    pub const CREATED_SCHEDULE_TO_START: i32 = 1 << 2;
    pub const CREATED_SCHEDULE_TO_CLOSE: i32 = 1 << 3;
    pub const CREATED_HEARTBEAT: i32 = 1 << 4;
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
