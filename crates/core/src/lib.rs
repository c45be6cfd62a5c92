// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cascade-core: Event model and state records for the Cascade workflow engine

pub mod macros;

pub mod clock;
pub mod command;
pub mod event;
pub mod execution;
pub mod info;
pub mod state;

pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{
    ContinueAsNewAttributes, RequestCancelExternalAttributes, ScheduleActivityAttributes,
    SignalExternalAttributes, StartChildWorkflowAttributes, StartTimerAttributes,
    StartWorkflowRequest,
};
pub use event::{EventAttributes, EventType, HistoryEvent};
pub use execution::{ParentExecution, WorkflowExecution};
pub use info::{
    ActivityInfo, ChildExecutionInfo, DecisionInfo, ExecutionInfo, RequestCancelInfo, SignalInfo,
    Stickiness, TimerInfo,
};
pub use state::{
    timer_task_status, CloseStatus, TimeoutType, WorkflowState, BUFFERED_EVENT_ID, EMPTY_EVENT_ID,
    EMPTY_UUID, FIRST_EVENT_ID,
};
