// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! History event types for the Cascade workflow engine.

mod attributes;
mod methods;

pub use attributes::*;

use crate::state::BUFFERED_EVENT_ID;
use serde::{Deserialize, Serialize};

/// One record in a workflow execution's history.
///
/// `event_id` is either a final sequential ID or the buffered sentinel
/// ([`BUFFERED_EVENT_ID`]) while a decision is in flight. `timestamp` is
/// wall-clock nanoseconds at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub event_id: i64,
    pub timestamp: i64,
    #[serde(flatten)]
    pub attributes: EventAttributes,
}

impl HistoryEvent {
    pub fn event_type(&self) -> EventType {
        EventType::from(&self.attributes)
    }

    /// True while this event awaits a final ID from the buffer engine.
    pub fn is_buffered(&self) -> bool {
        self.event_id == BUFFERED_EVENT_ID
    }
}

/// Kind-specific payload of a history event.
///
/// Serializes with `{"type": "family:event", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventAttributes {
    // -- workflow --
    #[serde(rename = "workflow:started")]
    WorkflowExecutionStarted(WorkflowExecutionStartedAttributes),

    #[serde(rename = "workflow:completed")]
    WorkflowExecutionCompleted(WorkflowExecutionCompletedAttributes),

    #[serde(rename = "workflow:failed")]
    WorkflowExecutionFailed(WorkflowExecutionFailedAttributes),

    #[serde(rename = "workflow:timed_out")]
    WorkflowExecutionTimedOut(WorkflowExecutionTimedOutAttributes),

    #[serde(rename = "workflow:canceled")]
    WorkflowExecutionCanceled(WorkflowExecutionCanceledAttributes),

    #[serde(rename = "workflow:terminated")]
    WorkflowExecutionTerminated(WorkflowExecutionTerminatedAttributes),

    #[serde(rename = "workflow:continued_as_new")]
    WorkflowExecutionContinuedAsNew(WorkflowExecutionContinuedAsNewAttributes),

    #[serde(rename = "workflow:cancel_requested")]
    WorkflowExecutionCancelRequested(WorkflowExecutionCancelRequestedAttributes),

    #[serde(rename = "workflow:signaled")]
    WorkflowExecutionSignaled(WorkflowExecutionSignaledAttributes),

    #[serde(rename = "marker:recorded")]
    MarkerRecorded(MarkerRecordedAttributes),

    // -- decision --
    #[serde(rename = "decision:scheduled")]
    DecisionTaskScheduled(DecisionTaskScheduledAttributes),

    #[serde(rename = "decision:started")]
    DecisionTaskStarted(DecisionTaskStartedAttributes),

    #[serde(rename = "decision:completed")]
    DecisionTaskCompleted(DecisionTaskCompletedAttributes),

    #[serde(rename = "decision:timed_out")]
    DecisionTaskTimedOut(DecisionTaskTimedOutAttributes),

    #[serde(rename = "decision:failed")]
    DecisionTaskFailed(DecisionTaskFailedAttributes),

    // -- activity --
    #[serde(rename = "activity:scheduled")]
    ActivityTaskScheduled(ActivityTaskScheduledAttributes),

    #[serde(rename = "activity:started")]
    ActivityTaskStarted(ActivityTaskStartedAttributes),

    #[serde(rename = "activity:completed")]
    ActivityTaskCompleted(ActivityTaskCompletedAttributes),

    #[serde(rename = "activity:failed")]
    ActivityTaskFailed(ActivityTaskFailedAttributes),

    #[serde(rename = "activity:timed_out")]
    ActivityTaskTimedOut(ActivityTaskTimedOutAttributes),

    #[serde(rename = "activity:cancel_requested")]
    ActivityTaskCancelRequested(ActivityTaskCancelRequestedAttributes),

    #[serde(rename = "activity:cancel_failed")]
    RequestCancelActivityTaskFailed(RequestCancelActivityTaskFailedAttributes),

    #[serde(rename = "activity:canceled")]
    ActivityTaskCanceled(ActivityTaskCanceledAttributes),

    // -- timer --
    #[serde(rename = "timer:started")]
    TimerStarted(TimerStartedAttributes),

    #[serde(rename = "timer:fired")]
    TimerFired(TimerFiredAttributes),

    #[serde(rename = "timer:canceled")]
    TimerCanceled(TimerCanceledAttributes),

    #[serde(rename = "timer:cancel_failed")]
    CancelTimerFailed(CancelTimerFailedAttributes),

    // -- external cancel --
    #[serde(rename = "external_cancel:initiated")]
    RequestCancelExternalWorkflowExecutionInitiated(
        RequestCancelExternalWorkflowExecutionInitiatedAttributes,
    ),

    #[serde(rename = "external_cancel:failed")]
    RequestCancelExternalWorkflowExecutionFailed(
        RequestCancelExternalWorkflowExecutionFailedAttributes,
    ),

    #[serde(rename = "external_cancel:requested")]
    ExternalWorkflowExecutionCancelRequested(ExternalWorkflowExecutionCancelRequestedAttributes),

    // -- external signal --
    #[serde(rename = "external_signal:initiated")]
    SignalExternalWorkflowExecutionInitiated(SignalExternalWorkflowExecutionInitiatedAttributes),

    #[serde(rename = "external_signal:failed")]
    SignalExternalWorkflowExecutionFailed(SignalExternalWorkflowExecutionFailedAttributes),

    #[serde(rename = "external_signal:signaled")]
    ExternalWorkflowExecutionSignaled(ExternalWorkflowExecutionSignaledAttributes),

    // -- child workflow --
    #[serde(rename = "child:initiated")]
    StartChildWorkflowExecutionInitiated(StartChildWorkflowExecutionInitiatedAttributes),

    #[serde(rename = "child:start_failed")]
    StartChildWorkflowExecutionFailed(StartChildWorkflowExecutionFailedAttributes),

    #[serde(rename = "child:started")]
    ChildWorkflowExecutionStarted(ChildWorkflowExecutionStartedAttributes),

    #[serde(rename = "child:completed")]
    ChildWorkflowExecutionCompleted(ChildWorkflowExecutionCompletedAttributes),

    #[serde(rename = "child:failed")]
    ChildWorkflowExecutionFailed(ChildWorkflowExecutionFailedAttributes),

    #[serde(rename = "child:canceled")]
    ChildWorkflowExecutionCanceled(ChildWorkflowExecutionCanceledAttributes),

    #[serde(rename = "child:timed_out")]
    ChildWorkflowExecutionTimedOut(ChildWorkflowExecutionTimedOutAttributes),

    #[serde(rename = "child:terminated")]
    ChildWorkflowExecutionTerminated(ChildWorkflowExecutionTerminatedAttributes),
}

/// Tag-only variant of [`EventAttributes`] for classification and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    WorkflowExecutionStarted,
    WorkflowExecutionCompleted,
    WorkflowExecutionFailed,
    WorkflowExecutionTimedOut,
    WorkflowExecutionCanceled,
    WorkflowExecutionTerminated,
    WorkflowExecutionContinuedAsNew,
    WorkflowExecutionCancelRequested,
    WorkflowExecutionSignaled,
    MarkerRecorded,
    DecisionTaskScheduled,
    DecisionTaskStarted,
    DecisionTaskCompleted,
    DecisionTaskTimedOut,
    DecisionTaskFailed,
    ActivityTaskScheduled,
    ActivityTaskStarted,
    ActivityTaskCompleted,
    ActivityTaskFailed,
    ActivityTaskTimedOut,
    ActivityTaskCancelRequested,
    RequestCancelActivityTaskFailed,
    ActivityTaskCanceled,
    TimerStarted,
    TimerFired,
    TimerCanceled,
    CancelTimerFailed,
    RequestCancelExternalWorkflowExecutionInitiated,
    RequestCancelExternalWorkflowExecutionFailed,
    ExternalWorkflowExecutionCancelRequested,
    SignalExternalWorkflowExecutionInitiated,
    SignalExternalWorkflowExecutionFailed,
    ExternalWorkflowExecutionSignaled,
    StartChildWorkflowExecutionInitiated,
    StartChildWorkflowExecutionFailed,
    ChildWorkflowExecutionStarted,
    ChildWorkflowExecutionCompleted,
    ChildWorkflowExecutionFailed,
    ChildWorkflowExecutionCanceled,
    ChildWorkflowExecutionTimedOut,
    ChildWorkflowExecutionTerminated,
}

impl From<&EventAttributes> for EventType {
    fn from(a: &EventAttributes) -> Self {
        match a {
            EventAttributes::WorkflowExecutionStarted(_) => EventType::WorkflowExecutionStarted,
            EventAttributes::WorkflowExecutionCompleted(_) => EventType::WorkflowExecutionCompleted,
            EventAttributes::WorkflowExecutionFailed(_) => EventType::WorkflowExecutionFailed,
            EventAttributes::WorkflowExecutionTimedOut(_) => EventType::WorkflowExecutionTimedOut,
            EventAttributes::WorkflowExecutionCanceled(_) => EventType::WorkflowExecutionCanceled,
            EventAttributes::WorkflowExecutionTerminated(_) => {
                EventType::WorkflowExecutionTerminated
            }
            EventAttributes::WorkflowExecutionContinuedAsNew(_) => {
                EventType::WorkflowExecutionContinuedAsNew
            }
            EventAttributes::WorkflowExecutionCancelRequested(_) => {
                EventType::WorkflowExecutionCancelRequested
            }
            EventAttributes::WorkflowExecutionSignaled(_) => EventType::WorkflowExecutionSignaled,
            EventAttributes::MarkerRecorded(_) => EventType::MarkerRecorded,
            EventAttributes::DecisionTaskScheduled(_) => EventType::DecisionTaskScheduled,
            EventAttributes::DecisionTaskStarted(_) => EventType::DecisionTaskStarted,
            EventAttributes::DecisionTaskCompleted(_) => EventType::DecisionTaskCompleted,
            EventAttributes::DecisionTaskTimedOut(_) => EventType::DecisionTaskTimedOut,
            EventAttributes::DecisionTaskFailed(_) => EventType::DecisionTaskFailed,
            EventAttributes::ActivityTaskScheduled(_) => EventType::ActivityTaskScheduled,
            EventAttributes::ActivityTaskStarted(_) => EventType::ActivityTaskStarted,
            EventAttributes::ActivityTaskCompleted(_) => EventType::ActivityTaskCompleted,
            EventAttributes::ActivityTaskFailed(_) => EventType::ActivityTaskFailed,
            EventAttributes::ActivityTaskTimedOut(_) => EventType::ActivityTaskTimedOut,
            EventAttributes::ActivityTaskCancelRequested(_) => {
                EventType::ActivityTaskCancelRequested
            }
            EventAttributes::RequestCancelActivityTaskFailed(_) => {
                EventType::RequestCancelActivityTaskFailed
            }
            EventAttributes::ActivityTaskCanceled(_) => EventType::ActivityTaskCanceled,
            EventAttributes::TimerStarted(_) => EventType::TimerStarted,
            EventAttributes::TimerFired(_) => EventType::TimerFired,
            EventAttributes::TimerCanceled(_) => EventType::TimerCanceled,
            EventAttributes::CancelTimerFailed(_) => EventType::CancelTimerFailed,
            EventAttributes::RequestCancelExternalWorkflowExecutionInitiated(_) => {
                EventType::RequestCancelExternalWorkflowExecutionInitiated
            }
            EventAttributes::RequestCancelExternalWorkflowExecutionFailed(_) => {
                EventType::RequestCancelExternalWorkflowExecutionFailed
            }
            EventAttributes::ExternalWorkflowExecutionCancelRequested(_) => {
                EventType::ExternalWorkflowExecutionCancelRequested
            }
            EventAttributes::SignalExternalWorkflowExecutionInitiated(_) => {
                EventType::SignalExternalWorkflowExecutionInitiated
            }
            EventAttributes::SignalExternalWorkflowExecutionFailed(_) => {
                EventType::SignalExternalWorkflowExecutionFailed
            }
            EventAttributes::ExternalWorkflowExecutionSignaled(_) => {
                EventType::ExternalWorkflowExecutionSignaled
            }
            EventAttributes::StartChildWorkflowExecutionInitiated(_) => {
                EventType::StartChildWorkflowExecutionInitiated
            }
            EventAttributes::StartChildWorkflowExecutionFailed(_) => {
                EventType::StartChildWorkflowExecutionFailed
            }
            EventAttributes::ChildWorkflowExecutionStarted(_) => {
                EventType::ChildWorkflowExecutionStarted
            }
            EventAttributes::ChildWorkflowExecutionCompleted(_) => {
                EventType::ChildWorkflowExecutionCompleted
            }
            EventAttributes::ChildWorkflowExecutionFailed(_) => {
                EventType::ChildWorkflowExecutionFailed
            }
            EventAttributes::ChildWorkflowExecutionCanceled(_) => {
                EventType::ChildWorkflowExecutionCanceled
            }
            EventAttributes::ChildWorkflowExecutionTimedOut(_) => {
                EventType::ChildWorkflowExecutionTimedOut
            }
            EventAttributes::ChildWorkflowExecutionTerminated(_) => {
                EventType::ChildWorkflowExecutionTerminated
            }
        }
    }
}

impl EventType {
    /// Kinds that are never buffered: they either close the in-flight
    /// decision or close the workflow itself.
    pub fn is_unbufferable(self) -> bool {
        matches!(
            self,
            EventType::DecisionTaskCompleted
                | EventType::DecisionTaskFailed
                | EventType::DecisionTaskTimedOut
                | EventType::WorkflowExecutionCompleted
                | EventType::WorkflowExecutionFailed
                | EventType::WorkflowExecutionTimedOut
                | EventType::WorkflowExecutionTerminated
                | EventType::WorkflowExecutionContinuedAsNew
                | EventType::WorkflowExecutionCanceled
        )
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
