// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! History builder: the ordered list of events produced this session.
//!
//! One `add_*` method per event kind. Event IDs and timestamps are supplied
//! by the mutable-state core (the builder never allocates IDs, inspects
//! pending collections, or enforces preconditions); attributes arrive fully
//! formed. The builder also fronts the event serializer for batch encoding.

use cascade_core::event::*;
use cascade_core::{EventAttributes, HistoryEvent};
use cascade_storage::{EventSerializer, SerializationError};

/// Ordered history segment under construction.
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    history: Vec<HistoryEvent>,
}

/// Generate one `add_*` method per event kind: each wraps its attribute
/// struct in the matching [`EventAttributes`] variant and appends.
macro_rules! builder_events {
    ($( $fn_name:ident => $variant:ident ( $attrs:ty ) ),+ $(,)?) => {
        impl HistoryBuilder {
            $(
                pub fn $fn_name(
                    &mut self,
                    event_id: i64,
                    timestamp: i64,
                    attributes: $attrs,
                ) -> &HistoryEvent {
                    self.append(HistoryEvent {
                        event_id,
                        timestamp,
                        attributes: EventAttributes::$variant(attributes),
                    })
                }
            )+
        }
    };
}

builder_events! {
    add_workflow_execution_started => WorkflowExecutionStarted(WorkflowExecutionStartedAttributes),
    add_workflow_execution_completed => WorkflowExecutionCompleted(WorkflowExecutionCompletedAttributes),
    add_workflow_execution_failed => WorkflowExecutionFailed(WorkflowExecutionFailedAttributes),
    add_workflow_execution_timed_out => WorkflowExecutionTimedOut(WorkflowExecutionTimedOutAttributes),
    add_workflow_execution_canceled => WorkflowExecutionCanceled(WorkflowExecutionCanceledAttributes),
    add_workflow_execution_terminated => WorkflowExecutionTerminated(WorkflowExecutionTerminatedAttributes),
    add_workflow_execution_continued_as_new => WorkflowExecutionContinuedAsNew(WorkflowExecutionContinuedAsNewAttributes),
    add_workflow_execution_cancel_requested => WorkflowExecutionCancelRequested(WorkflowExecutionCancelRequestedAttributes),
    add_workflow_execution_signaled => WorkflowExecutionSignaled(WorkflowExecutionSignaledAttributes),
    add_marker_recorded => MarkerRecorded(MarkerRecordedAttributes),
    add_decision_task_scheduled => DecisionTaskScheduled(DecisionTaskScheduledAttributes),
    add_decision_task_started => DecisionTaskStarted(DecisionTaskStartedAttributes),
    add_decision_task_completed => DecisionTaskCompleted(DecisionTaskCompletedAttributes),
    add_decision_task_timed_out => DecisionTaskTimedOut(DecisionTaskTimedOutAttributes),
    add_decision_task_failed => DecisionTaskFailed(DecisionTaskFailedAttributes),
    add_activity_task_scheduled => ActivityTaskScheduled(ActivityTaskScheduledAttributes),
    add_activity_task_started => ActivityTaskStarted(ActivityTaskStartedAttributes),
    add_activity_task_completed => ActivityTaskCompleted(ActivityTaskCompletedAttributes),
    add_activity_task_failed => ActivityTaskFailed(ActivityTaskFailedAttributes),
    add_activity_task_timed_out => ActivityTaskTimedOut(ActivityTaskTimedOutAttributes),
    add_activity_task_cancel_requested => ActivityTaskCancelRequested(ActivityTaskCancelRequestedAttributes),
    add_request_cancel_activity_task_failed => RequestCancelActivityTaskFailed(RequestCancelActivityTaskFailedAttributes),
    add_activity_task_canceled => ActivityTaskCanceled(ActivityTaskCanceledAttributes),
    add_timer_started => TimerStarted(TimerStartedAttributes),
    add_timer_fired => TimerFired(TimerFiredAttributes),
    add_timer_canceled => TimerCanceled(TimerCanceledAttributes),
    add_cancel_timer_failed => CancelTimerFailed(CancelTimerFailedAttributes),
    add_request_cancel_external_initiated => RequestCancelExternalWorkflowExecutionInitiated(RequestCancelExternalWorkflowExecutionInitiatedAttributes),
    add_request_cancel_external_failed => RequestCancelExternalWorkflowExecutionFailed(RequestCancelExternalWorkflowExecutionFailedAttributes),
    add_external_workflow_cancel_requested => ExternalWorkflowExecutionCancelRequested(ExternalWorkflowExecutionCancelRequestedAttributes),
    add_signal_external_initiated => SignalExternalWorkflowExecutionInitiated(SignalExternalWorkflowExecutionInitiatedAttributes),
    add_signal_external_failed => SignalExternalWorkflowExecutionFailed(SignalExternalWorkflowExecutionFailedAttributes),
    add_external_workflow_signaled => ExternalWorkflowExecutionSignaled(ExternalWorkflowExecutionSignaledAttributes),
    add_start_child_workflow_initiated => StartChildWorkflowExecutionInitiated(StartChildWorkflowExecutionInitiatedAttributes),
    add_start_child_workflow_failed => StartChildWorkflowExecutionFailed(StartChildWorkflowExecutionFailedAttributes),
    add_child_workflow_started => ChildWorkflowExecutionStarted(ChildWorkflowExecutionStartedAttributes),
    add_child_workflow_completed => ChildWorkflowExecutionCompleted(ChildWorkflowExecutionCompletedAttributes),
    add_child_workflow_failed => ChildWorkflowExecutionFailed(ChildWorkflowExecutionFailedAttributes),
    add_child_workflow_canceled => ChildWorkflowExecutionCanceled(ChildWorkflowExecutionCanceledAttributes),
    add_child_workflow_timed_out => ChildWorkflowExecutionTimedOut(ChildWorkflowExecutionTimedOutAttributes),
    add_child_workflow_terminated => ChildWorkflowExecutionTerminated(ChildWorkflowExecutionTerminatedAttributes),
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&mut self, event: HistoryEvent) -> &HistoryEvent {
        self.history.push(event);
        // Safe index: just pushed
        &self.history[self.history.len() - 1]
    }

    /// Append a fully-formed event. Used by operations that must serialize
    /// the event before committing it (the attributes are already wrapped).
    pub(crate) fn push_event(&mut self, event: HistoryEvent) -> &HistoryEvent {
        self.append(event)
    }

    pub fn history(&self) -> &[HistoryEvent] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// True if any event in the segment still carries the buffered sentinel.
    pub fn has_buffered(&self) -> bool {
        self.history.iter().any(HistoryEvent::is_buffered)
    }

    /// Split the segment into (committed, buffered) by sentinel ID,
    /// preserving order within each part.
    pub fn partition_buffered(&mut self) -> (Vec<HistoryEvent>, Vec<HistoryEvent>) {
        let mut committed = Vec::with_capacity(self.history.len());
        let mut buffered = Vec::new();
        for event in self.history.drain(..) {
            if event.is_buffered() {
                buffered.push(event);
            } else {
                committed.push(event);
            }
        }
        (committed, buffered)
    }

    /// Replace the segment wholesale (used by the buffer engine after a
    /// flush re-ordered and re-numbered events).
    pub fn replace_history(&mut self, history: Vec<HistoryEvent>) {
        self.history = history;
    }

    /// Hand the finished segment to session staging, leaving the builder
    /// empty for the next session.
    pub fn take_history(&mut self) -> Vec<HistoryEvent> {
        std::mem::take(&mut self.history)
    }

    pub fn serialize_batch(
        &self,
        serializer: &EventSerializer,
        events: &[HistoryEvent],
    ) -> Result<Vec<u8>, SerializationError> {
        serializer.serialize_batch(events)
    }

    pub fn deserialize_batch(
        &self,
        serializer: &EventSerializer,
        data: &[u8],
    ) -> Result<Vec<HistoryEvent>, SerializationError> {
        serializer.deserialize_batch(data)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
