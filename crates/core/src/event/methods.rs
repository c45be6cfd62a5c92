// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event methods — names, log summaries, flush-time correlation accessors

use super::{EventAttributes, EventType, HistoryEvent};

impl EventType {
    pub fn name(self) -> &'static str {
        match self {
            EventType::WorkflowExecutionStarted => "workflow:started",
            EventType::WorkflowExecutionCompleted => "workflow:completed",
            EventType::WorkflowExecutionFailed => "workflow:failed",
            EventType::WorkflowExecutionTimedOut => "workflow:timed_out",
            EventType::WorkflowExecutionCanceled => "workflow:canceled",
            EventType::WorkflowExecutionTerminated => "workflow:terminated",
            EventType::WorkflowExecutionContinuedAsNew => "workflow:continued_as_new",
            EventType::WorkflowExecutionCancelRequested => "workflow:cancel_requested",
            EventType::WorkflowExecutionSignaled => "workflow:signaled",
            EventType::MarkerRecorded => "marker:recorded",
            EventType::DecisionTaskScheduled => "decision:scheduled",
            EventType::DecisionTaskStarted => "decision:started",
            EventType::DecisionTaskCompleted => "decision:completed",
            EventType::DecisionTaskTimedOut => "decision:timed_out",
            EventType::DecisionTaskFailed => "decision:failed",
            EventType::ActivityTaskScheduled => "activity:scheduled",
            EventType::ActivityTaskStarted => "activity:started",
            EventType::ActivityTaskCompleted => "activity:completed",
            EventType::ActivityTaskFailed => "activity:failed",
            EventType::ActivityTaskTimedOut => "activity:timed_out",
            EventType::ActivityTaskCancelRequested => "activity:cancel_requested",
            EventType::RequestCancelActivityTaskFailed => "activity:cancel_failed",
            EventType::ActivityTaskCanceled => "activity:canceled",
            EventType::TimerStarted => "timer:started",
            EventType::TimerFired => "timer:fired",
            EventType::TimerCanceled => "timer:canceled",
            EventType::CancelTimerFailed => "timer:cancel_failed",
            EventType::RequestCancelExternalWorkflowExecutionInitiated => {
                "external_cancel:initiated"
            }
            EventType::RequestCancelExternalWorkflowExecutionFailed => "external_cancel:failed",
            EventType::ExternalWorkflowExecutionCancelRequested => "external_cancel:requested",
            EventType::SignalExternalWorkflowExecutionInitiated => "external_signal:initiated",
            EventType::SignalExternalWorkflowExecutionFailed => "external_signal:failed",
            EventType::ExternalWorkflowExecutionSignaled => "external_signal:signaled",
            EventType::StartChildWorkflowExecutionInitiated => "child:initiated",
            EventType::StartChildWorkflowExecutionFailed => "child:start_failed",
            EventType::ChildWorkflowExecutionStarted => "child:started",
            EventType::ChildWorkflowExecutionCompleted => "child:completed",
            EventType::ChildWorkflowExecutionFailed => "child:failed",
            EventType::ChildWorkflowExecutionCanceled => "child:canceled",
            EventType::ChildWorkflowExecutionTimedOut => "child:timed_out",
            EventType::ChildWorkflowExecutionTerminated => "child:terminated",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl EventAttributes {
    pub fn name(&self) -> &'static str {
        EventType::from(self).name()
    }

    /// For ActivityTaskStarted / ChildWorkflowExecutionStarted: the schedule
    /// (resp. initiated) event ID this started event correlates to. The
    /// buffer engine records `correlation → assigned started ID` while
    /// assigning final IDs.
    pub fn started_correlation_id(&self) -> Option<i64> {
        match self {
            EventAttributes::ActivityTaskStarted(a) => Some(a.scheduled_event_id),
            EventAttributes::ChildWorkflowExecutionStarted(a) => Some(a.initiated_event_id),
            _ => None,
        }
    }

    /// For the completion-family events that carry a `started_event_id`
    /// cross-reference: the schedule (resp. initiated) event ID used to look
    /// up the assigned started ID at flush time.
    pub fn completion_correlation_id(&self) -> Option<i64> {
        match self {
            EventAttributes::ActivityTaskCompleted(a) => Some(a.scheduled_event_id),
            EventAttributes::ActivityTaskFailed(a) => Some(a.scheduled_event_id),
            EventAttributes::ActivityTaskTimedOut(a) => Some(a.scheduled_event_id),
            EventAttributes::ActivityTaskCanceled(a) => Some(a.scheduled_event_id),
            EventAttributes::ChildWorkflowExecutionCompleted(a) => Some(a.initiated_event_id),
            EventAttributes::ChildWorkflowExecutionFailed(a) => Some(a.initiated_event_id),
            EventAttributes::ChildWorkflowExecutionCanceled(a) => Some(a.initiated_event_id),
            EventAttributes::ChildWorkflowExecutionTimedOut(a) => Some(a.initiated_event_id),
            EventAttributes::ChildWorkflowExecutionTerminated(a) => Some(a.initiated_event_id),
            _ => None,
        }
    }

    /// Rewrite the schedule (resp. initiated) reference on a
    /// completion-family event, used when the referenced event itself was
    /// buffered and has just received its final ID. No-op for other kinds.
    pub fn set_completion_correlation_id(&mut self, event_id: i64) {
        match self {
            EventAttributes::ActivityTaskCompleted(a) => a.scheduled_event_id = event_id,
            EventAttributes::ActivityTaskFailed(a) => a.scheduled_event_id = event_id,
            EventAttributes::ActivityTaskTimedOut(a) => a.scheduled_event_id = event_id,
            EventAttributes::ActivityTaskCanceled(a) => a.scheduled_event_id = event_id,
            EventAttributes::ChildWorkflowExecutionCompleted(a) => a.initiated_event_id = event_id,
            EventAttributes::ChildWorkflowExecutionFailed(a) => a.initiated_event_id = event_id,
            EventAttributes::ChildWorkflowExecutionCanceled(a) => a.initiated_event_id = event_id,
            EventAttributes::ChildWorkflowExecutionTimedOut(a) => a.initiated_event_id = event_id,
            EventAttributes::ChildWorkflowExecutionTerminated(a) => {
                a.initiated_event_id = event_id
            }
            _ => {}
        }
    }

    /// Back-patch the `started_event_id` cross-reference on a
    /// completion-family event. No-op for other kinds.
    pub fn set_started_event_id(&mut self, started_id: i64) {
        match self {
            EventAttributes::ActivityTaskCompleted(a) => a.started_event_id = started_id,
            EventAttributes::ActivityTaskFailed(a) => a.started_event_id = started_id,
            EventAttributes::ActivityTaskTimedOut(a) => a.started_event_id = started_id,
            EventAttributes::ActivityTaskCanceled(a) => a.started_event_id = started_id,
            EventAttributes::ChildWorkflowExecutionCompleted(a) => a.started_event_id = started_id,
            EventAttributes::ChildWorkflowExecutionFailed(a) => a.started_event_id = started_id,
            EventAttributes::ChildWorkflowExecutionCanceled(a) => a.started_event_id = started_id,
            EventAttributes::ChildWorkflowExecutionTimedOut(a) => a.started_event_id = started_id,
            EventAttributes::ChildWorkflowExecutionTerminated(a) => {
                a.started_event_id = started_id
            }
            _ => {}
        }
    }
}

impl HistoryEvent {
    pub fn summary(&self) -> String {
        let t = self.attributes.name();
        let id = self.event_id;
        match &self.attributes {
            EventAttributes::WorkflowExecutionStarted(a) => {
                format!("{t} id={id} type={} task_list={}", a.workflow_type, a.task_list)
            }
            EventAttributes::DecisionTaskScheduled(a) => {
                format!("{t} id={id} task_list={} attempt={}", a.task_list, a.attempt)
            }
            EventAttributes::DecisionTaskStarted(a) => {
                format!("{t} id={id} scheduled={}", a.scheduled_event_id)
            }
            EventAttributes::DecisionTaskCompleted(a) => {
                format!(
                    "{t} id={id} scheduled={} started={}",
                    a.scheduled_event_id, a.started_event_id
                )
            }
            EventAttributes::DecisionTaskTimedOut(a) => {
                format!("{t} id={id} scheduled={} type={}", a.scheduled_event_id, a.timeout_type)
            }
            EventAttributes::DecisionTaskFailed(a) => {
                format!("{t} id={id} scheduled={} cause={}", a.scheduled_event_id, a.cause)
            }
            EventAttributes::ActivityTaskScheduled(a) => {
                format!("{t} id={id} activity={}", a.activity_id)
            }
            EventAttributes::ActivityTaskStarted(a) => {
                format!("{t} id={id} scheduled={}", a.scheduled_event_id)
            }
            EventAttributes::ActivityTaskCompleted(a) => {
                format!(
                    "{t} id={id} scheduled={} started={}",
                    a.scheduled_event_id, a.started_event_id
                )
            }
            EventAttributes::ActivityTaskFailed(a) => {
                format!("{t} id={id} scheduled={} reason={}", a.scheduled_event_id, a.reason)
            }
            EventAttributes::ActivityTaskTimedOut(a) => {
                format!("{t} id={id} scheduled={} type={}", a.scheduled_event_id, a.timeout_type)
            }
            EventAttributes::ActivityTaskCancelRequested(a) => {
                format!("{t} id={id} activity={}", a.activity_id)
            }
            EventAttributes::ActivityTaskCanceled(a) => {
                format!("{t} id={id} scheduled={}", a.scheduled_event_id)
            }
            EventAttributes::TimerStarted(a) => format!("{t} id={id} timer={}", a.timer_id),
            EventAttributes::TimerFired(a) => format!("{t} id={id} timer={}", a.timer_id),
            EventAttributes::TimerCanceled(a) => format!("{t} id={id} timer={}", a.timer_id),
            EventAttributes::CancelTimerFailed(a) => {
                format!("{t} id={id} timer={} cause={}", a.timer_id, a.cause)
            }
            EventAttributes::WorkflowExecutionContinuedAsNew(a) => {
                format!("{t} id={id} new_run={}", a.new_execution_run_id)
            }
            EventAttributes::WorkflowExecutionSignaled(a) => {
                format!("{t} id={id} signal={}", a.signal_name)
            }
            EventAttributes::StartChildWorkflowExecutionInitiated(a) => {
                format!("{t} id={id} workflow={}", a.workflow_id)
            }
            EventAttributes::ChildWorkflowExecutionStarted(a) => {
                format!("{t} id={id} initiated={}", a.initiated_event_id)
            }
            EventAttributes::ChildWorkflowExecutionCompleted(a) => {
                format!(
                    "{t} id={id} initiated={} started={}",
                    a.initiated_event_id, a.started_event_id
                )
            }
            _ => format!("{t} id={id}"),
        }
    }
}
