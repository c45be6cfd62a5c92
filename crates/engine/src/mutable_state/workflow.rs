// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow lifecycle operations: start, terminal events, cancel requests,
//! signals, markers, and continue-as-new.

use cascade_core::event::{
    MarkerRecordedAttributes, WorkflowExecutionCancelRequestedAttributes,
    WorkflowExecutionCanceledAttributes, WorkflowExecutionCompletedAttributes,
    WorkflowExecutionContinuedAsNewAttributes, WorkflowExecutionFailedAttributes,
    WorkflowExecutionSignaledAttributes, WorkflowExecutionStartedAttributes,
    WorkflowExecutionTerminatedAttributes, WorkflowExecutionTimedOutAttributes,
};
use cascade_core::{
    Clock, CloseStatus, ContinueAsNewAttributes, EventType, ExecutionInfo, HistoryEvent,
    ParentExecution, StartWorkflowRequest, TimeoutType, WorkflowExecution, WorkflowState,
    EMPTY_EVENT_ID, FIRST_EVENT_ID,
};
use cascade_storage::{ContinueAsNewRequest, DecisionTransferTask};
use tracing::warn;
use uuid::Uuid;

use crate::error::EngineError;

use super::MutableState;

impl<C: Clock> MutableState<C> {
    /// Record the start event of a fresh execution and populate the
    /// execution header. Only valid on a virgin state
    /// (`next_event_id == FIRST_EVENT_ID`).
    pub fn add_workflow_execution_started_event(
        &mut self,
        execution: WorkflowExecution,
        parent: Option<ParentExecution>,
        request: StartWorkflowRequest,
    ) -> Option<HistoryEvent> {
        if self.execution_info.next_event_id != FIRST_EVENT_ID {
            self.log_invalid_action(
                "workflow:started",
                format_args!("next_event_id={}", self.execution_info.next_event_id),
            );
            return None;
        }

        let event_id = self.allocate_event_id(EventType::WorkflowExecutionStarted);
        let timestamp = self.now();
        let event = self
            .builder
            .add_workflow_execution_started(
                event_id,
                timestamp,
                WorkflowExecutionStartedAttributes {
                    workflow_type: request.workflow_type.clone(),
                    task_list: request.task_list.clone(),
                    input: request.input,
                    execution_timeout: request.execution_timeout,
                    decision_timeout: request.decision_timeout,
                    identity: request.identity,
                    continued_execution_run_id: None,
                },
            )
            .clone();

        let info = &mut self.execution_info;
        info.domain_id = request.domain_id;
        info.workflow_id = execution.workflow_id;
        info.run_id = execution.run_id;
        info.workflow_type = request.workflow_type;
        info.task_list = request.task_list;
        info.execution_timeout = request.execution_timeout;
        info.decision_timeout = request.decision_timeout;
        info.state = WorkflowState::Created;
        info.close_status = CloseStatus::None;
        info.last_processed_event = EMPTY_EVENT_ID;
        info.create_request_id = request.request_id;
        info.parent = parent;
        info.start_timestamp = timestamp;
        Some(event)
    }

    /// Seed the successor of a continue-as-new: start event plus execution
    /// header carried over from the closing run.
    #[allow(clippy::too_many_arguments)]
    fn start_continued_execution(
        &mut self,
        prior: &ExecutionInfo,
        run_id: &str,
        create_request_id: &str,
        workflow_type: String,
        task_list: String,
        input: Option<Vec<u8>>,
        execution_timeout: i32,
        decision_timeout: i32,
    ) -> Option<HistoryEvent> {
        if self.execution_info.next_event_id != FIRST_EVENT_ID {
            self.log_invalid_action(
                "workflow:started",
                format_args!("next_event_id={}", self.execution_info.next_event_id),
            );
            return None;
        }

        let event_id = self.allocate_event_id(EventType::WorkflowExecutionStarted);
        let timestamp = self.now();
        let event = self
            .builder
            .add_workflow_execution_started(
                event_id,
                timestamp,
                WorkflowExecutionStartedAttributes {
                    workflow_type: workflow_type.clone(),
                    task_list: task_list.clone(),
                    input,
                    execution_timeout,
                    decision_timeout,
                    identity: String::new(),
                    continued_execution_run_id: Some(prior.run_id.clone()),
                },
            )
            .clone();

        let info = &mut self.execution_info;
        info.domain_id = prior.domain_id.clone();
        info.workflow_id = prior.workflow_id.clone();
        info.run_id = run_id.to_string();
        info.workflow_type = workflow_type;
        info.task_list = task_list;
        info.execution_timeout = execution_timeout;
        info.decision_timeout = decision_timeout;
        info.state = WorkflowState::Created;
        info.close_status = CloseStatus::None;
        info.last_processed_event = EMPTY_EVENT_ID;
        info.create_request_id = create_request_id.to_string();
        info.parent = prior.parent.clone();
        info.start_timestamp = timestamp;
        Some(event)
    }

    /// Workflow completed successfully.
    pub fn add_workflow_execution_completed_event(
        &mut self,
        decision_completed_event_id: i64,
        result: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if self.reject_if_completed("workflow:completed") {
            return Ok(None);
        }
        let event_id = self.allocate_event_id(EventType::WorkflowExecutionCompleted);
        let event = self
            .builder
            .add_workflow_execution_completed(
                event_id,
                self.now(),
                WorkflowExecutionCompletedAttributes {
                    result,
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone();
        self.complete_workflow(&event, CloseStatus::Completed)?;
        Ok(Some(event))
    }

    /// Workflow failed.
    pub fn add_workflow_execution_failed_event(
        &mut self,
        decision_completed_event_id: i64,
        reason: &str,
        details: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if self.reject_if_completed("workflow:failed") {
            return Ok(None);
        }
        let event_id = self.allocate_event_id(EventType::WorkflowExecutionFailed);
        let event = self
            .builder
            .add_workflow_execution_failed(
                event_id,
                self.now(),
                WorkflowExecutionFailedAttributes {
                    reason: reason.to_string(),
                    details,
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone();
        self.complete_workflow(&event, CloseStatus::Failed)?;
        Ok(Some(event))
    }

    /// Workflow ran past its execution timeout.
    pub fn add_workflow_execution_timed_out_event(
        &mut self,
        timeout_type: TimeoutType,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if self.reject_if_completed("workflow:timed_out") {
            return Ok(None);
        }
        let event_id = self.allocate_event_id(EventType::WorkflowExecutionTimedOut);
        let event = self
            .builder
            .add_workflow_execution_timed_out(
                event_id,
                self.now(),
                WorkflowExecutionTimedOutAttributes { timeout_type },
            )
            .clone();
        self.complete_workflow(&event, CloseStatus::TimedOut)?;
        Ok(Some(event))
    }

    /// Workflow was terminated from outside.
    pub fn add_workflow_execution_terminated_event(
        &mut self,
        reason: &str,
        details: Option<Vec<u8>>,
        identity: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if self.reject_if_completed("workflow:terminated") {
            return Ok(None);
        }
        let event_id = self.allocate_event_id(EventType::WorkflowExecutionTerminated);
        let event = self
            .builder
            .add_workflow_execution_terminated(
                event_id,
                self.now(),
                WorkflowExecutionTerminatedAttributes {
                    reason: reason.to_string(),
                    details,
                    identity: identity.to_string(),
                },
            )
            .clone();
        self.complete_workflow(&event, CloseStatus::Terminated)?;
        Ok(Some(event))
    }

    /// Workflow canceled after a cancel request.
    ///
    /// NOTE: on an already-Completed execution this logs the invalid action
    /// but still records the event and overwrites the close status, matching
    /// the long-observed behavior of the original service. See the lifecycle
    /// tests before changing this.
    pub fn add_workflow_execution_canceled_event(
        &mut self,
        decision_completed_event_id: i64,
        details: Option<Vec<u8>>,
    ) -> Result<HistoryEvent, EngineError> {
        if self.execution_info.state == WorkflowState::Completed {
            self.log_invalid_action(
                "workflow:canceled",
                format_args!("close_status={}", self.execution_info.close_status),
            );
        }
        let event_id = self.allocate_event_id(EventType::WorkflowExecutionCanceled);
        let event = self
            .builder
            .add_workflow_execution_canceled(
                event_id,
                self.now(),
                WorkflowExecutionCanceledAttributes {
                    decision_task_completed_event_id: decision_completed_event_id,
                    details,
                },
            )
            .clone();
        self.complete_workflow(&event, CloseStatus::Canceled)?;
        Ok(event)
    }

    /// An external caller asked this workflow to cancel. Idempotence is
    /// enforced: a second request (or one against a closed workflow) rejects.
    pub fn add_workflow_execution_cancel_requested_event(
        &mut self,
        cause: &str,
        request_id: &str,
        identity: &str,
        external_initiated_event_id: Option<i64>,
        external_execution: Option<WorkflowExecution>,
    ) -> Option<HistoryEvent> {
        if self.execution_info.cancel_requested
            || self.execution_info.state == WorkflowState::Completed
        {
            self.log_invalid_action(
                "workflow:cancel_requested",
                format_args!(
                    "cancel_requested={} state={}",
                    self.execution_info.cancel_requested, self.execution_info.state
                ),
            );
            return None;
        }

        let event_id = self.allocate_event_id(EventType::WorkflowExecutionCancelRequested);
        let event = self
            .builder
            .add_workflow_execution_cancel_requested(
                event_id,
                self.now(),
                WorkflowExecutionCancelRequestedAttributes {
                    cause: cause.to_string(),
                    identity: identity.to_string(),
                    request_id: request_id.to_string(),
                    external_initiated_event_id,
                    external_execution,
                },
            )
            .clone();
        self.execution_info.cancel_requested = true;
        self.execution_info.cancel_request_id = request_id.to_string();
        Some(event)
    }

    /// A signal was delivered to this workflow. Plain event emission; the
    /// signaled-request-ID set handles delivery idempotence.
    pub fn add_workflow_execution_signaled_event(
        &mut self,
        signal_name: &str,
        input: Option<Vec<u8>>,
        identity: &str,
    ) -> HistoryEvent {
        let event_id = self.allocate_event_id(EventType::WorkflowExecutionSignaled);
        self.builder
            .add_workflow_execution_signaled(
                event_id,
                self.now(),
                WorkflowExecutionSignaledAttributes {
                    signal_name: signal_name.to_string(),
                    input,
                    identity: identity.to_string(),
                },
            )
            .clone()
    }

    /// Record a marker from a completed decision. Plain event emission.
    pub fn add_marker_recorded_event(
        &mut self,
        decision_completed_event_id: i64,
        marker_name: &str,
        details: Option<Vec<u8>>,
    ) -> HistoryEvent {
        let event_id = self.allocate_event_id(EventType::MarkerRecorded);
        self.builder
            .add_marker_recorded(
                event_id,
                self.now(),
                MarkerRecordedAttributes {
                    marker_name: marker_name.to_string(),
                    details,
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone()
    }

    /// Close this run as ContinuedAsNew and return the seeded successor.
    ///
    /// Outstanding work does not block the close (a warning records what was
    /// abandoned). The successor carries the workflow identity with a new
    /// run ID, inherits type/task-list/timeouts from the attributes with
    /// fallback to this execution, and starts with its first decision
    /// already scheduled. The staged [`ContinueAsNewRequest`] lets
    /// persistence create the successor atomically with this close.
    pub fn add_continue_as_new_event(
        &mut self,
        decision_completed_event_id: i64,
        new_run_id: &str,
        attributes: ContinueAsNewAttributes,
    ) -> Result<Option<(HistoryEvent, MutableState<C>)>, EngineError> {
        if self.reject_if_completed("workflow:continued_as_new") {
            return Ok(None);
        }
        if self.has_pending_tasks() || self.has_pending_decision_task() {
            warn!(
                workflow_id = %self.execution_info.workflow_id,
                run_id = %self.execution_info.run_id,
                pending_activities = self.pending_activities.len(),
                pending_timers = self.pending_timers.len(),
                pending_children = self.pending_children.len(),
                pending_request_cancels = self.pending_request_cancels.len(),
                pending_signals = self.pending_signals.len(),
                pending_decision = self.has_pending_decision_task(),
                "continue-as-new with outstanding work"
            );
        }

        let workflow_type = attributes
            .workflow_type
            .clone()
            .unwrap_or_else(|| self.execution_info.workflow_type.clone());
        let task_list = attributes
            .task_list
            .clone()
            .unwrap_or_else(|| self.execution_info.task_list.clone());
        let execution_timeout = if attributes.execution_timeout > 0 {
            attributes.execution_timeout
        } else {
            self.execution_info.execution_timeout
        };
        let decision_timeout = if attributes.decision_timeout > 0 {
            attributes.decision_timeout
        } else {
            self.execution_info.decision_timeout
        };

        let event_id = self.allocate_event_id(EventType::WorkflowExecutionContinuedAsNew);
        let event = self
            .builder
            .add_workflow_execution_continued_as_new(
                event_id,
                self.now(),
                WorkflowExecutionContinuedAsNewAttributes {
                    new_execution_run_id: new_run_id.to_string(),
                    workflow_type: workflow_type.clone(),
                    task_list: task_list.clone(),
                    input: attributes.input.clone(),
                    execution_timeout,
                    decision_timeout,
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone();
        self.execution_info.state = WorkflowState::Completed;
        self.execution_info.close_status = CloseStatus::ContinuedAsNew;

        let create_request_id = Uuid::new_v4().to_string();
        let mut successor = MutableState::with_clock(self.config.clone(), self.clock.clone());
        if successor
            .start_continued_execution(
                &self.execution_info,
                new_run_id,
                &create_request_id,
                workflow_type.clone(),
                task_list.clone(),
                attributes.input.clone(),
                execution_timeout,
                decision_timeout,
            )
            .is_none()
        {
            return Err(EngineError::Internal(
                "failed to seed start event for continued execution".to_string(),
            ));
        }
        let decision = match successor.add_decision_task_scheduled_event()? {
            Some(di) => di,
            None => {
                return Err(EngineError::Internal(
                    "failed to schedule first decision for continued execution".to_string(),
                ))
            }
        };

        self.continue_as_new = Some(ContinueAsNewRequest {
            request_id: create_request_id,
            domain_id: self.execution_info.domain_id.clone(),
            execution: WorkflowExecution::new(
                self.execution_info.workflow_id.clone(),
                new_run_id,
            ),
            parent: self.execution_info.parent.clone(),
            task_list: task_list.clone(),
            workflow_type,
            execution_timeout,
            decision_timeout,
            input: attributes.input,
            next_event_id: successor.get_next_event_id(),
            last_processed_event: EMPTY_EVENT_ID,
            decision_schedule_id: decision.schedule_id,
            decision_started_id: decision.started_id,
            decision_timeout_value: decision.decision_timeout,
            transfer_task: DecisionTransferTask { task_list, schedule_id: decision.schedule_id },
            previous_run_id: self.execution_info.run_id.clone(),
        });
        Ok(Some((event, successor)))
    }

    /// Shared terminal-transition: mark Completed with the close status and
    /// retain the serialized completion event when a parent is waiting.
    fn complete_workflow(
        &mut self,
        event: &HistoryEvent,
        close_status: CloseStatus,
    ) -> Result<(), EngineError> {
        self.execution_info.state = WorkflowState::Completed;
        self.execution_info.close_status = close_status;
        if self.execution_info.has_parent() {
            self.execution_info.completion_event = Some(self.serializer.serialize(event)?);
        }
        Ok(())
    }

    fn reject_if_completed(&self, action: &'static str) -> bool {
        if self.execution_info.state == WorkflowState::Completed {
            self.log_invalid_action(
                action,
                format_args!("close_status={}", self.execution_info.close_status),
            );
            return true;
        }
        false
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
