// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-workflow, external-cancel, and external-signal operations.
//!
//! The initiated event of each family creates a pending info keyed by its
//! event ID; the corresponding outcome events require that info and retire
//! it. Child completion events recover the child's identity (domain,
//! execution, workflow type) from the serialized started event stored in
//! the pending info.

use cascade_core::event::{
    ChildWorkflowExecutionCanceledAttributes, ChildWorkflowExecutionCompletedAttributes,
    ChildWorkflowExecutionFailedAttributes, ChildWorkflowExecutionStartedAttributes,
    ChildWorkflowExecutionTerminatedAttributes, ChildWorkflowExecutionTimedOutAttributes,
    ExternalWorkflowExecutionCancelRequestedAttributes,
    ExternalWorkflowExecutionSignaledAttributes,
    RequestCancelExternalWorkflowExecutionFailedAttributes,
    RequestCancelExternalWorkflowExecutionInitiatedAttributes,
    SignalExternalWorkflowExecutionFailedAttributes,
    SignalExternalWorkflowExecutionInitiatedAttributes,
    StartChildWorkflowExecutionFailedAttributes, StartChildWorkflowExecutionInitiatedAttributes,
};
use cascade_core::{
    ChildExecutionInfo, Clock, EventAttributes, EventType, HistoryEvent,
    RequestCancelExternalAttributes, RequestCancelInfo, SignalExternalAttributes, SignalInfo,
    StartChildWorkflowAttributes, TimeoutType, WorkflowExecution, EMPTY_EVENT_ID,
};

use crate::error::EngineError;

use super::MutableState;

/// Child identity recovered from the stored started event.
struct StartedChild {
    domain: String,
    workflow_execution: WorkflowExecution,
    workflow_type: String,
    started_id: i64,
}

impl<C: Clock> MutableState<C> {
    // -- child workflow --

    /// Initiate a child workflow: stores the serialized initiated event in a
    /// pending [`ChildExecutionInfo`] keyed by the event ID.
    pub fn add_start_child_workflow_execution_initiated_event(
        &mut self,
        decision_completed_event_id: i64,
        create_request_id: &str,
        attributes: StartChildWorkflowAttributes,
    ) -> Result<Option<(HistoryEvent, ChildExecutionInfo)>, EngineError> {
        let event_id = self.provisional_event_id(EventType::StartChildWorkflowExecutionInitiated);
        if self.pending_children.contains_key(&event_id) {
            self.log_invalid_action(
                "child:initiated",
                format_args!("initiated slot occupied event_id={event_id}"),
            );
            return Ok(None);
        }

        let timestamp = self.now();
        let event = HistoryEvent {
            event_id,
            timestamp,
            attributes: EventAttributes::StartChildWorkflowExecutionInitiated(
                StartChildWorkflowExecutionInitiatedAttributes {
                    domain: attributes.domain,
                    workflow_id: attributes.workflow_id,
                    workflow_type: attributes.workflow_type,
                    task_list: attributes.task_list,
                    input: attributes.input,
                    execution_timeout: attributes.execution_timeout,
                    decision_timeout: attributes.decision_timeout,
                    decision_task_completed_event_id: decision_completed_event_id,
                    control: attributes.control,
                },
            ),
        };
        // Serialize before any mutation so a codec failure rejects cleanly.
        let initiated_event = self.serializer.serialize(&event)?;

        self.commit_event_id(event_id);
        self.builder.push_event(event.clone());

        let ci = ChildExecutionInfo {
            initiated_id: event_id,
            initiated_event,
            started_id: EMPTY_EVENT_ID,
            started_event: None,
            create_request_id: create_request_id.to_string(),
        };
        self.pending_children.insert(event_id, ci.clone());
        self.dirty_children.insert(event_id);
        Ok(Some((event, ci)))
    }

    /// Record that the initiated child actually started; stores the
    /// serialized started event for later completion events.
    pub fn add_child_workflow_execution_started_event(
        &mut self,
        domain: &str,
        execution: WorkflowExecution,
        workflow_type: &str,
        initiated_id: i64,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        match self.pending_children.get(&initiated_id) {
            Some(ci) if ci.started_id == EMPTY_EVENT_ID => {}
            _ => {
                self.log_invalid_action(
                    "child:started",
                    format_args!("initiated_id={initiated_id}"),
                );
                return Ok(None);
            }
        }

        let event_id = self.provisional_event_id(EventType::ChildWorkflowExecutionStarted);
        let event = HistoryEvent {
            event_id,
            timestamp: self.now(),
            attributes: EventAttributes::ChildWorkflowExecutionStarted(
                ChildWorkflowExecutionStartedAttributes {
                    domain: domain.to_string(),
                    initiated_event_id: initiated_id,
                    workflow_execution: execution,
                    workflow_type: workflow_type.to_string(),
                },
            ),
        };
        let started_event = self.serializer.serialize(&event)?;

        self.commit_event_id(event_id);
        self.builder.push_event(event.clone());

        if let Some(ci) = self.pending_children.get_mut(&initiated_id) {
            ci.started_id = event.event_id;
            ci.started_event = Some(started_event);
        }
        self.dirty_children.insert(initiated_id);
        Ok(Some(event))
    }

    /// The start request for an initiated child failed; retires the pending
    /// info. Requires the child to never have started.
    pub fn add_start_child_workflow_execution_failed_event(
        &mut self,
        initiated_id: i64,
        cause: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let initiated = match self.pending_children.get(&initiated_id) {
            Some(ci) if ci.started_id == EMPTY_EVENT_ID => {
                self.serializer.deserialize(&ci.initiated_event)?
            }
            _ => {
                self.log_invalid_action(
                    "child:start_failed",
                    format_args!("initiated_id={initiated_id}"),
                );
                return Ok(None);
            }
        };
        let (domain, workflow_id, workflow_type, control, decision_id) =
            match initiated.attributes {
                EventAttributes::StartChildWorkflowExecutionInitiated(a) => (
                    a.domain,
                    a.workflow_id,
                    a.workflow_type,
                    a.control,
                    a.decision_task_completed_event_id,
                ),
                _ => {
                    return Err(EngineError::Internal(format!(
                        "stored initiated event has wrong kind: initiated_id={initiated_id}"
                    )))
                }
            };

        let event_id = self.allocate_event_id(EventType::StartChildWorkflowExecutionFailed);
        let event = self
            .builder
            .add_start_child_workflow_failed(
                event_id,
                self.now(),
                StartChildWorkflowExecutionFailedAttributes {
                    domain,
                    workflow_id,
                    workflow_type,
                    cause: cause.to_string(),
                    initiated_event_id: initiated_id,
                    decision_task_completed_event_id: decision_id,
                    control,
                },
            )
            .clone();
        self.delete_child_execution(initiated_id)?;
        Ok(Some(event))
    }

    /// Child completed successfully.
    pub fn add_child_workflow_execution_completed_event(
        &mut self,
        initiated_id: i64,
        result: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let Some(child) = self.started_child(initiated_id, "child:completed")? else {
            return Ok(None);
        };
        let event_id = self.allocate_event_id(EventType::ChildWorkflowExecutionCompleted);
        let event = self
            .builder
            .add_child_workflow_completed(
                event_id,
                self.now(),
                ChildWorkflowExecutionCompletedAttributes {
                    result,
                    domain: child.domain,
                    workflow_execution: child.workflow_execution,
                    workflow_type: child.workflow_type,
                    initiated_event_id: initiated_id,
                    started_event_id: child.started_id,
                },
            )
            .clone();
        self.delete_child_execution(initiated_id)?;
        Ok(Some(event))
    }

    /// Child failed.
    pub fn add_child_workflow_execution_failed_event(
        &mut self,
        initiated_id: i64,
        reason: &str,
        details: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let Some(child) = self.started_child(initiated_id, "child:failed")? else {
            return Ok(None);
        };
        let event_id = self.allocate_event_id(EventType::ChildWorkflowExecutionFailed);
        let event = self
            .builder
            .add_child_workflow_failed(
                event_id,
                self.now(),
                ChildWorkflowExecutionFailedAttributes {
                    reason: reason.to_string(),
                    details,
                    domain: child.domain,
                    workflow_execution: child.workflow_execution,
                    workflow_type: child.workflow_type,
                    initiated_event_id: initiated_id,
                    started_event_id: child.started_id,
                },
            )
            .clone();
        self.delete_child_execution(initiated_id)?;
        Ok(Some(event))
    }

    /// Child was canceled.
    pub fn add_child_workflow_execution_canceled_event(
        &mut self,
        initiated_id: i64,
        details: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let Some(child) = self.started_child(initiated_id, "child:canceled")? else {
            return Ok(None);
        };
        let event_id = self.allocate_event_id(EventType::ChildWorkflowExecutionCanceled);
        let event = self
            .builder
            .add_child_workflow_canceled(
                event_id,
                self.now(),
                ChildWorkflowExecutionCanceledAttributes {
                    details,
                    domain: child.domain,
                    workflow_execution: child.workflow_execution,
                    workflow_type: child.workflow_type,
                    initiated_event_id: initiated_id,
                    started_event_id: child.started_id,
                },
            )
            .clone();
        self.delete_child_execution(initiated_id)?;
        Ok(Some(event))
    }

    /// Child timed out.
    pub fn add_child_workflow_execution_timed_out_event(
        &mut self,
        initiated_id: i64,
        timeout_type: TimeoutType,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let Some(child) = self.started_child(initiated_id, "child:timed_out")? else {
            return Ok(None);
        };
        let event_id = self.allocate_event_id(EventType::ChildWorkflowExecutionTimedOut);
        let event = self
            .builder
            .add_child_workflow_timed_out(
                event_id,
                self.now(),
                ChildWorkflowExecutionTimedOutAttributes {
                    timeout_type,
                    domain: child.domain,
                    workflow_execution: child.workflow_execution,
                    workflow_type: child.workflow_type,
                    initiated_event_id: initiated_id,
                    started_event_id: child.started_id,
                },
            )
            .clone();
        self.delete_child_execution(initiated_id)?;
        Ok(Some(event))
    }

    /// Child was terminated.
    pub fn add_child_workflow_execution_terminated_event(
        &mut self,
        initiated_id: i64,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let Some(child) = self.started_child(initiated_id, "child:terminated")? else {
            return Ok(None);
        };
        let event_id = self.allocate_event_id(EventType::ChildWorkflowExecutionTerminated);
        let event = self
            .builder
            .add_child_workflow_terminated(
                event_id,
                self.now(),
                ChildWorkflowExecutionTerminatedAttributes {
                    domain: child.domain,
                    workflow_execution: child.workflow_execution,
                    workflow_type: child.workflow_type,
                    initiated_event_id: initiated_id,
                    started_event_id: child.started_id,
                },
            )
            .clone();
        self.delete_child_execution(initiated_id)?;
        Ok(Some(event))
    }

    /// Look up a started child and recover its identity from the stored
    /// started event. Logs and returns `None` when the child is unknown or
    /// never started.
    fn started_child(
        &self,
        initiated_id: i64,
        action: &'static str,
    ) -> Result<Option<StartedChild>, EngineError> {
        let ci = match self.pending_children.get(&initiated_id) {
            Some(ci) if ci.started_id != EMPTY_EVENT_ID => ci,
            _ => {
                self.log_invalid_action(action, format_args!("initiated_id={initiated_id}"));
                return Ok(None);
            }
        };
        let Some(bytes) = &ci.started_event else {
            self.log_invalid_action(
                action,
                format_args!("missing started event initiated_id={initiated_id}"),
            );
            return Ok(None);
        };
        let started = self.serializer.deserialize(bytes)?;
        match started.attributes {
            EventAttributes::ChildWorkflowExecutionStarted(a) => Ok(Some(StartedChild {
                domain: a.domain,
                workflow_execution: a.workflow_execution,
                workflow_type: a.workflow_type,
                started_id: ci.started_id,
            })),
            _ => Err(EngineError::Internal(format!(
                "stored started event has wrong kind: initiated_id={initiated_id}"
            ))),
        }
    }

    // -- external cancel --

    /// Initiate a cancellation request against an external workflow.
    pub fn add_request_cancel_external_workflow_execution_initiated_event(
        &mut self,
        decision_completed_event_id: i64,
        cancel_request_id: &str,
        attributes: RequestCancelExternalAttributes,
    ) -> Option<(HistoryEvent, RequestCancelInfo)> {
        let event_id =
            self.provisional_event_id(EventType::RequestCancelExternalWorkflowExecutionInitiated);
        if self.pending_request_cancels.contains_key(&event_id) {
            self.log_invalid_action(
                "external_cancel:initiated",
                format_args!("initiated slot occupied event_id={event_id}"),
            );
            return None;
        }

        self.commit_event_id(event_id);
        let event = self
            .builder
            .add_request_cancel_external_initiated(
                event_id,
                self.now(),
                RequestCancelExternalWorkflowExecutionInitiatedAttributes {
                    decision_task_completed_event_id: decision_completed_event_id,
                    domain: attributes.domain,
                    workflow_execution: attributes.workflow_execution,
                    control: attributes.control,
                },
            )
            .clone();

        let info = RequestCancelInfo {
            initiated_id: event.event_id,
            cancel_request_id: cancel_request_id.to_string(),
        };
        self.pending_request_cancels.insert(event.event_id, info.clone());
        self.dirty_request_cancels.insert(event.event_id);
        Some((event, info))
    }

    /// The external workflow acknowledged the cancellation request.
    pub fn add_external_workflow_execution_cancel_requested_event(
        &mut self,
        initiated_id: i64,
        domain: &str,
        execution: WorkflowExecution,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if !self.pending_request_cancels.contains_key(&initiated_id) {
            self.log_invalid_action(
                "external_cancel:requested",
                format_args!("initiated_id={initiated_id}"),
            );
            return Ok(None);
        }

        let event_id = self.allocate_event_id(EventType::ExternalWorkflowExecutionCancelRequested);
        let event = self
            .builder
            .add_external_workflow_cancel_requested(
                event_id,
                self.now(),
                ExternalWorkflowExecutionCancelRequestedAttributes {
                    initiated_event_id: initiated_id,
                    domain: domain.to_string(),
                    workflow_execution: execution,
                },
            )
            .clone();
        self.delete_request_cancel(initiated_id)?;
        Ok(Some(event))
    }

    /// The cancellation request could not be delivered.
    pub fn add_request_cancel_external_workflow_execution_failed_event(
        &mut self,
        decision_completed_event_id: i64,
        initiated_id: i64,
        domain: &str,
        execution: WorkflowExecution,
        cause: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if !self.pending_request_cancels.contains_key(&initiated_id) {
            self.log_invalid_action(
                "external_cancel:failed",
                format_args!("initiated_id={initiated_id}"),
            );
            return Ok(None);
        }

        let event_id =
            self.allocate_event_id(EventType::RequestCancelExternalWorkflowExecutionFailed);
        let event = self
            .builder
            .add_request_cancel_external_failed(
                event_id,
                self.now(),
                RequestCancelExternalWorkflowExecutionFailedAttributes {
                    cause: cause.to_string(),
                    decision_task_completed_event_id: decision_completed_event_id,
                    domain: domain.to_string(),
                    workflow_execution: execution,
                    initiated_event_id: initiated_id,
                    control: None,
                },
            )
            .clone();
        self.delete_request_cancel(initiated_id)?;
        Ok(Some(event))
    }

    // -- external signal --

    /// Initiate a signal against an external workflow.
    pub fn add_signal_external_workflow_execution_initiated_event(
        &mut self,
        decision_completed_event_id: i64,
        signal_request_id: &str,
        attributes: SignalExternalAttributes,
    ) -> Option<(HistoryEvent, SignalInfo)> {
        let event_id =
            self.provisional_event_id(EventType::SignalExternalWorkflowExecutionInitiated);
        if self.pending_signals.contains_key(&event_id) {
            self.log_invalid_action(
                "external_signal:initiated",
                format_args!("initiated slot occupied event_id={event_id}"),
            );
            return None;
        }

        self.commit_event_id(event_id);
        let event = self
            .builder
            .add_signal_external_initiated(
                event_id,
                self.now(),
                SignalExternalWorkflowExecutionInitiatedAttributes {
                    decision_task_completed_event_id: decision_completed_event_id,
                    domain: attributes.domain,
                    workflow_execution: attributes.workflow_execution,
                    signal_name: attributes.signal_name.clone(),
                    input: attributes.input.clone(),
                    control: attributes.control.clone(),
                },
            )
            .clone();

        let info = SignalInfo {
            initiated_id: event.event_id,
            signal_request_id: signal_request_id.to_string(),
            signal_name: attributes.signal_name,
            input: attributes.input,
            control: attributes.control,
        };
        self.pending_signals.insert(event.event_id, info.clone());
        self.dirty_signals.insert(event.event_id);
        Some((event, info))
    }

    /// The external workflow received the signal.
    pub fn add_external_workflow_execution_signaled_event(
        &mut self,
        initiated_id: i64,
        domain: &str,
        execution: WorkflowExecution,
        control: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if !self.pending_signals.contains_key(&initiated_id) {
            self.log_invalid_action(
                "external_signal:signaled",
                format_args!("initiated_id={initiated_id}"),
            );
            return Ok(None);
        }

        let event_id = self.allocate_event_id(EventType::ExternalWorkflowExecutionSignaled);
        let event = self
            .builder
            .add_external_workflow_signaled(
                event_id,
                self.now(),
                ExternalWorkflowExecutionSignaledAttributes {
                    initiated_event_id: initiated_id,
                    domain: domain.to_string(),
                    workflow_execution: execution,
                    control,
                },
            )
            .clone();
        self.delete_signal(initiated_id)?;
        Ok(Some(event))
    }

    /// The signal could not be delivered.
    pub fn add_signal_external_workflow_execution_failed_event(
        &mut self,
        decision_completed_event_id: i64,
        initiated_id: i64,
        domain: &str,
        execution: WorkflowExecution,
        control: Option<Vec<u8>>,
        cause: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if !self.pending_signals.contains_key(&initiated_id) {
            self.log_invalid_action(
                "external_signal:failed",
                format_args!("initiated_id={initiated_id}"),
            );
            return Ok(None);
        }

        let event_id = self.allocate_event_id(EventType::SignalExternalWorkflowExecutionFailed);
        let event = self
            .builder
            .add_signal_external_failed(
                event_id,
                self.now(),
                SignalExternalWorkflowExecutionFailedAttributes {
                    cause: cause.to_string(),
                    decision_task_completed_event_id: decision_completed_event_id,
                    domain: domain.to_string(),
                    workflow_execution: execution,
                    initiated_event_id: initiated_id,
                    control,
                },
            )
            .clone();
        self.delete_signal(initiated_id)?;
        Ok(Some(event))
    }
}

#[cfg(test)]
#[path = "child_tests.rs"]
mod tests;
