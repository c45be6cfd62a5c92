// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decision-task operations and transient-retry suppression.
//!
//! At most one decision is ever active. After a decision fails or times
//! out, `decision_attempt > 0` and the retry becomes **transient**: its
//! scheduled/started events are not written to history. They materialize
//! only if new events interleave before the retry starts, or when the retry
//! finally completes.

use cascade_core::event::{
    DecisionTaskCompletedAttributes, DecisionTaskFailedAttributes,
    DecisionTaskScheduledAttributes, DecisionTaskStartedAttributes,
    DecisionTaskTimedOutAttributes,
};
use cascade_core::{
    Clock, DecisionInfo, EventType, HistoryEvent, TimeoutType, WorkflowState, EMPTY_EVENT_ID,
    EMPTY_UUID,
};

use crate::error::EngineError;

use super::MutableState;

/// Outcome of starting a decision task: the started event is absent while
/// the decision stays transient.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedDecision {
    pub event: Option<HistoryEvent>,
    pub decision: DecisionInfo,
}

impl<C: Clock> MutableState<C> {
    /// Schedule a decision task.
    ///
    /// Flushes buffered events first so the scheduled event lands after
    /// everything already earned an ID. Routes to the sticky task list when
    /// stickiness is set. A retry (`attempt > 0`) is transient: no event is
    /// written and the schedule ID is notionally the current next event ID.
    pub fn add_decision_task_scheduled_event(
        &mut self,
    ) -> Result<Option<DecisionInfo>, EngineError> {
        if self.has_pending_decision_task() {
            self.log_invalid_action(
                "decision:scheduled",
                format_args!("pending schedule_id={}", self.execution_info.decision_schedule_id),
            );
            return Ok(None);
        }

        // Buffered events must drain before the decision exists, otherwise
        // they would be numbered after the decision they preceded.
        self.flush_buffered_events()?;

        let task_list = match &self.execution_info.sticky {
            Some(sticky) => sticky.task_list.clone(),
            None => self.execution_info.task_list.clone(),
        };
        let timeout = self.execution_info.decision_timeout;
        let attempt = self.execution_info.decision_attempt;

        let mut schedule_id = self.execution_info.next_event_id;
        if attempt == 0 {
            let event_id = self.allocate_event_id(EventType::DecisionTaskScheduled);
            let event = self.builder.add_decision_task_scheduled(
                event_id,
                self.now(),
                DecisionTaskScheduledAttributes {
                    task_list: task_list.clone(),
                    start_to_close_timeout: timeout,
                    attempt,
                },
            );
            schedule_id = event.event_id;
        }

        let di = DecisionInfo {
            schedule_id,
            started_id: EMPTY_EVENT_ID,
            request_id: EMPTY_UUID.to_string(),
            decision_timeout: timeout,
            attempt,
            timestamp: 0,
        };
        self.execution_info.set_decision(&di);
        Ok(Some(di))
    }

    /// Start the pending decision task.
    ///
    /// A transient retry materializes its scheduled event (attempt reset to
    /// 0) if new events arrived since it was notionally scheduled; otherwise
    /// it stays transient and no events are written.
    pub fn add_decision_task_started_event(
        &mut self,
        schedule_id: i64,
        request_id: &str,
        identity: &str,
    ) -> Option<StartedDecision> {
        let di = match self.get_pending_decision(schedule_id) {
            Some(di) if di.started_id == EMPTY_EVENT_ID => di,
            _ => {
                self.log_invalid_action(
                    "decision:started",
                    format_args!(
                        "schedule_id={schedule_id} pending={}",
                        self.execution_info.decision_schedule_id
                    ),
                );
                return None;
            }
        };

        let mut schedule_id = di.schedule_id;
        let mut attempt = di.attempt;
        let mut timestamp = self.now();
        let mut event = None;

        if attempt > 0 && schedule_id != self.execution_info.next_event_id {
            // New events interleaved since the transient schedule; write the
            // scheduled event for real and drop out of transient mode.
            let event_id = self.allocate_event_id(EventType::DecisionTaskScheduled);
            let scheduled = self.builder.add_decision_task_scheduled(
                event_id,
                self.now(),
                DecisionTaskScheduledAttributes {
                    task_list: self.execution_info.task_list.clone(),
                    start_to_close_timeout: di.decision_timeout,
                    attempt: 0,
                },
            );
            schedule_id = scheduled.event_id;
            attempt = 0;
        }

        let mut started_id = schedule_id + 1;
        if attempt == 0 {
            let event_id = self.allocate_event_id(EventType::DecisionTaskStarted);
            let started = self.builder.add_decision_task_started(
                event_id,
                self.now(),
                DecisionTaskStartedAttributes {
                    scheduled_event_id: schedule_id,
                    identity: identity.to_string(),
                    request_id: request_id.to_string(),
                },
            );
            started_id = started.event_id;
            timestamp = 0;
            event = Some(started.clone());
        }

        self.execution_info.state = WorkflowState::Running;
        let decision = DecisionInfo {
            schedule_id,
            started_id,
            request_id: request_id.to_string(),
            decision_timeout: di.decision_timeout,
            attempt,
            timestamp,
        };
        self.execution_info.set_decision(&decision);
        Some(StartedDecision { event, decision })
    }

    /// Complete the in-flight decision task.
    ///
    /// The decision is cleared **before** the completed event is appended so
    /// that nothing after this point buffers. A still-transient decision
    /// materializes its scheduled+started pair (stamped with the transient
    /// start time) immediately before the completed event, which then
    /// references the materialized IDs.
    pub fn add_decision_task_completed_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
        identity: &str,
    ) -> Option<HistoryEvent> {
        let di = match self.get_pending_decision(schedule_id) {
            Some(di) if di.started_id == started_id => di,
            _ => {
                self.log_invalid_action(
                    "decision:completed",
                    format_args!("schedule_id={schedule_id} started_id={started_id}"),
                );
                return None;
            }
        };

        self.delete_decision();

        let mut schedule_id = schedule_id;
        let mut started_id = started_id;
        if di.attempt > 0 {
            let event_id = self.allocate_event_id(EventType::DecisionTaskScheduled);
            let scheduled = self
                .builder
                .add_decision_task_scheduled(
                    event_id,
                    di.timestamp,
                    DecisionTaskScheduledAttributes {
                        task_list: self.execution_info.task_list.clone(),
                        start_to_close_timeout: di.decision_timeout,
                        attempt: di.attempt,
                    },
                )
                .event_id;
            let event_id = self.allocate_event_id(EventType::DecisionTaskStarted);
            let started = self
                .builder
                .add_decision_task_started(
                    event_id,
                    di.timestamp,
                    DecisionTaskStartedAttributes {
                        scheduled_event_id: scheduled,
                        identity: identity.to_string(),
                        request_id: di.request_id.clone(),
                    },
                )
                .event_id;
            schedule_id = scheduled;
            started_id = started;
        }

        let event_id = self.allocate_event_id(EventType::DecisionTaskCompleted);
        let event = self
            .builder
            .add_decision_task_completed(
                event_id,
                self.now(),
                DecisionTaskCompletedAttributes {
                    scheduled_event_id: schedule_id,
                    started_event_id: started_id,
                    identity: identity.to_string(),
                },
            )
            .clone();
        self.execution_info.last_processed_event = started_id;
        Some(event)
    }

    /// Fail the in-flight decision task. Only the first consecutive failure
    /// writes an event; every failure clears stickiness and bumps the
    /// attempt counter.
    pub fn add_decision_task_failed_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
        cause: &str,
        details: Option<Vec<u8>>,
        identity: &str,
    ) -> Option<HistoryEvent> {
        let di = match self.get_pending_decision(schedule_id) {
            Some(di) if di.started_id == started_id => di,
            _ => {
                self.log_invalid_action(
                    "decision:failed",
                    format_args!("schedule_id={schedule_id} started_id={started_id}"),
                );
                return None;
            }
        };

        let mut event = None;
        if di.attempt == 0 {
            let event_id = self.allocate_event_id(EventType::DecisionTaskFailed);
            event = Some(
                self.builder
                    .add_decision_task_failed(
                        event_id,
                        self.now(),
                        DecisionTaskFailedAttributes {
                            scheduled_event_id: schedule_id,
                            started_event_id: started_id,
                            cause: cause.to_string(),
                            details,
                            identity: identity.to_string(),
                        },
                    )
                    .clone(),
            );
        }
        self.fail_decision();
        event
    }

    /// Time out the in-flight decision task (start-to-close). Suppressed
    /// like [`Self::add_decision_task_failed_event`] past the first attempt.
    pub fn add_decision_task_timed_out_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
    ) -> Option<HistoryEvent> {
        let di = match self.get_pending_decision(schedule_id) {
            Some(di) if di.started_id == started_id => di,
            _ => {
                self.log_invalid_action(
                    "decision:timed_out",
                    format_args!("schedule_id={schedule_id} started_id={started_id}"),
                );
                return None;
            }
        };

        let mut event = None;
        if di.attempt == 0 {
            let event_id = self.allocate_event_id(EventType::DecisionTaskTimedOut);
            event = Some(
                self.builder
                    .add_decision_task_timed_out(
                        event_id,
                        self.now(),
                        DecisionTaskTimedOutAttributes {
                            scheduled_event_id: schedule_id,
                            started_event_id: started_id,
                            timeout_type: TimeoutType::StartToClose,
                        },
                    )
                    .clone(),
            );
        }
        self.fail_decision();
        event
    }

    /// The scheduled (not yet started) decision sat on the task list past
    /// its schedule-to-start timeout. Never attempt-suppressed; always
    /// clears stickiness and returns the decision to the unscheduled state.
    pub fn add_decision_task_schedule_to_start_timed_out_event(
        &mut self,
        schedule_id: i64,
    ) -> Option<HistoryEvent> {
        if self.execution_info.decision_schedule_id != schedule_id
            || self.execution_info.decision_started_id > 0
        {
            self.log_invalid_action(
                "decision:timed_out",
                format_args!(
                    "schedule_id={schedule_id} pending={} started_id={}",
                    self.execution_info.decision_schedule_id,
                    self.execution_info.decision_started_id
                ),
            );
            return None;
        }

        self.execution_info.clear_stickyness();
        let event_id = self.allocate_event_id(EventType::DecisionTaskTimedOut);
        let event = self
            .builder
            .add_decision_task_timed_out(
                event_id,
                self.now(),
                DecisionTaskTimedOutAttributes {
                    scheduled_event_id: schedule_id,
                    started_event_id: EMPTY_EVENT_ID,
                    timeout_type: TimeoutType::ScheduleToStart,
                },
            )
            .clone();
        self.delete_decision();
        Some(event)
    }

    /// Clear the decision fields entirely (attempt resets to 0).
    pub(crate) fn delete_decision(&mut self) {
        self.execution_info.set_decision(&DecisionInfo::none());
    }

    /// Record a decision failure: stickiness is dropped and the attempt
    /// counter carries into the next (transient) schedule.
    pub(crate) fn fail_decision(&mut self) {
        self.execution_info.clear_stickyness();
        let di = DecisionInfo {
            schedule_id: EMPTY_EVENT_ID,
            started_id: EMPTY_EVENT_ID,
            request_id: EMPTY_UUID.to_string(),
            decision_timeout: 0,
            attempt: self.execution_info.decision_attempt + 1,
            timestamp: 0,
        };
        self.execution_info.set_decision(&di);
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
