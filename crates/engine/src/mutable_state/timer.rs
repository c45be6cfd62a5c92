// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-timer operations.

use cascade_core::event::{
    CancelTimerFailedAttributes, TimerCanceledAttributes, TimerFiredAttributes,
    TimerStartedAttributes,
};
use cascade_core::{Clock, EventType, HistoryEvent, StartTimerAttributes, TimerInfo};

use crate::error::EngineError;

use super::MutableState;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

impl<C: Clock> MutableState<C> {
    /// Start a user timer. The timer ID must be unused.
    pub fn add_timer_started_event(
        &mut self,
        decision_completed_event_id: i64,
        attributes: StartTimerAttributes,
    ) -> Option<(HistoryEvent, TimerInfo)> {
        if self.pending_timers.contains_key(&attributes.timer_id) {
            self.log_invalid_action(
                "timer:started",
                format_args!("duplicate timer_id={}", attributes.timer_id),
            );
            return None;
        }

        let event_id = self.allocate_event_id(EventType::TimerStarted);
        let timestamp = self.now();
        let event = self
            .builder
            .add_timer_started(
                event_id,
                timestamp,
                TimerStartedAttributes {
                    timer_id: attributes.timer_id.clone(),
                    start_to_fire_timeout: attributes.start_to_fire_timeout,
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone();

        // TODO: fold cross-host clock skew into the expiry once a reference
        // clock is persisted alongside the timer.
        let expiry_time = timestamp + attributes.start_to_fire_timeout * NANOS_PER_SECOND;
        let ti = TimerInfo {
            timer_id: attributes.timer_id.clone(),
            expiry_time,
            started_id: event.event_id,
            task_status: cascade_core::timer_task_status::NONE,
        };
        self.pending_timers.insert(attributes.timer_id.clone(), ti.clone());
        self.dirty_timers.insert(attributes.timer_id);
        Some((event, ti))
    }

    /// Fire a pending timer and retire it.
    pub fn add_timer_fired_event(
        &mut self,
        started_event_id: i64,
        timer_id: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        if !self.pending_timers.contains_key(timer_id) {
            self.log_invalid_action("timer:fired", format_args!("unknown timer_id={timer_id}"));
            return Ok(None);
        }

        let event_id = self.allocate_event_id(EventType::TimerFired);
        let event = self
            .builder
            .add_timer_fired(
                event_id,
                self.now(),
                TimerFiredAttributes { timer_id: timer_id.to_string(), started_event_id },
            )
            .clone();
        self.delete_user_timer(timer_id)?;
        Ok(Some(event))
    }

    /// Cancel a pending timer and retire it.
    pub fn add_timer_canceled_event(
        &mut self,
        decision_completed_event_id: i64,
        timer_id: &str,
        identity: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let started_id = match self.pending_timers.get(timer_id) {
            Some(ti) => ti.started_id,
            None => {
                self.log_invalid_action(
                    "timer:canceled",
                    format_args!("unknown timer_id={timer_id}"),
                );
                return Ok(None);
            }
        };

        let event_id = self.allocate_event_id(EventType::TimerCanceled);
        let event = self
            .builder
            .add_timer_canceled(
                event_id,
                self.now(),
                TimerCanceledAttributes {
                    timer_id: timer_id.to_string(),
                    started_event_id: started_id,
                    decision_task_completed_event_id: decision_completed_event_id,
                    identity: identity.to_string(),
                },
            )
            .clone();
        self.delete_user_timer(timer_id)?;
        Ok(Some(event))
    }

    /// The cancel-timer command named an unknown timer: record the failure.
    /// Unconditional event emission.
    pub fn add_cancel_timer_failed_event(
        &mut self,
        decision_completed_event_id: i64,
        timer_id: &str,
        cause: &str,
        identity: &str,
    ) -> HistoryEvent {
        let event_id = self.allocate_event_id(EventType::CancelTimerFailed);
        self.builder
            .add_cancel_timer_failed(
                event_id,
                self.now(),
                CancelTimerFailedAttributes {
                    timer_id: timer_id.to_string(),
                    cause: cause.to_string(),
                    decision_task_completed_event_id: decision_completed_event_id,
                    identity: identity.to_string(),
                },
            )
            .clone()
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
