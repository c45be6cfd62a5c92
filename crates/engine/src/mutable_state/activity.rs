// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity-task operations.

use cascade_core::event::{
    ActivityTaskCancelRequestedAttributes, ActivityTaskCanceledAttributes,
    ActivityTaskCompletedAttributes, ActivityTaskFailedAttributes,
    ActivityTaskScheduledAttributes, ActivityTaskStartedAttributes,
    ActivityTaskTimedOutAttributes, RequestCancelActivityTaskFailedAttributes,
};
use cascade_core::{
    timer_task_status, ActivityInfo, Clock, EventAttributes, EventType, HistoryEvent,
    ScheduleActivityAttributes, TimeoutType, EMPTY_EVENT_ID,
};

use crate::config::EngineConfig;
use crate::error::EngineError;

use super::MutableState;

impl<C: Clock> MutableState<C> {
    /// Schedule an activity. Creates the pending [`ActivityInfo`] under the
    /// event ID the scheduled event receives, plus the activity-ID index
    /// entry; timeouts left unset (≤ 0) take the configured defaults, and
    /// the defaulted values are written into the event so history stays
    /// self-describing. A duplicate activity ID rejects.
    pub fn add_activity_task_scheduled_event(
        &mut self,
        decision_completed_event_id: i64,
        attributes: ScheduleActivityAttributes,
    ) -> Result<Option<(HistoryEvent, ActivityInfo)>, EngineError> {
        let event_id = self.provisional_event_id(EventType::ActivityTaskScheduled);
        if self.pending_activities.contains_key(&event_id) {
            self.log_invalid_action(
                "activity:scheduled",
                format_args!("schedule slot occupied event_id={event_id}"),
            );
            return Ok(None);
        }
        if attributes.activity_id.is_empty() {
            self.log_invalid_action("activity:scheduled", "empty activity_id");
            return Ok(None);
        }
        if self.activity_ids.contains_key(&attributes.activity_id) {
            self.log_invalid_action(
                "activity:scheduled",
                format_args!("duplicate activity_id={}", attributes.activity_id),
            );
            return Ok(None);
        }

        let schedule_to_start = EngineConfig::or_default(
            attributes.schedule_to_start_timeout,
            self.config.default_activity_schedule_to_start_timeout,
        );
        let schedule_to_close = EngineConfig::or_default(
            attributes.schedule_to_close_timeout,
            self.config.default_activity_schedule_to_close_timeout,
        );
        let start_to_close = EngineConfig::or_default(
            attributes.start_to_close_timeout,
            self.config.default_activity_start_to_close_timeout,
        );
        let heartbeat = EngineConfig::or_default(
            attributes.heartbeat_timeout,
            self.config.default_activity_heartbeat_timeout,
        );

        let timestamp = self.now();
        let event = HistoryEvent {
            event_id,
            timestamp,
            attributes: EventAttributes::ActivityTaskScheduled(ActivityTaskScheduledAttributes {
                activity_id: attributes.activity_id.clone(),
                activity_type: attributes.activity_type,
                task_list: attributes.task_list,
                input: attributes.input,
                schedule_to_close_timeout: schedule_to_close,
                schedule_to_start_timeout: schedule_to_start,
                start_to_close_timeout: start_to_close,
                heartbeat_timeout: heartbeat,
                decision_task_completed_event_id: decision_completed_event_id,
            }),
        };
        // Serialize before any mutation so a codec failure rejects cleanly.
        let scheduled_event = self.serializer.serialize(&event)?;

        self.commit_event_id(event_id);
        self.builder.push_event(event.clone());

        let ai = ActivityInfo {
            schedule_id: event_id,
            scheduled_event,
            scheduled_time: timestamp,
            started_id: EMPTY_EVENT_ID,
            started_time: 0,
            activity_id: attributes.activity_id.clone(),
            request_id: String::new(),
            schedule_to_start_timeout: schedule_to_start,
            schedule_to_close_timeout: schedule_to_close,
            start_to_close_timeout: start_to_close,
            heartbeat_timeout: heartbeat,
            cancel_requested: false,
            cancel_request_id: EMPTY_EVENT_ID,
            last_heartbeat_updated_time: 0,
            timer_task_status: timer_task_status::NONE,
        };
        self.pending_activities.insert(event_id, ai.clone());
        self.activity_ids.insert(attributes.activity_id, event_id);
        self.dirty_activities.insert(event_id);
        Ok(Some((event, ai)))
    }

    /// Record an activity start. Only permitted while the pending activity
    /// has no started event yet.
    pub fn add_activity_task_started_event(
        &mut self,
        schedule_id: i64,
        request_id: &str,
        identity: &str,
    ) -> Option<HistoryEvent> {
        match self.pending_activities.get(&schedule_id) {
            Some(ai) if ai.started_id == EMPTY_EVENT_ID => {}
            _ => {
                self.log_invalid_action(
                    "activity:started",
                    format_args!("schedule_id={schedule_id}"),
                );
                return None;
            }
        }

        let event_id = self.allocate_event_id(EventType::ActivityTaskStarted);
        let timestamp = self.now();
        let event = self
            .builder
            .add_activity_task_started(
                event_id,
                timestamp,
                ActivityTaskStartedAttributes {
                    scheduled_event_id: schedule_id,
                    identity: identity.to_string(),
                    request_id: request_id.to_string(),
                },
            )
            .clone();
        if let Some(ai) = self.pending_activities.get_mut(&schedule_id) {
            ai.started_id = event.event_id;
            ai.started_time = timestamp;
            ai.request_id = request_id.to_string();
        }
        self.dirty_activities.insert(schedule_id);
        Some(event)
    }

    /// Complete a started activity and retire it from both indexes.
    pub fn add_activity_task_completed_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
        result: Option<Vec<u8>>,
        identity: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        match self.pending_activities.get(&schedule_id) {
            Some(ai) if ai.started_id == started_id => {}
            _ => {
                self.log_invalid_action(
                    "activity:completed",
                    format_args!("schedule_id={schedule_id} started_id={started_id}"),
                );
                return Ok(None);
            }
        }

        let event_id = self.allocate_event_id(EventType::ActivityTaskCompleted);
        let event = self
            .builder
            .add_activity_task_completed(
                event_id,
                self.now(),
                ActivityTaskCompletedAttributes {
                    result,
                    scheduled_event_id: schedule_id,
                    started_event_id: started_id,
                    identity: identity.to_string(),
                },
            )
            .clone();
        self.delete_activity(schedule_id)?;
        Ok(Some(event))
    }

    /// Fail a started activity and retire it.
    pub fn add_activity_task_failed_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
        reason: &str,
        details: Option<Vec<u8>>,
        identity: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        match self.pending_activities.get(&schedule_id) {
            Some(ai) if ai.started_id == started_id => {}
            _ => {
                self.log_invalid_action(
                    "activity:failed",
                    format_args!("schedule_id={schedule_id} started_id={started_id}"),
                );
                return Ok(None);
            }
        }

        let event_id = self.allocate_event_id(EventType::ActivityTaskFailed);
        let event = self
            .builder
            .add_activity_task_failed(
                event_id,
                self.now(),
                ActivityTaskFailedAttributes {
                    reason: reason.to_string(),
                    details,
                    scheduled_event_id: schedule_id,
                    started_event_id: started_id,
                    identity: identity.to_string(),
                },
            )
            .clone();
        self.delete_activity(schedule_id)?;
        Ok(Some(event))
    }

    /// Time out an activity and retire it. The started-ID must match what
    /// the caller observed; StartToClose and Heartbeat timeouts additionally
    /// require the activity to have started.
    pub fn add_activity_task_timed_out_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
        timeout_type: TimeoutType,
        details: Option<Vec<u8>>,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        let valid = match self.pending_activities.get(&schedule_id) {
            Some(ai) => {
                ai.started_id == started_id
                    && !(matches!(
                        timeout_type,
                        TimeoutType::StartToClose | TimeoutType::Heartbeat
                    ) && ai.started_id == EMPTY_EVENT_ID)
            }
            None => false,
        };
        if !valid {
            self.log_invalid_action(
                "activity:timed_out",
                format_args!(
                    "schedule_id={schedule_id} started_id={started_id} type={timeout_type}"
                ),
            );
            return Ok(None);
        }

        let event_id = self.allocate_event_id(EventType::ActivityTaskTimedOut);
        let event = self
            .builder
            .add_activity_task_timed_out(
                event_id,
                self.now(),
                ActivityTaskTimedOutAttributes {
                    details,
                    scheduled_event_id: schedule_id,
                    started_event_id: started_id,
                    timeout_type,
                },
            )
            .clone();
        self.delete_activity(schedule_id)?;
        Ok(Some(event))
    }

    /// Request cancellation of a running activity: flags the pending info
    /// and records the cancel-request event ID.
    pub fn add_activity_task_cancel_requested_event(
        &mut self,
        decision_completed_event_id: i64,
        activity_id: &str,
    ) -> Option<(HistoryEvent, ActivityInfo)> {
        let schedule_id = match self.activity_ids.get(activity_id) {
            Some(&id) => id,
            None => {
                self.log_invalid_action(
                    "activity:cancel_requested",
                    format_args!("unknown activity_id={activity_id}"),
                );
                return None;
            }
        };
        match self.pending_activities.get(&schedule_id) {
            Some(ai) if !ai.cancel_requested => {}
            _ => {
                self.log_invalid_action(
                    "activity:cancel_requested",
                    format_args!("already requested activity_id={activity_id}"),
                );
                return None;
            }
        }

        let event_id = self.allocate_event_id(EventType::ActivityTaskCancelRequested);
        let event = self
            .builder
            .add_activity_task_cancel_requested(
                event_id,
                self.now(),
                ActivityTaskCancelRequestedAttributes {
                    activity_id: activity_id.to_string(),
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone();
        let ai = match self.pending_activities.get_mut(&schedule_id) {
            Some(ai) => {
                ai.cancel_requested = true;
                ai.cancel_request_id = event.event_id;
                ai.clone()
            }
            None => return None,
        };
        self.dirty_activities.insert(schedule_id);
        Some((event, ai))
    }

    /// The cancel request named an unknown activity: record the failure.
    /// Unconditional event emission.
    pub fn add_request_cancel_activity_task_failed_event(
        &mut self,
        decision_completed_event_id: i64,
        activity_id: &str,
        cause: &str,
    ) -> HistoryEvent {
        let event_id = self.allocate_event_id(EventType::RequestCancelActivityTaskFailed);
        self.builder
            .add_request_cancel_activity_task_failed(
                event_id,
                self.now(),
                RequestCancelActivityTaskFailedAttributes {
                    activity_id: activity_id.to_string(),
                    cause: cause.to_string(),
                    decision_task_completed_event_id: decision_completed_event_id,
                },
            )
            .clone()
    }

    /// Record a started activity's cancellation and retire it.
    pub fn add_activity_task_canceled_event(
        &mut self,
        schedule_id: i64,
        started_id: i64,
        latest_cancel_requested_event_id: i64,
        details: Option<Vec<u8>>,
        identity: &str,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        match self.pending_activities.get(&schedule_id) {
            Some(ai) if ai.started_id == started_id => {}
            _ => {
                self.log_invalid_action(
                    "activity:canceled",
                    format_args!("schedule_id={schedule_id} started_id={started_id}"),
                );
                return Ok(None);
            }
        }

        let event_id = self.allocate_event_id(EventType::ActivityTaskCanceled);
        let event = self
            .builder
            .add_activity_task_canceled(
                event_id,
                self.now(),
                ActivityTaskCanceledAttributes {
                    details,
                    latest_cancel_requested_event_id,
                    scheduled_event_id: schedule_id,
                    started_event_id: started_id,
                    identity: identity.to_string(),
                },
            )
            .clone();
        self.delete_activity(schedule_id)?;
        Ok(Some(event))
    }
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
