// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The mutable state of one workflow execution.
//!
//! Owns the execution header, the pending collections, the history builder
//! for the current session, the buffered-event machinery, and the staging
//! area snapshotted by [`MutableState::close_update_session`]. Operations
//! follow one contract: preconditions → emit event → mutate state/pending →
//! stage for persistence. Precondition violations log an invalid-action
//! record and return `None` without mutating anything.

mod activity;
mod child;
mod decision;
mod timer;
mod workflow;

pub use decision::StartedDecision;

use std::collections::{BTreeSet, HashMap, HashSet};

use cascade_core::{
    ActivityInfo, ChildExecutionInfo, Clock, DecisionInfo, EventAttributes, EventType,
    ExecutionInfo, HistoryEvent, RequestCancelInfo, SignalInfo, SystemClock, TimerInfo,
    BUFFERED_EVENT_ID, EMPTY_EVENT_ID,
};
use cascade_storage::{
    ContinueAsNewRequest, EventSerializer, SessionUpdates, WorkflowSnapshot,
};
use tracing::warn;

use crate::builder::HistoryBuilder;
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Authoritative in-memory state of a single workflow run.
///
/// Not internally concurrent: the surrounding service serializes access per
/// run. Generic over [`Clock`] so tests drive time deterministically.
pub struct MutableState<C: Clock = SystemClock> {
    pub(crate) execution_info: ExecutionInfo,

    // pending collections
    pub(crate) pending_activities: HashMap<i64, ActivityInfo>,
    /// activity ID → schedule-event ID; kept bijective with the map above
    pub(crate) activity_ids: HashMap<String, i64>,
    pub(crate) pending_timers: HashMap<String, TimerInfo>,
    pub(crate) pending_children: HashMap<i64, ChildExecutionInfo>,
    pub(crate) pending_request_cancels: HashMap<i64, RequestCancelInfo>,
    pub(crate) pending_signals: HashMap<i64, SignalInfo>,
    pub(crate) signal_requested_ids: HashSet<String>,

    // buffered events
    /// Serialized batches already persisted by prior sessions, oldest first
    pub(crate) buffered_batches: Vec<Vec<u8>>,
    /// Batch produced this session while a decision stayed in flight
    pub(crate) pending_buffered: Option<Vec<u8>>,
    pub(crate) clear_buffered: bool,

    pub(crate) builder: HistoryBuilder,
    pub(crate) serializer: EventSerializer,
    pub(crate) config: EngineConfig,
    pub(crate) clock: C,

    // session staging: dirty keys snapshot into cloned update lists at close;
    // at most one deletion per kind per session
    pub(crate) dirty_activities: BTreeSet<i64>,
    pub(crate) deleted_activity: Option<i64>,
    pub(crate) dirty_timers: BTreeSet<String>,
    pub(crate) deleted_timer: Option<String>,
    pub(crate) dirty_children: BTreeSet<i64>,
    pub(crate) deleted_child: Option<i64>,
    pub(crate) dirty_request_cancels: BTreeSet<i64>,
    pub(crate) deleted_request_cancel: Option<i64>,
    pub(crate) dirty_signals: BTreeSet<i64>,
    pub(crate) deleted_signal: Option<i64>,
    pub(crate) dirty_signal_requested_ids: BTreeSet<String>,
    pub(crate) deleted_signal_requested_id: Option<String>,
    pub(crate) continue_as_new: Option<ContinueAsNewRequest>,
}

impl MutableState<SystemClock> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> MutableState<C> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        Self {
            execution_info: ExecutionInfo::default(),
            pending_activities: HashMap::new(),
            activity_ids: HashMap::new(),
            pending_timers: HashMap::new(),
            pending_children: HashMap::new(),
            pending_request_cancels: HashMap::new(),
            pending_signals: HashMap::new(),
            signal_requested_ids: HashSet::new(),
            buffered_batches: Vec::new(),
            pending_buffered: None,
            clear_buffered: false,
            builder: HistoryBuilder::new(),
            serializer: EventSerializer::new(),
            config,
            clock,
            dirty_activities: BTreeSet::new(),
            deleted_activity: None,
            dirty_timers: BTreeSet::new(),
            deleted_timer: None,
            dirty_children: BTreeSet::new(),
            deleted_child: None,
            dirty_request_cancels: BTreeSet::new(),
            deleted_request_cancel: None,
            dirty_signals: BTreeSet::new(),
            deleted_signal: None,
            dirty_signal_requested_ids: BTreeSet::new(),
            deleted_signal_requested_id: None,
            continue_as_new: None,
        }
    }

    /// Rehydrate from a persisted snapshot, rebuilding the activity-ID index.
    pub fn load(&mut self, snapshot: WorkflowSnapshot) {
        self.execution_info = snapshot.execution_info;
        self.pending_activities = snapshot.activity_infos;
        self.activity_ids = self
            .pending_activities
            .values()
            .map(|ai| (ai.activity_id.clone(), ai.schedule_id))
            .collect();
        self.pending_timers = snapshot.timer_infos;
        self.pending_children = snapshot.child_execution_infos;
        self.pending_request_cancels = snapshot.request_cancel_infos;
        self.pending_signals = snapshot.signal_infos;
        self.signal_requested_ids = snapshot.signal_requested_ids;
        self.buffered_batches = snapshot.buffered_events;
    }

    // -- event creation --

    /// The ID the next event of this kind would receive: the buffered
    /// sentinel while a decision is in flight (for bufferable kinds), else
    /// the current `next_event_id`. Does not consume the ID.
    pub(crate) fn provisional_event_id(&self, event_type: EventType) -> i64 {
        if self.has_in_flight_decision_task() && !event_type.is_unbufferable() {
            BUFFERED_EVENT_ID
        } else {
            self.execution_info.next_event_id
        }
    }

    /// Consume a previously peeked event ID. Buffered events never consume.
    pub(crate) fn commit_event_id(&mut self, event_id: i64) {
        if event_id != BUFFERED_EVENT_ID {
            self.execution_info.next_event_id = event_id + 1;
        }
    }

    /// Peek-and-consume in one step, for operations with no fallible work
    /// between the peek and the append.
    pub(crate) fn allocate_event_id(&mut self, event_type: EventType) -> i64 {
        let event_id = self.provisional_event_id(event_type);
        self.commit_event_id(event_id);
        event_id
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now_nanos()
    }

    /// Structured invalid-action record: the operation was rejected without
    /// mutating anything.
    pub(crate) fn log_invalid_action(&self, action: &'static str, details: impl std::fmt::Display) {
        warn!(
            action,
            next_event_id = self.execution_info.next_event_id,
            workflow_id = %self.execution_info.workflow_id,
            run_id = %self.execution_info.run_id,
            %details,
            "invalid history action"
        );
    }

    // -- buffer engine --

    /// Flush buffered events into the committed history.
    ///
    /// Runs before a decision is scheduled and at session close. With no
    /// decision in flight, previously persisted batches and the pending
    /// batch drain into the committed list (oldest first), followed by
    /// events buffered this session; the persisted buffer is marked for
    /// clearing. Finally every event still carrying the sentinel receives
    /// its real ID and cross-references are repaired.
    pub fn flush_buffered_events(&mut self) -> Result<(), EngineError> {
        let (mut committed, mut newly_buffered) = self.builder.partition_buffered();

        if !self.has_in_flight_decision_task() {
            for batch in &self.buffered_batches {
                committed.extend(self.serializer.deserialize_batch(batch)?);
            }
            if let Some(pending) = self.pending_buffered.take() {
                committed.extend(self.serializer.deserialize_batch(&pending)?);
            }
            self.clear_buffered = self.clear_buffered || !self.buffered_batches.is_empty();
            self.buffered_batches.clear();
            committed.append(&mut newly_buffered);
        }

        self.builder.replace_history(committed);
        self.assign_buffered_event_ids()?;

        if self.has_in_flight_decision_task() && !newly_buffered.is_empty() {
            let mut all = match self.pending_buffered.take() {
                Some(batch) => self.serializer.deserialize_batch(&batch)?,
                None => Vec::new(),
            };
            all.append(&mut newly_buffered);
            self.pending_buffered = Some(self.serializer.serialize_batch(&all)?);
        }
        Ok(())
    }

    /// Walk the committed history in order, assigning `next_event_id` to
    /// every record still carrying the sentinel. While assigning, repair
    /// every cross-reference that captured a provisional ID:
    /// - started events record `scheduled/initiated → assigned started ID`,
    ///   written back into the pending activity/child info;
    /// - completion-family events get their `started_event_id` back-patched
    ///   from that map;
    /// - pending infos created under the sentinel (buffered schedules and
    ///   initiations) are re-keyed to their final IDs and re-staged.
    fn assign_buffered_event_ids(&mut self) -> Result<(), EngineError> {
        let mut history = self.builder.take_history();
        let result = self.assign_ids_in(&mut history);
        self.builder.replace_history(history);
        result
    }

    fn assign_ids_in(&mut self, history: &mut [HistoryEvent]) -> Result<(), EngineError> {
        // provisional schedule/initiated IDs → final IDs, per family
        let mut activity_schedule_rekeys: HashMap<i64, i64> = HashMap::new();
        let mut child_initiated_rekeys: HashMap<i64, i64> = HashMap::new();
        // final scheduled/initiated ID → assigned started-event ID
        let mut started_assignments: HashMap<i64, i64> = HashMap::new();

        for event in history.iter_mut() {
            if !event.is_buffered() {
                continue;
            }
            let event_id = self.execution_info.increase_next_event_id();
            event.event_id = event_id;

            match event.event_type() {
                EventType::ActivityTaskScheduled => {
                    if let Some(mut ai) = self.pending_activities.remove(&BUFFERED_EVENT_ID) {
                        activity_schedule_rekeys.insert(BUFFERED_EVENT_ID, event_id);
                        ai.schedule_id = event_id;
                        ai.scheduled_event = self.serializer.serialize(event)?;
                        self.activity_ids.insert(ai.activity_id.clone(), event_id);
                        self.pending_activities.insert(event_id, ai);
                        self.dirty_activities.remove(&BUFFERED_EVENT_ID);
                        self.dirty_activities.insert(event_id);
                    }
                }
                EventType::ActivityTaskStarted => {
                    let mut scheduled_id = EMPTY_EVENT_ID;
                    if let EventAttributes::ActivityTaskStarted(a) = &mut event.attributes {
                        if let Some(&new_id) = activity_schedule_rekeys.get(&a.scheduled_event_id)
                        {
                            a.scheduled_event_id = new_id;
                        }
                        scheduled_id = a.scheduled_event_id;
                    }
                    started_assignments.insert(scheduled_id, event_id);
                    if let Some(ai) = self.pending_activities.get_mut(&scheduled_id) {
                        ai.started_id = event_id;
                        self.dirty_activities.insert(scheduled_id);
                    }
                }
                EventType::ActivityTaskCancelRequested => {
                    if let EventAttributes::ActivityTaskCancelRequested(a) = &event.attributes {
                        if let Some(&schedule_id) = self.activity_ids.get(&a.activity_id) {
                            if let Some(ai) = self.pending_activities.get_mut(&schedule_id) {
                                if ai.cancel_request_id == BUFFERED_EVENT_ID {
                                    ai.cancel_request_id = event_id;
                                    self.dirty_activities.insert(schedule_id);
                                }
                            }
                        }
                    }
                }
                EventType::ActivityTaskCompleted
                | EventType::ActivityTaskFailed
                | EventType::ActivityTaskTimedOut
                | EventType::ActivityTaskCanceled => {
                    Self::backpatch_completion(
                        event,
                        &activity_schedule_rekeys,
                        &started_assignments,
                    );
                }
                EventType::TimerStarted => {
                    if let EventAttributes::TimerStarted(a) = &event.attributes {
                        let timer_id = a.timer_id.clone();
                        if let Some(ti) = self.pending_timers.get_mut(&timer_id) {
                            if ti.started_id == BUFFERED_EVENT_ID {
                                ti.started_id = event_id;
                                self.dirty_timers.insert(timer_id);
                            }
                        }
                    }
                }
                EventType::StartChildWorkflowExecutionInitiated => {
                    if let Some(mut ci) = self.pending_children.remove(&BUFFERED_EVENT_ID) {
                        child_initiated_rekeys.insert(BUFFERED_EVENT_ID, event_id);
                        ci.initiated_id = event_id;
                        ci.initiated_event = self.serializer.serialize(event)?;
                        self.pending_children.insert(event_id, ci);
                        self.dirty_children.remove(&BUFFERED_EVENT_ID);
                        self.dirty_children.insert(event_id);
                    }
                }
                EventType::ChildWorkflowExecutionStarted => {
                    let mut initiated_id = EMPTY_EVENT_ID;
                    if let EventAttributes::ChildWorkflowExecutionStarted(a) =
                        &mut event.attributes
                    {
                        if let Some(&new_id) = child_initiated_rekeys.get(&a.initiated_event_id) {
                            a.initiated_event_id = new_id;
                        }
                        initiated_id = a.initiated_event_id;
                    }
                    started_assignments.insert(initiated_id, event_id);
                    let started_event = self.serializer.serialize(event)?;
                    if let Some(ci) = self.pending_children.get_mut(&initiated_id) {
                        ci.started_id = event_id;
                        ci.started_event = Some(started_event);
                        self.dirty_children.insert(initiated_id);
                    }
                }
                EventType::ChildWorkflowExecutionCompleted
                | EventType::ChildWorkflowExecutionFailed
                | EventType::ChildWorkflowExecutionCanceled
                | EventType::ChildWorkflowExecutionTimedOut
                | EventType::ChildWorkflowExecutionTerminated => {
                    Self::backpatch_completion(
                        event,
                        &child_initiated_rekeys,
                        &started_assignments,
                    );
                }
                EventType::RequestCancelExternalWorkflowExecutionInitiated => {
                    if let Some(mut info) =
                        self.pending_request_cancels.remove(&BUFFERED_EVENT_ID)
                    {
                        info.initiated_id = event_id;
                        self.pending_request_cancels.insert(event_id, info);
                        self.dirty_request_cancels.remove(&BUFFERED_EVENT_ID);
                        self.dirty_request_cancels.insert(event_id);
                    }
                }
                EventType::SignalExternalWorkflowExecutionInitiated => {
                    if let Some(mut info) = self.pending_signals.remove(&BUFFERED_EVENT_ID) {
                        info.initiated_id = event_id;
                        self.pending_signals.insert(event_id, info);
                        self.dirty_signals.remove(&BUFFERED_EVENT_ID);
                        self.dirty_signals.insert(event_id);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Normalize a completion event's schedule/initiated reference through
    /// the re-key map, then back-patch its started-event cross-reference.
    fn backpatch_completion(
        event: &mut HistoryEvent,
        rekeys: &HashMap<i64, i64>,
        started_assignments: &HashMap<i64, i64>,
    ) {
        let Some(raw) = event.attributes.completion_correlation_id() else {
            return;
        };
        let normalized = *rekeys.get(&raw).unwrap_or(&raw);
        if normalized != raw {
            event.attributes.set_completion_correlation_id(normalized);
        }
        if let Some(&started_id) = started_assignments.get(&normalized) {
            event.attributes.set_started_event_id(started_id);
        }
    }

    // -- session staging --

    /// Close the current update session: flush buffered events, snapshot the
    /// staged deltas into an immutable write-set, and reset the staging area
    /// for the next session. A pending buffered batch moves into the
    /// persisted buffered list so later flushes can drain it.
    pub fn close_update_session(&mut self) -> Result<SessionUpdates, EngineError> {
        self.flush_buffered_events()?;
        self.execution_info.last_updated_timestamp = self.clock.now_nanos();

        let updates = SessionUpdates {
            new_events: self.builder.take_history(),
            update_activity_infos: self
                .dirty_activities
                .iter()
                .filter_map(|id| self.pending_activities.get(id).cloned())
                .collect(),
            delete_activity_info: self.deleted_activity.take(),
            update_timer_infos: self
                .dirty_timers
                .iter()
                .filter_map(|id| self.pending_timers.get(id).cloned())
                .collect(),
            delete_timer_info: self.deleted_timer.take(),
            update_child_execution_infos: self
                .dirty_children
                .iter()
                .filter_map(|id| self.pending_children.get(id).cloned())
                .collect(),
            delete_child_execution_info: self.deleted_child.take(),
            update_request_cancel_infos: self
                .dirty_request_cancels
                .iter()
                .filter_map(|id| self.pending_request_cancels.get(id).cloned())
                .collect(),
            delete_request_cancel_info: self.deleted_request_cancel.take(),
            update_signal_infos: self
                .dirty_signals
                .iter()
                .filter_map(|id| self.pending_signals.get(id).cloned())
                .collect(),
            delete_signal_info: self.deleted_signal.take(),
            update_signal_requested_ids: self
                .dirty_signal_requested_ids
                .iter()
                .cloned()
                .collect(),
            delete_signal_requested_id: self.deleted_signal_requested_id.take(),
            continue_as_new: self.continue_as_new.take(),
            new_buffered_events: self.pending_buffered.clone(),
            clear_buffered_events: self.clear_buffered,
        };

        self.dirty_activities.clear();
        self.dirty_timers.clear();
        self.dirty_children.clear();
        self.dirty_request_cancels.clear();
        self.dirty_signals.clear();
        self.dirty_signal_requested_ids.clear();
        self.clear_buffered = false;
        if let Some(batch) = self.pending_buffered.take() {
            self.buffered_batches.push(batch);
        }

        Ok(updates)
    }

    // -- signal-requested set --

    pub fn is_signal_requested(&self, request_id: &str) -> bool {
        self.signal_requested_ids.contains(request_id)
    }

    pub fn add_signal_requested(&mut self, request_id: impl Into<String>) {
        let request_id = request_id.into();
        self.signal_requested_ids.insert(request_id.clone());
        self.dirty_signal_requested_ids.insert(request_id);
    }

    pub fn delete_signal_requested(&mut self, request_id: &str) {
        self.signal_requested_ids.remove(request_id);
        self.dirty_signal_requested_ids.remove(request_id);
        self.deleted_signal_requested_id = Some(request_id.to_string());
    }

    // -- queries --

    pub fn execution_info(&self) -> &ExecutionInfo {
        &self.execution_info
    }

    /// Events appended (and, post-flush, committed) this session.
    pub fn history(&self) -> &[HistoryEvent] {
        self.builder.history()
    }

    pub fn get_next_event_id(&self) -> i64 {
        self.execution_info.next_event_id
    }

    pub fn get_last_first_event_id(&self) -> i64 {
        self.execution_info.last_first_event_id
    }

    /// Recorded by the persistence caller after appending a history batch.
    pub fn set_last_first_event_id(&mut self, event_id: i64) {
        self.execution_info.last_first_event_id = event_id;
    }

    pub fn has_pending_decision_task(&self) -> bool {
        self.execution_info.decision_schedule_id != EMPTY_EVENT_ID
    }

    pub fn has_in_flight_decision_task(&self) -> bool {
        self.execution_info.decision_started_id > 0
    }

    pub fn get_pending_decision(&self, schedule_id: i64) -> Option<DecisionInfo> {
        if self.has_pending_decision_task()
            && self.execution_info.decision_schedule_id == schedule_id
        {
            return Some(self.execution_info.decision_info());
        }
        None
    }

    pub fn has_buffered_events(&self) -> bool {
        !self.buffered_batches.is_empty()
            || self.pending_buffered.is_some()
            || self.builder.has_buffered()
    }

    pub(crate) fn has_pending_tasks(&self) -> bool {
        !self.pending_activities.is_empty()
            || !self.pending_timers.is_empty()
            || !self.pending_children.is_empty()
            || !self.pending_request_cancels.is_empty()
            || !self.pending_signals.is_empty()
    }

    pub fn get_activity_info(&self, schedule_id: i64) -> Option<&ActivityInfo> {
        self.pending_activities.get(&schedule_id)
    }

    pub fn get_schedule_id_by_activity_id(&self, activity_id: &str) -> Option<i64> {
        self.activity_ids.get(activity_id).copied()
    }

    pub fn get_activity_by_activity_id(&self, activity_id: &str) -> Option<&ActivityInfo> {
        let schedule_id = self.activity_ids.get(activity_id)?;
        self.pending_activities.get(schedule_id)
    }

    pub fn get_user_timer(&self, timer_id: &str) -> Option<&TimerInfo> {
        self.pending_timers.get(timer_id)
    }

    pub fn get_child_execution_info(&self, initiated_id: i64) -> Option<&ChildExecutionInfo> {
        self.pending_children.get(&initiated_id)
    }

    /// Deserialize the stored initiated event of a pending child execution.
    pub fn get_child_execution_initiated_event(
        &self,
        initiated_id: i64,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        match self.pending_children.get(&initiated_id) {
            None => Ok(None),
            Some(ci) => Ok(Some(self.serializer.deserialize(&ci.initiated_event)?)),
        }
    }

    /// Deserialize the stored started event of a pending child execution.
    pub fn get_child_execution_started_event(
        &self,
        initiated_id: i64,
    ) -> Result<Option<HistoryEvent>, EngineError> {
        match self.pending_children.get(&initiated_id).and_then(|ci| ci.started_event.as_ref()) {
            None => Ok(None),
            Some(bytes) => Ok(Some(self.serializer.deserialize(bytes)?)),
        }
    }

    pub fn get_request_cancel_info(&self, initiated_id: i64) -> Option<&RequestCancelInfo> {
        self.pending_request_cancels.get(&initiated_id)
    }

    pub fn get_signal_info(&self, initiated_id: i64) -> Option<&SignalInfo> {
        self.pending_signals.get(&initiated_id)
    }

    /// Deserialize the retained completion event; present iff this run has a
    /// parent and has closed.
    pub fn get_completion_event(&self) -> Result<Option<HistoryEvent>, EngineError> {
        match &self.execution_info.completion_event {
            None => Ok(None),
            Some(bytes) => Ok(Some(self.serializer.deserialize(bytes)?)),
        }
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.execution_info.cancel_requested
    }

    pub fn is_sticky_task_list_enabled(&self) -> bool {
        self.execution_info.is_sticky_task_list_enabled()
    }

    pub fn clear_stickyness(&mut self) {
        self.execution_info.clear_stickyness();
    }

    /// Record decision affinity after a worker completes a decision on a
    /// sticky task list.
    pub fn set_stickyness(&mut self, sticky: cascade_core::Stickiness) {
        self.execution_info.sticky = Some(sticky);
    }

    // -- pending-collection maintenance --

    /// Replace a pending activity wholesale and stage it. Used by the task
    /// processors to persist heartbeat times and timer-task status.
    pub fn update_activity(&mut self, info: ActivityInfo) -> Result<(), EngineError> {
        if !self.pending_activities.contains_key(&info.schedule_id) {
            return Err(EngineError::MissingActivityInfo(info.schedule_id));
        }
        let schedule_id = info.schedule_id;
        self.pending_activities.insert(schedule_id, info);
        self.dirty_activities.insert(schedule_id);
        Ok(())
    }

    /// Record an activity heartbeat: refreshes the last-heartbeat time and
    /// stages the info. No history event is emitted.
    pub fn record_activity_heartbeat(&mut self, schedule_id: i64) -> bool {
        let now = self.clock.now_nanos();
        match self.pending_activities.get_mut(&schedule_id) {
            Some(ai) => {
                ai.last_heartbeat_updated_time = now;
                self.dirty_activities.insert(schedule_id);
                true
            }
            None => {
                self.log_invalid_action(
                    "activity:heartbeat",
                    format_args!("schedule_id={schedule_id}"),
                );
                false
            }
        }
    }

    /// Replace a pending user timer wholesale and stage it.
    pub fn update_user_timer(&mut self, info: TimerInfo) -> Result<(), EngineError> {
        if !self.pending_timers.contains_key(&info.timer_id) {
            return Err(EngineError::MissingTimerInfo(info.timer_id));
        }
        let timer_id = info.timer_id.clone();
        self.pending_timers.insert(timer_id.clone(), info);
        self.dirty_timers.insert(timer_id);
        Ok(())
    }

    // -- pending-collection deletion (fatal if the entry is missing) --

    pub(crate) fn delete_activity(&mut self, schedule_id: i64) -> Result<(), EngineError> {
        let ai = self
            .pending_activities
            .remove(&schedule_id)
            .ok_or(EngineError::MissingActivityInfo(schedule_id))?;
        self.activity_ids.remove(&ai.activity_id);
        self.dirty_activities.remove(&schedule_id);
        self.deleted_activity = Some(schedule_id);
        Ok(())
    }

    pub(crate) fn delete_user_timer(&mut self, timer_id: &str) -> Result<(), EngineError> {
        self.pending_timers
            .remove(timer_id)
            .ok_or_else(|| EngineError::MissingTimerInfo(timer_id.to_string()))?;
        self.dirty_timers.remove(timer_id);
        self.deleted_timer = Some(timer_id.to_string());
        Ok(())
    }

    pub(crate) fn delete_child_execution(&mut self, initiated_id: i64) -> Result<(), EngineError> {
        self.pending_children
            .remove(&initiated_id)
            .ok_or(EngineError::MissingChildExecutionInfo(initiated_id))?;
        self.dirty_children.remove(&initiated_id);
        self.deleted_child = Some(initiated_id);
        Ok(())
    }

    pub(crate) fn delete_request_cancel(&mut self, initiated_id: i64) -> Result<(), EngineError> {
        self.pending_request_cancels
            .remove(&initiated_id)
            .ok_or(EngineError::MissingRequestCancelInfo(initiated_id))?;
        self.dirty_request_cancels.remove(&initiated_id);
        self.deleted_request_cancel = Some(initiated_id);
        Ok(())
    }

    pub(crate) fn delete_signal(&mut self, initiated_id: i64) -> Result<(), EngineError> {
        self.pending_signals
            .remove(&initiated_id)
            .ok_or(EngineError::MissingSignalInfo(initiated_id))?;
        self.dirty_signals.remove(&initiated_id);
        self.deleted_signal = Some(initiated_id);
        Ok(())
    }
}

#[cfg(test)]
mod test_support;
