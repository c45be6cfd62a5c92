// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted shape of one workflow run's mutable state.
//!
//! Produced by the persistence driver when a run is read back; consumed by
//! the engine's `load` to rehydrate the execution header, every pending
//! collection, and any buffered event batches.

use cascade_core::{
    ActivityInfo, ChildExecutionInfo, ExecutionInfo, RequestCancelInfo, SignalInfo, TimerInfo,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Complete mutable state of one workflow run, as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub execution_info: ExecutionInfo,
    /// Pending activities, keyed by schedule-event ID
    #[serde(default)]
    pub activity_infos: HashMap<i64, ActivityInfo>,
    /// Pending user timers, keyed by timer ID
    #[serde(default)]
    pub timer_infos: HashMap<String, TimerInfo>,
    /// Pending child executions, keyed by initiated-event ID
    #[serde(default)]
    pub child_execution_infos: HashMap<i64, ChildExecutionInfo>,
    /// Pending external cancel requests, keyed by initiated-event ID
    #[serde(default)]
    pub request_cancel_infos: HashMap<i64, RequestCancelInfo>,
    /// Pending external signals, keyed by initiated-event ID
    #[serde(default)]
    pub signal_infos: HashMap<i64, SignalInfo>,
    /// Request IDs of signals already delivered to this run
    #[serde(default)]
    pub signal_requested_ids: HashSet<String>,
    /// Serialized buffered-event batches, oldest first
    #[serde(default)]
    pub buffered_events: Vec<Vec<u8>>,
}
