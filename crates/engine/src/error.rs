// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine errors.
//!
//! Precondition violations are not errors: those log an invalid-action
//! record and surface as `None`. Errors here are fatal inconsistencies
//! (pending entry missing on delete), serialization failures, and
//! internal failures seeding a continue-as-new successor.

use cascade_storage::SerializationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("pending activity not found: schedule_id={0}")]
    MissingActivityInfo(i64),

    #[error("pending timer not found: timer_id={0}")]
    MissingTimerInfo(String),

    #[error("pending child execution not found: initiated_id={0}")]
    MissingChildExecutionInfo(i64),

    #[error("pending request-cancel not found: initiated_id={0}")]
    MissingRequestCancelInfo(i64),

    #[error("pending signal not found: initiated_id={0}")]
    MissingSignalInfo(i64),

    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("internal service error: {0}")]
    Internal(String),
}
