// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    created   = { WorkflowState::Created, "created" },
    running   = { WorkflowState::Running, "running" },
    completed = { WorkflowState::Completed, "completed" },
)]
fn workflow_state_display(state: WorkflowState, expected: &str) {
    assert_eq!(state.to_string(), expected);
}

#[yare::parameterized(
    none             = { CloseStatus::None },
    completed        = { CloseStatus::Completed },
    failed           = { CloseStatus::Failed },
    canceled         = { CloseStatus::Canceled },
    terminated       = { CloseStatus::Terminated },
    timed_out        = { CloseStatus::TimedOut },
    continued_as_new = { CloseStatus::ContinuedAsNew },
)]
fn close_status_roundtrips(status: CloseStatus) {
    let json = serde_json::to_string(&status).unwrap();
    let parsed: CloseStatus = serde_json::from_str(&json).unwrap();
    assert_eq!(status, parsed);
}

#[yare::parameterized(
    start_to_close    = { TimeoutType::StartToClose },
    schedule_to_start = { TimeoutType::ScheduleToStart },
    schedule_to_close = { TimeoutType::ScheduleToClose },
    heartbeat         = { TimeoutType::Heartbeat },
)]
fn timeout_type_roundtrips(t: TimeoutType) {
    let json = serde_json::to_string(&t).unwrap();
    let parsed: TimeoutType = serde_json::from_str(&json).unwrap();
    assert_eq!(t, parsed);
}

#[test]
fn sentinels_are_distinct() {
    assert_ne!(EMPTY_EVENT_ID, BUFFERED_EVENT_ID);
    assert!(EMPTY_EVENT_ID < FIRST_EVENT_ID);
    assert!(BUFFERED_EVENT_ID < FIRST_EVENT_ID);
}

#[test]
fn timer_task_status_bits_do_not_overlap() {
    let bits = [
        timer_task_status::CREATED,
        timer_task_status::CREATED_START_TO_CLOSE,
        timer_task_status::CREATED_SCHEDULE_TO_START,
        timer_task_status::CREATED_SCHEDULE_TO_CLOSE,
        timer_task_status::CREATED_HEARTBEAT,
    ];
    for (i, a) in bits.iter().enumerate() {
        for b in &bits[i + 1..] {
            assert_eq!(a & b, 0);
        }
    }
}
