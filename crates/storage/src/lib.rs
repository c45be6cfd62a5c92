// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cascade-storage: Persistence-facing types for the Cascade workflow engine
//!
//! The engine core performs no I/O. This crate defines the shapes that cross
//! the persistence boundary: the event serializer capability, the snapshot a
//! mutable state is rehydrated from, and the write-set an update session
//! stages for the persistence driver.

pub mod serializer;
pub mod session;
pub mod snapshot;

pub use serializer::{EventSerializer, SerializationError};
pub use session::{ContinueAsNewRequest, DecisionTransferTask, SessionUpdates};
pub use snapshot::WorkflowSnapshot;
