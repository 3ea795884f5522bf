//! Application layer containing the card entry orchestration.
//!
//! This module defines the `CardEntryMachine`, which turns field edits and
//! host requests into state transitions and listener events.

pub mod machine;
