//! Listener implementations provided by the crate.

pub mod in_memory;
