//! Read-only snapshots handed to the UI layer.

pub mod participants;
