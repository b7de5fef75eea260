//! Domain aggregates exposed by the check-in service layer.

pub mod event;
pub mod filter;
pub mod participant;
pub mod scan;
pub mod session;
pub mod types;
