//! Wire representations exchanged with the backend and client configuration.

pub mod auth;
pub mod config;
pub mod event;
pub mod participant;
pub mod scan;
