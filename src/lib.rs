//! Check-in client core for event staff.
//!
//! Lists a partner's events and participants with offset pagination and
//! aggregate counts, and marks attendance from manual confirmation or scanned
//! QR badges. The UI layer drives [`services::participants::ParticipantsController`]
//! and renders its [`dto::participants::ParticipantListView`].

pub mod api;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod qr;
pub mod services;
