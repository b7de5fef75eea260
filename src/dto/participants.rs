//! DTOs shaped for the participant list screen.

use serde::Serialize;

use crate::domain::filter::ParticipantFilter;
use crate::domain::participant::{Participant, ParticipantCounts};
use crate::services::participant_list::ParticipantList;

/// Everything the participant screen renders.
#[derive(Debug, Serialize)]
pub struct ParticipantListView<'a> {
    pub filter: &'a ParticipantFilter,
    pub participants: &'a [Participant],
    /// `None` until the first count response for the current filter arrives.
    pub counts: Option<ParticipantCounts>,
    pub loading: bool,
    pub loading_more: bool,
    pub exhausted: bool,
    pub can_load_more: bool,
}

impl<'a> From<&'a ParticipantList> for ParticipantListView<'a> {
    fn from(list: &'a ParticipantList) -> Self {
        Self {
            filter: list.filter(),
            participants: list.participants(),
            counts: list.counts(),
            loading: list.is_loading(),
            loading_more: list.is_loading_more(),
            exhausted: list.is_exhausted(),
            can_load_more: list.can_load_more(),
        }
    }
}
