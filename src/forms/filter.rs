use serde::Deserialize;
use validator::Validate;

use crate::domain::filter::ParticipantFilter;
use crate::domain::participant::EntryStatus;
use crate::domain::types::{EventId, PageSize};
use crate::forms::FormError;

/// Page sizes offered by the filter sheet.
pub const PAGE_SIZE_CHOICES: [&str; 5] = ["10", "25", "50", "100", "all"];

#[derive(Deserialize, Validate, Default)]
/// Participant filter sheet as submitted by the UI.
pub struct FilterForm {
    pub event_id: Option<String>,
    #[serde(default)]
    pub entry_status: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub search: String,
    #[serde(default)]
    pub page_size: String,
}

impl FilterForm {
    pub fn to_filter(&self) -> Result<ParticipantFilter, FormError> {
        self.validate()?;

        let event_id = self
            .event_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| EventId::new(id).map_err(|_| FormError::InvalidEventId))
            .transpose()?;

        let entry_status = match self.entry_status.trim() {
            "" | "all" => EntryStatus::All,
            "scanned" => EntryStatus::Scanned,
            "not_scanned" => EntryStatus::NotScanned,
            _ => return Err(FormError::InvalidEntryStatus),
        };

        let page_size = match self.page_size.trim().to_lowercase().as_str() {
            "" => PageSize::default(),
            choice if PAGE_SIZE_CHOICES.contains(&choice) => {
                choice.parse().map_err(|_| FormError::InvalidPageSize)?
            }
            _ => return Err(FormError::InvalidPageSize),
        };

        Ok(ParticipantFilter {
            event_id,
            entry_status,
            search: self.search.trim().to_string(),
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_submitted_values() {
        let form = FilterForm {
            event_id: Some(" E1 ".to_string()),
            entry_status: "not_scanned".to_string(),
            search: "  lee ".to_string(),
            page_size: "All".to_string(),
        };

        let filter = form.to_filter().unwrap();

        assert_eq!(filter.event_id.unwrap().as_str(), "E1");
        assert_eq!(filter.entry_status, EntryStatus::NotScanned);
        assert_eq!(filter.search, "lee");
        assert_eq!(filter.page_size, PageSize::All);
    }

    #[test]
    fn empty_form_is_default_filter() {
        let filter = FilterForm::default().to_filter().unwrap();
        assert_eq!(filter, ParticipantFilter::default());
    }

    #[test]
    fn rejects_unknown_choices() {
        let form = FilterForm {
            page_size: "7".to_string(),
            ..FilterForm::default()
        };
        assert!(matches!(form.to_filter(), Err(FormError::InvalidPageSize)));

        let form = FilterForm {
            entry_status: "maybe".to_string(),
            ..FilterForm::default()
        };
        assert!(matches!(form.to_filter(), Err(FormError::InvalidEntryStatus)));
    }

    #[test]
    fn rejects_long_search() {
        let form = FilterForm {
            search: "x".repeat(101),
            ..FilterForm::default()
        };
        assert!(matches!(form.to_filter(), Err(FormError::Validation(_))));
    }
}
