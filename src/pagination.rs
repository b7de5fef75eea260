//! Offset pagination arithmetic for the participant list.

use crate::domain::types::PageSize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Limit used for the "All" page size until the total is known.
pub const DEFAULT_ALL_UPPER_BOUND: usize = 10_000;

/// Offset window sent with a listing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Window for the 1-based `page` of size `limit`.
    pub fn for_page(page: usize, limit: usize) -> Self {
        let page = if page == 0 { 1 } else { page };
        Self {
            skip: (page - 1) * limit,
            limit,
        }
    }
}

/// Resolves the limit actually requested for `page_size`.
///
/// For `All` the last known total is used, falling back to `upper_bound`
/// before any counts arrive. The result is never zero.
pub fn effective_page_size(
    page_size: PageSize,
    known_total: Option<usize>,
    upper_bound: usize,
) -> usize {
    let size = match page_size {
        PageSize::Fixed(size) => size,
        PageSize::All => known_total
            .filter(|total| *total > 0)
            .unwrap_or(upper_bound),
    };
    size.max(1)
}

/// Whether no further pages exist after a response of `returned` records.
pub fn is_exhausted(request: PageRequest, returned: usize, reported_total: usize) -> bool {
    returned < request.limit || request.skip + returned >= reported_total
}
