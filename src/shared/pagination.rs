use crate::shared::error::ApiError;
use serde::{Deserialize, Serialize};

/// Every list endpoint pages with this fixed size; the page index is
/// zero-based. Neither is negotiable with the backend.
pub const PAGE_SIZE: u32 = 10;

/// One page of a listing, as returned inside the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    /// Zero-based index of this page.
    pub number: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.total_elements == 0
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.number + 1 >= self.total_pages
    }
}

/// Rejects a page index the listing cannot satisfy. The backend answers an
/// out-of-range request with an empty page rather than an error, so the
/// caller mistake would otherwise be invisible; we surface it instead of
/// clamping.
pub fn ensure_page_in_range<T>(page: &Page<T>, requested: u32) -> Result<(), ApiError> {
    if page.total_elements > 0 && requested >= page.total_pages {
        return Err(ApiError::Validation(format!(
            "Page {requested} is out of range; only {} page(s) available.",
            page.total_pages
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(number: u32, total_elements: u64) -> Page<u8> {
        let total_pages = (total_elements as u32).div_ceil(PAGE_SIZE);
        Page {
            content: Vec::new(),
            total_pages,
            total_elements,
            number,
        }
    }

    #[test]
    fn twenty_five_elements_make_three_pages() {
        let page = page_of(0, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_first());
        assert!(!page.is_last());
    }

    #[test]
    fn in_range_page_is_accepted() {
        assert!(ensure_page_in_range(&page_of(2, 25), 2).is_ok());
    }

    #[test]
    fn out_of_range_page_is_rejected() {
        let err = ensure_page_in_range(&page_of(3, 25), 3).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn empty_listing_accepts_page_zero() {
        assert!(ensure_page_in_range(&page_of(0, 0), 0).is_ok());
    }
}
