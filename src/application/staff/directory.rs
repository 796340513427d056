use crate::domain::staff::{StaffBackend, StaffFilters, StaffRecord, StaffSummary};
use crate::shared::error::ApiError;
use crate::shared::pagination::{Page, ensure_page_in_range};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Read side of the staff module: the filtered listing and single-record
/// lookups, with the same stale-refresh handling as the submissions list.
pub struct StaffDirectoryUseCase {
    backend: Arc<dyn StaffBackend>,
    list_generation: AtomicU64,
}

impl StaffDirectoryUseCase {
    pub fn new(backend: Arc<dyn StaffBackend>) -> Self {
        Self {
            backend,
            list_generation: AtomicU64::new(0),
        }
    }

    pub fn invalidate(&self) {
        self.list_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// `Ok(None)` means a newer refresh overtook this one; drop it.
    #[tracing::instrument(skip(self), fields(page = filters.page))]
    pub async fn list(
        &self,
        filters: &StaffFilters,
    ) -> Result<Option<Page<StaffSummary>>, ApiError> {
        let ticket = self.list_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let page = self.backend.list(filters).await?;
        ensure_page_in_range(&page, filters.page)?;

        if self.list_generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!("discarding stale staff listing");
            return Ok(None);
        }
        Ok(Some(page))
    }

    pub async fn get(&self, id: i64) -> Result<StaffRecord, ApiError> {
        self.backend.get(id).await
    }

    pub async fn photo(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.backend.photo(id).await
    }
}
