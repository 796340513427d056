use crate::domain::staff::{StaffBackend, StaffDraft, StaffRecord};
use crate::shared::error::ApiError;
use crate::shared::validation::{FileUpload, validate_profile_photo};
use std::sync::Arc;
use validator::Validate;

/// Write side of the staff module: registration, edits, and soft deletion.
pub struct ManageStaffUseCase {
    backend: Arc<dyn StaffBackend>,
}

impl ManageStaffUseCase {
    pub fn new(backend: Arc<dyn StaffBackend>) -> Self {
        Self { backend }
    }

    fn check(draft: &StaffDraft, photo: Option<&FileUpload>) -> Result<(), ApiError> {
        draft.validate()?;
        if let Some(photo) = photo {
            validate_profile_photo(photo)?;
        }
        Ok(())
    }

    /// Registers a staff member; `with_account` also provisions a portal
    /// login in the same request.
    #[tracing::instrument(skip(self, draft, photo))]
    pub async fn create(
        &self,
        draft: StaffDraft,
        photo: Option<FileUpload>,
        with_account: bool,
    ) -> Result<StaffRecord, ApiError> {
        Self::check(&draft, photo.as_ref())?;
        if with_account {
            self.backend.create_with_account(&draft, photo.as_ref()).await
        } else {
            self.backend.create(&draft, photo.as_ref()).await
        }
    }

    #[tracing::instrument(skip(self, draft, photo))]
    pub async fn update(
        &self,
        id: i64,
        draft: StaffDraft,
        photo: Option<FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        Self::check(&draft, photo.as_ref())?;
        self.backend.update(id, &draft, photo.as_ref()).await
    }

    /// Soft-deletes the record; the backend keeps it but marks it deleted
    /// and revokes any linked login in the same step.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.backend.delete(id).await
    }
}
