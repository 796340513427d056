use crate::domain::admissions::{
    Announcement, ApplicationDraft, PublicAdmissionsBackend, SubmissionReceipt,
};
use crate::shared::error::ApiError;
use crate::shared::validation::{FileUpload, validate_application_pdf};
use std::sync::Arc;
use validator::Validate;

/// Where the public application form is in its one-way life. `Submitted` is
/// terminal: the same view never submits twice, so a second application
/// takes a fresh use-case instance (in the original UI, a fresh page load).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Editing,
    Submitting,
    Submitted {
        reference_no: String,
    },
}

/// Drives the public admission form: announcement lookup, client-side
/// validation, and the single multipart submission.
pub struct SubmitApplicationUseCase {
    backend: Arc<dyn PublicAdmissionsBackend>,
    phase: SubmitPhase,
}

impl SubmitApplicationUseCase {
    pub fn new(backend: Arc<dyn PublicAdmissionsBackend>) -> Self {
        Self {
            backend,
            phase: SubmitPhase::Editing,
        }
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// The current admissions window. When `open` is false the caller shows
    /// the closed state and stops; the flag comes from the backend and is
    /// never recomputed here.
    pub async fn load_announcement(&self) -> Result<Announcement, ApiError> {
        self.backend.announcement().await
    }

    pub async fn download_blank_form(&self) -> Result<Vec<u8>, ApiError> {
        self.backend.announcement_pdf().await
    }

    /// Validates everything locally, then performs the one submission this
    /// instance will ever make. On failure the form returns to `Editing`
    /// so the user can correct and retry; nothing retries automatically.
    #[tracing::instrument(skip_all, fields(level = %draft.level_applying_for))]
    pub async fn submit(
        &mut self,
        draft: ApplicationDraft,
        pdf: FileUpload,
    ) -> Result<SubmissionReceipt, ApiError> {
        if let SubmitPhase::Submitted { .. } = self.phase {
            return Err(ApiError::Validation(
                "This application has already been submitted.".to_string(),
            ));
        }

        draft.validate()?;
        validate_application_pdf(&pdf)?;

        self.phase = SubmitPhase::Submitting;
        match self.backend.submit(&draft, &pdf).await {
            Ok(receipt) => {
                self.phase = SubmitPhase::Submitted {
                    reference_no: receipt.reference_no.clone(),
                };
                Ok(receipt)
            }
            Err(err) => {
                self.phase = SubmitPhase::Editing;
                Err(err)
            }
        }
    }
}
