use crate::domain::admissions::{AdminAdmissionsBackend, Announcement, AnnouncementDraft};
use crate::shared::error::ApiError;
use crate::shared::validation::{FileUpload, validate_application_pdf};
use std::sync::Arc;
use validator::Validate;

/// Admin-side management of the admissions window.
pub struct AnnouncementUseCase {
    backend: Arc<dyn AdminAdmissionsBackend>,
}

impl AnnouncementUseCase {
    pub fn new(backend: Arc<dyn AdminAdmissionsBackend>) -> Self {
        Self { backend }
    }

    /// The currently published announcement, or `None` before the first
    /// publish.
    pub async fn current(&self) -> Result<Option<Announcement>, ApiError> {
        match self.backend.announcement().await {
            Ok(announcement) => Ok(Some(announcement)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Publishes or replaces the announcement, optionally attaching a blank
    /// application form. The same PDF rule applies as on the public side.
    #[tracing::instrument(skip_all)]
    pub async fn publish(
        &self,
        draft: AnnouncementDraft,
        pdf: Option<FileUpload>,
    ) -> Result<Announcement, ApiError> {
        draft.validate()?;
        if draft.close_date < draft.open_date {
            return Err(ApiError::Validation(
                "Close date must not be before the open date.".to_string(),
            ));
        }
        if let Some(pdf) = &pdf {
            validate_application_pdf(pdf)?;
        }

        self.backend.publish_announcement(&draft, pdf.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::backends::mock::MockAdminAdmissionsBackend;
    use crate::shared::validation::PDF_CONTENT_TYPE;
    use time::macros::date;

    fn draft() -> AnnouncementDraft {
        AnnouncementDraft {
            message: "Applications open in January.".to_string(),
            open_date: date!(2026 - 01 - 05),
            close_date: date!(2026 - 03 - 31),
        }
    }

    #[tokio::test]
    async fn nothing_published_reads_as_none() {
        let backend = Arc::new(MockAdminAdmissionsBackend::default());
        let use_case = AnnouncementUseCase::new(backend);
        assert!(use_case.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn publish_then_read_back() {
        let backend = Arc::new(MockAdminAdmissionsBackend::default());
        let use_case = AnnouncementUseCase::new(backend);

        let pdf = FileUpload::new("form.pdf", PDF_CONTENT_TYPE, vec![0u8; 256]);
        let published = use_case.publish(draft(), Some(pdf)).await.unwrap();
        assert!(published.has_application_pdf);

        let current = use_case.current().await.unwrap().unwrap();
        assert_eq!(current.message, "Applications open in January.");
    }

    #[tokio::test]
    async fn inverted_date_range_is_rejected() {
        let backend = Arc::new(MockAdminAdmissionsBackend::default());
        let use_case = AnnouncementUseCase::new(backend);

        let mut inverted = draft();
        inverted.close_date = date!(2025 - 12 - 01);
        let err = use_case.publish(inverted, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn announcement_pdf_is_validated_like_the_public_one() {
        let backend = Arc::new(MockAdminAdmissionsBackend::default());
        let use_case = AnnouncementUseCase::new(backend);

        let oversized = FileUpload::new(
            "form.pdf",
            PDF_CONTENT_TYPE,
            vec![0u8; crate::shared::validation::MAX_PDF_BYTES + 1],
        );
        let err = use_case.publish(draft(), Some(oversized)).await.unwrap_err();
        assert_eq!(err.message(), "File size must not exceed 10MB.");
    }
}
