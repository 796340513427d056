use crate::domain::admissions::{
    AdminAdmissionsBackend, Announcement, AnnouncementDraft, ApplicationDraft, CreatedAccount,
    PublicAdmissionsBackend, SubmissionDetail, SubmissionFilters, SubmissionReceipt,
    SubmissionStatus, SubmissionSummary,
};
use crate::infrastructure::http::{ApiClient, file_part};
use crate::shared::error::ApiError;
use crate::shared::pagination::{PAGE_SIZE, Page};
use crate::shared::validation::FileUpload;
use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::Serialize;

const PUBLIC_BASE: &str = "/api/v1/public/admissions";
const ADMIN_BASE: &str = "/api/v1/admin/admissions";
const USERS_PATH: &str = "/api/v1/admin/users";

pub struct HttpPublicAdmissionsBackend {
    api: ApiClient,
}

impl HttpPublicAdmissionsBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PublicAdmissionsBackend for HttpPublicAdmissionsBackend {
    async fn announcement(&self) -> Result<Announcement, ApiError> {
        self.api
            .get_json(&format!("{PUBLIC_BASE}/announcement"), &[])
            .await
    }

    async fn announcement_pdf(&self) -> Result<Vec<u8>, ApiError> {
        self.api
            .get_bytes(&format!("{PUBLIC_BASE}/announcement/pdf"))
            .await
    }

    async fn submit(
        &self,
        draft: &ApplicationDraft,
        pdf: &FileUpload,
    ) -> Result<SubmissionReceipt, ApiError> {
        let form = Form::new()
            .text("childFullName", draft.child_full_name.clone())
            .text("dateOfBirth", draft.date_of_birth.to_string())
            .text("levelApplyingFor", draft.level_applying_for.as_str())
            .text("guardianFullName", draft.guardian_full_name.clone())
            .text("email", draft.email.clone())
            .text("phone", draft.phone.clone())
            .text("address", draft.address.clone())
            .part("filledApplicationPdf", file_part(pdf)?);

        self.api
            .post_multipart(&format!("{PUBLIC_BASE}/submissions"), form)
            .await
    }
}

#[derive(Serialize)]
struct UpdateStatusBody {
    status: SubmissionStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateNoteBody<'a> {
    admin_note: &'a str,
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    role: &'a str,
}

pub struct HttpAdminAdmissionsBackend {
    api: ApiClient,
}

impl HttpAdminAdmissionsBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdminAdmissionsBackend for HttpAdminAdmissionsBackend {
    async fn announcement(&self) -> Result<Announcement, ApiError> {
        self.api
            .get_json(&format!("{ADMIN_BASE}/announcement"), &[])
            .await
    }

    async fn publish_announcement(
        &self,
        draft: &AnnouncementDraft,
        pdf: Option<&FileUpload>,
    ) -> Result<Announcement, ApiError> {
        let mut form = Form::new()
            .text("message", draft.message.clone())
            .text("openDate", draft.open_date.to_string())
            .text("closeDate", draft.close_date.to_string());
        if let Some(pdf) = pdf {
            form = form.part("applicationPdf", file_part(pdf)?);
        }

        self.api
            .post_multipart(&format!("{ADMIN_BASE}/announcement"), form)
            .await
    }

    async fn list(
        &self,
        filters: &SubmissionFilters,
    ) -> Result<Page<SubmissionSummary>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = &filters.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = filters.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(level) = filters.level {
            query.push(("level", level.as_str().to_string()));
        }
        query.push(("page", filters.page.to_string()));
        query.push(("size", PAGE_SIZE.to_string()));

        self.api
            .get_json(&format!("{ADMIN_BASE}/submissions"), &query)
            .await
    }

    async fn detail(&self, id: i64) -> Result<SubmissionDetail, ApiError> {
        self.api
            .get_json(&format!("{ADMIN_BASE}/submissions/{id}"), &[])
            .await
    }

    async fn update_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<SubmissionDetail, ApiError> {
        self.api
            .put_json(
                &format!("{ADMIN_BASE}/submissions/{id}/status"),
                &UpdateStatusBody { status },
            )
            .await
    }

    async fn update_note(&self, id: i64, note: &str) -> Result<SubmissionDetail, ApiError> {
        self.api
            .put_json(
                &format!("{ADMIN_BASE}/submissions/{id}/note"),
                &UpdateNoteBody { admin_note: note },
            )
            .await
    }

    async fn submission_pdf(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.api
            .get_bytes(&format!("{ADMIN_BASE}/submissions/{id}/pdf"))
            .await
    }

    async fn provision_parent_account(&self, email: &str) -> Result<CreatedAccount, ApiError> {
        self.api
            .post_json(
                USERS_PATH,
                &CreateUserBody {
                    email,
                    role: "PARENT",
                },
            )
            .await
    }
}
