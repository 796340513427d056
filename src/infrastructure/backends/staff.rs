use crate::domain::staff::{StaffBackend, StaffDraft, StaffFilters, StaffRecord, StaffSummary};
use crate::infrastructure::http::{ApiClient, file_part, json_part};
use crate::shared::error::ApiError;
use crate::shared::pagination::{PAGE_SIZE, Page};
use crate::shared::validation::FileUpload;
use async_trait::async_trait;
use reqwest::multipart::Form;

const STAFF_BASE: &str = "/api/v1/admin/staff";

pub struct HttpStaffBackend {
    api: ApiClient,
}

impl HttpStaffBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn record_form(
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<Form, ApiError> {
        let mut form = Form::new().part("data", json_part(draft)?);
        if let Some(photo) = photo {
            form = form.part("profilePhoto", file_part(photo)?);
        }
        Ok(form)
    }
}

#[async_trait]
impl StaffBackend for HttpStaffBackend {
    async fn list(&self, filters: &StaffFilters) -> Result<Page<StaffSummary>, ApiError> {
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
        if let Some(designation) = filters.designation {
            query.push(("designation", designation.as_str().to_string()));
        }
        query.push(("page", filters.page.to_string()));
        query.push(("size", PAGE_SIZE.to_string()));

        self.api.get_json(STAFF_BASE, &query).await
    }

    async fn get(&self, id: i64) -> Result<StaffRecord, ApiError> {
        self.api.get_json(&format!("{STAFF_BASE}/{id}"), &[]).await
    }

    async fn create(
        &self,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        let form = Self::record_form(draft, photo)?;
        self.api.post_multipart(STAFF_BASE, form).await
    }

    async fn create_with_account(
        &self,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        let form = Self::record_form(draft, photo)?;
        self.api
            .post_multipart(&format!("{STAFF_BASE}/with-account"), form)
            .await
    }

    async fn update(
        &self,
        id: i64,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        let form = Self::record_form(draft, photo)?;
        self.api
            .put_multipart(&format!("{STAFF_BASE}/{id}"), form)
            .await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_ack(&format!("{STAFF_BASE}/{id}")).await
    }

    async fn create_account(&self, id: i64) -> Result<StaffRecord, ApiError> {
        self.api
            .post_empty(&format!("{STAFF_BASE}/{id}/account"))
            .await
    }

    async fn revoke_account(&self, id: i64) -> Result<StaffRecord, ApiError> {
        self.api.delete(&format!("{STAFF_BASE}/{id}/account")).await
    }

    async fn photo(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.api.get_bytes(&format!("{STAFF_BASE}/{id}/photo")).await
    }
}
