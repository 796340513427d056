//! In-memory backends used by use-case tests. Semantic where it pays off
//! (listing filters, account provisioning), canned where it does not
//! (password operations).

use crate::domain::admissions::{
    AdminAdmissionsBackend, Announcement, AnnouncementDraft, ApplicationDraft, CreatedAccount,
    PublicAdmissionsBackend, SubmissionDetail, SubmissionFilters, SubmissionReceipt,
    SubmissionStatus, SubmissionSummary,
};
use crate::domain::auth::{AuthBackend, LoginData};
use crate::domain::session::Role;
use crate::domain::staff::{
    AccountStatus, EmploymentStatus, StaffBackend, StaffDraft, StaffFilters, StaffRecord,
    StaffSummary,
};
use crate::shared::error::ApiError;
use crate::shared::pagination::{PAGE_SIZE, Page};
use crate::shared::validation::FileUpload;
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::macros::datetime;
use tokio::sync::Semaphore;

fn page_of<T>(items: Vec<T>, page: u32) -> Page<T> {
    let total_elements = items.len() as u64;
    let total_pages = (items.len() as u32).div_ceil(PAGE_SIZE);
    let content = items
        .into_iter()
        .skip((page * PAGE_SIZE) as usize)
        .take(PAGE_SIZE as usize)
        .collect();
    Page {
        content,
        total_pages,
        total_elements,
        number: page,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
pub struct MockAuthBackend {
    accounts: Mutex<Vec<(String, String, LoginData)>>,
    change_password_error: Mutex<Option<ApiError>>,
    forgot_password_error: Mutex<Option<ApiError>>,
    reset_password_error: Mutex<Option<ApiError>>,
    login_calls: AtomicUsize,
    change_password_calls: AtomicUsize,
    forgot_password_emails: Mutex<Vec<String>>,
    reset_password_calls: AtomicUsize,
}

impl MockAuthBackend {
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        role: Role,
        must_change_password: bool,
    ) -> Self {
        self.accounts.lock().unwrap().push((
            email.to_string(),
            password.to_string(),
            LoginData {
                token: format!("token-{email}"),
                role,
                email: email.to_string(),
                must_change_password,
            },
        ));
        self
    }

    pub fn with_change_password_error(self, err: ApiError) -> Self {
        *self.change_password_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_forgot_password_error(self, err: ApiError) -> Self {
        *self.forgot_password_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_reset_password_error(self, err: ApiError) -> Self {
        *self.reset_password_error.lock().unwrap() = Some(err);
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn change_password_calls(&self) -> usize {
        self.change_password_calls.load(Ordering::SeqCst)
    }

    pub fn forgot_password_emails(&self) -> Vec<String> {
        self.forgot_password_emails.lock().unwrap().clone()
    }

    pub fn reset_password_calls(&self) -> usize {
        self.reset_password_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, data)| data.clone())
            .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))
    }

    async fn change_password(
        &self,
        _current_password: &str,
        _new_password: &str,
    ) -> Result<(), ApiError> {
        self.change_password_calls.fetch_add(1, Ordering::SeqCst);
        match self.change_password_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.forgot_password_emails
            .lock()
            .unwrap()
            .push(email.to_string());
        match self.forgot_password_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn reset_password(&self, _token: &str, _new_password: &str) -> Result<(), ApiError> {
        self.reset_password_calls.fetch_add(1, Ordering::SeqCst);
        match self.reset_password_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn sample_open_announcement() -> Announcement {
    Announcement {
        id: 1,
        message: "Admissions are open for the coming year.".to_string(),
        open_date: time::macros::date!(2026 - 01 - 05),
        close_date: time::macros::date!(2026 - 03 - 31),
        open: true,
        has_application_pdf: true,
        application_pdf_original_name: Some("application-form.pdf".to_string()),
    }
}

pub struct MockPublicAdmissionsBackend {
    announcement: Mutex<Result<Announcement, ApiError>>,
    submit_response: Mutex<Result<SubmissionReceipt, ApiError>>,
    submit_calls: AtomicUsize,
}

impl Default for MockPublicAdmissionsBackend {
    fn default() -> Self {
        Self {
            announcement: Mutex::new(Ok(sample_open_announcement())),
            submit_response: Mutex::new(Ok(SubmissionReceipt {
                reference_no: "ADM-2026-0001".to_string(),
            })),
            submit_calls: AtomicUsize::new(0),
        }
    }
}

impl MockPublicAdmissionsBackend {
    pub fn with_announcement(self, announcement: Announcement) -> Self {
        *self.announcement.lock().unwrap() = Ok(announcement);
        self
    }

    pub fn with_submit_error(self, err: ApiError) -> Self {
        *self.submit_response.lock().unwrap() = Err(err);
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicAdmissionsBackend for MockPublicAdmissionsBackend {
    async fn announcement(&self) -> Result<Announcement, ApiError> {
        self.announcement.lock().unwrap().clone()
    }

    async fn announcement_pdf(&self) -> Result<Vec<u8>, ApiError> {
        Ok(b"%PDF-1.4 blank form".to_vec())
    }

    async fn submit(
        &self,
        _draft: &ApplicationDraft,
        _pdf: &FileUpload,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_response.lock().unwrap().clone()
    }
}

fn summary_of(detail: &SubmissionDetail) -> SubmissionSummary {
    SubmissionSummary {
        id: detail.id,
        reference_no: detail.reference_no.clone(),
        submitted_date: detail.created_at,
        child_full_name: detail.child_full_name.clone(),
        level_applying_for: detail.level_applying_for,
        guardian_full_name: detail.guardian_full_name.clone(),
        email: detail.email.clone(),
        phone: detail.phone.clone(),
        status: detail.status,
        admin_note: detail.admin_note.clone(),
    }
}

#[derive(Default)]
pub struct MockAdminAdmissionsBackend {
    announcement: Mutex<Option<Announcement>>,
    submissions: Mutex<Vec<SubmissionDetail>>,
    parent_accounts: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    list_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl MockAdminAdmissionsBackend {
    pub fn with_announcement(self, announcement: Announcement) -> Self {
        *self.announcement.lock().unwrap() = Some(announcement);
        self
    }

    pub fn with_submissions(self, submissions: Vec<SubmissionDetail>) -> Self {
        *self.submissions.lock().unwrap() = submissions;
        self
    }

    pub fn with_existing_parent(self, email: &str) -> Self {
        self.parent_accounts.lock().unwrap().push(email.to_string());
        self
    }

    /// Makes `list` block until a permit is added; lets tests interleave an
    /// invalidation with an in-flight refresh.
    pub fn set_list_gate(&self, gate: Arc<Semaphore>) {
        *self.list_gate.lock().unwrap() = Some(gate);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn parent_accounts(&self) -> Vec<String> {
        self.parent_accounts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminAdmissionsBackend for MockAdminAdmissionsBackend {
    async fn announcement(&self) -> Result<Announcement, ApiError> {
        self.announcement
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::NotFound("No announcement published".to_string()))
    }

    async fn publish_announcement(
        &self,
        draft: &AnnouncementDraft,
        pdf: Option<&FileUpload>,
    ) -> Result<Announcement, ApiError> {
        let published = Announcement {
            id: 1,
            message: draft.message.clone(),
            open_date: draft.open_date,
            close_date: draft.close_date,
            open: true,
            has_application_pdf: pdf.is_some(),
            application_pdf_original_name: pdf.map(|p| p.file_name.clone()),
        };
        *self.announcement.lock().unwrap() = Some(published.clone());
        Ok(published)
    }

    async fn list(
        &self,
        filters: &SubmissionFilters,
    ) -> Result<Page<SubmissionSummary>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let matches: Vec<SubmissionSummary> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                filters.search.as_deref().is_none_or(|needle| {
                    contains_ignore_case(&s.child_full_name, needle)
                        || contains_ignore_case(&s.guardian_full_name, needle)
                        || contains_ignore_case(&s.reference_no, needle)
                        || contains_ignore_case(&s.email, needle)
                })
            })
            .filter(|s| filters.status.is_none_or(|status| s.status == status))
            .filter(|s| {
                filters
                    .level
                    .is_none_or(|level| s.level_applying_for == level)
            })
            .map(summary_of)
            .collect();

        Ok(page_of(matches, filters.page))
    }

    async fn detail(&self, id: i64) -> Result<SubmissionDetail, ApiError> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))
    }

    async fn update_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<SubmissionDetail, ApiError> {
        let mut submissions = self.submissions.lock().unwrap();
        let submission = submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;
        submission.status = status;
        Ok(submission.clone())
    }

    async fn update_note(&self, id: i64, note: &str) -> Result<SubmissionDetail, ApiError> {
        let mut submissions = self.submissions.lock().unwrap();
        let submission = submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;
        submission.admin_note = Some(note.to_string());
        Ok(submission.clone())
    }

    async fn submission_pdf(&self, _id: i64) -> Result<Vec<u8>, ApiError> {
        Ok(b"%PDF-1.4 filled form".to_vec())
    }

    async fn provision_parent_account(&self, email: &str) -> Result<CreatedAccount, ApiError> {
        let mut accounts = self.parent_accounts.lock().unwrap();
        if accounts.iter().any(|existing| existing == email) {
            return Err(ApiError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        accounts.push(email.to_string());
        Ok(CreatedAccount {
            id: accounts.len() as i64,
            email: email.to_string(),
            role: Role::Parent,
            active: true,
            must_change_password: true,
        })
    }
}

#[derive(Default)]
pub struct MockStaffBackend {
    records: Mutex<Vec<StaffRecord>>,
    next_id: AtomicI64,
}

impl MockStaffBackend {
    pub fn with_record(self, record: StaffRecord) -> Self {
        self.next_id.fetch_max(record.id, Ordering::SeqCst);
        self.records.lock().unwrap().push(record);
        self
    }

    pub fn records(&self) -> Vec<StaffRecord> {
        self.records.lock().unwrap().clone()
    }

    fn record_from_draft(&self, draft: &StaffDraft, has_photo: bool, with_account: bool) -> StaffRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        StaffRecord {
            id,
            employment_id: format!("EMP-{id:03}"),
            full_name: draft.full_name.clone(),
            date_of_birth: draft.date_of_birth,
            email: draft.email.clone(),
            phone_number: draft.phone_number.clone(),
            permanent_address: draft.permanent_address.clone(),
            current_address: draft.current_address.clone(),
            emergency_contact_name: draft.emergency_contact_name.clone(),
            emergency_contact_number: draft.emergency_contact_number.clone(),
            marital_status: draft.marital_status,
            date_of_joining: draft.date_of_joining,
            level_assigned: draft.level_assigned,
            designation: draft.designation,
            employment_status: draft.employment_status.unwrap_or(EmploymentStatus::Active),
            notes: draft.notes.clone(),
            has_photo,
            account_status: if with_account {
                AccountStatus::Active
            } else {
                AccountStatus::NoAccount
            },
            account_email: with_account.then(|| draft.email.clone()),
            created_at: datetime!(2026-01-15 09:00:00),
            updated_at: datetime!(2026-01-15 09:00:00),
        }
    }
}

fn staff_summary_of(record: &StaffRecord) -> StaffSummary {
    StaffSummary {
        id: record.id,
        employment_id: record.employment_id.clone(),
        full_name: record.full_name.clone(),
        email: record.email.clone(),
        phone_number: record.phone_number.clone(),
        level_assigned: record.level_assigned,
        designation: record.designation,
        employment_status: record.employment_status,
        account_status: record.account_status,
    }
}

#[async_trait]
impl StaffBackend for MockStaffBackend {
    async fn list(&self, filters: &StaffFilters) -> Result<Page<StaffSummary>, ApiError> {
        let matches: Vec<StaffSummary> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                filters.search.as_deref().is_none_or(|needle| {
                    contains_ignore_case(&r.full_name, needle)
                        || contains_ignore_case(&r.email, needle)
                        || contains_ignore_case(&r.employment_id, needle)
                })
            })
            .filter(|r| {
                filters
                    .status
                    .is_none_or(|status| r.employment_status == status)
            })
            .filter(|r| filters.level.is_none_or(|level| r.level_assigned == level))
            .filter(|r| {
                filters
                    .designation
                    .is_none_or(|designation| r.designation == designation)
            })
            .map(staff_summary_of)
            .collect();

        Ok(page_of(matches, filters.page))
    }

    async fn get(&self, id: i64) -> Result<StaffRecord, ApiError> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Staff member not found".to_string()))
    }

    async fn create(
        &self,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        let record = self.record_from_draft(draft, photo.is_some(), false);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn create_with_account(
        &self,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        let record = self.record_from_draft(draft, photo.is_some(), true);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: i64,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound("Staff member not found".to_string()))?;

        record.full_name = draft.full_name.clone();
        record.date_of_birth = draft.date_of_birth;
        record.email = draft.email.clone();
        record.phone_number = draft.phone_number.clone();
        record.permanent_address = draft.permanent_address.clone();
        record.current_address = draft.current_address.clone();
        record.emergency_contact_name = draft.emergency_contact_name.clone();
        record.emergency_contact_number = draft.emergency_contact_number.clone();
        record.marital_status = draft.marital_status;
        record.date_of_joining = draft.date_of_joining;
        record.level_assigned = draft.level_assigned;
        record.designation = draft.designation;
        if let Some(status) = draft.employment_status {
            record.employment_status = status;
        }
        record.notes = draft.notes.clone();
        if photo.is_some() {
            record.has_photo = true;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ApiError::NotFound("Staff member not found".to_string()));
        }
        Ok(())
    }

    async fn create_account(&self, id: i64) -> Result<StaffRecord, ApiError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound("Staff member not found".to_string()))?;
        if record.account_status == AccountStatus::Active {
            return Err(ApiError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        record.account_status = AccountStatus::Active;
        record.account_email = Some(record.email.clone());
        Ok(record.clone())
    }

    async fn revoke_account(&self, id: i64) -> Result<StaffRecord, ApiError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound("Staff member not found".to_string()))?;
        record.account_status = AccountStatus::Disabled;
        Ok(record.clone())
    }

    async fn photo(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        let records = self.records.lock().unwrap();
        let record = records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound("Staff member not found".to_string()))?;
        if !record.has_photo {
            return Err(ApiError::NotFound("No photo on file".to_string()));
        }
        Ok(vec![0xFF, 0xD8, 0xFF, 0xE0])
    }
}
