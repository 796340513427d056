use crate::domain::session::Role;
use crate::shared::error::ApiError;
use crate::shared::pagination::Page;
use crate::shared::validation::FileUpload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, PrimitiveDateTime};
use validator::Validate;

/// Class levels offered by the nursery. Used both for the level a child
/// applies for and for the level a staff member is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Lkg1,
    Ukg1,
    Ukg2,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Lkg1, Level::Ukg1, Level::Ukg2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Lkg1 => "LKG1",
            Level::Ukg1 => "UKG1",
            Level::Ukg2 => "UKG2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an application after it lands. The backend accepts any
/// transition; whether the client restricts them is a policy decision made
/// by the review use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Received,
    UnderReview,
    InterviewRequested,
    InterviewScheduled,
    OnHold,
    Accepted,
    RejectedAfterReview,
    RejectedAfterInterview,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 8] = [
        SubmissionStatus::Received,
        SubmissionStatus::UnderReview,
        SubmissionStatus::InterviewRequested,
        SubmissionStatus::InterviewScheduled,
        SubmissionStatus::OnHold,
        SubmissionStatus::Accepted,
        SubmissionStatus::RejectedAfterReview,
        SubmissionStatus::RejectedAfterInterview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Received => "RECEIVED",
            SubmissionStatus::UnderReview => "UNDER_REVIEW",
            SubmissionStatus::InterviewRequested => "INTERVIEW_REQUESTED",
            SubmissionStatus::InterviewScheduled => "INTERVIEW_SCHEDULED",
            SubmissionStatus::OnHold => "ON_HOLD",
            SubmissionStatus::Accepted => "ACCEPTED",
            SubmissionStatus::RejectedAfterReview => "REJECTED_AFTER_REVIEW",
            SubmissionStatus::RejectedAfterInterview => "REJECTED_AFTER_INTERVIEW",
        }
    }

    /// Rejections end the lifecycle; an accepted application ends it too
    /// once a parent account exists.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::RejectedAfterReview | SubmissionStatus::RejectedAfterInterview
        )
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

/// The admissions window as published by an admin. `open` is derived by the
/// backend from the date range and never recomputed client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub message: String,
    pub open_date: Date,
    pub close_date: Date,
    pub open: bool,
    pub has_application_pdf: bool,
    pub application_pdf_original_name: Option<String>,
}

/// Admin input for publishing or replacing the announcement.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDraft {
    #[validate(length(min = 1, message = "Announcement message is required"))]
    pub message: String,
    pub open_date: Date,
    pub close_date: Date,
}

/// A parent's application form, minus the attached PDF. Reference fields
/// are immutable once submitted.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[validate(length(min = 1, message = "Child's full name is required"))]
    pub child_full_name: String,
    pub date_of_birth: Date,
    pub level_applying_for: Level,
    #[validate(length(min = 1, message = "Guardian's full name is required"))]
    pub guardian_full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// Returned by a successful submission; the reference number is
/// server-generated, unique, and the only handle the submitter keeps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub reference_no: String,
}

/// One row of the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: i64,
    pub reference_no: String,
    #[serde(with = "crate::shared::datetime::local_timestamp")]
    pub submitted_date: PrimitiveDateTime,
    pub child_full_name: String,
    pub level_applying_for: Level,
    pub guardian_full_name: String,
    pub email: String,
    pub phone: String,
    pub status: SubmissionStatus,
    pub admin_note: Option<String>,
}

/// Full view of a single application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetail {
    pub id: i64,
    pub reference_no: String,
    pub child_full_name: String,
    pub date_of_birth: Date,
    pub level_applying_for: Level,
    pub guardian_full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub submitted_pdf_original_name: Option<String>,
    pub status: SubmissionStatus,
    pub admin_note: Option<String>,
    #[serde(with = "crate::shared::datetime::local_timestamp")]
    pub created_at: PrimitiveDateTime,
    #[serde(with = "crate::shared::datetime::local_timestamp")]
    pub updated_at: PrimitiveDateTime,
}

/// Admin listing filters. `page` is zero-based; the size is fixed at ten.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilters {
    pub search: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub level: Option<Level>,
    pub page: u32,
}

/// A freshly provisioned portal login, tied to a submission's email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccount {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub must_change_password: bool,
}

/// Unauthenticated admissions surface.
#[async_trait]
pub trait PublicAdmissionsBackend: Send + Sync {
    async fn announcement(&self) -> Result<Announcement, ApiError>;

    /// The blank application form, as published by the admin.
    async fn announcement_pdf(&self) -> Result<Vec<u8>, ApiError>;

    async fn submit(
        &self,
        draft: &ApplicationDraft,
        pdf: &FileUpload,
    ) -> Result<SubmissionReceipt, ApiError>;
}

/// Admin admissions surface; every call requires an admin session token.
#[async_trait]
pub trait AdminAdmissionsBackend: Send + Sync {
    async fn announcement(&self) -> Result<Announcement, ApiError>;

    async fn publish_announcement(
        &self,
        draft: &AnnouncementDraft,
        pdf: Option<&FileUpload>,
    ) -> Result<Announcement, ApiError>;

    async fn list(&self, filters: &SubmissionFilters)
    -> Result<Page<SubmissionSummary>, ApiError>;

    async fn detail(&self, id: i64) -> Result<SubmissionDetail, ApiError>;

    async fn update_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<SubmissionDetail, ApiError>;

    async fn update_note(&self, id: i64, note: &str) -> Result<SubmissionDetail, ApiError>;

    async fn submission_pdf(&self, id: i64) -> Result<Vec<u8>, ApiError>;

    /// Creates a parent portal login for the given email. Duplicate emails
    /// come back as a Conflict error.
    async fn provision_parent_account(&self, email: &str) -> Result<CreatedAccount, ApiError>;
}
