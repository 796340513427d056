use crate::domain::admissions::Level;
use crate::shared::error::ApiError;
use crate::shared::pagination::Page;
use crate::shared::validation::FileUpload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, PrimitiveDateTime};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmploymentStatus {
    Active,
    Resigned,
    Retired,
    Terminated,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "ACTIVE",
            EmploymentStatus::Resigned => "RESIGNED",
            EmploymentStatus::Retired => "RETIRED",
            EmploymentStatus::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the staff member has a portal login, independent of their
/// employment status. Transitions happen only via the explicit account
/// create/revoke actions (or a record delete, which revokes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    NoAccount,
    Active,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Designation {
    Principal,
    SeniorTeacher,
    AssistantTeacher,
}

impl Designation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Designation::Principal => "PRINCIPAL",
            Designation::SeniorTeacher => "SENIOR_TEACHER",
            Designation::AssistantTeacher => "ASSISTANT_TEACHER",
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

/// One row of the staff listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary {
    pub id: i64,
    pub employment_id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub level_assigned: Level,
    pub designation: Designation,
    pub employment_status: EmploymentStatus,
    pub account_status: AccountStatus,
}

/// Full staff record. `employment_id` is assigned by the backend at
/// registration and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub id: i64,
    pub employment_id: String,
    pub full_name: String,
    pub date_of_birth: Date,
    pub email: String,
    pub phone_number: String,
    pub permanent_address: String,
    pub current_address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub marital_status: Option<MaritalStatus>,
    pub date_of_joining: Date,
    pub level_assigned: Level,
    pub designation: Designation,
    pub employment_status: EmploymentStatus,
    pub notes: Option<String>,
    pub has_photo: bool,
    pub account_status: AccountStatus,
    pub account_email: Option<String>,
    #[serde(with = "crate::shared::datetime::local_timestamp")]
    pub created_at: PrimitiveDateTime,
    #[serde(with = "crate::shared::datetime::local_timestamp")]
    pub updated_at: PrimitiveDateTime,
}

/// Admin input for registering or editing a staff member. Serialized as the
/// JSON `data` part of the multipart payload.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffDraft {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub date_of_birth: Date,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Permanent address is required"))]
    pub permanent_address: String,
    #[validate(length(min = 1, message = "Current address is required"))]
    pub current_address: String,
    #[validate(length(min = 1, message = "Emergency contact name is required"))]
    pub emergency_contact_name: String,
    #[validate(length(min = 1, message = "Emergency contact number is required"))]
    pub emergency_contact_number: String,
    pub marital_status: Option<MaritalStatus>,
    pub date_of_joining: Date,
    pub level_assigned: Level,
    pub designation: Designation,
    pub employment_status: Option<EmploymentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StaffFilters {
    pub search: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub level: Option<Level>,
    pub designation: Option<Designation>,
    pub page: u32,
}

/// Admin staff surface. Create and update carry the record as a JSON `data`
/// part plus an optional `profilePhoto` part. Deletion is a soft delete
/// server-side and also revokes any linked login.
#[async_trait]
pub trait StaffBackend: Send + Sync {
    async fn list(&self, filters: &StaffFilters) -> Result<Page<StaffSummary>, ApiError>;

    async fn get(&self, id: i64) -> Result<StaffRecord, ApiError>;

    async fn create(
        &self,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError>;

    /// Registers the record and provisions a portal login in one step.
    async fn create_with_account(
        &self,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError>;

    async fn update(
        &self,
        id: i64,
        draft: &StaffDraft,
        photo: Option<&FileUpload>,
    ) -> Result<StaffRecord, ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;

    async fn create_account(&self, id: i64) -> Result<StaffRecord, ApiError>;

    async fn revoke_account(&self, id: i64) -> Result<StaffRecord, ApiError>;

    async fn photo(&self, id: i64) -> Result<Vec<u8>, ApiError>;
}
