use nidus::domain::admissions::{Level, SubmissionDetail, SubmissionStatus};
use nidus::domain::session::SessionStore;
use nidus::infrastructure::backends::mock::MockAdminAdmissionsBackend;
use nidus::infrastructure::session::MemoryStorage;
use std::sync::Arc;
use time::macros::{date, datetime};

pub fn memory_session() -> SessionStore {
    SessionStore::new(Arc::new(MemoryStorage::default()))
}

pub fn submission(
    id: i64,
    child: &str,
    status: SubmissionStatus,
    email: &str,
) -> SubmissionDetail {
    SubmissionDetail {
        id,
        reference_no: format!("ADM-2026-{id:04}"),
        child_full_name: child.to_string(),
        date_of_birth: date!(2022 - 09 - 03),
        level_applying_for: Level::Lkg1,
        guardian_full_name: format!("Guardian of {child}"),
        email: email.to_string(),
        phone: "0779876543".to_string(),
        address: "7 Flower Road".to_string(),
        submitted_pdf_original_name: Some("filled.pdf".to_string()),
        status,
        admin_note: None,
        created_at: datetime!(2026-02-01 10:00:00),
        updated_at: datetime!(2026-02-01 10:00:00),
    }
}

/// An admin backend seeded with `count` freshly received submissions.
pub fn seeded_admin_backend(count: i64) -> MockAdminAdmissionsBackend {
    let submissions = (1..=count)
        .map(|id| {
            submission(
                id,
                &format!("Child {id}"),
                SubmissionStatus::Received,
                &format!("guardian{id}@family.test"),
            )
        })
        .collect();
    MockAdminAdmissionsBackend::default().with_submissions(submissions)
}
