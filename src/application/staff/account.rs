use crate::domain::staff::{StaffBackend, StaffRecord};
use crate::shared::error::ApiError;
use std::sync::Arc;

/// Outcome of provisioning a staff login. As with parent accounts, hitting
/// an email that already has one is information for the admin, not an
/// alarm.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountOutcome {
    Created(StaffRecord),
    AlreadyExists(String),
}

/// Explicit create/revoke of the portal login attached to a staff record.
pub struct StaffAccountUseCase {
    backend: Arc<dyn StaffBackend>,
}

impl StaffAccountUseCase {
    pub fn new(backend: Arc<dyn StaffBackend>) -> Self {
        Self { backend }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, id: i64) -> Result<AccountOutcome, ApiError> {
        match self.backend.create_account(id).await {
            Ok(record) => Ok(AccountOutcome::Created(record)),
            Err(ApiError::Conflict(_)) => Ok(AccountOutcome::AlreadyExists(
                "An account with this email already exists.".to_string(),
            )),
            Err(err) => Err(err),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn revoke(&self, id: i64) -> Result<StaffRecord, ApiError> {
        self.backend.revoke_account(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::staff::fixtures::sample_record;
    use crate::domain::staff::{AccountStatus, Designation};
    use crate::infrastructure::backends::mock::MockStaffBackend;

    #[tokio::test]
    async fn create_activates_the_account() {
        let backend = Arc::new(
            MockStaffBackend::default()
                .with_record(sample_record(1, "Amara Silva", Designation::Principal)),
        );
        let use_case = StaffAccountUseCase::new(backend);

        match use_case.create(1).await.unwrap() {
            AccountOutcome::Created(record) => {
                assert_eq!(record.account_status, AccountStatus::Active);
                assert_eq!(record.account_email.as_deref(), Some("staff1@school.test"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_account_reads_as_informational() {
        let backend = Arc::new(
            MockStaffBackend::default()
                .with_record(sample_record(1, "Amara Silva", Designation::Principal)),
        );
        let use_case = StaffAccountUseCase::new(backend);

        use_case.create(1).await.unwrap();
        let outcome = use_case.create(1).await.unwrap();

        assert!(matches!(outcome, AccountOutcome::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn revoke_disables_rather_than_deletes() {
        let backend = Arc::new(
            MockStaffBackend::default()
                .with_record(sample_record(1, "Amara Silva", Designation::Principal)),
        );
        let use_case = StaffAccountUseCase::new(backend);

        use_case.create(1).await.unwrap();
        let record = use_case.revoke(1).await.unwrap();

        assert_eq!(record.account_status, AccountStatus::Disabled);
    }

    #[tokio::test]
    async fn missing_record_surfaces_not_found() {
        let use_case = StaffAccountUseCase::new(Arc::new(MockStaffBackend::default()));
        let err = use_case.create(42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
