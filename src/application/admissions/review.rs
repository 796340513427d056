use crate::domain::admissions::{
    AdminAdmissionsBackend, CreatedAccount, SubmissionDetail, SubmissionFilters,
    SubmissionStatus, SubmissionSummary,
};
use crate::shared::error::ApiError;
use crate::shared::pagination::{Page, ensure_page_in_range};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifecycle of the detail dialog, owned by the listing view rather than by
/// a widget. `Submitting` covers both a status save and a note save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
    Submitting,
}

impl DialogState {
    pub fn open(&mut self) {
        *self = DialogState::Open;
    }

    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    pub fn begin_submit(&mut self) {
        if *self == DialogState::Open {
            *self = DialogState::Submitting;
        }
    }

    pub fn finish_submit(&mut self) {
        if *self == DialogState::Submitting {
            *self = DialogState::Open;
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }
}

/// Which status changes the client permits. The backend accepts any
/// transition; `Unrestricted` mirrors that, while `ForwardOnly` overlays
/// the natural review pipeline for deployments that want the client to
/// refuse obvious mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Unrestricted,
    ForwardOnly,
}

impl TransitionPolicy {
    pub fn permits(&self, from: SubmissionStatus, to: SubmissionStatus) -> bool {
        match self {
            TransitionPolicy::Unrestricted => true,
            TransitionPolicy::ForwardOnly => {
                use SubmissionStatus::*;
                matches!(
                    (from, to),
                    (Received, UnderReview)
                        | (UnderReview, InterviewRequested)
                        | (UnderReview, OnHold)
                        | (UnderReview, Accepted)
                        | (UnderReview, RejectedAfterReview)
                        | (InterviewRequested, InterviewScheduled)
                        | (InterviewRequested, OnHold)
                        | (InterviewScheduled, Accepted)
                        | (InterviewScheduled, RejectedAfterInterview)
                        | (InterviewScheduled, OnHold)
                        | (OnHold, UnderReview)
                        | (OnHold, InterviewRequested)
                        | (OnHold, InterviewScheduled)
                )
            }
        }
    }
}

/// Outcome of asking for a parent account. A duplicate email is expected
/// during re-review and reads as information, not failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionOutcome {
    Created(CreatedAccount),
    AlreadyExists(String),
}

/// Admin review of submissions: filtered listing, per-submission status and
/// note edits, and parent-account provisioning for accepted applications.
pub struct ReviewSubmissionsUseCase {
    backend: Arc<dyn AdminAdmissionsBackend>,
    policy: TransitionPolicy,
    list_generation: AtomicU64,
}

impl ReviewSubmissionsUseCase {
    pub fn new(backend: Arc<dyn AdminAdmissionsBackend>, policy: TransitionPolicy) -> Self {
        Self {
            backend,
            policy,
            list_generation: AtomicU64::new(0),
        }
    }

    /// Drops the result of any refresh still in flight. Called when the
    /// listing view goes away or its filters change under the request.
    pub fn invalidate(&self) {
        self.list_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Fetches one page of the listing. Returns `Ok(None)` when a newer
    /// refresh or an invalidation overtook this one while it was in
    /// flight; the caller simply ignores that response. Last issued wins.
    #[tracing::instrument(skip(self), fields(page = filters.page))]
    pub async fn list(
        &self,
        filters: &SubmissionFilters,
    ) -> Result<Option<Page<SubmissionSummary>>, ApiError> {
        let ticket = self.list_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let page = self.backend.list(filters).await?;
        ensure_page_in_range(&page, filters.page)?;

        if self.list_generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!("discarding stale submission listing");
            return Ok(None);
        }
        Ok(Some(page))
    }

    pub async fn detail(&self, id: i64) -> Result<SubmissionDetail, ApiError> {
        self.backend.detail(id).await
    }

    /// Applies a status change, subject to the configured policy. Status
    /// and note are saved by separate calls; editing one never touches the
    /// other.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i64,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<SubmissionDetail, ApiError> {
        if !self.policy.permits(from, to) {
            return Err(ApiError::Validation(format!(
                "Status change {from} to {to} is not allowed."
            )));
        }
        self.backend.update_status(id, to).await
    }

    pub async fn update_note(&self, id: i64, note: &str) -> Result<SubmissionDetail, ApiError> {
        self.backend.update_note(id, note).await
    }

    pub async fn download_pdf(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.backend.submission_pdf(id).await
    }

    /// The provisioning action is only offered once a submission reaches
    /// `Accepted`; it is never triggered automatically by the transition.
    pub fn can_provision_parent(&self, detail: &SubmissionDetail) -> bool {
        detail.status == SubmissionStatus::Accepted
    }

    #[tracing::instrument(skip(self, detail), fields(id = detail.id))]
    pub async fn provision_parent_account(
        &self,
        detail: &SubmissionDetail,
    ) -> Result<ProvisionOutcome, ApiError> {
        if !self.can_provision_parent(detail) {
            return Err(ApiError::Validation(
                "Only accepted applications can receive a parent account.".to_string(),
            ));
        }

        match self.backend.provision_parent_account(&detail.email).await {
            Ok(account) => Ok(ProvisionOutcome::Created(account)),
            Err(ApiError::Conflict(_)) => Ok(ProvisionOutcome::AlreadyExists(
                "A parent account with this email already exists.".to_string(),
            )),
            Err(err) => Err(err),
        }
    }
}
