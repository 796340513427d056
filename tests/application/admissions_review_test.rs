use crate::common;
use nidus::application::admissions::review::{
    ProvisionOutcome, ReviewSubmissionsUseCase, TransitionPolicy,
};
use nidus::domain::admissions::{SubmissionFilters, SubmissionStatus};
use nidus::infrastructure::backends::mock::MockAdminAdmissionsBackend;
use nidus::shared::error::ApiError;
use nidus::shared::pagination::PAGE_SIZE;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

fn review_of(backend: Arc<MockAdminAdmissionsBackend>) -> ReviewSubmissionsUseCase {
    ReviewSubmissionsUseCase::new(backend, TransitionPolicy::default())
}

#[tokio::test]
async fn twenty_five_submissions_page_into_three() {
    let backend = Arc::new(common::seeded_admin_backend(25));
    let review = review_of(backend);

    let first = review
        .list(&SubmissionFilters::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.content.len(), PAGE_SIZE as usize);

    let last = review
        .list(&SubmissionFilters {
            page: 2,
            ..SubmissionFilters::default()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last.content.len(), 5);
    assert!(last.is_last());
}

#[tokio::test]
async fn page_past_the_end_is_rejected_not_clamped() {
    let backend = Arc::new(common::seeded_admin_backend(25));
    let review = review_of(backend);

    let err = review
        .list(&SubmissionFilters {
            page: 3,
            ..SubmissionFilters::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn search_and_status_filters_narrow_the_listing() {
    let backend = Arc::new(common::seeded_admin_backend(25));
    let review = review_of(backend);

    let by_search = review
        .list(&SubmissionFilters {
            search: Some("child 7".to_string()),
            ..SubmissionFilters::default()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_search.total_elements, 1);
    assert_eq!(by_search.content[0].child_full_name, "Child 7");

    let by_status = review
        .list(&SubmissionFilters {
            status: Some(SubmissionStatus::Accepted),
            ..SubmissionFilters::default()
        })
        .await
        .unwrap()
        .unwrap();
    assert!(by_status.is_empty());
}

#[tokio::test]
async fn status_and_note_are_saved_independently() {
    let backend = Arc::new(common::seeded_admin_backend(3));
    let review = review_of(backend);

    review
        .update_status(1, SubmissionStatus::Received, SubmissionStatus::UnderReview)
        .await
        .unwrap();
    review
        .update_note(1, "Interview panel to confirm availability.")
        .await
        .unwrap();

    let detail = review.detail(1).await.unwrap();
    assert_eq!(detail.status, SubmissionStatus::UnderReview);
    assert_eq!(
        detail.admin_note.as_deref(),
        Some("Interview panel to confirm availability.")
    );

    // Editing the note again leaves the status where it was.
    review.update_note(1, "Confirmed for Friday.").await.unwrap();
    let detail = review.detail(1).await.unwrap();
    assert_eq!(detail.status, SubmissionStatus::UnderReview);
}

#[tokio::test]
async fn accepted_submission_unlocks_parent_provisioning() {
    let backend = Arc::new(common::seeded_admin_backend(2));
    let review = review_of(backend.clone());

    let received = review.detail(1).await.unwrap();
    assert!(!review.can_provision_parent(&received));
    let err = review.provision_parent_account(&received).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    review
        .update_status(1, SubmissionStatus::Received, SubmissionStatus::Accepted)
        .await
        .unwrap();
    let accepted = review.detail(1).await.unwrap();
    assert!(review.can_provision_parent(&accepted));

    match review.provision_parent_account(&accepted).await.unwrap() {
        ProvisionOutcome::Created(account) => {
            assert_eq!(account.email, accepted.email);
            assert!(account.must_change_password);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    // Asking twice is informational, not a failure.
    let again = review.provision_parent_account(&accepted).await.unwrap();
    assert_eq!(
        again,
        ProvisionOutcome::AlreadyExists(
            "A parent account with this email already exists.".to_string()
        )
    );
    assert_eq!(backend.parent_accounts().len(), 1);
}

#[tokio::test]
async fn forward_only_policy_refuses_backwards_moves_client_side() {
    let backend = Arc::new(common::seeded_admin_backend(1));
    let review = ReviewSubmissionsUseCase::new(backend, TransitionPolicy::ForwardOnly);

    let err = review
        .update_status(1, SubmissionStatus::Received, SubmissionStatus::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    // The pipeline order is still available.
    review
        .update_status(1, SubmissionStatus::Received, SubmissionStatus::UnderReview)
        .await
        .unwrap();
    let detail = review.detail(1).await.unwrap();
    assert_eq!(detail.status, SubmissionStatus::UnderReview);
}

#[tokio::test]
async fn overtaken_listing_refresh_is_discarded() {
    let backend = Arc::new(common::seeded_admin_backend(3));
    let gate = Arc::new(Semaphore::new(0));
    backend.set_list_gate(gate.clone());

    let review = Arc::new(ReviewSubmissionsUseCase::new(
        backend.clone(),
        TransitionPolicy::default(),
    ));

    let in_flight = {
        let review = review.clone();
        tokio::spawn(async move { review.list(&SubmissionFilters::default()).await })
    };

    // Wait for the refresh to reach the backend before pulling the rug.
    for _ in 0..200 {
        if backend.list_calls() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    assert_eq!(backend.list_calls(), 1);

    review.invalidate();
    gate.add_permits(1);

    let stale = in_flight.await.unwrap().unwrap();
    assert!(stale.is_none());

    // The next refresh is current again.
    gate.add_permits(1);
    let fresh = review.list(&SubmissionFilters::default()).await.unwrap();
    assert!(fresh.is_some());
}

#[tokio::test]
async fn submission_pdf_downloads_as_bytes() {
    let backend = Arc::new(common::seeded_admin_backend(1));
    let review = review_of(backend);

    let bytes = review.download_pdf(1).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
