use crate::common;
use nidus::application::auth::change_password::{ChangePasswordRequest, ChangePasswordUseCase};
use nidus::application::auth::login::{LoginRequest, LoginUseCase};
use nidus::application::auth::logout::LogoutUseCase;
use nidus::application::routing::guard::{GuardTarget, RouteDecision, RouteGuard};
use nidus::domain::session::{Role, Session};
use nidus::infrastructure::backends::mock::MockAuthBackend;
use std::sync::Arc;

#[tokio::test]
async fn admin_login_gates_navigation_by_role() {
    let backend = Arc::new(
        MockAuthBackend::default().with_account("admin@x.com", "pw", Role::Admin, false),
    );
    let session = common::memory_session();

    let data = LoginUseCase::new(backend, session.clone())
        .execute(LoginRequest {
            email: "admin@x.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("login failed");
    assert_eq!(data.role, Role::Admin);
    assert!(!data.must_change_password);

    let guard = RouteGuard::new(session);
    assert_eq!(guard.check(GuardTarget::Area(Role::Admin)), RouteDecision::Allow);

    let denied = guard.check(GuardTarget::Area(Role::Teacher));
    assert_eq!(denied, RouteDecision::RedirectToRoleHome(Role::Admin));
    assert_eq!(denied.redirect_path(), Some("/admin"));
}

#[tokio::test]
async fn forced_password_change_funnels_navigation_until_rotated() {
    let backend = Arc::new(
        MockAuthBackend::default().with_account("teacher@x.com", "temp-pw", Role::Teacher, true),
    );
    let session = common::memory_session();

    LoginUseCase::new(backend.clone(), session.clone())
        .execute(LoginRequest {
            email: "teacher@x.com".to_string(),
            password: "temp-pw".to_string(),
        })
        .await
        .expect("login failed");

    let guard = RouteGuard::new(session.clone());

    // Even the user's own area is out of reach until the password rotates.
    let funneled = guard.check(GuardTarget::Area(Role::Teacher));
    assert_eq!(funneled, RouteDecision::RedirectToChangePassword);
    assert_eq!(funneled.redirect_path(), Some("/change-password"));
    assert_eq!(
        guard.check(GuardTarget::Area(Role::Admin)),
        RouteDecision::RedirectToChangePassword
    );
    assert_eq!(guard.check(GuardTarget::ChangePassword), RouteDecision::Allow);

    ChangePasswordUseCase::new(backend, session)
        .execute(ChangePasswordRequest {
            current_password: "temp-pw".to_string(),
            new_password: "a-much-better-password".to_string(),
        })
        .await
        .expect("change failed");

    assert_eq!(guard.check(GuardTarget::Area(Role::Teacher)), RouteDecision::Allow);
}

#[tokio::test]
async fn failed_login_changes_nothing_for_the_guard() {
    let backend = Arc::new(
        MockAuthBackend::default().with_account("admin@x.com", "pw", Role::Admin, false),
    );
    let session = common::memory_session();
    let login = LoginUseCase::new(backend, session.clone());

    let err = login
        .execute(LoginRequest {
            email: "admin@x.com".to_string(),
            password: "guess".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Invalid email or password");

    assert_eq!(session.snapshot(), Session::default());
    assert_eq!(
        RouteGuard::new(session).check(GuardTarget::Area(Role::Admin)),
        RouteDecision::RedirectToLogin
    );
}

#[tokio::test]
async fn logout_returns_the_portal_to_anonymous() {
    let backend = Arc::new(
        MockAuthBackend::default().with_account("parent@x.com", "pw", Role::Parent, false),
    );
    let session = common::memory_session();

    LoginUseCase::new(backend, session.clone())
        .execute(LoginRequest {
            email: "parent@x.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("login failed");

    LogoutUseCase::new(session.clone()).execute();

    assert_eq!(session.snapshot(), Session::default());
    assert_eq!(
        RouteGuard::new(session).check(GuardTarget::Area(Role::Parent)),
        RouteDecision::RedirectToLogin
    );
}
