use nidus::application::auth::login::{LoginRequest, LoginUseCase};
use nidus::application::auth::logout::LogoutUseCase;
use nidus::application::routing::guard::{GuardTarget, RouteDecision, RouteGuard};
use nidus::domain::session::{Role, SessionStore};
use nidus::infrastructure::backends::mock::MockAuthBackend;
use nidus::infrastructure::session::FileStorage;
use std::path::PathBuf;
use std::sync::Arc;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("nidus-it-{}-{}.json", name, std::process::id()))
}

fn file_session(path: &PathBuf) -> SessionStore {
    SessionStore::new(Arc::new(FileStorage::new(path.clone())))
}

#[tokio::test]
async fn session_survives_a_full_restart() {
    let path = temp_path("restart");
    let _ = std::fs::remove_file(&path);

    let backend = Arc::new(
        MockAuthBackend::default().with_account("parent@x.com", "pw", Role::Parent, false),
    );
    LoginUseCase::new(backend, file_session(&path))
        .execute(LoginRequest {
            email: "parent@x.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("login failed");

    // A brand-new store over the same file is the "reloaded page".
    let reopened = file_session(&path);
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.role(), Some(Role::Parent));
    assert_eq!(
        RouteGuard::new(reopened.clone()).check(GuardTarget::Area(Role::Parent)),
        RouteDecision::Allow
    );

    LogoutUseCase::new(reopened).execute();

    let after_logout = file_session(&path);
    assert!(!after_logout.is_authenticated());
    assert_eq!(after_logout.email(), None);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn must_change_flag_survives_a_restart_and_keeps_gating() {
    let path = temp_path("flag");
    let _ = std::fs::remove_file(&path);

    let backend = Arc::new(
        MockAuthBackend::default().with_account("new@x.com", "temp", Role::Teacher, true),
    );
    LoginUseCase::new(backend, file_session(&path))
        .execute(LoginRequest {
            email: "new@x.com".to_string(),
            password: "temp".to_string(),
        })
        .await
        .expect("login failed");

    let reopened = file_session(&path);
    assert!(reopened.must_change_password());
    assert_eq!(
        RouteGuard::new(reopened).check(GuardTarget::Area(Role::Teacher)),
        RouteDecision::RedirectToChangePassword
    );

    let _ = std::fs::remove_file(&path);
}
