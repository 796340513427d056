use crate::application::admissions::announcement::AnnouncementUseCase;
use crate::application::admissions::review::{ReviewSubmissionsUseCase, TransitionPolicy};
use crate::application::admissions::submit::SubmitApplicationUseCase;
use crate::application::auth::change_password::ChangePasswordUseCase;
use crate::application::auth::login::LoginUseCase;
use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::password_reset::PasswordResetUseCase;
use crate::application::routing::guard::RouteGuard;
use crate::application::staff::account::StaffAccountUseCase;
use crate::application::staff::directory::StaffDirectoryUseCase;
use crate::application::staff::manage::ManageStaffUseCase;
use crate::config::Config;
use crate::domain::admissions::{AdminAdmissionsBackend, PublicAdmissionsBackend};
use crate::domain::auth::AuthBackend;
use crate::domain::session::SessionStore;
use crate::domain::staff::StaffBackend;
use crate::infrastructure::backends::admissions::{
    HttpAdminAdmissionsBackend, HttpPublicAdmissionsBackend,
};
use crate::infrastructure::backends::auth::HttpAuthBackend;
use crate::infrastructure::backends::staff::HttpStaffBackend;
use crate::infrastructure::http::ApiClient;
use crate::shared::error::ApiError;
use std::sync::Arc;

/// Composition root: one session store, one HTTP client, and the gateways
/// wired over them. Views pull use cases from here instead of sharing
/// mutable globals; the session has a single writer (the auth use cases)
/// and everything else reads snapshots.
#[derive(Clone)]
pub struct Portal {
    session: SessionStore,
    auth: Arc<dyn AuthBackend>,
    public_admissions: Arc<dyn PublicAdmissionsBackend>,
    admin_admissions: Arc<dyn AdminAdmissionsBackend>,
    staff: Arc<dyn StaffBackend>,
    transition_policy: TransitionPolicy,
}

impl Portal {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let session = SessionStore::new(config.session_storage());
        let api = ApiClient::new(&config.api_base_url, config.http_timeout, session.clone())?;

        Ok(Self {
            session: session.clone(),
            auth: Arc::new(HttpAuthBackend::new(api.clone())),
            public_admissions: Arc::new(HttpPublicAdmissionsBackend::new(api.clone())),
            admin_admissions: Arc::new(HttpAdminAdmissionsBackend::new(api.clone())),
            staff: Arc::new(HttpStaffBackend::new(api)),
            transition_policy: TransitionPolicy::default(),
        })
    }

    /// Opt the client into refusing backwards status moves; the backend
    /// itself accepts anything.
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.clone())
    }

    pub fn login(&self) -> LoginUseCase {
        LoginUseCase::new(self.auth.clone(), self.session.clone())
    }

    pub fn logout(&self) -> LogoutUseCase {
        LogoutUseCase::new(self.session.clone())
    }

    pub fn change_password(&self) -> ChangePasswordUseCase {
        ChangePasswordUseCase::new(self.auth.clone(), self.session.clone())
    }

    pub fn password_reset(&self) -> PasswordResetUseCase {
        PasswordResetUseCase::new(self.auth.clone())
    }

    /// A fresh form per page view; its submitted state is deliberately not
    /// shared between views.
    pub fn application_form(&self) -> SubmitApplicationUseCase {
        SubmitApplicationUseCase::new(self.public_admissions.clone())
    }

    pub fn announcement(&self) -> AnnouncementUseCase {
        AnnouncementUseCase::new(self.admin_admissions.clone())
    }

    pub fn review_submissions(&self) -> ReviewSubmissionsUseCase {
        ReviewSubmissionsUseCase::new(self.admin_admissions.clone(), self.transition_policy)
    }

    pub fn staff_directory(&self) -> StaffDirectoryUseCase {
        StaffDirectoryUseCase::new(self.staff.clone())
    }

    pub fn manage_staff(&self) -> ManageStaffUseCase {
        ManageStaffUseCase::new(self.staff.clone())
    }

    pub fn staff_accounts(&self) -> StaffAccountUseCase {
        StaffAccountUseCase::new(self.staff.clone())
    }
}
