use crate::domain::session::{Role, Session, SessionStore};

pub const LOGIN_PATH: &str = "/login";
pub const CHANGE_PASSWORD_PATH: &str = "/change-password";

/// A gated navigation target: either one of the role-scoped dashboard areas
/// or the change-password screen (which any authenticated role may visit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardTarget {
    ChangePassword,
    Area(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToChangePassword,
    RedirectToRoleHome(Role),
}

impl RouteDecision {
    /// Where to send the user, or `None` when the target may render.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToLogin => Some(LOGIN_PATH),
            RouteDecision::RedirectToChangePassword => Some(CHANGE_PASSWORD_PATH),
            RouteDecision::RedirectToRoleHome(role) => Some(role.home_path()),
        }
    }
}

/// Decides whether a navigation may render, from session state alone.
///
/// The order of the checks is load-bearing: the forced password change
/// outranks a role mismatch, so a user who must rotate their password is
/// sent to the change-password screen even when they asked for somebody
/// else's area.
pub fn evaluate(session: &Session, target: GuardTarget) -> RouteDecision {
    if !session.is_authenticated() {
        return RouteDecision::RedirectToLogin;
    }

    if session.must_change_password && target != GuardTarget::ChangePassword {
        return RouteDecision::RedirectToChangePassword;
    }

    if let GuardTarget::Area(required) = target {
        return match session.role {
            None => RouteDecision::RedirectToLogin,
            Some(role) if role != required => RouteDecision::RedirectToRoleHome(role),
            Some(_) => RouteDecision::Allow,
        };
    }

    RouteDecision::Allow
}

/// Convenience wrapper that reads the session store fresh on every check;
/// decisions are never cached across navigations.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn check(&self, target: GuardTarget) -> RouteDecision {
        evaluate(&self.session.snapshot(), target)
    }
}
