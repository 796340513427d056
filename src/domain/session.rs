use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The three portal roles. Stored as the backend's upper-case spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Parent => "PARENT",
        }
    }

    /// Landing area for the role after login or a cross-role redirect.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Teacher => "/teacher",
            Role::Parent => "/parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "PARENT" => Ok(Role::Parent),
            _ => Err(()),
        }
    }
}

/// Point-in-time view of the client's authentication state.
///
/// Invariant: `token` is present exactly when `role` and `email` are (the
/// store only ever writes or clears all of them together). `role` is `None`
/// for an anonymous session and also when the persisted role string is not
/// one we recognize; the route guard treats the latter as not navigable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub must_change_password: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Where the four session entries live between page loads. Implementations
/// must be safe to call from a synchronous UI path; there is exactly one
/// mutator at a time (the user's own actions), so no coordination beyond
/// interior mutability is required.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub const TOKEN_KEY: &str = "auth_token";
pub const ROLE_KEY: &str = "auth_role";
pub const EMAIL_KEY: &str = "auth_email";
pub const MUST_CHANGE_PASSWORD_KEY: &str = "auth_must_change_password";

/// Typed accessors over the persisted session entries.
///
/// Readers are pure functions of current storage; writes happen only from
/// the auth use cases (login, logout, password change). Values are opaque
/// pass-through: no client-side expiry, no validation beyond presence.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Writes the full session in one step, preserving the all-or-nothing
    /// invariant.
    pub fn set_session(&self, token: &str, role: Role, email: &str, must_change_password: bool) {
        self.storage.set(TOKEN_KEY, token);
        self.storage.set(ROLE_KEY, role.as_str());
        self.storage.set(EMAIL_KEY, email);
        self.storage.set(
            MUST_CHANGE_PASSWORD_KEY,
            if must_change_password { "true" } else { "false" },
        );
    }

    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(ROLE_KEY);
        self.storage.remove(EMAIL_KEY);
        self.storage.remove(MUST_CHANGE_PASSWORD_KEY);
    }

    pub fn clear_must_change_password(&self) {
        self.storage.set(MUST_CHANGE_PASSWORD_KEY, "false");
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// The persisted role string as-is, recognized or not.
    pub fn raw_role(&self) -> Option<String> {
        self.storage.get(ROLE_KEY)
    }

    pub fn role(&self) -> Option<Role> {
        self.raw_role().and_then(|raw| raw.parse().ok())
    }

    pub fn email(&self) -> Option<String> {
        self.storage.get(EMAIL_KEY)
    }

    pub fn must_change_password(&self) -> bool {
        self.storage
            .get(MUST_CHANGE_PASSWORD_KEY)
            .as_deref()
            == Some("true")
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            role: self.role(),
            email: self.email(),
            must_change_password: self.must_change_password(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::session::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::default()))
    }

    #[test]
    fn anonymous_store_has_no_fields() {
        let store = store();
        assert!(!store.is_authenticated());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn set_session_populates_every_field() {
        let store = store();
        store.set_session("tok-1", Role::Teacher, "t@school.test", true);

        let session = store.snapshot();
        assert!(session.is_authenticated());
        assert_eq!(session.role, Some(Role::Teacher));
        assert_eq!(session.email.as_deref(), Some("t@school.test"));
        assert!(session.must_change_password);
    }

    #[test]
    fn clear_removes_every_field() {
        let store = store();
        store.set_session("tok-1", Role::Admin, "a@school.test", false);
        store.clear();

        let session = store.snapshot();
        assert!(!session.is_authenticated());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn unrecognized_role_reads_as_none_but_stays_raw() {
        let store = store();
        store.set_session("tok-1", Role::Admin, "a@school.test", false);
        store.storage.set(ROLE_KEY, "JANITOR");

        assert_eq!(store.role(), None);
        assert_eq!(store.raw_role().as_deref(), Some("JANITOR"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn must_change_flag_clears_independently() {
        let store = store();
        store.set_session("tok-1", Role::Parent, "p@school.test", true);
        store.clear_must_change_password();

        assert!(!store.must_change_password());
        assert!(store.is_authenticated());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Admin, Role::Teacher, Role::Parent] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("GUARDIAN".parse::<Role>().is_err());
    }
}
