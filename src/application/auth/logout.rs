use crate::domain::session::SessionStore;

/// Ends the local session. The backend is deliberately not called: tokens
/// it may hold stay valid until they expire on their own, which is a
/// documented limitation of the current API rather than something to paper
/// over here.
pub struct LogoutUseCase {
    session: SessionStore,
}

impl LogoutUseCase {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    #[tracing::instrument(skip(self))]
    pub fn execute(&self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{Role, Session};
    use crate::infrastructure::session::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn logout_clears_every_session_field() {
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        session.set_session("tok", Role::Teacher, "t@school.test", true);

        LogoutUseCase::new(session.clone()).execute();

        assert_eq!(session.snapshot(), Session::default());
    }

    #[test]
    fn logout_of_anonymous_session_is_a_no_op() {
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        LogoutUseCase::new(session.clone()).execute();
        assert!(!session.is_authenticated());
    }
}
