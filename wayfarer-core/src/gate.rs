use std::sync::Arc;

use crate::identity::Role;
use crate::session::{Session, SessionAuthority};
use crate::{Error, Result};

/// Policy check wrapped around every gated operation.
pub struct AccessGate {
    authority: Arc<SessionAuthority>,
}

impl AccessGate {
    pub fn new(authority: Arc<SessionAuthority>) -> Self {
        Self { authority }
    }

    /// Resolve a bearer token to a live session, or refuse the request.
    pub async fn require_session(&self, token: Option<&str>) -> Result<Session> {
        let token = token.ok_or(Error::Unauthenticated)?;
        self.authority
            .resolve(token)
            .await?
            .ok_or(Error::Unauthenticated)
    }
}

/// Exact role match. Admin is not implicitly granted tourist-only
/// operations, nor the other way around.
pub fn require_role(session: &Session, role: Role) -> Result<()> {
    if session.role == role {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use wayfarer_store::{MemoryIdentityRepository, MemorySessionStore};

    fn session_with_role(role: Role) -> Session {
        let now = Utc::now();
        Session {
            token: "tok".into(),
            identity_id: 7,
            role,
            created_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn role_check_is_an_exact_match() {
        let admin = session_with_role(Role::Admin);
        let tourist = session_with_role(Role::Tourist);

        assert!(require_role(&admin, Role::Admin).is_ok());
        assert!(require_role(&tourist, Role::Tourist).is_ok());
        assert!(matches!(require_role(&admin, Role::Tourist), Err(Error::Forbidden)));
        assert!(matches!(require_role(&tourist, Role::Admin), Err(Error::Forbidden)));
    }

    #[tokio::test]
    async fn missing_or_unknown_tokens_are_unauthenticated() {
        let authority = Arc::new(SessionAuthority::new(
            Arc::new(MemoryIdentityRepository::new()),
            Arc::new(MemorySessionStore::new()),
            Duration::hours(3),
        ));
        let gate = AccessGate::new(authority);

        assert!(matches!(gate.require_session(None).await, Err(Error::Unauthenticated)));
        assert!(matches!(
            gate.require_session(Some("not-a-token")).await,
            Err(Error::Unauthenticated)
        ));
    }
}
