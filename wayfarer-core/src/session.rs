use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::credentials;
use crate::identity::{Identity, Role};
use crate::repository::{IdentityRepository, SessionStore};
use crate::{Error, Result};

/// An authenticated connection window. The opaque `token` is the only
/// thing the client ever holds; everything else stays server-side.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub identity_id: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn issue(identity: &Identity, ttl: Duration) -> Self {
        let now = Utc::now();
        Session {
            token: Uuid::new_v4().simple().to_string(),
            identity_id: identity.id,
            role: identity.role,
            created_at: now,
            expires_at: now + ttl,
        }
    }
}

/// Issues, resolves and revokes sessions against an injected token store.
pub struct SessionAuthority {
    identities: Arc<dyn IdentityRepository>,
    sessions: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionAuthority {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        sessions: Arc<dyn SessionStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            identities,
            sessions,
            ttl,
        }
    }

    /// Verify credentials and open a new session. Every call issues a
    /// fresh token; existing sessions for the same identity are left alone.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let identity = self
            .identities
            .find_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !credentials::verify_password(&identity.password_hash, password) {
            // Rows written before hashing was introduced store the raw
            // password. Accept the match one last time and overwrite the
            // credential with a proper hash.
            if identity.password_hash.as_bytes() != password.as_bytes() {
                return Err(Error::InvalidCredentials);
            }
            let rehashed = credentials::hash_password(password)?;
            self.identities
                .update_password_hash(identity.id, &rehashed)
                .await?;
            tracing::info!(identity = identity.id, "re-hashed legacy plaintext credential");
        }

        let session = Session::issue(&identity, self.ttl);
        self.sessions.put(session.clone()).await?;
        tracing::info!(identity = identity.id, role = %identity.role, "session opened");
        Ok(session)
    }

    /// Look up a token. An expired entry is dropped by the read that
    /// rejects it; there is no background sweep and no sliding expiry.
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>> {
        let Some(session) = self.sessions.get(token).await? else {
            return Ok(None);
        };
        if Utc::now() > session.expires_at {
            self.sessions.remove(token).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Drop a session. Revoking an unknown token is not an error.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        self.sessions.remove(token).await
    }
}
